use crate::consts::WEBSOCKET_GUID;
use futures::prelude::*;
use http::{HeaderValue, Request, Version};
use ring::digest::{Context, SHA1_FOR_LEGACY_USE_ONLY};
use std::io;

/// Upper bound for an HTTP request head read from a fresh connection.
pub const MAX_REQUEST_HEAD_LEN: usize = 8 * 1024;
const MAX_HEADERS: usize = 64;

pub fn is_upgrade_request<T>(request: &Request<T>) -> bool {
    request.method() == http::Method::GET
        && request
            .headers()
            .get_all("Connection")
            .iter()
            .flat_map(|v| v.as_bytes().split(|&c| c == b' ' || c == b','))
            .any(|h| h.eq_ignore_ascii_case(b"Upgrade"))
        && request
            .headers()
            .get("Upgrade")
            .filter(|v| v.as_bytes().eq_ignore_ascii_case(b"websocket"))
            .is_some()
        && request.headers().get("Sec-WebSocket-Key").is_some()
}

/// The client's opening key, taken verbatim.
pub fn opening_key<T>(request: &Request<T>) -> Option<&[u8]> {
    request
        .headers()
        .get("Sec-WebSocket-Key")
        .map(HeaderValue::as_bytes)
}

pub fn accept_token<K: AsRef<[u8]>>(opening_key: K) -> String {
    let mut ctx = Context::new(&SHA1_FOR_LEGACY_USE_ONLY);
    ctx.update(opening_key.as_ref());
    ctx.update(WEBSOCKET_GUID.as_bytes());
    base64::encode(ctx.finish())
}

pub fn render_handshake_response(accept_token: &str) -> String {
    format!(
        "HTTP/1.1 101 Switching Protocols\r\n\
         Upgrade: websocket\r\n\
         Connection: Upgrade\r\n\
         Sec-WebSocket-Accept: {}\r\n\
         \r\n",
        accept_token
    )
}

/// Response for plain HTTP requests that do not ask for an upgrade.
pub fn render_plain_response(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {}",
        body.len(),
        body
    )
}

/// Reads an HTTP request head from the transport. Bytes are read one at a time so nothing past
/// the blank line terminating the head is consumed.
pub async fn read_request_head<T: AsyncRead + Unpin>(
    mut transport: T,
) -> Result<Request<()>, HandshakeError> {
    let mut head = Vec::with_capacity(512);
    let mut byte = [0u8; 1];
    while !head.ends_with(b"\r\n\r\n") {
        if head.len() == MAX_REQUEST_HEAD_LEN {
            return Err(HandshakeError::HeadTooLarge);
        }
        match transport.read(&mut byte).await? {
            0 if head.is_empty() => return Err(HandshakeError::Closed),
            0 => return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into()),
            _ => head.push(byte[0]),
        }
    }
    parse_request_head(&head)
}

fn parse_request_head(head: &[u8]) -> Result<Request<()>, HandshakeError> {
    let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
    let mut parsed = httparse::Request::new(&mut headers);
    if parsed.parse(head)?.is_partial() {
        return Err(HandshakeError::Incomplete);
    }
    let mut builder = Request::builder()
        .method(parsed.method.unwrap_or_default())
        .uri(parsed.path.unwrap_or_default())
        .version(match parsed.version {
            Some(0) => Version::HTTP_10,
            _ => Version::HTTP_11,
        });
    for header in parsed.headers.iter() {
        builder = builder.header(header.name, header.value);
    }
    Ok(builder.body(())?)
}

#[derive(thiserror::Error, Debug)]
pub enum HandshakeError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("connection closed before a request was received")]
    Closed,
    #[error("request head exceeds {} bytes", MAX_REQUEST_HEAD_LEN)]
    HeadTooLarge,
    #[error("incomplete request head")]
    Incomplete,
    #[error("malformed request head: {0}")]
    Parse(#[from] httparse::Error),
    #[error("invalid request: {0}")]
    Http(#[from] http::Error),
}
