mod config;

pub use config::*;

use crate::frame::{FrameDecodeError, FrameDecoder, FrameEncodeError, FrameEncoder};
use crate::http::{
    accept_token, is_upgrade_request, opening_key, read_request_head, render_handshake_response,
    render_plain_response, HandshakeError,
};
use crate::message::{stamp, MalformedPayload};
use futures::prelude::*;
use std::io;

/// Body served to plain HTTP requests.
pub const PLAIN_BODY: &str = "Hello World";

/// A server side websocket connection after a completed handshake. Exactly one frame is decoded
/// or encoded at a time.
pub struct WsConnection<T: AsyncRead + AsyncWrite + Unpin> {
    transport: T,
    decoder: FrameDecoder,
    encoder: FrameEncoder,
}

impl<T: AsyncRead + AsyncWrite + Unpin> WsConnection<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            decoder: FrameDecoder::server(),
            encoder: FrameEncoder::server(),
        }
    }
    /// Returns the next message, or `None` if the peer closed the stream between frames.
    pub async fn receive(&mut self) -> Result<Option<Vec<u8>>, WsConnectionError> {
        match self.decoder.decode(&mut self.transport).await {
            Ok(payload) => Ok(Some(payload)),
            Err(FrameDecodeError::Closed) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
    pub async fn send(&mut self, payload: &[u8]) -> Result<(), WsConnectionError> {
        let frame = self.encoder.encode_vec(payload)?;
        self.transport.write_all(&frame).await?;
        self.transport.flush().await?;
        Ok(())
    }
    pub fn into_inner(self) -> T {
        self.transport
    }
}

/// Reads the request head and completes the upgrade. Plain HTTP requests are answered and closed,
/// yielding `None`.
pub async fn accept<T: AsyncRead + AsyncWrite + Unpin>(
    mut transport: T,
) -> Result<Option<WsConnection<T>>, WsConnectionError> {
    let request = read_request_head(&mut transport).await?;
    let key = match (is_upgrade_request(&request), opening_key(&request)) {
        (true, Some(key)) => key,
        _ => {
            log::info!("plain http request: {} {}", request.method(), request.uri());
            transport
                .write_all(render_plain_response(PLAIN_BODY).as_bytes())
                .await?;
            transport.close().await?;
            return Ok(None);
        }
    };
    log::info!("{} connected", String::from_utf8_lossy(key));
    let response = render_handshake_response(&accept_token(key));
    transport.write_all(response.as_bytes()).await?;
    transport.flush().await?;
    Ok(Some(WsConnection::new(transport)))
}

/// Serves one connection: handshake, then a stamped echo for every message until the peer closes
/// the stream. Returns the number of echoed messages. Any error ends the connection.
pub async fn serve<T: AsyncRead + AsyncWrite + Unpin>(
    transport: T,
) -> Result<usize, WsConnectionError> {
    let mut ws = match accept(transport).await? {
        Some(ws) => ws,
        None => return Ok(0),
    };
    let mut count = 0usize;
    while let Some(payload) = ws.receive().await? {
        log::debug!("received: {}", String::from_utf8_lossy(&payload));
        let response = stamp(&payload)?;
        ws.send(&response).await?;
        count += 1;
    }
    Ok(count)
}

#[derive(thiserror::Error, Debug)]
pub enum WsConnectionError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("handshake error: {0}")]
    Handshake(#[from] HandshakeError),
    #[error("decode error: {0}")]
    FrameDecodeError(#[from] FrameDecodeError),
    #[error("encode error: {0}")]
    FrameEncodeError(#[from] FrameEncodeError),
    #[error(transparent)]
    MalformedPayload(#[from] MalformedPayload),
}
