use futures::io::{AsyncRead, AsyncWrite};
use raw_ws::frame::FrameEncoder;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

#[allow(dead_code)]
pub const UPGRADE_REQUEST: &[u8] = b"GET / HTTP/1.1\r\n\
    Host: localhost:3333\r\n\
    Connection: Upgrade\r\n\
    Upgrade: websocket\r\n\
    Sec-WebSocket-Version: 13\r\n\
    Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
    \r\n";

#[allow(dead_code)]
pub const HANDSHAKE_RESPONSE: &[u8] = b"HTTP/1.1 101 Switching Protocols\r\n\
    Upgrade: websocket\r\n\
    Connection: Upgrade\r\n\
    Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n\
    \r\n";

// In-memory transport: reads from a fixed input, collects everything written.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct MockTransport {
    input: Vec<u8>,
    position: usize,
    pub output: Vec<u8>,
    pub closed: bool,
}

impl MockTransport {
    #[allow(dead_code)]
    pub fn new(input: Vec<u8>) -> Self {
        Self {
            input,
            ..Self::default()
        }
    }
}

impl AsyncRead for MockTransport {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        let remaining = &self.input[self.position..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.position += n;
        Poll::Ready(Ok(n))
    }
}

impl AsyncWrite for MockTransport {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.output.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }
    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
    fn poll_close(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.closed = true;
        Poll::Ready(Ok(()))
    }
}

pub fn client_frame(payload: &[u8]) -> Vec<u8> {
    FrameEncoder::client().encode_vec(payload).unwrap()
}

#[allow(dead_code)]
pub fn masked_frame(head: &[u8], key: [u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut frame = head.to_vec();
    frame.extend_from_slice(&key);
    frame.extend(payload.iter().enumerate().map(|(i, b)| b ^ key[i % 4]));
    frame
}
