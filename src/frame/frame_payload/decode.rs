use crate::frame::mask;
use futures::prelude::*;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Reads exactly one frame payload from the transport, unmasking it on the fly. Returns
/// `UnexpectedEof` if the transport ends before the announced length has been read.
#[derive(Debug)]
pub struct FramePayloadReader<T: AsyncRead + Unpin> {
    transport: T,
    mask: Option<[u8; 4]>,
    payload_len: u16,
    completion: usize,
}

impl<T: AsyncRead + Unpin> FramePayloadReader<T> {
    pub fn new(transport: T, mask: Option<[u8; 4]>, payload_len: u16) -> Self {
        Self {
            transport,
            mask,
            payload_len,
            completion: 0,
        }
    }
    pub fn into_inner(self) -> T {
        self.transport
    }
    pub fn remaining(&self) -> usize {
        self.payload_len as usize - self.completion
    }
    pub fn finished(&self) -> bool {
        self.remaining() == 0
    }
}

impl<T: AsyncRead + Unpin> AsyncRead for FramePayloadReader<T> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        if this.finished() || buf.is_empty() {
            return Poll::Ready(Ok(0));
        }
        let max = this.remaining().min(buf.len());
        match Pin::new(&mut this.transport).poll_read(cx, &mut buf[0..max]) {
            Poll::Ready(Ok(0)) => Poll::Ready(Err(io::ErrorKind::UnexpectedEof.into())),
            Poll::Ready(Ok(n)) => {
                if let Some(key) = this.mask {
                    mask(key, this.completion, &mut buf[0..n]);
                }
                this.completion += n;
                Poll::Ready(Ok(n))
            }
            p => p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::prelude::*;

    #[test]
    fn stops_at_payload_end() {
        let transport: &[u8] = &[0x7f, 0x9f, 0x4d, 0x51, 0x58, 0x81, 0x00];
        let mut reader = FramePayloadReader::new(transport, Some([0x37, 0xfa, 0x21, 0x3d]), 5);
        let mut payload = Vec::new();
        block_on(reader.read_to_end(&mut payload)).unwrap();
        assert_eq!(&payload, b"Hello");
        assert!(reader.finished());
        assert_eq!(reader.into_inner(), &[0x81, 0x00]);
    }

    #[test]
    fn short_transport_is_an_error() {
        let transport: &[u8] = &[1, 2, 3];
        let mut reader = FramePayloadReader::new(transport, None, 10);
        let mut payload = [0u8; 10];
        let err = block_on(reader.read_exact(&mut payload)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
