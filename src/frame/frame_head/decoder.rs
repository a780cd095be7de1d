use crate::consts::MAX_HEAD_LEN;
use crate::frame::{FrameDecodeError, FrameHead, FrameHeadParseError};
use futures::prelude::*;
use std::pin::Pin;
use std::task::{Context, Poll};

// Reads a frame head from the transport without consuming any payload bytes.
#[derive(Copy, Clone, Debug, Default)]
pub struct FrameHeadDecoder {}

impl FrameHeadDecoder {
    pub fn decode<T: AsyncRead + Unpin>(self, transport: T) -> FrameHeadDecode<T> {
        FrameHeadDecode {
            buffer: [0u8; MAX_HEAD_LEN],
            buffer_len: 0,
            transport: Some(transport),
        }
    }
}

pub struct FrameHeadDecode<T: AsyncRead + Unpin> {
    buffer: [u8; MAX_HEAD_LEN],
    buffer_len: usize,
    transport: Option<T>,
}

impl<T: AsyncRead + Unpin> Future for FrameHeadDecode<T> {
    type Output = Result<(T, FrameHead), FrameDecodeError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut transport = match self.transport.take() {
            Some(transport) => transport,
            None => panic!("FrameHeadDecode polled after completion"),
        };
        loop {
            let min = match FrameHead::parse(&self.buffer[0..self.buffer_len]) {
                Ok(head) => return Poll::Ready(Ok((transport, head))),
                Err(FrameHeadParseError::Incomplete(min)) => min,
                Err(err) => return Poll::Ready(Err(err.into())),
            };
            let buffer_len = self.buffer_len;
            match Pin::new(&mut transport).poll_read(cx, &mut self.buffer[buffer_len..min]) {
                Poll::Ready(Ok(0)) => {
                    return Poll::Ready(Err(match buffer_len {
                        0 => FrameDecodeError::Closed,
                        _ => FrameDecodeError::TruncatedFrame,
                    }))
                }
                Poll::Ready(Ok(n)) => self.buffer_len += n,
                Poll::Ready(Err(err)) => return Poll::Ready(Err(err.into())),
                Poll::Pending => {
                    self.transport = Some(transport);
                    return Poll::Pending;
                }
            }
        }
    }
}
