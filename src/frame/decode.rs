use crate::frame::{FrameHeadDecoder, FrameHeadParseError};
use futures::prelude::*;
use std::io;

#[derive(thiserror::Error, Debug)]
pub enum FrameDecodeError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("parse error: {0}")]
    ParseErr(#[from] FrameHeadParseError),
    #[error("stream ended before the frame was complete")]
    TruncatedFrame,
    #[error("frame from client is not masked")]
    Unmasked,
    #[error("stream closed")]
    Closed,
}

/// Reads one complete frame per call. Holds no state between frames.
#[derive(Copy, Clone, Debug)]
pub struct FrameDecoder {
    pub require_mask: bool,
}

impl FrameDecoder {
    pub fn server() -> Self {
        Self { require_mask: true }
    }
    pub fn client() -> Self {
        Self {
            require_mask: false,
        }
    }
    /// Reads the frame head and the payload and returns the unmasked payload. Nothing is returned
    /// unless the whole payload was read.
    pub async fn decode<T: AsyncRead + Unpin>(
        &self,
        transport: T,
    ) -> Result<Vec<u8>, FrameDecodeError> {
        let (transport, head) = FrameHeadDecoder::default().decode(transport).await?;
        if self.require_mask && head.mask.is_none() {
            return Err(FrameDecodeError::Unmasked);
        }
        log::debug!("frame head: {:?}", head);
        let mut payload = vec![0u8; head.payload_len as usize];
        head.payload_reader(transport)
            .read_exact(&mut payload)
            .await
            .map_err(|err| match err.kind() {
                io::ErrorKind::UnexpectedEof => FrameDecodeError::TruncatedFrame,
                _ => FrameDecodeError::Io(err),
            })?;
        log::trace!("unmasked payload: {:02x?}", payload);
        Ok(payload)
    }
}

/// Reads one masked client frame from `transport` and returns its unmasked payload.
pub async fn decode_header_and_unmask<T: AsyncRead + Unpin>(
    transport: T,
) -> Result<Vec<u8>, FrameDecodeError> {
    FrameDecoder::server().decode(transport).await
}
