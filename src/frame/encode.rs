use crate::consts::MAX_PAYLOAD_LEN;
use crate::frame::{FrameHead, FrameKind};
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct FrameEncoder<R: RngCore = StdRng> {
    pub mask_rng: Option<R>,
}

impl FrameEncoder<StdRng> {
    pub fn client() -> Self {
        Self {
            mask_rng: Some(StdRng::from_entropy()),
        }
    }
    pub fn server() -> Self {
        Self { mask_rng: None }
    }
}

impl<R: RngCore> FrameEncoder<R> {
    pub fn head(&mut self, payload_len: usize) -> Result<FrameHead, FrameEncodeError> {
        if payload_len > MAX_PAYLOAD_LEN {
            return Err(FrameEncodeError::FrameTooLarge(payload_len));
        }
        Ok(FrameHead {
            kind: FrameKind::Text,
            mask: self
                .mask_rng
                .as_mut()
                .map(|rng| rng.next_u32().to_ne_bytes()),
            payload_len: payload_len as u16,
        })
    }
    pub fn encode_vec(&mut self, payload: &[u8]) -> Result<Vec<u8>, FrameEncodeError> {
        let head = self.head(payload.len())?;
        Ok(head.encode_vec(payload))
    }
}

/// Encodes `message` as a single unmasked text frame, the way a server sends it.
pub fn encode(message: &[u8]) -> Result<Vec<u8>, FrameEncodeError> {
    FrameEncoder::server().encode_vec(message)
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FrameEncodeError {
    #[error("payload of {0} bytes exceeds the 16-bit frame length limit")]
    FrameTooLarge(usize),
}
