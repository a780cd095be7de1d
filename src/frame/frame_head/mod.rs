mod decoder;

pub use decoder::*;

use crate::consts::{
    FIN_BIT, MASK_BIT, MASK_KEY_LEN, OPCODE_BITS, RSV_BITS, SEVEN_BIT_MAX, SIXTEEN_BIT_MARKER,
    SIXTY_FOUR_BIT_MARKER,
};
use crate::frame::{mask, FrameKind, FramePayloadReader};
use futures::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameHead {
    pub kind: FrameKind,
    pub mask: Option<[u8; 4]>,
    pub payload_len: u16,
}

impl FrameHead {
    pub fn payload_reader<T: AsyncRead + Unpin>(self, transport: T) -> FramePayloadReader<T> {
        FramePayloadReader::new(transport, self.mask, self.payload_len)
    }
    pub fn parse(buffer: &[u8]) -> Result<FrameHead, FrameHeadParseError> {
        if buffer.len() < 2 {
            return Err(FrameHeadParseError::Incomplete(2));
        }
        if buffer[0] & RSV_BITS != 0 {
            return Err(FrameHeadParseError::RsvBit);
        }
        let kind = match buffer[0] & OPCODE_BITS {
            n if n == FrameKind::Text.opcode() => FrameKind::Text,
            n => return Err(FrameHeadParseError::UnsupportedOpcode(n)),
        };
        if buffer[0] & FIN_BIT == 0 {
            return Err(FrameHeadParseError::Fragmented);
        }
        let masked = buffer[1] & MASK_BIT != 0;
        let length_indicator = buffer[1] & !MASK_BIT;
        let extra_payload_len_bytes = match length_indicator {
            0..=SEVEN_BIT_MAX => 0usize,
            SIXTEEN_BIT_MARKER => 2usize,
            SIXTY_FOUR_BIT_MARKER => return Err(FrameHeadParseError::UnsupportedLengthEncoding),
            _ => unreachable!("length indicator is masked to 7 bits"),
        };
        let expected_buffer_len = 2 + extra_payload_len_bytes + masked as usize * MASK_KEY_LEN;
        if buffer.len() < expected_buffer_len {
            return Err(FrameHeadParseError::Incomplete(expected_buffer_len));
        }
        let payload_len = match extra_payload_len_bytes {
            0 => length_indicator as u16,
            _ => u16::from_be_bytes([buffer[2], buffer[3]]),
        };
        let mask = match masked {
            true => {
                let mut mask = [0u8; MASK_KEY_LEN];
                mask.copy_from_slice(&buffer[2 + extra_payload_len_bytes..expected_buffer_len]);
                Some(mask)
            }
            false => None,
        };
        Ok(FrameHead {
            kind,
            mask,
            payload_len,
        })
    }
    // Length of the encoded frame head in bytes ([2..8]).
    pub fn len_bytes(&self) -> usize {
        let extra_payload_len_bytes = match self.payload_len {
            0..=125 => 0usize,
            _ => 2usize,
        };
        2 + extra_payload_len_bytes + self.mask.map_or(0, |_| MASK_KEY_LEN)
    }
    // Writes the frame head to `buffer`. Panics if `buffer` is shorter than
    // [len_bytes()][`Self::len_bytes()`].
    pub fn encode(&self, buffer: &mut [u8]) {
        buffer[0] = FIN_BIT | self.kind.opcode();
        buffer[1] = match self.payload_len {
            0..=125 => self.payload_len as u8,
            _ => SIXTEEN_BIT_MARKER,
        };
        let mut offset = 2;
        if buffer[1] == SIXTEEN_BIT_MARKER {
            buffer[2..4].copy_from_slice(&self.payload_len.to_be_bytes());
            offset = 4;
        }
        if let Some(mask) = self.mask {
            buffer[offset..offset + MASK_KEY_LEN].copy_from_slice(&mask);
            buffer[1] |= MASK_BIT;
        }
    }
    // Encodes head and payload into one buffer, masking the payload if the head carries a key.
    pub fn encode_vec(&self, payload: &[u8]) -> Vec<u8> {
        debug_assert_eq!(payload.len(), self.payload_len as usize);
        let head_len = self.len_bytes();
        let mut buffer = vec![0u8; head_len + payload.len()];
        self.encode(&mut buffer);
        buffer[head_len..].copy_from_slice(payload);
        if let Some(key) = self.mask {
            mask(key, 0, &mut buffer[head_len..]);
        }
        buffer
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FrameHeadParseError {
    #[error("incomplete, need at least {0} bytes")]
    Incomplete(usize),
    #[error("one or more RSV bit is set")]
    RsvBit,
    #[error("unsupported opcode {0:#x}, only text frames are accepted")]
    UnsupportedOpcode(u8),
    #[error("fragmented messages are not supported")]
    Fragmented,
    #[error("64-bit payload length encoding is not supported")]
    UnsupportedLengthEncoding,
}
