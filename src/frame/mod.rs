mod decode;
mod encode;
mod frame_head;
mod frame_payload;

pub use decode::*;
pub use encode::*;
pub use frame_head::*;
pub use frame_payload::*;

use crate::consts::OPCODE_TEXT;

/// Kinds of frames this server exchanges. Only unfragmented text frames are supported, every
/// other opcode (continuation, binary and all control frames) is rejected while decoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameKind {
    Text,
}

impl FrameKind {
    pub fn opcode(self) -> u8 {
        match self {
            FrameKind::Text => OPCODE_TEXT,
        }
    }
}
