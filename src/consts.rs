//! Protocol constants fixed by RFC 6455 and by the limits of this server.

/// Appended to the client's `Sec-WebSocket-Key` before hashing.
pub const WEBSOCKET_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

pub const FIN_BIT: u8 = 0x80;
pub const RSV_BITS: u8 = 0x70;
pub const OPCODE_BITS: u8 = 0x0F;
pub const OPCODE_TEXT: u8 = 0x01;

pub const MASK_BIT: u8 = 0x80;
pub const MASK_KEY_LEN: usize = 4;

/// Largest payload length that fits the 7-bit inline length field.
pub const SEVEN_BIT_MAX: u8 = 125;
pub const SIXTEEN_BIT_MARKER: u8 = 126;
/// Announces a 64-bit extended length, which this server rejects.
pub const SIXTY_FOUR_BIT_MARKER: u8 = 127;

/// Largest payload this server encodes or accepts (the 16-bit extended length class).
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

/// Longest frame head: 2 fixed bytes, 2 bytes extended length and the mask key.
pub const MAX_HEAD_LEN: usize = 2 + 2 + MASK_KEY_LEN;
