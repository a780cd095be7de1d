//! Server side of a text-only WebSocket channel implemented directly on a byte stream: the
//! upgrade handshake, single-frame text messages and a timestamping echo.

pub mod connection;
pub mod consts;
pub mod frame;
pub mod http;
pub mod message;
