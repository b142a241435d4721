//! Central repository for all the hsp constants
#![no_std]

pub const COMMAND_BYTE_DATA: u8 = 0;
pub const COMMAND_BYTE_DATA_ACK: u8 = 1;
pub const COMMAND_BYTE_ACK: u8 = 2;
pub const COMMAND_BYTE_ERROR: u8 = 3;
pub const COMMAND_BYTE_PING: u8 = 4;
pub const COMMAND_BYTE_PONG: u8 = 5;
pub const COMMAND_BYTE_ERROR_UNDEF: u8 = 6;

/// Upper bound on a declared payload length unless the decoder is configured
/// with a different one.
pub const MAX_PAYLOAD_BYTES: usize = 8192;

/// Default cap on the byte length of a message id run. Five varint bytes are
/// enough to carry any 32 bit id.
pub const MAX_MESSAGE_ID_BYTES: usize = 5;
