//! # HSP Message Model
//!
//! The closed set of protocol messages and the byte grammar each one maps
//! to. A frame starts with a one byte [`Command`]; depending on the command
//! it continues with an opaque varint [`MessageId`], a varint type code, a
//! varint payload length, and the raw payload bytes, in that order:
//!
//! ```txt
//! Data:        command(1) | payloadType(varint) | length(varint) | payload(length)
//! DataAck:     command(1) | messageId(varint)   | payloadType(varint) | length(varint) | payload(length)
//! Ack:         command(1) | messageId(varint)
//! Error:       command(1) | messageId(varint)   | errorType(varint) | length(varint) | payload(length)
//! ErrorUndef:  command(1) | messageId(varint)
//! Ping:        command(1)
//! Pong:        command(1)
//! ```
//!
//! [`Message::serialize`] writes this layout; the decoder in `codec_hsp`
//! inverts it incrementally.
#![no_std]

extern crate alloc;

pub mod command;
pub mod message;

pub use command::Command;
pub use message::{Message, MessageId};
