//! # HSP Codec
//!
//! Turns an ordered byte stream into typed protocol messages and back.
//!
//! A [`Decoder`] is owned by exactly one connection. The transport appends
//! every received chunk to that connection's [`ByteCursor`] and calls
//! [`Decoder::decode`] on each readiness event; the call returns the
//! messages completed so far and suspends cleanly when a frame is still
//! partial, whatever the fragmentation. A grammar violation parks the
//! decoder in its terminal discarding state: the protocol has no resync
//! token, so the rest of the stream is dropped until the transport closes
//! the connection.
//!
//! Outbound, [`encode`] is a pure function from message to frame bytes and
//! may be called from any thread.
//!
//! ```
//! use codec_hsp::{encode, ByteCursor, Decoder, Message};
//!
//! let mut decoder = Decoder::new();
//! let mut cursor = ByteCursor::new();
//! cursor.feed(&encode(&Message::Ping));
//! assert_eq!(decoder.decode(&mut cursor), vec![Message::Ping]);
//! ```

mod decoder;
mod encoder;
mod error;
mod registry;

pub use decoder::{Decoder, DecoderConfig, DecoderState};
pub use encoder::encode;
pub use error::DecodeError;
pub use registry::{TypeEntry, TypeRegistry};

pub use buffer_hsp::{ByteCursor, ReleaseError, Slice};
pub use framing_hsp::{Command, Message, MessageId};
