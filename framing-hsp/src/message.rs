use alloc::vec::Vec;

use binary_hsp::varint;
use buffer_hsp::Slice;

use crate::Command;

/// Opaque correlation id: the raw bytes of one varint run.
///
/// An id is never interpreted as a machine integer, it may be wider than any
/// native width. Two ids are the same exactly when their bytes are the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(Vec<u8>);

impl MessageId {
    /// Builds the id carrying `id` as its numeric value.
    pub fn from_u32(id: u32) -> Self {
        let mut bytes = Vec::with_capacity(varint::encoded_len_u32(id));
        varint::push_u32(&mut bytes, id);
        Self(bytes)
    }

    /// Accepts `bytes` as an id when they form exactly one varint run:
    /// non-empty, continuation bit set on every byte but the last.
    pub fn from_varint_bytes(bytes: Vec<u8>) -> Option<Self> {
        match varint::span(&bytes, bytes.len()) {
            Ok(run) if run.len() == bytes.len() => Some(Self(bytes)),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw id bytes from the decoder, already delimited as a varint run.
impl From<Vec<u8>> for MessageId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// A complete protocol message.
///
/// Payload bearing variants hold a [`Slice`]: decoded messages view the
/// receive storage without copying, outbound messages wrap an owned buffer
/// via `Slice::from(Vec<u8>)`. Either way the slice follows the
/// one-release-per-acquire contract.
#[derive(Debug, PartialEq, Eq)]
pub enum Message {
    Data {
        payload_type: u32,
        payload: Slice,
    },
    DataAck {
        id: MessageId,
        payload_type: u32,
        payload: Slice,
    },
    Ack {
        id: MessageId,
    },
    Error {
        id: MessageId,
        error_type: u32,
        payload: Slice,
    },
    ErrorUndef {
        id: MessageId,
    },
    Ping,
    Pong,
}

impl Message {
    pub fn command(&self) -> Command {
        match self {
            Message::Data { .. } => Command::Data,
            Message::DataAck { .. } => Command::DataAck,
            Message::Ack { .. } => Command::Ack,
            Message::Error { .. } => Command::Error,
            Message::ErrorUndef { .. } => Command::ErrorUndef,
            Message::Ping => Command::Ping,
            Message::Pong => Command::Pong,
        }
    }

    /// Exact number of bytes [`Message::serialize`] writes.
    pub fn encoded_len(&self) -> usize {
        1 + match self {
            Message::Data { payload_type, payload } => {
                varint::encoded_len_u32(*payload_type)
                    + varint::encoded_len_u32(payload.len() as u32)
                    + payload.len()
            }
            Message::DataAck {
                id,
                payload_type,
                payload,
            } => {
                id.len()
                    + varint::encoded_len_u32(*payload_type)
                    + varint::encoded_len_u32(payload.len() as u32)
                    + payload.len()
            }
            Message::Ack { id } => id.len(),
            Message::Error {
                id,
                error_type,
                payload,
            } => {
                id.len()
                    + varint::encoded_len_u32(*error_type)
                    + varint::encoded_len_u32(payload.len() as u32)
                    + payload.len()
            }
            Message::ErrorUndef { id } => id.len(),
            Message::Ping | Message::Pong => 0,
        }
    }

    /// Appends the frame bytes for this message to `dst`.
    ///
    /// Payload bytes are copied out of the slice; the slice itself and its
    /// read state are left untouched for callers who retain it.
    pub fn serialize(&self, dst: &mut Vec<u8>) {
        dst.push(self.command().byte());
        match self {
            Message::Data { payload_type, payload } => {
                varint::push_u32(dst, *payload_type);
                varint::push_u32(dst, payload.len() as u32);
                dst.extend_from_slice(payload.as_ref());
            }
            Message::DataAck {
                id,
                payload_type,
                payload,
            } => {
                dst.extend_from_slice(id.as_bytes());
                varint::push_u32(dst, *payload_type);
                varint::push_u32(dst, payload.len() as u32);
                dst.extend_from_slice(payload.as_ref());
            }
            Message::Ack { id } => {
                dst.extend_from_slice(id.as_bytes());
            }
            Message::Error {
                id,
                error_type,
                payload,
            } => {
                dst.extend_from_slice(id.as_bytes());
                varint::push_u32(dst, *error_type);
                varint::push_u32(dst, payload.len() as u32);
                dst.extend_from_slice(payload.as_ref());
            }
            Message::ErrorUndef { id } => {
                dst.extend_from_slice(id.as_bytes());
            }
            Message::Ping | Message::Pong => {}
        }
    }
}
