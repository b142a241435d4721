use std::sync::Arc;

use binary_hsp::varint;
use buffer_hsp::{ByteCursor, Slice};
use const_hsp::{MAX_MESSAGE_ID_BYTES, MAX_PAYLOAD_BYTES};
use framing_hsp::{Command, Message, MessageId};
use tracing::{debug, error};

use crate::{DecodeError, TypeRegistry};

/// Cursor position of the decoder inside a frame.
///
/// The state is a checkpoint: it only advances once the bytes behind it have
/// been consumed and their value recorded, so a decode attempt that runs out
/// of input can resume from the same state without re-reading anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    ReadCommand,
    ReadMessageId,
    ReadPayloadType,
    ReadErrorType,
    ReadPayloadLength,
    ReadPayload,
    /// Terminal. The stream is corrupted and has no resync token; everything
    /// from here on is dropped until the transport closes the connection.
    Discarding,
}

/// Limits and registries applied by a [`Decoder`].
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    pub max_payload_bytes: usize,
    pub max_message_id_bytes: usize,
    pub payload_types: Arc<TypeRegistry>,
    pub error_types: Arc<TypeRegistry>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: MAX_PAYLOAD_BYTES,
            max_message_id_bytes: MAX_MESSAGE_ID_BYTES,
            payload_types: Arc::new(TypeRegistry::new()),
            error_types: Arc::new(TypeRegistry::new()),
        }
    }
}

/// Partially collected fields of the frame being decoded.
#[derive(Debug, Default)]
struct DecodeContext {
    command: Option<Command>,
    message_id: Option<MessageId>,
    payload_type: Option<u32>,
    error_type: Option<u32>,
    payload_length: Option<usize>,
    payload: Option<Slice>,
}

impl DecodeContext {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn take_message(&mut self) -> Result<Message, DecodeError> {
        let command = self.command.ok_or(DecodeError::MissingFields("command"))?;
        match command {
            Command::Data => Ok(Message::Data {
                payload_type: self
                    .payload_type
                    .take()
                    .ok_or(DecodeError::MissingFields("payload type"))?,
                payload: self
                    .payload
                    .take()
                    .ok_or(DecodeError::MissingFields("payload"))?,
            }),
            Command::DataAck => Ok(Message::DataAck {
                id: self
                    .message_id
                    .take()
                    .ok_or(DecodeError::MissingFields("message id"))?,
                payload_type: self
                    .payload_type
                    .take()
                    .ok_or(DecodeError::MissingFields("payload type"))?,
                payload: self
                    .payload
                    .take()
                    .ok_or(DecodeError::MissingFields("payload"))?,
            }),
            Command::Ack => Ok(Message::Ack {
                id: self
                    .message_id
                    .take()
                    .ok_or(DecodeError::MissingFields("message id"))?,
            }),
            Command::Error => Ok(Message::Error {
                id: self
                    .message_id
                    .take()
                    .ok_or(DecodeError::MissingFields("message id"))?,
                error_type: self
                    .error_type
                    .take()
                    .ok_or(DecodeError::MissingFields("error type"))?,
                payload: self
                    .payload
                    .take()
                    .ok_or(DecodeError::MissingFields("payload"))?,
            }),
            Command::ErrorUndef => Ok(Message::ErrorUndef {
                id: self
                    .message_id
                    .take()
                    .ok_or(DecodeError::MissingFields("message id"))?,
            }),
            Command::Ping => Ok(Message::Ping),
            Command::Pong => Ok(Message::Pong),
        }
    }
}

/// Incremental frame decoder for one connection.
///
/// Owns its partial frame state across calls, so the transport may hand it
/// input in whatever fragments arrive. Never invoked concurrently for one
/// connection; distinct connections use distinct instances.
#[derive(Debug)]
pub struct Decoder {
    state: DecoderState,
    ctx: DecodeContext,
    config: DecoderConfig,
    last_error: Option<DecodeError>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        debug!(
            "initialized decoder: max_payload_bytes={}, max_message_id_bytes={}, payload_types={}, error_types={}",
            config.max_payload_bytes,
            config.max_message_id_bytes,
            config.payload_types.len(),
            config.error_types.len()
        );
        Self {
            state: DecoderState::ReadCommand,
            ctx: DecodeContext::default(),
            config,
            last_error: None,
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// The failure that moved this decoder into [`DecoderState::Discarding`],
    /// if any.
    pub fn last_error(&self) -> Option<&DecodeError> {
        self.last_error.as_ref()
    }

    /// Consumes whatever complete frames `cursor` currently holds.
    ///
    /// Emits zero or more messages per call: after each emission the next
    /// frame is attempted immediately. When input runs out mid frame the
    /// call returns with the decoder parked at its checkpoint and nothing of
    /// the pending field consumed; feed more bytes and call again.
    pub fn decode(&mut self, cursor: &mut ByteCursor) -> Vec<Message> {
        let mut out = Vec::new();
        loop {
            let progressed = match self.state {
                DecoderState::ReadCommand => self.read_command(cursor, &mut out),
                DecoderState::ReadMessageId => self.read_message_id(cursor, &mut out),
                DecoderState::ReadPayloadType => self.read_payload_type(cursor),
                DecoderState::ReadErrorType => self.read_error_type(cursor),
                DecoderState::ReadPayloadLength => self.read_payload_length(cursor, &mut out),
                DecoderState::ReadPayload => self.read_payload(cursor, &mut out),
                DecoderState::Discarding => {
                    cursor.skip_all();
                    false
                }
            };
            if !progressed {
                return out;
            }
        }
    }

    fn read_command(&mut self, cursor: &mut ByteCursor, out: &mut Vec<Message>) -> bool {
        let byte = match cursor.read_byte() {
            Some(byte) => byte,
            None => return false,
        };
        let command = match Command::from_byte(byte) {
            Some(command) => command,
            None => {
                self.fail(DecodeError::InvalidCommand(byte));
                return true;
            }
        };
        self.ctx.command = Some(command);
        match command {
            Command::Data => self.state = DecoderState::ReadPayloadType,
            Command::DataAck | Command::Ack | Command::Error | Command::ErrorUndef => {
                self.state = DecoderState::ReadMessageId
            }
            Command::Ping | Command::Pong => self.emit(out),
        }
        true
    }

    fn read_message_id(&mut self, cursor: &mut ByteCursor, out: &mut Vec<Message>) -> bool {
        let run = match varint::span(cursor.peekable(), self.config.max_message_id_bytes) {
            Ok(run) => run.to_vec(),
            Err(binary_hsp::Error::Incomplete) => return false,
            Err(_) => {
                self.fail(DecodeError::VarintTooLong);
                return true;
            }
        };
        cursor.skip(run.len());
        self.ctx.message_id = Some(MessageId::from(run));
        match self.ctx.command {
            Some(Command::Ack) | Some(Command::ErrorUndef) => self.emit(out),
            Some(Command::DataAck) => self.state = DecoderState::ReadPayloadType,
            Some(Command::Error) => self.state = DecoderState::ReadErrorType,
            command => panic!("message id read for command {:?}", command),
        }
        true
    }

    fn read_payload_type(&mut self, cursor: &mut ByteCursor) -> bool {
        let (code, used) = match varint::decode_u32(cursor.peekable(), varint::U32_MAX_BYTES) {
            Ok(decoded) => decoded,
            Err(binary_hsp::Error::Incomplete) => return false,
            Err(_) => {
                self.fail(DecodeError::VarintParseError);
                return true;
            }
        };
        if !self.config.payload_types.validate(code) {
            self.fail(DecodeError::InvalidPayloadType(code));
            return true;
        }
        cursor.skip(used);
        self.ctx.payload_type = Some(code);
        self.state = DecoderState::ReadPayloadLength;
        true
    }

    fn read_error_type(&mut self, cursor: &mut ByteCursor) -> bool {
        let (code, used) = match varint::decode_u32(cursor.peekable(), varint::U32_MAX_BYTES) {
            Ok(decoded) => decoded,
            Err(binary_hsp::Error::Incomplete) => return false,
            Err(_) => {
                self.fail(DecodeError::VarintParseError);
                return true;
            }
        };
        if !self.config.error_types.validate(code) {
            self.fail(DecodeError::InvalidErrorType(code));
            return true;
        }
        cursor.skip(used);
        self.ctx.error_type = Some(code);
        self.state = DecoderState::ReadPayloadLength;
        true
    }

    fn read_payload_length(&mut self, cursor: &mut ByteCursor, out: &mut Vec<Message>) -> bool {
        let (length, used) = match varint::decode_u32(cursor.peekable(), varint::U32_MAX_BYTES) {
            Ok(decoded) => decoded,
            Err(binary_hsp::Error::Incomplete) => return false,
            Err(_) => {
                self.fail(DecodeError::VarintParseError);
                return true;
            }
        };
        let length = length as usize;
        if length > self.config.max_payload_bytes {
            self.fail(DecodeError::MaxLengthExceeded {
                length,
                limit: self.config.max_payload_bytes,
            });
            return true;
        }
        cursor.skip(used);
        if length == 0 {
            self.ctx.payload = Some(cursor.empty_slice());
            self.emit(out);
            return true;
        }
        self.ctx.payload_length = Some(length);
        self.state = DecoderState::ReadPayload;
        true
    }

    fn read_payload(&mut self, cursor: &mut ByteCursor, out: &mut Vec<Message>) -> bool {
        let length = self
            .ctx
            .payload_length
            .expect("payload length recorded before entering payload read");
        let payload = match cursor.read_slice(length) {
            Some(payload) => payload,
            None => return false,
        };
        self.ctx.payload = Some(payload);
        self.emit(out);
        true
    }

    fn emit(&mut self, out: &mut Vec<Message>) {
        let message = match self.ctx.take_message() {
            Ok(message) => message,
            // A missing field here means the state machine advanced past a
            // checkpoint without recording it; peer input cannot cause this.
            Err(err) => panic!("decoder invariant violated: {}", err),
        };
        out.push(message);
        self.ctx.clear();
        self.state = DecoderState::ReadCommand;
    }

    fn fail(&mut self, err: DecodeError) {
        error!("decode failed: {}; discarding connection input", err);
        self.ctx.clear();
        self.last_error = Some(err);
        self.state = DecoderState::Discarding;
    }
}
