use core::fmt;

/// Frame level decode failures.
///
/// Every variant except [`DecodeError::MissingFields`] can be triggered by a
/// peer and is handled locally: the decoder records it, clears its partial
/// frame, and discards the rest of the stream. `MissingFields` means the
/// state machine advanced past a checkpoint without recording the field it
/// is responsible for, which is a defect in the decoder itself and surfaces
/// as a panic at the emission site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    InvalidCommand(u8),
    VarintParseError,
    VarintTooLong,
    InvalidPayloadType(u32),
    InvalidErrorType(u32),
    MaxLengthExceeded { length: usize, limit: usize },
    MissingFields(&'static str),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DecodeError::*;
        match self {
            InvalidCommand(byte) => {
                write!(f, "not existing command `{:#04x}`", byte)
            }
            VarintParseError => {
                write!(f, "malformed varint field")
            }
            VarintTooLong => {
                write!(f, "message id varint exceeds the configured byte bound")
            }
            InvalidPayloadType(code) => {
                write!(f, "payload type `{:#x}` not present in the registry", code)
            }
            InvalidErrorType(code) => {
                write!(f, "error type `{:#x}` not present in the registry", code)
            }
            MaxLengthExceeded { length, limit } => {
                write!(
                    f,
                    "payload length `{}` exceeds max payload bytes `{}`",
                    length, limit
                )
            }
            MissingFields(field) => {
                write!(f, "`{}` missing at message emission", field)
            }
        }
    }
}
