use const_hsp::{
    COMMAND_BYTE_ACK, COMMAND_BYTE_DATA, COMMAND_BYTE_DATA_ACK, COMMAND_BYTE_ERROR,
    COMMAND_BYTE_ERROR_UNDEF, COMMAND_BYTE_PING, COMMAND_BYTE_PONG,
};

/// The fixed command set, one wire byte each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Data,
    DataAck,
    Ack,
    Error,
    Ping,
    Pong,
    ErrorUndef,
}

impl Command {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            COMMAND_BYTE_DATA => Some(Command::Data),
            COMMAND_BYTE_DATA_ACK => Some(Command::DataAck),
            COMMAND_BYTE_ACK => Some(Command::Ack),
            COMMAND_BYTE_ERROR => Some(Command::Error),
            COMMAND_BYTE_PING => Some(Command::Ping),
            COMMAND_BYTE_PONG => Some(Command::Pong),
            COMMAND_BYTE_ERROR_UNDEF => Some(Command::ErrorUndef),
            _ => None,
        }
    }

    pub fn byte(self) -> u8 {
        match self {
            Command::Data => COMMAND_BYTE_DATA,
            Command::DataAck => COMMAND_BYTE_DATA_ACK,
            Command::Ack => COMMAND_BYTE_ACK,
            Command::Error => COMMAND_BYTE_ERROR,
            Command::Ping => COMMAND_BYTE_PING,
            Command::Pong => COMMAND_BYTE_PONG,
            Command::ErrorUndef => COMMAND_BYTE_ERROR_UNDEF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Command; 7] = [
        Command::Data,
        Command::DataAck,
        Command::Ack,
        Command::Error,
        Command::Ping,
        Command::Pong,
        Command::ErrorUndef,
    ];

    #[test]
    fn test_byte_values() {
        assert_eq!(Command::Data.byte(), 0);
        assert_eq!(Command::DataAck.byte(), 1);
        assert_eq!(Command::Ack.byte(), 2);
        assert_eq!(Command::Error.byte(), 3);
        assert_eq!(Command::Ping.byte(), 4);
        assert_eq!(Command::Pong.byte(), 5);
        assert_eq!(Command::ErrorUndef.byte(), 6);
    }

    #[test]
    fn test_byte_roundtrip() {
        for command in ALL.iter() {
            assert_eq!(Command::from_byte(command.byte()), Some(*command));
        }
    }

    #[test]
    fn test_unknown_bytes() {
        for byte in 7..=u8::MAX {
            assert_eq!(Command::from_byte(byte), None);
        }
    }
}
