use crate::codec::decode_cstring;
use crate::datatypes::CommandId;
use std::fmt;
use std::io::Cursor;

/// The three bind flavours. The simulator remembers which one a client used
/// but accepts every command regardless of it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BindType {
    Transmitter,
    Receiver,
    Transceiver,
}

impl BindType {
    /// Bind flavour for a bind request id, `None` for any other command.
    pub fn from_command(command_id: CommandId) -> Option<BindType> {
        match command_id {
            CommandId::BindTransmitter => Some(BindType::Transmitter),
            CommandId::BindReceiver => Some(BindType::Receiver),
            CommandId::BindTransceiver => Some(BindType::Transceiver),
            _ => None,
        }
    }

    pub fn command_id(self) -> CommandId {
        match self {
            BindType::Transmitter => CommandId::BindTransmitter,
            BindType::Receiver => CommandId::BindReceiver,
            BindType::Transceiver => CommandId::BindTransceiver,
        }
    }
}

impl fmt::Display for BindType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BindType::Transmitter => "transmitter",
            BindType::Receiver => "receiver",
            BindType::Transceiver => "transceiver",
        };
        f.write_str(name)
    }
}

/// Leading fields of a bind_transmitter / bind_receiver / bind_transceiver
/// body. interface_version, addr_ton, addr_npi and address_range follow on the
/// wire but are not read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindRequest {
    pub system_id: String,
    pub password: String,
    pub system_type: String,
}

impl BindRequest {
    /// Reads system_id, password and system_type as consecutive C-strings from
    /// the start of the body. Missing terminators never fail the decode.
    pub fn decode(body: &[u8]) -> BindRequest {
        let mut buf = Cursor::new(body);
        let system_id = decode_cstring(&mut buf);
        let password = decode_cstring(&mut buf);
        let system_type = decode_cstring(&mut buf);

        BindRequest {
            system_id,
            password,
            system_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_full_bind_body() {
        let body = b"roshan_app\0secret\0VMA\0\x34\x01\x01\0";
        let bind = BindRequest::decode(body);

        assert_eq!(bind.system_id, "roshan_app");
        assert_eq!(bind.password, "secret");
        assert_eq!(bind.system_type, "VMA");
    }

    #[test]
    fn decode_tolerates_missing_terminators() {
        let bind = BindRequest::decode(b"mtn_client");
        assert_eq!(bind.system_id, "mtn_client");
        assert_eq!(bind.password, "");
        assert_eq!(bind.system_type, "");

        let bind = BindRequest::decode(b"");
        assert_eq!(bind.system_id, "");
    }

    #[test]
    fn bind_type_maps_command_ids() {
        assert_eq!(
            BindType::from_command(CommandId::BindReceiver),
            Some(BindType::Receiver)
        );
        assert_eq!(BindType::from_command(CommandId::SubmitSm), None);
        assert_eq!(
            BindType::Transceiver.command_id().response(),
            CommandId::BindTransceiverResp
        );
    }
}
