use num_enum::TryFromPrimitive;

/// Bit that distinguishes a response PDU from the request it answers.
pub const RESPONSE_BIT: u32 = 0x8000_0000;

/// The command ids this simulator understands. Anything else on the wire is
/// carried as a raw `u32` in the header and ignored by the session.
#[derive(TryFromPrimitive)]
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommandId {
    GenericNack = 0x8000_0000,
    BindReceiver = 0x0000_0001,
    BindReceiverResp = 0x8000_0001,
    BindTransmitter = 0x0000_0002,
    BindTransmitterResp = 0x8000_0002,
    SubmitSm = 0x0000_0004,
    SubmitSmResp = 0x8000_0004,
    DeliverSm = 0x0000_0005,
    DeliverSmResp = 0x8000_0005,
    Unbind = 0x0000_0006,
    UnbindResp = 0x8000_0006,
    BindTransceiver = 0x0000_0009,
    BindTransceiverResp = 0x8000_0009,
    EnquireLink = 0x0000_0015,
    EnquireLinkResp = 0x8000_0015,
}

impl CommandId {
    /// Check if this command_id represents a response PDU
    pub fn is_response(&self) -> bool {
        (*self as u32) & RESPONSE_BIT != 0
    }

    /// The `_resp` counterpart of a request. Responses map to themselves.
    pub fn response(self) -> CommandId {
        CommandId::try_from(self as u32 | RESPONSE_BIT).unwrap_or(CommandId::GenericNack)
    }
}
