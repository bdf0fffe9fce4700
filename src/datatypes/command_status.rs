use num_enum::TryFromPrimitive;

/// The command_status values this simulator emits in response headers.
///
/// These follow the legacy operator simulators rather than the full SMPP v3.4
/// table: a rejected system_id is reported as `0x02` and a submit on an
/// unbound session as `0x05`. Status codes received from clients (for example
/// on `deliver_sm_resp`) are kept as raw integers in the header and never
/// mapped through this enum.
#[derive(TryFromPrimitive)]
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandStatus {
    /// No Error (ESME_ROK)
    Ok = 0x0000_0000,

    /// Invalid Password
    InvalidPassword = 0x0000_0001,

    /// Invalid System ID
    InvalidSystemId = 0x0000_0002,

    /// Incorrect bind status for the given command
    BindError = 0x0000_0005,

    /// System Error
    SystemError = 0x0000_0008,

    /// Throttling error (ESME has exceeded allowed message limits)
    Throttled = 0x0000_0058,
}
