// SMPP wire codec for the operator simulator
//
// The header is decoded into raw integers so that unknown command ids and
// client-chosen status codes survive; typed views are layered on top via
// `CommandId` / `CommandStatus`. Body fields are read with the lenient
// C-string convention of the legacy SMSCs: one byte per character, and a
// missing NUL terminator simply ends the string at the end of the body.

use crate::datatypes::{CommandId, CommandStatus};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::Cursor;
use thiserror::Error;

/// Maximum allowed PDU size to prevent memory exhaustion attacks
pub const MAX_PDU_SIZE: u32 = 65536; // 64KB

/// SMPP PDU Header (16 bytes, common to all PDUs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduHeader {
    pub command_length: u32,
    pub command_id: u32,
    pub command_status: u32,
    pub sequence_number: u32,
}

impl PduHeader {
    pub const SIZE: usize = 16;

    /// Decode PDU header from buffer with length validation
    pub fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        if buf.remaining() < Self::SIZE {
            return Err(CodecError::Incomplete);
        }

        let command_length = buf.get_u32();
        let command_id = buf.get_u32();
        let command_status = buf.get_u32();
        let sequence_number = buf.get_u32();

        if !(Self::SIZE as u32..=MAX_PDU_SIZE).contains(&command_length) {
            return Err(CodecError::InvalidPduLength {
                length: command_length,
                min: Self::SIZE as u32,
                max: MAX_PDU_SIZE,
            });
        }

        Ok(PduHeader {
            command_length,
            command_id,
            command_status,
            sequence_number,
        })
    }

    /// Encode PDU header to buffer
    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u32(self.command_length);
        buf.put_u32(self.command_id);
        buf.put_u32(self.command_status);
        buf.put_u32(self.sequence_number);
    }

    /// Number of body bytes announced by `command_length`.
    pub fn body_len(&self) -> usize {
        self.command_length as usize - Self::SIZE
    }

    /// Typed command id, `None` for ids outside the simulator's command set.
    pub fn command(&self) -> Option<CommandId> {
        CommandId::try_from(self.command_id).ok()
    }
}

/// One framed protocol data unit: header plus command-specific body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdu {
    pub header: PduHeader,
    pub body: Bytes,
}

impl Pdu {
    /// Build a PDU, deriving `command_length` from the body.
    pub fn new(
        command_id: CommandId,
        command_status: CommandStatus,
        sequence_number: u32,
        body: Bytes,
    ) -> Self {
        Pdu {
            header: PduHeader {
                command_length: (PduHeader::SIZE + body.len()) as u32,
                command_id: command_id as u32,
                command_status: command_status as u32,
                sequence_number,
            },
            body,
        }
    }

    /// Header-only response with the given status.
    pub fn response(request: CommandId, status: CommandStatus, sequence_number: u32) -> Self {
        Pdu::new(request.response(), status, sequence_number, Bytes::new())
    }

    pub fn command(&self) -> Option<CommandId> {
        self.header.command()
    }

    pub fn sequence_number(&self) -> u32 {
        self.header.sequence_number
    }

    /// Decode a complete PDU (header and body) from the buffer.
    ///
    /// Returns `CodecError::Incomplete` when the buffer does not yet hold the
    /// whole PDU; the cursor position is unspecified in that case.
    pub fn parse(buf: &mut Cursor<&[u8]>) -> Result<Pdu, CodecError> {
        let header = PduHeader::decode(buf)?;
        let body_len = header.body_len();
        if buf.remaining() < body_len {
            return Err(CodecError::Incomplete);
        }
        let body = buf.copy_to_bytes(body_len);
        Ok(Pdu { header, body })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.reserve(PduHeader::SIZE + self.body.len());
        self.header.encode(buf);
        buf.put_slice(&self.body);
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(PduHeader::SIZE + self.body.len());
        self.encode(&mut buf);
        buf.freeze()
    }
}

/// Codec errors with detailed context for debugging
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Incomplete PDU: need more data")]
    Incomplete,

    #[error("Invalid PDU length: {length}, must be {min}-{max}")]
    InvalidPduLength { length: u32, min: u32, max: u32 },

    #[error("Field '{field}' truncated: need {needed} bytes, {available} available")]
    Truncated {
        field: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a NUL-terminated string starting at `offset`.
///
/// Returns the string content and the offset just past the NUL. Without a
/// terminator the rest of `body` is the string and the next offset is
/// `body.len()`. Bytes map one-to-one onto `char`s (Latin-1).
pub fn read_c_string(body: &[u8], offset: usize) -> (String, usize) {
    let start = offset.min(body.len());
    let rest = &body[start..];
    match rest.iter().position(|&b| b == 0) {
        Some(end) => (latin1_decode(&rest[..end]), start + end + 1),
        None => (latin1_decode(rest), body.len()),
    }
}

/// Decode bytes as Latin-1 (every octet is one `char`).
pub fn latin1_decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Encode a string as Latin-1, replacing characters above U+00FF with `?`.
pub fn latin1_encode(value: &str) -> Vec<u8> {
    value
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// Lenient C-string read from the cursor position.
pub fn decode_cstring(buf: &mut Cursor<&[u8]>) -> String {
    let (value, next) = read_c_string(buf.get_ref(), buf.position() as usize);
    buf.set_position(next as u64);
    value
}

/// Skip `len` fixed-width bytes that the simulator does not interpret.
pub fn skip(buf: &mut Cursor<&[u8]>, len: usize, field: &'static str) -> Result<(), CodecError> {
    ensure_remaining(buf, len, field)?;
    buf.advance(len);
    Ok(())
}

/// Decode a single byte
pub fn decode_u8(buf: &mut Cursor<&[u8]>, field: &'static str) -> Result<u8, CodecError> {
    ensure_remaining(buf, 1, field)?;
    Ok(buf.get_u8())
}

/// Take exactly `len` bytes.
pub fn decode_bytes(
    buf: &mut Cursor<&[u8]>,
    len: usize,
    field: &'static str,
) -> Result<Bytes, CodecError> {
    ensure_remaining(buf, len, field)?;
    Ok(buf.copy_to_bytes(len))
}

fn ensure_remaining(
    buf: &Cursor<&[u8]>,
    needed: usize,
    field: &'static str,
) -> Result<(), CodecError> {
    let available = buf.remaining();
    if available < needed {
        return Err(CodecError::Truncated {
            field,
            needed,
            available,
        });
    }
    Ok(())
}

/// Write `value` as Latin-1 followed by a NUL terminator.
pub fn encode_cstring(buf: &mut BytesMut, value: &str) {
    buf.put_slice(&latin1_encode(value));
    buf.put_u8(0);
}
