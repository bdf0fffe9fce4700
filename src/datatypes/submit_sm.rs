use crate::codec::{decode_bytes, decode_cstring, decode_u8, latin1_decode, skip, CodecError};
use std::io::Cursor;

/// The parts of a submit_sm the simulator acts on.
///
/// Layout walked on decode: service_type, source TON/NPI (skipped),
/// source_addr, dest TON/NPI (skipped), destination_addr, esm_class /
/// protocol_id / priority_flag (skipped), schedule_delivery_time and
/// validity_period (skipped C-strings), registered_delivery /
/// replace_if_present / data_coding / sm_default_msg_id (skipped), sm_length,
/// short_message. Optional TLVs after the message are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitSm {
    pub service_type: String,
    pub source_addr: String,
    pub destination_addr: String,
    pub short_message: String,
}

impl SubmitSm {
    pub fn decode(body: &[u8]) -> Result<SubmitSm, CodecError> {
        let mut buf = Cursor::new(body);

        let service_type = decode_cstring(&mut buf);
        skip(&mut buf, 2, "source_addr_ton_npi")?;
        let source_addr = decode_cstring(&mut buf);
        skip(&mut buf, 2, "dest_addr_ton_npi")?;
        let destination_addr = decode_cstring(&mut buf);
        skip(&mut buf, 3, "esm_class_protocol_priority")?;
        let _schedule_delivery_time = decode_cstring(&mut buf);
        let _validity_period = decode_cstring(&mut buf);
        skip(&mut buf, 4, "registered_delivery_flags")?;

        // Bodies that stop right before sm_length carry an empty message.
        let short_message = if buf.position() as usize >= body.len() {
            String::new()
        } else {
            let sm_length = decode_u8(&mut buf, "sm_length")?;
            let text = decode_bytes(&mut buf, sm_length as usize, "short_message")?;
            latin1_decode(&text)
        };

        Ok(SubmitSm {
            service_type,
            source_addr,
            destination_addr,
            short_message,
        })
    }
}
