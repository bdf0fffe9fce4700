use crate::codec::{encode_cstring, latin1_encode, Pdu};
use crate::datatypes::{CommandId, CommandStatus};
use bytes::{BufMut, Bytes, BytesMut};
use chrono::{DateTime, Local};

/// esm_class bit 2: the deliver_sm carries an SMSC delivery receipt.
pub const ESM_CLASS_DELIVERY_RECEIPT: u8 = 0x04;

/// Number of characters of the original message echoed in `text:`.
pub const RECEIPT_TEXT_PREFIX: usize = 20;

const RECEIPT_DATE_FORMAT: &str = "%y%m%d%H%M";

// TON/NPI used on both addresses: international / ISDN
const ADDR_TON: u8 = 1;
const ADDR_NPI: u8 = 1;

/// A synthetic "delivered" receipt for a previously submitted message,
/// pushed to the ESME as an unsolicited deliver_sm.
#[derive(Clone, Debug, PartialEq)]
pub struct DeliveryReceipt {
    pub message_id: String,
    /// The handset the original message was sent to. It becomes the
    /// source_addr of the receipt.
    pub handset: String,
    pub original_text: String,
    pub submit_date: DateTime<Local>,
    pub done_date: DateTime<Local>,
}

impl DeliveryReceipt {
    /// The receipt text in the de-facto `id:... stat:...` format.
    pub fn text(&self) -> String {
        let excerpt: String = self.original_text.chars().take(RECEIPT_TEXT_PREFIX).collect();
        format!(
            "id:{} sub:001 dlvrd:001 submit date:{} done date:{} stat:DELIVRD err:000 text:{}",
            self.message_id,
            self.submit_date.format(RECEIPT_DATE_FORMAT),
            self.done_date.format(RECEIPT_DATE_FORMAT),
            excerpt,
        )
    }

    /// deliver_sm mandatory parameters with the receipt as short_message.
    pub fn encode_body(&self) -> Bytes {
        let mut text = latin1_encode(&self.text());
        text.truncate(u8::MAX as usize);

        let mut buf = BytesMut::with_capacity(32 + self.handset.len() + text.len());
        encode_cstring(&mut buf, ""); // service_type
        buf.put_u8(ADDR_TON);
        buf.put_u8(ADDR_NPI);
        encode_cstring(&mut buf, &self.handset);
        buf.put_u8(ADDR_TON);
        buf.put_u8(ADDR_NPI);
        encode_cstring(&mut buf, ""); // destination_addr
        buf.put_u8(ESM_CLASS_DELIVERY_RECEIPT);
        buf.put_u8(0); // protocol_id
        buf.put_u8(0); // priority_flag
        encode_cstring(&mut buf, ""); // schedule_delivery_time
        encode_cstring(&mut buf, ""); // validity_period
        buf.put_u8(0); // registered_delivery
        buf.put_u8(0); // replace_if_present_flag
        buf.put_u8(0); // data_coding
        buf.put_u8(0); // sm_default_msg_id
        buf.put_u8(text.len() as u8);
        buf.put_slice(&text);
        buf.freeze()
    }

    pub fn to_pdu(&self, sequence_number: u32) -> Pdu {
        Pdu::new(
            CommandId::DeliverSm,
            CommandStatus::Ok,
            sequence_number,
            self.encode_body(),
        )
    }
}
