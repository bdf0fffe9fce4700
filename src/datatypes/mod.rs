mod bind;
mod command_id;
mod command_status;
mod deliver_sm;
mod submit_sm;

pub use bind::{BindRequest, BindType};
pub use command_id::{CommandId, RESPONSE_BIT};
pub use command_status::CommandStatus;
pub use deliver_sm::{DeliveryReceipt, ESM_CLASS_DELIVERY_RECEIPT, RECEIPT_TEXT_PREFIX};
pub use submit_sm::SubmitSm;

#[cfg(test)]
pub(crate) use submit_sm::tests::submit_body;
