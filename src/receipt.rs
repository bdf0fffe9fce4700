// ABOUTME: Deferred delivery receipts pushed to bound ESMEs after a random delay
// ABOUTME: One detached task per submitted message, writing through the session's shared writer

use crate::connection::PduWriter;
use crate::datatypes::DeliveryReceipt;
use chrono::{DateTime, Local};
use rand::Rng;
use std::ops::RangeInclusive;
use std::time::Duration;
use tokio::io::AsyncWrite;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Shortest wait before a receipt is sent
pub const RECEIPT_DELAY_MIN: Duration = Duration::from_secs(1);

/// Longest wait before a receipt is sent
pub const RECEIPT_DELAY_MAX: Duration = Duration::from_secs(5);

/// Receipts carry their own sequence numbers, unrelated to the ones the ESME
/// uses for its requests.
pub const RECEIPT_SEQUENCE_RANGE: RangeInclusive<u32> = 1000..=9999;

/// Uniformly random delay in `RECEIPT_DELAY_MIN..=RECEIPT_DELAY_MAX`.
pub fn random_delay() -> Duration {
    let secs = rand::thread_rng()
        .gen_range(RECEIPT_DELAY_MIN.as_secs_f64()..=RECEIPT_DELAY_MAX.as_secs_f64());
    Duration::from_secs_f64(secs)
}

pub fn random_sequence_number() -> u32 {
    rand::thread_rng().gen_range(RECEIPT_SEQUENCE_RANGE)
}

/// A submitted message waiting for its receipt.
#[derive(Clone, Debug)]
pub struct PendingReceipt {
    pub operator: String,
    pub session_id: String,
    pub message_id: String,
    pub handset: String,
    pub text: String,
    pub submitted_at: DateTime<Local>,
}

impl PendingReceipt {
    fn into_receipt(self, done_date: DateTime<Local>) -> DeliveryReceipt {
        DeliveryReceipt {
            message_id: self.message_id,
            handset: self.handset,
            original_text: self.text,
            submit_date: self.submitted_at,
            done_date,
        }
    }
}

/// Spawn the receipt task for one message.
///
/// After a random delay the receipt is written with a fresh sequence number.
/// The task ends as soon as `bound` turns `false` (or its sender is dropped),
/// whether it is still sleeping or blocked writing to a peer that stopped
/// reading; its writer handle goes with it. Nothing waits for the ESME's
/// deliver_sm_resp, and send failures are only logged.
pub fn schedule<W>(
    pending: PendingReceipt,
    writer: PduWriter<W>,
    mut bound: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let delay = random_delay();
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = unbound(&mut bound) => return,
        }

        let operator = pending.operator.clone();
        let session = pending.session_id.clone();
        let message_id = pending.message_id.clone();
        let pdu = pending
            .into_receipt(Local::now())
            .to_pdu(random_sequence_number());

        let sent = tokio::select! {
            sent = writer.write_pdu(&pdu) => sent,
            _ = unbound(&mut bound) => {
                debug!(session = %session, message_id = %message_id, "session closed during DLR send");
                return;
            }
        };

        match sent {
            Ok(()) => info!(
                operator = %operator,
                session = %session,
                message_id = %message_id,
                "DLR sent, stat=DELIVRD"
            ),
            Err(e) => warn!(
                operator = %operator,
                session = %session,
                message_id = %message_id,
                "DLR send error: {e}"
            ),
        }
    })
}

/// Resolves once the session is no longer bound.
async fn unbound(bound: &mut watch::Receiver<bool>) {
    // Err means the session is gone, which counts as unbound too.
    let _ = bound.wait_for(|bound| !*bound).await;
}
