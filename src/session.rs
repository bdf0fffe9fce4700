// ABOUTME: Per-connection SMSC session state machine for one simulated operator
// ABOUTME: Reads PDUs in arrival order, answers binds/submits/enquire_links/unbinds and schedules receipts

use crate::codec::{encode_cstring, Pdu};
use crate::connection::{PduReader, PduWriter};
use crate::datatypes::{BindRequest, BindType, CommandId, CommandStatus, SubmitSm};
use crate::error::SessionError;
use crate::operator::Operator;
use crate::receipt::{self, PendingReceipt};
use crate::shutdown::Shutdown;
use bytes::BytesMut;
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, ReadHalf, WriteHalf};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Characters of a submitted message echoed in the submit log line.
const LOG_EXCERPT_CHARS: usize = 30;

/// Upper bound on flushing and half-closing the socket when a session ends.
/// A peer that stopped reading must not keep the session alive.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Where a session is in its lifecycle.
///
/// ```text
/// Unbound --bind accepted--> Bound --unbind / EOF / error--> Closed
///    |                                                         ^
///    +---------------- bind rejected / EOF / error ------------+
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Unbound,
    Bound {
        system_id: String,
        bind_type: BindType,
    },
    Closed,
}

/// What the read loop does after a PDU has been handled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Close,
}

/// One ESME connection to a simulated operator.
///
/// The bind type is recorded but never restricts which commands are
/// accepted: a receiver bind may still submit.
pub struct Session<S> {
    id: String,
    operator: Arc<Operator>,
    reader: PduReader<ReadHalf<S>>,
    writer: PduWriter<WriteHalf<S>>,
    state: SessionState,

    // Mirrors `state` for the receipt tasks. Dropping to `false` makes every
    // pending receipt give up its writer handle at once.
    bound: watch::Sender<bool>,

    message_ids: Vec<String>,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    pub fn new(stream: S, operator: Arc<Operator>) -> Self {
        let (read_half, write_half) = tokio::io::split(stream);

        Session {
            id: operator.new_session_id(),
            operator,
            reader: PduReader::new(read_half),
            writer: PduWriter::new(write_half),
            state: SessionState::Unbound,
            bound: watch::channel(false).0,
            message_ids: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Message ids issued on this session, oldest first.
    pub fn message_ids(&self) -> &[String] {
        &self.message_ids
    }

    /// Drive the session until the peer unbinds or disconnects, a bind is
    /// rejected, the stream breaks, or `shutdown` fires. The socket is closed
    /// and the session unregistered in every case.
    pub async fn run(mut self, mut shutdown: Shutdown) {
        let result = tokio::select! {
            result = self.serve() => result,
            _ = shutdown.recv() => {
                debug!(session = %self.id, "shutdown signalled, dropping session");
                Ok(())
            }
        };

        if let Err(e) = result {
            warn!(session = %self.id, system_id = self.system_id(), "Session error: {e}");
        }

        self.close().await;
    }

    async fn serve(&mut self) -> Result<(), SessionError> {
        while let Some(pdu) = self.reader.read_pdu().await? {
            if self.dispatch(pdu).await? == Flow::Close {
                break;
            }
        }
        Ok(())
    }

    async fn dispatch(&mut self, pdu: Pdu) -> Result<Flow, SessionError> {
        let sequence = pdu.sequence_number();

        let Some(command) = pdu.command() else {
            warn!(
                session = %self.id,
                system_id = self.system_id(),
                "Unknown command: {:#010x}",
                pdu.header.command_id
            );
            return Ok(Flow::Continue);
        };

        match command {
            CommandId::BindTransmitter => {
                self.handle_bind(BindType::Transmitter, sequence, &pdu.body)
                    .await
            }
            CommandId::BindReceiver => {
                self.handle_bind(BindType::Receiver, sequence, &pdu.body)
                    .await
            }
            CommandId::BindTransceiver => {
                self.handle_bind(BindType::Transceiver, sequence, &pdu.body)
                    .await
            }
            CommandId::SubmitSm => {
                self.handle_submit_sm(sequence, &pdu.body).await?;
                Ok(Flow::Continue)
            }
            CommandId::EnquireLink => {
                self.respond(CommandId::EnquireLink, CommandStatus::Ok, sequence)
                    .await?;
                Ok(Flow::Continue)
            }
            CommandId::Unbind => {
                self.respond(CommandId::Unbind, CommandStatus::Ok, sequence)
                    .await?;
                info!(session = %self.id, system_id = self.system_id(), "Unbind received");
                Ok(Flow::Close)
            }
            CommandId::DeliverSmResp => {
                debug!(
                    session = %self.id,
                    sequence,
                    status = pdu.header.command_status,
                    "DLR acknowledged"
                );
                Ok(Flow::Continue)
            }
            CommandId::DeliverSm
            | CommandId::GenericNack
            | CommandId::BindReceiverResp
            | CommandId::BindTransmitterResp
            | CommandId::BindTransceiverResp
            | CommandId::SubmitSmResp
            | CommandId::UnbindResp
            | CommandId::EnquireLinkResp => {
                warn!(
                    session = %self.id,
                    system_id = self.system_id(),
                    "Unexpected command: {command:?}"
                );
                Ok(Flow::Continue)
            }
        }
    }

    async fn handle_bind(
        &mut self,
        bind_type: BindType,
        sequence: u32,
        body: &[u8],
    ) -> Result<Flow, SessionError> {
        let request = BindRequest::decode(body);
        let command = bind_type.command_id();

        info!(
            session = %self.id,
            system_id = %request.system_id,
            system_type = %request.system_type,
            "Bind request ({bind_type})"
        );

        if !self.operator.accepts(&request.system_id) {
            warn!(
                session = %self.id,
                system_id = %request.system_id,
                "Invalid system_id, closing session"
            );
            self.respond(command, CommandStatus::InvalidSystemId, sequence)
                .await?;
            return Ok(Flow::Close);
        }

        self.state = SessionState::Bound {
            system_id: request.system_id,
            bind_type,
        };
        self.bound.send_replace(true);
        self.operator.register_session(&self.id);

        let mut body = BytesMut::new();
        encode_cstring(&mut body, &format!("{}_SMSC", self.operator.name()));
        let response = Pdu::new(command.response(), CommandStatus::Ok, sequence, body.freeze());
        self.writer.write_pdu(&response).await?;

        info!(
            session = %self.id,
            system_id = self.system_id(),
            "Bound successfully (sessions: {})",
            self.operator.active_sessions()
        );
        Ok(Flow::Continue)
    }

    async fn handle_submit_sm(&mut self, sequence: u32, body: &[u8]) -> Result<(), SessionError> {
        if !matches!(self.state, SessionState::Bound { .. }) {
            warn!(session = %self.id, "submit_sm on unbound session");
            return self
                .respond(CommandId::SubmitSm, CommandStatus::BindError, sequence)
                .await;
        }

        let submit = match SubmitSm::decode(body) {
            Ok(submit) => submit,
            Err(e) => {
                warn!(session = %self.id, system_id = self.system_id(), "Submit error: {e}");
                return self
                    .respond(CommandId::SubmitSm, CommandStatus::SystemError, sequence)
                    .await;
            }
        };

        let submitted_at = Local::now();
        let message_id = self.operator.next_message_id();
        self.message_ids.push(message_id.clone());

        let excerpt: String = submit.short_message.chars().take(LOG_EXCERPT_CHARS).collect();
        info!(
            session = %self.id,
            system_id = self.system_id(),
            message_id = %message_id,
            "Submit: dest={}, msg='{excerpt}'",
            submit.destination_addr
        );

        let mut body = BytesMut::new();
        encode_cstring(&mut body, &message_id);
        let response = Pdu::new(CommandId::SubmitSmResp, CommandStatus::Ok, sequence, body.freeze());
        self.writer.write_pdu(&response).await?;

        if self.operator.receipts_enabled() {
            let pending = PendingReceipt {
                operator: self.operator.name().to_string(),
                session_id: self.id.clone(),
                message_id,
                handset: submit.destination_addr,
                text: submit.short_message,
                submitted_at,
            };
            receipt::schedule(pending, self.writer.clone(), self.bound.subscribe());
        }

        Ok(())
    }

    /// Header-only `_resp` for `request`.
    async fn respond(
        &self,
        request: CommandId,
        status: CommandStatus,
        sequence: u32,
    ) -> Result<(), SessionError> {
        self.writer
            .write_pdu(&Pdu::response(request, status, sequence))
            .await?;
        Ok(())
    }

    fn system_id(&self) -> &str {
        match &self.state {
            SessionState::Bound { system_id, .. } => system_id,
            _ => "unbound",
        }
    }

    async fn close(&mut self) {
        // Releases the writer lock held by any receipt stuck mid-write.
        self.bound.send_replace(false);
        self.state = SessionState::Closed;
        self.operator.unregister_session(&self.id);

        match tokio::time::timeout(CLOSE_TIMEOUT, self.writer.shutdown()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!(session = %self.id, "socket shutdown: {e}"),
            Err(_) => debug!(session = %self.id, "peer not reading, dropping socket"),
        }

        info!(
            session = %self.id,
            messages = self.message_ids.len(),
            "Session closed (active: {})",
            self.operator.active_sessions()
        );
    }
}
