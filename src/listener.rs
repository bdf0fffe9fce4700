// ABOUTME: Per-operator TCP accept loop spawning one session task per ESME connection
// ABOUTME: Tracks session tasks in a JoinSet and waits for them to close once shutdown is signalled

use crate::error::{SimResult, SimulatorError};
use crate::operator::Operator;
use crate::session::Session;
use crate::shutdown::Shutdown;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing::{debug, error, info, info_span, Instrument};

/// Accepts connections for one operator.
#[derive(Debug)]
pub struct Listener {
    operator: Arc<Operator>,
    listener: TcpListener,
}

impl Listener {
    /// Bind the operator's listen socket. Failing here means the operator
    /// cannot be simulated at all, so it is reported to the caller.
    pub async fn bind(operator: Arc<Operator>, addr: SocketAddr) -> SimResult<Listener> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| SimulatorError::Bind {
                operator: operator.name().to_string(),
                addr,
                source,
            })?;

        Ok(Listener { operator, listener })
    }

    pub fn operator(&self) -> &Arc<Operator> {
        &self.operator
    }

    pub fn local_addr(&self) -> SimResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Run the accept loop until `shutdown` fires.
    ///
    /// Each accepted socket gets its own task; a failing session never
    /// affects the loop or other sessions. Accept errors are logged and the
    /// loop keeps going.
    pub async fn run(self, mut shutdown: Shutdown) {
        let name = self.operator.name().to_string();
        let mut sessions = JoinSet::new();

        info!(
            operator = %name,
            "SMPP Server started on port {} (prefixes: {})",
            self.listener.local_addr().map(|a| a.port()).unwrap_or(self.operator.profile.port),
            self.operator.profile.number_prefixes.join(", ")
        );

        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    let (socket, peer) = match accepted {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            error!(operator = %name, "accept failed: {e}");
                            continue;
                        }
                    };

                    let session = Session::new(socket, Arc::clone(&self.operator));
                    let span = info_span!("session", operator = %name, id = %session.id(), %peer);
                    debug!(operator = %name, %peer, session = %session.id(), "connection accepted");
                    sessions.spawn(session.run(shutdown.clone()).instrument(span));
                }
                Some(finished) = sessions.join_next(), if !sessions.is_empty() => {
                    if let Err(e) = finished {
                        error!(operator = %name, "session task failed: {e}");
                    }
                }
                _ = shutdown.recv() => break,
            }
        }

        // every session watches the same signal and closes its own socket
        while let Some(finished) = sessions.join_next().await {
            if let Err(e) = finished {
                error!(operator = %name, "session task failed: {e}");
            }
        }
        info!(operator = %name, "Server stopped");
    }
}
