// ABOUTME: Simulator process: binds the selected operators and runs their listeners
// ABOUTME: Broadcasts shutdown to every listener and session once the stop signal resolves

use crate::config::SimulatorConfig;
use crate::error::SimResult;
use crate::listener::Listener;
use crate::operator::{Operator, OperatorRegistry};
use crate::shutdown::Shutdown;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{error, info};

/// The set of operator listeners selected at startup.
#[derive(Debug)]
pub struct Simulator {
    listeners: Vec<Listener>,
}

impl Simulator {
    /// Bind every operator selected by `config` from the built-in registry.
    pub async fn start(config: &SimulatorConfig) -> SimResult<Simulator> {
        Self::start_with(&OperatorRegistry::builtin(), config).await
    }

    /// Bind every operator selected by `config` from `registry`. Any bind
    /// failure aborts startup.
    pub async fn start_with(
        registry: &OperatorRegistry,
        config: &SimulatorConfig,
    ) -> SimResult<Simulator> {
        let operators = registry.select(&config.operators, config.receipts_enabled)?;

        let mut listeners = Vec::with_capacity(operators.len());
        for operator in operators {
            let addr = SocketAddr::new(config.host, operator.profile.port);
            listeners.push(Listener::bind(operator, addr).await?);
        }

        Ok(Simulator { listeners })
    }

    pub fn operators(&self) -> Vec<Arc<Operator>> {
        self.listeners
            .iter()
            .map(|l| Arc::clone(l.operator()))
            .collect()
    }

    /// Bound address of each operator, keyed by operator name.
    pub fn local_addrs(&self) -> SimResult<Vec<(String, SocketAddr)>> {
        self.listeners
            .iter()
            .map(|l| Ok((l.operator().name().to_string(), l.local_addr()?)))
            .collect()
    }

    /// Serve until `signal` completes, then stop all listeners and sessions.
    /// Sessions are dropped without an unbind handshake.
    pub async fn run_until<F: Future>(self, signal: F) {
        for listener in &self.listeners {
            let profile = &listener.operator().profile;
            info!(
                operator = %profile.name,
                port = profile.port,
                max_tps = profile.max_tps,
                receipts = profile.receipts_enabled,
                "Starting operator (prefixes: {})",
                profile.number_prefixes.join(", ")
            );
        }

        let (notify, rx) = watch::channel(false);
        let mut tasks = JoinSet::new();
        for listener in self.listeners {
            tasks.spawn(listener.run(Shutdown::new(rx.clone())));
        }

        signal.await;
        info!("Shutting down...");
        notify.send_replace(true);

        while let Some(finished) = tasks.join_next().await {
            if let Err(e) = finished {
                error!("listener task failed: {e}");
            }
        }
    }
}
