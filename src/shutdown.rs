use tokio::sync::watch;

/// Listens for the process shutdown signal.
///
/// Shutdown is signalled by sending `true` on a `watch` channel. Every
/// listener and session holds its own `Shutdown`, so each can notice the
/// signal independently while blocked on I/O.
#[derive(Debug, Clone)]
pub struct Shutdown {
    /// `true` once the signal has been observed
    is_shutdown: bool,

    notify: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new(notify: watch::Receiver<bool>) -> Shutdown {
        let is_shutdown = *notify.borrow();
        Shutdown {
            is_shutdown,
            notify,
        }
    }

    /// A handle that never fires, for sessions driven outside a listener.
    pub fn never() -> Shutdown {
        let (_, rx) = watch::channel(false);
        Shutdown::new(rx)
    }

    pub fn is_shutdown(&self) -> bool {
        self.is_shutdown
    }

    /// Wait until shutdown is signalled. If the sending side goes away without
    /// signalling, this never completes.
    pub async fn recv(&mut self) {
        if self.is_shutdown {
            return;
        }

        loop {
            if *self.notify.borrow_and_update() {
                break;
            }
            if self.notify.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }

        self.is_shutdown = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn recv_completes_after_signal() {
        let (tx, rx) = watch::channel(false);
        let mut shutdown = Shutdown::new(rx);
        assert!(!shutdown.is_shutdown());

        tx.send(true).unwrap();
        shutdown.recv().await;
        assert!(shutdown.is_shutdown());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_sender_does_not_signal() {
        let (tx, rx) = watch::channel(false);
        let mut shutdown = Shutdown::new(rx);
        drop(tx);

        let waited = tokio::time::timeout(Duration::from_secs(60), shutdown.recv()).await;
        assert!(waited.is_err());
        assert!(!shutdown.is_shutdown());
    }
}
