use tokio::sync::watch;

/// Fires once when the process is asked to stop.
#[derive(Clone)]
pub struct Shutdown {
    sender: watch::Sender<Option<&'static str>>,
}

pub struct ShutdownListener {
    receiver: watch::Receiver<Option<&'static str>>,
}

impl Shutdown {
    pub fn new() -> (Self, ShutdownListener) {
        let (sender, receiver) = watch::channel(None);
        (Self { sender }, ShutdownListener { receiver })
    }

    /// Records the first reason only.
    pub fn trigger(&self, reason: &'static str) {
        self.sender.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        });
    }
}

impl ShutdownListener {
    /// Resolves with the reason once triggered. Never resolves if every
    /// `Shutdown` handle is dropped without triggering.
    pub async fn notified(&mut self) -> &'static str {
        match self.receiver.wait_for(Option::is_some).await {
            Ok(reason) => reason.unwrap_or("shutdown"),
            Err(_) => std::future::pending().await,
        }
    }
}

pub fn install_signal_handlers(shutdown: Shutdown) {
    let ctrlc = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!(target: "app", "received Ctrl-C");
            ctrlc.trigger("ctrl-c");
        }
    });

    #[cfg(unix)]
    tokio::spawn(async move {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut sig) = signal(SignalKind::terminate()) {
            sig.recv().await;
            tracing::info!(target: "app", "received SIGTERM");
            shutdown.trigger("sigterm");
        }
    });
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn first_reason_wins() {
        let (shutdown, mut listener) = Shutdown::new();
        shutdown.trigger("ctrl-c");
        shutdown.trigger("sigterm");
        assert_eq!(listener.notified().await, "ctrl-c");
    }

    #[tokio::test]
    async fn pending_until_triggered() {
        let (shutdown, mut listener) = Shutdown::new();
        let waited = tokio::time::timeout(Duration::from_millis(20), listener.notified()).await;
        assert!(waited.is_err());

        shutdown.trigger("sigterm");
        assert_eq!(listener.notified().await, "sigterm");
    }
}
