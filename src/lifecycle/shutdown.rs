//! Shutdown coordination.

use tokio::sync::broadcast;

/// Broadcast-based shutdown trigger.
///
/// Every long-running task holds a receiver from [`Shutdown::subscribe`];
/// cloning the coordinator lets a signal handler fire it from elsewhere.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. A no-op when nothing is subscribed.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
