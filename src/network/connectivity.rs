//! Network connectivity observable
//!
//! Callers consult this before attempting a network favicon fetch; the
//! favicon cache itself never touches the network.

use tokio::sync::watch;

/// Source of "is the network connected" state
pub trait ConnectivitySource: Send + Sync {
    /// Current connectivity
    fn is_connected(&self) -> bool;

    /// Receiver that yields every connectivity change
    fn subscribe(&self) -> watch::Receiver<bool>;
}

/// In-process connectivity state fed by the platform layer
#[derive(Debug)]
pub struct ConnectivityMonitor {
    state: watch::Sender<bool>,
}

impl ConnectivityMonitor {
    pub fn new(connected: bool) -> Self {
        let (state, _) = watch::channel(connected);
        Self { state }
    }

    /// Publish a new connectivity state. Returns true if it changed.
    pub fn set_connected(&self, connected: bool) -> bool {
        let changed = self.state.send_if_modified(|current| {
            if *current == connected {
                false
            } else {
                *current = connected;
                true
            }
        });
        if changed {
            log::debug!("Connectivity changed: connected={}", connected);
        }
        changed
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConnectivitySource for ConnectivityMonitor {
    fn is_connected(&self) -> bool {
        *self.state.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}
