use crate::{debug_log, info_log};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Background timer for a round.
///
/// Runs as its own task and signals once the time limit passes. Dropping the
/// countdown aborts the task.
#[derive(Debug)]
pub struct Countdown {
    timeout: Duration,
    expired: oneshot::Receiver<()>,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Must be called from within a tokio runtime.
    pub fn start(timeout: Duration) -> Self {
        let (tx, expired) = oneshot::channel();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            info_log!("Countdown of {:?} expired", timeout);
            let _ = tx.send(());
        });
        debug_log!("Countdown of {:?} started", timeout);
        Self {
            timeout,
            expired,
            handle,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolves once the time limit has passed. Cancel safe, but must not be
    /// awaited again after it has resolved.
    pub async fn expired(&mut self) {
        if (&mut self.expired).await.is_err() {
            // Sender gone without firing: the task was aborted, never resolve.
            std::future::pending::<()>().await;
        }
    }

    /// Stops the timer before it fires.
    pub fn cancel(self) {
        debug_log!("Countdown cancelled");
        self.handle.abort();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
