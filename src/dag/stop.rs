// src/dag/stop.rs

//! Cooperative stop request shared by the pipeline, the scheduler loop and
//! running unit commands.

use tokio::sync::watch;

/// Create a connected [`StopHandle`] / [`StopSignal`] pair.
pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle { tx }, StopSignal { rx })
}

/// Requesting side. Dropping it without calling [`StopHandle::stop`] stops
/// nothing.
#[derive(Debug)]
pub struct StopHandle {
    tx: watch::Sender<bool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }
}

/// Observing side, cloned into the scheduler and every command action.
#[derive(Debug, Clone)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once a stop has been requested. Never resolves if the
    /// handle is dropped first.
    pub async fn stopped(&mut self) {
        let result = self.rx.wait_for(|stopped| *stopped).await.map(|_| ());
        if result.is_err() {
            std::future::pending::<()>().await
        }
    }
}
