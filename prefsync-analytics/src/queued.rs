//! Deferred delivery through a background task.
//!
//! [`QueuedClient`] accepts updates without blocking and hands them to a
//! tokio task that forwards them, in order, to the wrapped client. Use it
//! when the caller's thread must not wait on the analytics client.

use crate::client::AnalyticsClient;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::properties::UserProperties;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Default number of updates buffered before `QueueFull` is returned.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// A client handle that enqueues updates for a background delivery task.
///
/// Clones share the same queue. The delivery task stops once every handle
/// has been dropped and the queue is drained.
#[derive(Debug, Clone)]
pub struct QueuedClient {
    tx: mpsc::Sender<UserProperties>,
}

impl QueuedClient {
    /// Starts the delivery task and returns a handle to it.
    ///
    /// The task resolves to the number of updates the inner client
    /// accepted. Each call into `inner` runs on tokio's blocking pool and is
    /// awaited before the next update is taken, so a slow client holds up
    /// only this queue and never a runtime worker. Must be called from
    /// within a tokio runtime.
    pub fn spawn<C>(inner: C, capacity: usize) -> (Self, JoinHandle<usize>)
    where
        C: AnalyticsClient + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<UserProperties>(capacity.max(1));
        let inner = Arc::new(inner);

        let handle = tokio::spawn(async move {
            let mut delivered = 0usize;
            while let Some(properties) = rx.recv().await {
                let client = Arc::clone(&inner);
                let result =
                    tokio::task::spawn_blocking(move || client.set_user_properties(properties))
                        .await;
                match result {
                    Ok(Ok(())) => delivered += 1,
                    Ok(Err(e)) => warn!("Dropped queued user properties: {}", e),
                    Err(e) => warn!("Analytics client panicked during delivery: {}", e),
                }
            }
            debug!("Analytics delivery task finished ({} delivered)", delivered);
            delivered
        });

        (Self { tx }, handle)
    }

    /// Returns true once the delivery task has stopped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl AnalyticsClient for QueuedClient {
    fn set_user_properties(&self, properties: UserProperties) -> AnalyticsResult<()> {
        self.tx.try_send(properties).map_err(|e| match e {
            TrySendError::Full(_) => AnalyticsError::QueueFull,
            TrySendError::Closed(_) => AnalyticsError::ChannelClosed,
        })
    }
}
