//! Tracing decorator for analytics clients.

use crate::client::AnalyticsClient;
use crate::error::AnalyticsResult;
use crate::properties::UserProperties;
use tracing::{debug, warn};

/// Wraps a client and logs every update it forwards.
///
/// Successful updates are logged at `debug`, failures at `warn`. The inner
/// result is returned unchanged.
#[derive(Debug)]
pub struct LoggingClient<C> {
    inner: C,
    name: String,
}

impl<C: AnalyticsClient> LoggingClient<C> {
    /// Wraps `inner`; `name` identifies the client in log lines.
    pub fn new(name: impl Into<String>, inner: C) -> Self {
        Self {
            inner,
            name: name.into(),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: AnalyticsClient> AnalyticsClient for LoggingClient<C> {
    fn set_user_properties(&self, properties: UserProperties) -> AnalyticsResult<()> {
        let names: Vec<String> = properties.names().map(str::to_string).collect();
        match self.inner.set_user_properties(properties) {
            Ok(()) => {
                debug!("[{}] Set user properties {:?}", self.name, names);
                Ok(())
            }
            Err(e) => {
                warn!("[{}] Failed to set user properties {:?}: {}", self.name, names, e);
                Err(e)
            }
        }
    }
}
