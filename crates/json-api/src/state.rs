//! State

use std::{sync::Arc, time::Duration};

use cuantovale::chart::DateFormat;
use cuantovale_app::context::AppContext;
use tokio_util::sync::CancellationToken;

const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// How chart dates are labelled.
    pub(crate) format: DateFormat,

    /// Interval between keep-alive comments on live streams.
    pub(crate) keep_alive: Duration,

    /// Cancelled when the server shuts down; live streams end with it.
    pub(crate) shutdown: CancellationToken,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, format: DateFormat) -> Self {
        Self {
            app,
            format,
            keep_alive: DEFAULT_KEEP_ALIVE,
            shutdown: CancellationToken::new(),
        }
    }

    #[must_use]
    pub(crate) fn with_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    #[must_use]
    pub(crate) fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    #[must_use]
    pub(crate) fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
