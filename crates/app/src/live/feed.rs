//! Change feed.

use std::{fmt, str::FromStr};

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::trace;

use crate::domain::products::records::ProductUuid;

/// Number of changes buffered per subscriber before it lags.
const FEED_CAPACITY: usize = 256;

/// Something that changed in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    /// A product was added.
    Products,

    /// A price was recorded for the product.
    Prices(ProductUuid),

    /// Changes may have been missed; every live query should re-fetch.
    Resync,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised change notification: {0:?}")]
pub struct ChangeParseError(String);

impl FromStr for Change {
    type Err = ChangeParseError;

    /// Parses a notification payload: `products`, `resync` or `prices:{product_uuid}`.
    fn from_str(payload: &str) -> Result<Self, Self::Err> {
        match payload.split_once(':') {
            None if payload == "products" => Ok(Self::Products),
            None if payload == "resync" => Ok(Self::Resync),
            Some(("prices", product)) => product
                .parse()
                .map(Self::Prices)
                .map_err(|_error| ChangeParseError(payload.to_string())),
            _ => Err(ChangeParseError(payload.to_string())),
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Products => f.write_str("products"),
            Self::Prices(product) => write!(f, "prices:{product}"),
            Self::Resync => f.write_str("resync"),
        }
    }
}

/// In-process broadcast of [`Change`]s.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<Change>,
}

impl ChangeFeed {
    /// A feed buffering 256 changes per subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(FEED_CAPACITY)
    }

    /// A feed buffering `capacity` changes per subscriber before it lags.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);

        Self { sender }
    }

    /// Announce a change to every current subscriber.
    pub fn publish(&self, change: Change) {
        let receivers = self.sender.send(change).unwrap_or_default();

        trace!(%change, receivers, "published change");
    }

    /// Receive every change published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.sender.subscribe()
    }

    /// Number of live receivers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}
