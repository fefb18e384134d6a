//! Live data
//!
//! Writes to `products` and `prices` raise `NOTIFY cuantovale_changes` from a
//! trigger. A single listener task forwards those notifications into a
//! [`ChangeFeed`], and every [`Subscription`] re-runs its query when a change
//! it cares about arrives.

mod feed;
mod listener;
mod subscription;

pub use feed::{Change, ChangeFeed, ChangeParseError};
pub use listener::{CHANGES_CHANNEL, spawn_listener};
pub use subscription::{Subscription, live_query};
