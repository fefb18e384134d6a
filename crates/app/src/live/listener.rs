//! Postgres notification bridge.

use std::time::Duration;

use sqlx::{PgPool, postgres::PgListener};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::live::{Change, ChangeFeed};

/// Channel the change triggers notify on.
pub const CHANGES_CHANNEL: &str = "cuantovale_changes";

const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Forward database change notifications into `feed` until `cancel` fires.
///
/// Notifications sent while the connection is down are lost, so every
/// reconnect publishes [`Change::Resync`].
///
/// # Errors
///
/// Returns an error if the initial `LISTEN` fails.
pub async fn spawn_listener(
    pool: &PgPool,
    feed: ChangeFeed,
    cancel: CancellationToken,
) -> Result<JoinHandle<()>, sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;

    listener.listen(CHANGES_CHANNEL).await?;

    info!(channel = CHANGES_CHANNEL, "listening for changes");

    Ok(tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                () = cancel.cancelled() => break,
                received = listener.try_recv() => received,
            };

            match received {
                Ok(Some(notification)) => relay(&feed, Received::Payload(notification.payload())),
                // The listener has already reconnected and re-issued LISTEN.
                Ok(None) => relay(&feed, Received::ConnectionLost),
                Err(error) => {
                    warn!("change listener error: {error}");

                    tokio::select! {
                        () = cancel.cancelled() => break,
                        () = tokio::time::sleep(RECONNECT_DELAY) => {}
                    }

                    relay(&feed, Received::ConnectionLost);
                }
            }
        }

        info!("change listener stopped");
    }))
}

#[derive(Debug, Clone, Copy)]
enum Received<'a> {
    Payload(&'a str),
    ConnectionLost,
}

fn relay(feed: &ChangeFeed, received: Received<'_>) {
    match received {
        Received::Payload(payload) => match payload.parse::<Change>() {
            Ok(change) => feed.publish(change),
            Err(error) => debug!("ignoring notification: {error}"),
        },
        Received::ConnectionLost => {
            warn!("change listener reconnected, asking live queries to resync");

            feed.publish(Change::Resync);
        }
    }
}
