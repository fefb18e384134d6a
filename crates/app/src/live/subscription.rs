//! Live queries.

use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::Stream;
use tokio::{
    sync::{broadcast::error::RecvError, mpsc},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::live::{Change, ChangeFeed};

const SNAPSHOT_BUFFER: usize = 4;

/// A running live query.
///
/// Yields the query result once immediately and again after every relevant
/// change or [`Change::Resync`]. A failed fetch is delivered and then ends the
/// subscription.
/// Dropping the subscription stops the query.
pub struct Subscription<T, E> {
    receiver: mpsc::Receiver<Result<T, E>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl<T, E> Subscription<T, E> {
    /// The next snapshot, or `None` once the subscription has ended.
    pub async fn next(&mut self) -> Option<Result<T, E>> {
        self.receiver.recv().await
    }

    /// A snapshot if one is already waiting.
    pub fn try_next(&mut self) -> Option<Result<T, E>> {
        self.receiver.try_recv().ok()
    }

    /// Stop the query. Pending snapshots are still delivered.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl<T, E> Drop for Subscription<T, E> {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

impl<T, E> Unpin for Subscription<T, E> {}

impl<T, E> Stream for Subscription<T, E> {
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

impl<T, E> fmt::Debug for Subscription<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("finished", &self.task.is_finished())
            .finish_non_exhaustive()
    }
}

/// Run `fetch` now and again whenever `relevant` accepts a change on `feed`.
///
/// The feed is subscribed before the first fetch so no change between the
/// fetch and the subscription is missed. A lagging subscriber re-fetches.
pub fn live_query<T, E, R, F, Fut>(feed: &ChangeFeed, relevant: R, fetch: F) -> Subscription<T, E>
where
    T: Send + 'static,
    E: fmt::Display + Send + 'static,
    R: Fn(&Change) -> bool + Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let mut changes = feed.subscribe();
    let (sender, receiver) = mpsc::channel(SNAPSHOT_BUFFER);
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let task = tokio::spawn(async move {
        loop {
            let snapshot = tokio::select! {
                () = token.cancelled() => break,
                snapshot = fetch() => snapshot,
            };

            let failed = match &snapshot {
                Ok(_) => false,
                Err(error) => {
                    warn!("live query failed: {error}");

                    true
                }
            };

            tokio::select! {
                () = token.cancelled() => break,
                sent = sender.send(snapshot) => if sent.is_err() {
                    break;
                },
            }

            if failed {
                break;
            }

            loop {
                let change = tokio::select! {
                    () = token.cancelled() => return,
                    change = changes.recv() => change,
                };

                match change {
                    Ok(change) if change == Change::Resync || relevant(&change) => {
                        debug!(%change, "refreshing live query");

                        break;
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "live query lagged, refreshing");

                        break;
                    }
                    Err(RecvError::Closed) => return,
                }
            }
        }
    });

    Subscription {
        receiver,
        cancel,
        task,
    }
}
