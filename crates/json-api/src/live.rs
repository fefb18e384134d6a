//! Server-sent event streams over live queries.
//!
//! Every snapshot becomes one event named after the stream. A failed query is
//! sent as an `error` event and closes the stream; clients reconnect to retry.

use std::fmt::Display;

use futures::StreamExt as _;
use salvo::{
    Response,
    sse::{SseEvent, SseKeepAlive},
};
use serde::Serialize;

use cuantovale_app::live::Subscription;

use crate::{observability::LiveStreamGuard, state::State};

pub(crate) const ERROR_EVENT: &str = "error";

/// Stream `subscription` to the client until either side hangs up or the
/// server shuts down.
pub(crate) fn stream<T, E>(
    res: &mut Response,
    name: &'static str,
    subscription: Subscription<T, E>,
    state: &State,
) where
    T: Serialize + Send + 'static,
    E: Display + Send + 'static,
{
    let guard = LiveStreamGuard::track(name);

    let events = subscription
        .map(move |snapshot| {
            let _open = &guard;

            match snapshot {
                Ok(snapshot) => SseEvent::default().name(name).json(&snapshot),
                Err(error) => Ok(SseEvent::default()
                    .name(ERROR_EVENT)
                    .text(error.to_string())),
            }
        })
        .take_until(state.shutdown.clone().cancelled_owned());

    SseKeepAlive::new(Box::pin(events))
        .max_interval(state.keep_alive)
        .stream(res);
}
