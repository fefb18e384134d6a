//! Request correlation ids.

use std::fmt;

use salvo::{http::header::HeaderValue, prelude::Response};
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id that is echoed back.
const MAX_LEN: usize = 128;

/// Id used to correlate a request's log lines and response.
///
/// A caller-supplied id is kept when it is short printable ASCII, so it is
/// always a valid header value; otherwise a fresh v7 uuid is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RequestId(String);

impl RequestId {
    pub(super) fn from_header(value: Option<&str>) -> Self {
        value
            .map(str::trim)
            .filter(|value| Self::acceptable(value))
            .map_or_else(Self::generate, |value| Self(value.to_owned()))
    }

    fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    fn acceptable(value: &str) -> bool {
        !value.is_empty()
            && value.len() <= MAX_LEN
            && value.bytes().all(|byte| byte.is_ascii_graphic())
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }

    /// Echo the id on the response.
    pub(super) fn write_header(&self, res: &mut Response) {
        if let Ok(value) = HeaderValue::from_str(&self.0) {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
