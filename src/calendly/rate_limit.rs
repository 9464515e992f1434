//! Rate-limit header extraction

use chrono::{DateTime, Duration, Utc};
use reqwest::header::HeaderMap;

/// Rate-limit state reported by a single Calendly API response.
///
/// Every field is optional: a missing header means "unknown", never zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RateLimitDescription {
    /// Request ceiling for the current window
    pub limit: Option<i64>,
    /// Requests remaining in the current window
    pub remaining: Option<i64>,
    /// When the window resets
    pub reset_at: Option<DateTime<Utc>>,
}

/// Parse a header value as an integer, treating absent or unparseable values as unknown
fn header_i64(headers: &HeaderMap, name: &str) -> Option<i64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
}

/// Extract rate-limit data from the `X-Ratelimit-*` response headers.
///
/// Returns `None` when no rate-limit header is present at all.
/// `X-Ratelimit-Reset` is seconds-from-now and is converted to an absolute time.
pub(crate) fn extract_rate_limit(headers: &HeaderMap) -> Option<RateLimitDescription> {
    let limit = header_i64(headers, "X-Ratelimit-Limit");
    let remaining = header_i64(headers, "X-Ratelimit-Remaining");
    let reset_at = header_i64(headers, "X-Ratelimit-Reset").map(|s| Utc::now() + Duration::seconds(s));

    if limit.is_none() && remaining.is_none() && reset_at.is_none() {
        return None;
    }

    Some(RateLimitDescription {
        limit,
        remaining,
        reset_at,
    })
}
