//! Cache validation helpers for private list responses.
//!
//! Lists backed by a [`ViewCache`](crate::domain::ports::ViewCache) revision
//! carry a weak `ETag` made of the revision and a digest of the rendered
//! body. The revision restarts at zero in every process, so the digest is
//! what ties a tag to the rows the store actually returned.

use actix_web::HttpRequest;
use actix_web::http::header;
use sha2::{Digest, Sha256};

const BODY_DIGEST_BYTES: usize = 8;

/// Private responses must always be revalidated before reuse.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Build the standard cache-control header tuple for private API responses.
pub const fn private_no_cache_header() -> (header::HeaderName, &'static str) {
    (header::CACHE_CONTROL, PRIVATE_NO_CACHE_MUST_REVALIDATE)
}

/// Weak entity tag for a view revision and its rendered body.
///
/// # Examples
/// ```
/// use dashboard::inbound::http::cache_control::weak_etag;
///
/// let tag = weak_etag(3, b"[]");
/// assert!(tag.starts_with("W/\"3-"));
/// assert_ne!(tag, weak_etag(3, b"[{}]"));
/// ```
pub fn weak_etag(revision: u64, body: &[u8]) -> String {
    let digest = Sha256::digest(body);
    let prefix = digest.get(..BODY_DIGEST_BYTES).unwrap_or_default();
    format!("W/\"{revision}-{}\"", hex::encode(prefix))
}

/// Whether the request's `If-None-Match` already names `etag`.
pub fn is_fresh(req: &HttpRequest, etag: &str) -> bool {
    req.headers()
        .get_all(header::IF_NONE_MATCH)
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .any(|candidate| candidate == "*" || weak_eq(candidate, etag))
}

fn weak_eq(left: &str, right: &str) -> bool {
    left.trim_start_matches("W/") == right.trim_start_matches("W/")
}
