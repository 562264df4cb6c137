//! Hop request building and header capture.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, ACCEPT, CACHE_CONTROL, PRAGMA, USER_AGENT};

use crate::config::{CACHE_CONTROL_NO_CACHE, PRAGMA_NO_CACHE};
use crate::user_agent::RequestIdentity;

/// Headers sent with every hop request.
///
/// The identity supplies the User-Agent and optional basic-auth credentials.
/// `Cache-Control`/`Pragma` force a live fetch so status codes and timings come
/// from the origin rather than an intermediate cache.
pub(crate) struct HopHeaders;

impl HopHeaders {
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
        identity: &RequestIdentity,
    ) -> reqwest::RequestBuilder {
        let builder = builder
            .header(USER_AGENT, identity.user_agent.as_str())
            .header(ACCEPT, "*/*")
            .header(CACHE_CONTROL, CACHE_CONTROL_NO_CACHE)
            .header(PRAGMA, PRAGMA_NO_CACHE);

        match &identity.basic_auth {
            Some(auth) => builder.basic_auth(&auth.username, Some(&auth.password)),
            None => builder,
        }
    }
}

/// Flattens a response header map into an ordered name -> value map.
///
/// Names are lowercase (as stored by `http`). Repeated headers are joined with
/// ", " in arrival order; non-UTF-8 bytes are replaced.
pub(crate) fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    collected
}
