//! URL normalization for user-typed input.

use log::warn;

use crate::config::MAX_URL_LENGTH;

/// Normalizes user input into an absolute http(s) URL string.
///
/// Adds an `https://` prefix when the input has no http/https scheme. Rejects
/// inputs longer than [`MAX_URL_LENGTH`] (before and after prefixing) and inputs
/// that still do not parse. Safety checks are left to
/// [`validate_url`](crate::validate_url).
///
/// # Returns
///
/// `Some(normalized_url)` when the input is usable, `None` otherwise.
pub fn normalize_url(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if input.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            input.len(),
            MAX_URL_LENGTH,
            input.chars().take(50).collect::<String>()
        );
        return None;
    }

    let normalized = if has_http_scheme(input) {
        input.to_string()
    } else {
        format!("https://{input}")
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping normalized URL exceeding maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(_) => Some(normalized),
        Err(_) => {
            warn!("Skipping invalid URL: {input}");
            None
        }
    }
}

/// Case-insensitive check for an `http://` or `https://` prefix.
fn has_http_scheme(input: &str) -> bool {
    ["http://", "https://"].iter().any(|prefix| {
        input
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}
