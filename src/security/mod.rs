//! SSRF protection for caller-supplied URLs.
//!
//! Validation runs before any network access; only the Validator may reject a
//! request outright. See [`validate_url`].

mod url_validation;

pub use url_validation::validate_url;
