//! Redirect traversal: one request per hop, redirects never auto-followed.

mod redirects;
mod request;
mod step;


pub use redirects::{walk, WalkOptions};
