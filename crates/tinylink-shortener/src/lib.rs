//! URL shortener service implementation.
//!
//! [`ShortenerService`] composes a [`Generator`](tinylink_generator::Generator)
//! with a [`Repository`](tinylink_core::Repository): it proposes random codes
//! and lets the repository's atomic insert decide which one wins.

pub mod service;

pub use service::{AllocationPolicy, ShortenerService};
pub use tinylink_core::{Shortener, ShortenerError};
