//! Core types and traits for the tinylink URL shortener.
//!
//! This crate holds the vocabulary shared by the generator, the storage
//! backends, the shortener service and the HTTP gateway: the validated
//! [`ShortCode`], the stored [`UrlRecord`], the repository contract and the
//! [`Shortener`] boundary consumed by request handlers.

pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{ShortenerError, StorageError};
pub use repository::{ReadRepository, RecordId, Repository, UrlRecord};
pub use shortcode::ShortCode;
pub use shortener::Shortener;
