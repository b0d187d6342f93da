use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

/// The boundary consumed by request handlers.
#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Allocates a fresh short code for `original_url` and persists the mapping.
    async fn shorten(&self, original_url: &str) -> Result<ShortCode>;

    /// Resolves a short code to its original URL.
    /// Returns `Err(ShortenerError::NotFound)` if the code was never allocated.
    async fn resolve(&self, code: &ShortCode) -> Result<String>;
}
