use async_trait::async_trait;
use std::sync::Arc;
use tinylink_core::{Repository, ShortCode, Shortener, ShortenerError, StorageError};
use tinylink_generator::Generator;
use tracing::{debug, info, trace, warn};
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Bounds the generate-and-insert loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct AllocationPolicy {
    /// Inserts tried before giving up with `AllocationExhausted`. Values below 1 count as 1.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the `Shortener` trait.
///
/// The generator only proposes candidates. The repository's atomic insert is
/// what guarantees uniqueness; a `Conflict` from it sends the loop back for a
/// fresh candidate, and any other storage error is returned unchanged.
#[derive(Debug)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    policy: AllocationPolicy,
}

impl<R, G> Clone for ShortenerService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            policy: self.policy,
        }
    }
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` with the default allocation policy.
    pub fn new(repository: R, generator: G) -> Self {
        Self::with_policy(repository, generator, AllocationPolicy::default())
    }

    pub fn with_policy(repository: R, generator: G, policy: AllocationPolicy) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            policy,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn policy(&self) -> AllocationPolicy {
        self.policy
    }

    fn validate_url(url: &str) -> Result<(), ShortenerError> {
        if url.trim().is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, original_url: &str) -> Result<ShortCode, ShortenerError> {
        Self::validate_url(original_url)?;

        let max_attempts = self.policy.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let code: ShortCode = self.generator.generate().into();

            match self.repository.insert(&code, original_url).await {
                Ok(id) => {
                    info!(code = %code, record_id = %id, attempt, "created short url");
                    return Ok(code);
                }
                Err(StorageError::Conflict(_)) => {
                    debug!(code = %code, attempt, "short code collision, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        warn!(attempts = max_attempts, "no free short code found");
        Err(ShortenerError::AllocationExhausted {
            attempts: max_attempts,
        })
    }

    async fn resolve(&self, code: &ShortCode) -> Result<String, ShortenerError> {
        trace!(code = %code, "resolving short code");

        match self.repository.get(code).await? {
            Some(record) => {
                debug!(code = %code, url = %record.original_url, "resolved short code");
                Ok(record.original_url)
            }
            None => Err(ShortenerError::NotFound(code.to_string())),
        }
    }
}
