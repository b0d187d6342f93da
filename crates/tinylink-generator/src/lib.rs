pub mod random;
pub mod scripted;

pub use random::RandomGenerator;
pub use scripted::ScriptedGenerator;

use thiserror::Error;
use tinylink_core::ShortCode;

/// The 62 symbols short codes are drawn from.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Code length used when none is configured.
pub const DEFAULT_CODE_LENGTH: usize = 6;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("invalid code length {length}; expected 1..={max}")]
    InvalidLength { length: usize, max: usize },
}

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Output is a candidate only: uniqueness is enforced by the repository
/// at insert time, so callers must be ready to retry on conflict.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Produces the next candidate short code.
    fn generate(&self) -> Self::Output;
}
