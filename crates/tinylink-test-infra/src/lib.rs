//! Disposable infrastructure for integration tests.

pub mod error;
pub mod postgres;

pub use error::{Result, TestInfraError};
