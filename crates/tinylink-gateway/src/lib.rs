//! HTTP front door for tinylink.
//!
//! Handlers stay thin: they parse requests, call the [`Shortener`] held in
//! [`AppState`] and translate its errors into HTTP responses.
//!
//! [`Shortener`]: tinylink_core::Shortener

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
