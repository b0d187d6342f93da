mod health;
mod url;

pub use health::health_handler;
pub use url::{lookup_handler, redirect_handler, shorten_handler};
