use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{health_handler, lookup_handler, redirect_handler, shorten_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    /// `/_health` carries an underscore so it can never shadow a generated code.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/_health", get(health_handler))
            .route("/shorten", post(shorten_handler))
            .route("/urls/{short_code}", get(lookup_handler))
            .route("/{short_code}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
