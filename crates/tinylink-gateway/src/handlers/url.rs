use crate::error::{AppError, Result};
use crate::model::{LookupResponse, ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tinylink_core::ShortCode;

pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(request): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>> {
    let code = state
        .shortener()
        .shorten(&request.url)
        .await
        .map_err(AppError::from_shorten)?;

    Ok(Json(ShortenResponse {
        shortened_url: code.to_url(state.base_url()),
        short_code: code.into_inner(),
    }))
}

pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let url = resolve(&state, short_code).await?;
    let location = HeaderValue::from_str(&url).map_err(|_| AppError::InvalidRedirect(url))?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(LOCATION, location)]).into_response())
}

pub async fn lookup_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LookupResponse>> {
    let url = resolve(&state, short_code).await?;
    Ok(Json(LookupResponse { url }))
}

async fn resolve(state: &AppState, short_code: String) -> Result<String> {
    // A malformed code was never allocated, so it maps to 404 like any unknown one.
    let code = ShortCode::new(short_code)?;
    Ok(state.shortener().resolve(&code).await?)
}
