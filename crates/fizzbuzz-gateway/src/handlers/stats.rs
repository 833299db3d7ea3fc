use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use fizzbuzz_core::StatsRepository;

use crate::error::{AppError, Language, Result};
use crate::model::StatsResponse;
use crate::state::AppState;

/// Returns the most frequently requested parameter combination, or
/// `204 No Content` when no statistics have been recorded yet.
pub async fn stats_handler<R: StatsRepository>(
    State(state): State<AppState<R>>,
    headers: HeaderMap,
) -> Result<Response> {
    let language = Language::from_headers(&headers);

    let entry = state
        .stats()
        .most_frequent()
        .await
        .map_err(|source| AppError::stats(source, language))?;

    Ok(match entry {
        Some(entry) => Json(StatsResponse::from(entry)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}
