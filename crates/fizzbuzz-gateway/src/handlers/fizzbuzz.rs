use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use fizzbuzz_core::StatsRepository;

use crate::error::{AppError, Language, Result};
use crate::model::{FizzBuzzRequest, FizzBuzzResponse};
use crate::state::AppState;

/// Generates a sequence for the posted parameters.
///
/// The statistics recording the call triggers is dispatched detached;
/// the response never waits on storage.
pub async fn fizzbuzz_handler<R: StatsRepository>(
    State(state): State<AppState<R>>,
    headers: HeaderMap,
    payload: std::result::Result<Json<FizzBuzzRequest>, JsonRejection>,
) -> Result<Json<FizzBuzzResponse>> {
    let language = Language::from_headers(&headers);

    let Json(request) =
        payload.map_err(|rejection| AppError::invalid_body(rejection.body_text(), language))?;

    let params = request
        .into_params()
        .map_err(|source| AppError::invalid_parameter(source, language))?;

    let generated = state.fizzbuzz().generate(&params);
    let count = generated.sequence.len();

    Ok(Json(FizzBuzzResponse {
        result: generated.sequence,
        count,
    }))
}
