//! The synthesis endpoint.
//!
//! Accepts a JSON request, delegates to the core service, and returns the
//! raw PCM payload. The payload is headerless i16 LE mono; the effective
//! model, sample rate, cache participation, and resampling status travel
//! in response headers so clients can interpret the bytes.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Response};

use crate::dto::SynthesizeBody;
use crate::error::HttpError;
use crate::state::AppState;

pub async fn synthesize(
    State(state): State<AppState>,
    Json(body): Json<SynthesizeBody>,
) -> Result<Response, HttpError> {
    let request = body.into();
    let outcome = state.service.handle(&request).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/x-raw"));
    headers.insert(
        header::CONTENT_LENGTH,
        HeaderValue::from(outcome.payload.len()),
    );
    if let Ok(model) = HeaderValue::from_str(outcome.model.as_str()) {
        headers.insert("x-model", model);
    }
    headers.insert("x-sample-rate", HeaderValue::from(outcome.sample_rate));
    headers.insert(
        "x-cache",
        HeaderValue::from_static(outcome.cache.as_str()),
    );
    headers.insert(
        "x-resampling",
        HeaderValue::from_static(if outcome.resampled { "APPLIED" } else { "NONE" }),
    );

    Ok((headers, outcome.payload).into_response())
}
