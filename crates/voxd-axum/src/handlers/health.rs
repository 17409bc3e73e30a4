//! Liveness probe. Touches neither the cache nor the engine, so it stays
//! green while a model download is in flight or the cache is down.

use axum::Json;

use crate::dto::HealthBody;

pub async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "healthy" })
}
