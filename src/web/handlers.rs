//! REST API handlers
//!
//! The advisory endpoints perform no semantic validation: a missing farmer
//! uid is logged as a warning and the request proceeds unpersisted. Both
//! recommendation endpoints answer HTTP 200 even for `ERROR`-kind results.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::core::Advisor;
use crate::traits::{AdvisoryStore, PredictionClient};
use crate::types::{AdvisoryRecord, Recommendation, SoilSample};

/// Crop recommendation endpoint - POST /api/advisory/crop
pub async fn recommend_crop<P, S>(
    State(advisor): State<Arc<Advisor<P, S>>>,
    Json(sample): Json<SoilSample>,
) -> Json<Recommendation>
where
    P: PredictionClient + 'static,
    S: AdvisoryStore + 'static,
{
    if sample.farmer_uid.is_none() {
        warn!("no farmer uid provided, record won't be saved");
    }

    Json(advisor.recommend_crop(&sample).await)
}

/// Fertilizer recommendation endpoint - POST /api/advisory/fertilizer
pub async fn recommend_fertilizer<P, S>(
    State(advisor): State<Arc<Advisor<P, S>>>,
    Json(sample): Json<SoilSample>,
) -> Json<Recommendation>
where
    P: PredictionClient + 'static,
    S: AdvisoryStore + 'static,
{
    if sample.farmer_uid.is_none() {
        warn!("no farmer uid provided, record won't be saved");
    }

    Json(advisor.recommend_fertilizer(&sample).await)
}

/// Advisory history endpoint - GET /api/advisory/history/:farmer_uid
pub async fn history<P, S>(
    State(advisor): State<Arc<Advisor<P, S>>>,
    Path(farmer_uid): Path<String>,
) -> Result<Json<Vec<AdvisoryRecord>>, StatusCode>
where
    P: PredictionClient + 'static,
    S: AdvisoryStore + 'static,
{
    match advisor.history(&farmer_uid).await {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            error!("history lookup failed for {farmer_uid}: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Service status endpoint - GET /api/status
pub async fn status<P, S>(State(advisor): State<Arc<Advisor<P, S>>>) -> Json<Value>
where
    P: PredictionClient + 'static,
    S: AdvisoryStore + 'static,
{
    let snapshot = advisor.state().snapshot();
    let store_healthy = advisor.store_healthy().await;

    Json(json!({
        "status": "ok",
        "data": {
            "server_status": "running",
            "uptime_seconds": snapshot.uptime_seconds,
            "crop_requests": snapshot.crop_requests,
            "fertilizer_requests": snapshot.fertilizer_requests,
            "records_persisted": snapshot.records_persisted,
            "persistence_failures": snapshot.persistence_failures,
            "store_healthy": store_healthy,
            "version": env!("CARGO_PKG_VERSION")
        }
    }))
}

/// Liveness endpoint - GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
