//! HTTP handlers for the asset endpoints.

use crate::docs::DocsPage;
use crate::domain::error::{ApiError, ApiResult};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use dm_01_asset_store::{AssetId, AssetRecord, AssetStoreApi};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AssetStoreApi>,
    /// Rendered once at startup; the registry never changes afterwards.
    pub openapi: Arc<Value>,
    pub docs: Arc<DocsPage>,
}

/// Body of a successful `POST /asset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCreated {
    pub id: String,
    pub message: String,
}

impl AssetCreated {
    pub fn new(id: &AssetId) -> Self {
        Self {
            id: id.to_string(),
            message: format!("asset saved successfully to {}", id.file_name()),
        }
    }
}

/// `POST /asset`
pub async fn create_asset(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<AssetCreated>> {
    let body = body.map_err(|rejection| {
        debug!(status = rejection.status().as_u16(), "request body rejected");
        ApiError::new(rejection.status(), rejection.body_text())
    })?;

    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "request body is not JSON");
        ApiError::from(e)
    })?;

    let store = Arc::clone(&state.store);
    let id = run_blocking(move || store.create_asset(payload))
        .await?
        .map_err(|e| {
            let api = ApiError::from_write_error(&e);
            if api.status_code().is_server_error() {
                error!(error = %e, "asset creation failed");
            } else {
                warn!(error = %e, "asset rejected");
            }
            api
        })?;

    Ok(Json(AssetCreated::new(&id)))
}

/// `GET /asset/:id`
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AssetRecord>> {
    let store = Arc::clone(&state.store);
    let lookup = id.clone();
    let record = run_blocking(move || store.get_asset(&lookup))
        .await?
        .map_err(|e| {
            let api = ApiError::from_read_error(&e);
            if api.status_code().is_server_error() {
                error!(id = %id, error = %e, "failed to load asset");
            } else {
                debug!(id = %id, "asset not found");
            }
            api
        })?;

    Ok(Json(record))
}

/// `GET /openapi.json`
pub async fn openapi_spec(State(state): State<AppState>) -> Json<Value> {
    Json(state.openapi.as_ref().clone())
}

/// `GET /docs`
pub async fn docs(State(state): State<AppState>) -> impl IntoResponse {
    match state.docs.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render docs page");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "api-gateway",
        "version": crate::VERSION
    }))
}

/// Store calls may touch the filesystem, so keep them off the async workers.
async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!(error = %e, "blocking store task failed");
        ApiError::internal("internal error")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_created_message() {
        let id = AssetId::generate();
        let created = AssetCreated::new(&id);

        assert_eq!(created.id, id.as_str());
        assert_eq!(
            created.message,
            format!("asset saved successfully to {}.json", id)
        );
    }
}
