//! # Integration Test Flows
//!
//! Requests go through the full gateway router (middleware included) into an
//! asset store built by the runtime wiring, backed by a temp directory.
//!
//! ## Flows Tested:
//!
//! 1. **POST → file → GET**: a created asset lands as `<id>.json` and reads back unchanged
//! 2. **Restart**: records written by one process are readable by the next
//! 3. **Damaged records**: hand-edited files surface as server errors, never as 404
//! 4. **Rejections**: invalid payloads leave the data directory untouched

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use dm_01_asset_store::{AssetCodec, VariantRegistry};
    use dm_02_api_gateway::{ApiGatewayService, GatewayConfig};
    use dm_runtime::{build_store, StorageBackend, StorageConfig};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn file_gateway(dir: &Path) -> Router {
        let storage = StorageConfig {
            backend: StorageBackend::File,
            data_dir: dir.to_path_buf(),
        };
        let registry = Arc::new(VariantRegistry::builtin().unwrap());
        let store = build_store(&storage, registry).unwrap();
        ApiGatewayService::new(GatewayConfig::default(), store)
            .unwrap()
            .build_router()
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn post(router: &Router, payload: Value) -> (StatusCode, Value) {
        send(
            router,
            Request::builder()
                .method("POST")
                .uri("/asset")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn get(router: &Router, id: &str) -> (StatusCode, Value) {
        send(
            router,
            Request::builder()
                .uri(format!("/asset/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    fn record_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".json"))
            .collect();
        names.sort();
        names
    }

    // =============================================================================
    // INTEGRATION TESTS: CREATE AND READ
    // =============================================================================

    #[tokio::test]
    async fn test_document_round_trip_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let router = file_gateway(dir.path());

        let (status, created) = post(&router, json!({"type": "type1", "name": "Alice"})).await;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_str().unwrap().to_string();

        // One self-describing file per record
        assert_eq!(record_files(dir.path()), vec![format!("{}.json", id)]);
        let on_disk: Value =
            serde_json::from_slice(&std::fs::read(dir.path().join(format!("{}.json", id))).unwrap())
                .unwrap();
        assert_eq!(on_disk, json!({"id": id, "type": "type1", "name": "Alice"}));

        let (status, record) = get(&router, &id).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record, on_disk);
    }

    #[tokio::test]
    async fn test_payment_round_trip_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let router = file_gateway(dir.path());

        let (_, created) = post(&router, json!({"type": "type2", "amount": 42.5})).await;
        let id = created["id"].as_str().unwrap();

        let (status, record) = get(&router, id).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record, json!({"id": id, "type": "type2", "amount": 42.5}));
    }

    #[tokio::test]
    async fn test_identical_payloads_get_distinct_ids() {
        let dir = tempfile::tempdir().unwrap();
        let router = file_gateway(dir.path());
        let payload = json!({"type": "type1", "name": "Alice"});

        let (_, first) = post(&router, payload.clone()).await;
        let (_, second) = post(&router, payload).await;

        assert_ne!(first["id"], second["id"]);
        assert_eq!(record_files(dir.path()).len(), 2);
    }

    #[tokio::test]
    async fn test_records_survive_restart() {
        let dir = tempfile::tempdir().unwrap();

        let id = {
            let router = file_gateway(dir.path());
            let (_, created) = post(&router, json!({"type": "type1", "name": "Bob"})).await;
            created["id"].as_str().unwrap().to_string()
        };

        let restarted = file_gateway(dir.path());
        let (status, record) = get(&restarted, &id).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record["name"], "Bob");
    }

    // =============================================================================
    // INTEGRATION TESTS: FAILURES
    // =============================================================================

    #[tokio::test]
    async fn test_rejected_payloads_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let router = file_gateway(dir.path());

        let (status, _) = post(&router, json!({"name": "Alice"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = post(&router, json!({"type": "type3", "foo": 1})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("type3"));

        let (status, body) = post(&router, json!({"type": "type2"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"][0]["location"], "body.amount");

        let (status, _) = post(&router, json!({"type": "type2", "amount": "lots"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        assert!(record_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_damaged_record_is_server_error_not_404() {
        let dir = tempfile::tempdir().unwrap();
        let router = file_gateway(dir.path());

        let (_, created) = post(&router, json!({"type": "type2", "amount": 10.0})).await;
        let id = created["id"].as_str().unwrap().to_string();

        // Drop the required field behind the store's back
        let path = dir.path().join(format!("{}.json", id));
        std::fs::write(
            &path,
            serde_json::to_vec(&json!({"type": "type2", "id": id})).unwrap(),
        )
        .unwrap();

        let (status, body) = get(&router, &id).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
    }

    #[tokio::test]
    async fn test_unregistered_kind_on_disk_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let router = file_gateway(dir.path());

        let (_, created) = post(&router, json!({"type": "type1", "name": "Alice"})).await;
        let id = created["id"].as_str().unwrap().to_string();
        std::fs::write(
            dir.path().join(format!("{}.json", id)),
            serde_json::to_vec(&json!({"type": "type9", "id": id})).unwrap(),
        )
        .unwrap();

        let (status, _) = get(&router, &id).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_id_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let router = file_gateway(dir.path());

        let (status, _) = get(&router, "6f1c1a4e-1f53-4a38-9a57-2f0a7b1f3c11").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get(&router, "..%2F..%2Fetc%2Fpasswd").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // =============================================================================
    // INTEGRATION TESTS: CODEC AGAINST STORED BYTES
    // =============================================================================

    #[tokio::test]
    async fn test_stored_bytes_decode_with_codec() {
        let dir = tempfile::tempdir().unwrap();
        let router = file_gateway(dir.path());

        let (_, created) = post(
            &router,
            json!({"type": "type1", "name": "Alice", "description": "first"}),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let bytes = std::fs::read(dir.path().join(format!("{}.json", id))).unwrap();
        let codec = AssetCodec::new(Arc::new(VariantRegistry::builtin().unwrap()));
        let record = codec.decode(&bytes).unwrap();

        assert_eq!(record.id.as_str(), id);
        assert_eq!(record.kind().as_str(), "type1");
    }
}
