//! # Server Lifecycle
//!
//! Serves the gateway on a real socket and stops it through the shutdown future.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::oneshot;
    use tokio::time::timeout;

    use dm_01_asset_store::{AssetStoreApi, AssetStoreService, VariantRegistry};
    use dm_02_api_gateway::{ApiGatewayService, GatewayConfig};

    async fn raw_request(addr: std::net::SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_serves_over_tcp_until_shutdown() {
        let registry = Arc::new(VariantRegistry::builtin().unwrap());
        let store: Arc<dyn AssetStoreApi> = Arc::new(AssetStoreService::new_in_memory(registry));
        let gateway = ApiGatewayService::new(GatewayConfig::default(), store).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let server = tokio::spawn(gateway.run_on(listener, async move {
            let _ = shutdown_rx.await;
        }));

        let health = raw_request(
            addr,
            "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(health.starts_with("HTTP/1.1 200"));
        assert!(health.contains("\"status\":\"ok\""));

        let body = r#"{"type":"type1","name":"Alice"}"#;
        let created = raw_request(
            addr,
            &format!(
                "POST /asset HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            ),
        )
        .await;
        assert!(created.starts_with("HTTP/1.1 200"));
        assert!(created.contains("asset saved successfully to"));

        shutdown_tx.send(()).unwrap();
        let result = timeout(Duration::from_secs(5), server)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_bind_failure_reported() {
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = occupied.local_addr().unwrap().port();

        let mut config = GatewayConfig::default();
        config.http.host = "127.0.0.1".parse().unwrap();
        config.http.port = port;

        let registry = Arc::new(VariantRegistry::builtin().unwrap());
        let store: Arc<dyn AssetStoreApi> = Arc::new(AssetStoreService::new_in_memory(registry));
        let gateway = ApiGatewayService::new(config, store).unwrap();

        let result = gateway.run(async {}).await;
        assert!(matches!(
            result,
            Err(dm_02_api_gateway::GatewayError::Bind(_))
        ));
    }
}
