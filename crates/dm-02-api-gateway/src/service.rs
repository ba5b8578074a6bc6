//! API Gateway service - main entry point.
//!
//! Builds the axum router over an [`AssetStoreApi`] and serves it until the
//! shutdown future resolves.

use crate::docs::{DocsPage, OPENAPI_PATH};
use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::handlers::{create_asset, docs, get_asset, health_check, openapi_spec, AppState};
use crate::middleware::{create_cors_layer, TracingLayer};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use dm_01_asset_store::{openapi_document, AssetStoreApi};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

/// Route serving the documentation page.
pub const DOCS_PATH: &str = "/docs";

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(config: GatewayConfig, store: Arc<dyn AssetStoreApi>) -> Result<Self, GatewayError> {
        config.validate()?;

        let openapi = Arc::new(openapi_document(
            store.registry(),
            &config.docs.title,
            &config.docs.version,
        ));
        let docs = Arc::new(DocsPage::new(
            config.docs.title.clone(),
            config.docs.template_path.clone(),
        ));

        Ok(Self {
            config,
            state: AppState {
                store,
                openapi,
                docs,
            },
        })
    }

    /// Build HTTP router
    pub fn build_router(&self) -> Router {
        let mut router: Router<AppState> = Router::new()
            .route("/asset", post(create_asset))
            .route("/asset/:id", get(get_asset))
            .route("/health", get(health_check));

        if self.config.docs.enabled {
            router = router
                .route(OPENAPI_PATH, get(openapi_spec))
                .route(DOCS_PATH, get(docs));
        }

        // Each layer wraps everything above it; tracing sees the final status.
        router
            .layer(DefaultBodyLimit::max(self.config.limits.max_request_size))
            .layer(TimeoutLayer::new(self.config.timeouts.request))
            .layer(create_cors_layer(&self.config.cors))
            .layer(TracingLayer::new())
            .with_state(self.state.clone())
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))?;
        self.run_on(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn run_on<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        info!(addr = %local, "Starting server on :{}", local.port());
        if self.config.docs.enabled {
            info!(
                "OpenAPI URL: {}:{}{}",
                self.config.http.public_host,
                local.port(),
                DOCS_PATH
            );
        }

        let router = self.build_router();
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Server(e.to_string()))?;

        info!("API Gateway stopped");
        Ok(())
    }
}
