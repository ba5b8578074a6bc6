// Allow missing docs for internal items in development
#![allow(missing_docs)]

//! DM-02 API Gateway - HTTP interface to the asset store.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     API GATEWAY (dm-02)                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │   POST /asset   GET /asset/:id   GET /openapi.json   /docs   │
//! │                          │                                   │
//! │  ┌───────────────────────┴──────────────────────────┐        │
//! │  │                Middleware Stack                  │        │
//! │  │     Tracing → CORS → Timeout → Body limit        │        │
//! │  └───────────────────────┬──────────────────────────┘        │
//! │                          │                                   │
//! │                 handlers (problem+json errors)               │
//! └──────────────────────────┼───────────────────────────────────┘
//!                            │
//!                      AssetStoreApi
//!                            │
//!                   dm-01-asset-store
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use dm_02_api_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let service = ApiGatewayService::new(GatewayConfig::default(), store)?;
//! service.run(shutdown_signal()).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod docs;
pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod service;

// Re-exports for public API
pub use docs::{DocsError, DocsPage};
pub use domain::config::GatewayConfig;
pub use domain::error::{ApiError, ApiResult, ErrorDetail, GatewayError};
pub use handlers::{AppState, AssetCreated};
pub use service::ApiGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
