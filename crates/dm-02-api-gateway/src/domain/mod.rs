//! Domain layer for the API gateway.

pub mod config;
pub mod error;

pub use config::{
    ConfigError, CorsConfig, DocsConfig, GatewayConfig, HttpConfig, LimitsConfig, TimeoutConfig,
};
pub use error::{ApiError, ApiResult, ErrorDetail, GatewayError, PROBLEM_JSON};
