//! Middleware stack for the API Gateway.
//!
//! Layer order (outermost first): Tracing → CORS → Timeout → Body limit → Handler

pub mod cors;
pub mod tracing;

pub use cors::create_cors_layer;
pub use tracing::TracingLayer;
