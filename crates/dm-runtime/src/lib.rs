//! # Data Manager Runtime
//!
//! Wires the asset store (dm-01) into the API gateway (dm-02).
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then `DM_*` environment overrides)
//! 2. Build the variant registry
//! 3. Open the configured storage backend
//! 4. Build the gateway router and serve until Ctrl+C

pub mod config;
pub mod wiring;

pub use config::{load_config, load_config_from, NodeConfig, StorageBackend, StorageConfig};
pub use wiring::{build_gateway, build_store};
