//! # Adapters Module
//!
//! Implementations of the outbound ports.
//!
//! ## Modules
//!
//! - `storage`: `AssetRepository` backends (in-memory, flat files)

pub mod storage;

pub use storage::{FileAssetRepository, InMemoryAssetRepository};
