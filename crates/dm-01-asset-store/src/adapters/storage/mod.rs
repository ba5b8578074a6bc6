//! Storage Adapters
//!
//! Implementations of the `AssetRepository` trait.

mod file;
mod memory;

pub use file::FileAssetRepository;
pub use memory::InMemoryAssetRepository;
