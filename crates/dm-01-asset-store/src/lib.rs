//! # Asset Store (dm-01)
//!
//! Typed, type-discriminated asset records: the variant registry, the codec
//! that validates and (de)serializes them, and the persistence port.
//!
//! ## Data Flow
//!
//! ```text
//! POST payload ──► AssetCodec::encode ──(id, bytes)──► AssetRepository::put
//!                        │
//!                  VariantRegistry
//!                        │
//! GET id ──► AssetRepository::get ──bytes──► AssetCodec::decode ──► AssetRecord
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Registered Kinds | Every persisted record's `type` is a registered kind |
//! | 2 | Closed Shape | Persisted fields ⊆ required ∪ optional ∪ {type, id} |
//! | 3 | Server Ids | Ids are generated on write; client ids are overwritten |
//! | 4 | Self-Describing | Stored bytes carry their own discriminator |
//! | 5 | No Partial Writes | A rejected payload is never persisted |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Registry, codec, entities, schema publishing, errors
//! - `ports/` - Port traits (inbound API, outbound repository)
//! - `adapters/` - Repository implementations (memory, flat files)
//! - `service.rs` - Application service implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! use dm_01_asset_store::{AssetStoreApi, AssetStoreService, VariantRegistry};
//!
//! let registry = Arc::new(VariantRegistry::builtin()?);
//! let service = AssetStoreService::new_in_memory(registry);
//!
//! let id = service.create_asset(json!({"type": "type1", "name": "Alice"}))?;
//! let record = service.get_asset(id.as_str())?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{FileAssetRepository, InMemoryAssetRepository};
pub use domain::codec::AssetCodec;
pub use domain::entities::{
    Asset, AssetId, AssetKind, AssetRecord, DocumentAsset, EncodedAsset, PaymentAsset,
    DISCRIMINATOR_FIELD, ID_FIELD,
};
pub use domain::errors::{AssetError, RegistryError, StoreError};
pub use domain::registry::{FieldSpec, FieldType, VariantRegistry, VariantSpec};
pub use domain::schema::openapi_document;
pub use ports::inbound::AssetStoreApi;
pub use ports::outbound::AssetRepository;
pub use service::AssetStoreService;
