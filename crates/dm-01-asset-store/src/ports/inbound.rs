//! # Inbound Ports (Driving Ports)
//!
//! The primary API for the Asset Store subsystem.

use crate::domain::entities::{AssetId, AssetRecord};
use crate::domain::errors::AssetError;
use crate::domain::registry::VariantRegistry;
use serde_json::Value;

/// Primary API for storing and loading typed assets.
///
/// Implementations are shared across concurrent requests and hold no
/// per-request state.
pub trait AssetStoreApi: Send + Sync {
    /// Validate, assign an id to, and persist one asset submission.
    ///
    /// ## Errors
    ///
    /// - `MalformedPayload`: payload is not a JSON object
    /// - `MissingDiscriminator`: no string `type` field
    /// - `UnknownVariant`: `type` is not a registered kind
    /// - `ValidationError`: a field is missing, mistyped or unexpected
    /// - `StorageFailure`: the repository rejected the write
    ///
    /// Nothing is persisted when an error is returned.
    fn create_asset(&self, payload: Value) -> Result<AssetId, AssetError>;

    /// Load and decode the asset stored under `id`.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: nothing is stored under `id`
    /// - `CorruptRecord`: the stored bytes are not a well-formed record
    /// - `UnknownVariant`: the stored kind is no longer registered
    /// - `StorageFailure`: the repository read failed
    fn get_asset(&self, id: &str) -> Result<AssetRecord, AssetError>;

    /// Registry the service validates against.
    fn registry(&self) -> &VariantRegistry;
}
