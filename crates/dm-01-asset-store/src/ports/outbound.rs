//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the Asset Store service.

use crate::domain::entities::AssetId;
use crate::domain::errors::StoreError;

/// Flat record-per-identifier persistence.
///
/// Production: `FileAssetRepository` (one `<id>.json` file per record)
/// Testing: `InMemoryAssetRepository`
///
/// Each id is written at most once in normal operation; the service never
/// performs read-modify-write. Read-after-write visibility is the adapter's
/// concern.
pub trait AssetRepository: Send + Sync {
    /// Store the bytes for `id`, replacing any previous entry wholesale.
    fn put(&self, id: &AssetId, bytes: &[u8]) -> Result<(), StoreError>;

    /// Fetch the bytes for `id`. `Ok(None)` when nothing is stored.
    fn get(&self, id: &AssetId) -> Result<Option<Vec<u8>>, StoreError>;
}
