//! # Asset Store Service
//!
//! The main service implementing the Asset Store API.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements `AssetStoreApi` for create/read operations
//! 2. Runs every payload and every stored record through the `AssetCodec`
//! 3. Uses dependency injection for persistence (`AssetRepository`)
//!
//! It holds no per-request state, so one instance is shared by all requests.

use crate::adapters::storage::InMemoryAssetRepository;
use crate::domain::codec::AssetCodec;
use crate::domain::entities::{AssetId, AssetRecord};
use crate::domain::errors::AssetError;
use crate::domain::registry::VariantRegistry;
use crate::ports::inbound::AssetStoreApi;
use crate::ports::outbound::AssetRepository;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The Asset Store Service.
pub struct AssetStoreService<R: AssetRepository> {
    /// Codec bound to the shared registry.
    codec: AssetCodec,
    /// Persistence collaborator.
    repository: R,
}

impl<R: AssetRepository> AssetStoreService<R> {
    /// Create a new service over the given registry and repository.
    pub fn new(registry: Arc<VariantRegistry>, repository: R) -> Self {
        Self {
            codec: AssetCodec::new(registry),
            repository,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

impl AssetStoreService<InMemoryAssetRepository> {
    /// Service backed by an in-memory repository.
    pub fn new_in_memory(registry: Arc<VariantRegistry>) -> Self {
        Self::new(registry, InMemoryAssetRepository::new())
    }
}

impl<R: AssetRepository> AssetStoreApi for AssetStoreService<R> {
    fn create_asset(&self, payload: Value) -> Result<AssetId, AssetError> {
        let encoded = self.codec.encode(payload).map_err(|e| {
            debug!(error = %e, "rejected asset submission");
            e
        })?;

        self.repository
            .put(&encoded.id, &encoded.bytes)
            .map_err(|e| {
                error!(id = %encoded.id, error = %e, "failed to persist asset");
                AssetError::from(e)
            })?;

        info!(id = %encoded.id, bytes = encoded.bytes.len(), "asset stored");
        Ok(encoded.id)
    }

    fn get_asset(&self, id: &str) -> Result<AssetRecord, AssetError> {
        // A string that is not a UUID can never have been issued.
        let Some(asset_id) = AssetId::parse(id) else {
            debug!(id, "lookup with malformed id");
            return Err(AssetError::NotFound { id: id.to_string() });
        };

        let bytes = self
            .repository
            .get(&asset_id)
            .map_err(|e| {
                error!(id = %asset_id, error = %e, "failed to read asset");
                AssetError::from(e)
            })?
            .ok_or_else(|| AssetError::NotFound { id: id.to_string() })?;

        match self.codec.decode(&bytes) {
            Ok(record) => {
                if record.id != asset_id {
                    warn!(key = %asset_id, stored = %record.id, "stored id differs from its key");
                }
                debug!(id = %record.id, kind = %record.kind(), "asset loaded");
                Ok(record)
            }
            Err(e) => {
                error!(id = %asset_id, error = %e, "failed to decode stored asset");
                Err(e)
            }
        }
    }

    fn registry(&self) -> &VariantRegistry {
        self.codec.registry()
    }
}
