//! Subsystem wiring: registry → store → gateway.

use crate::config::{NodeConfig, StorageBackend, StorageConfig};
use anyhow::{Context, Result};
use dm_01_asset_store::{
    AssetStoreApi, AssetStoreService, FileAssetRepository, InMemoryAssetRepository,
    VariantRegistry,
};
use dm_02_api_gateway::ApiGatewayService;
use std::sync::Arc;
use tracing::info;

/// Build the asset store over the configured backend.
pub fn build_store(
    storage: &StorageConfig,
    registry: Arc<VariantRegistry>,
) -> Result<Arc<dyn AssetStoreApi>> {
    let store: Arc<dyn AssetStoreApi> = match storage.backend {
        StorageBackend::Memory => {
            info!("[dm-01] Using in-memory asset storage (records are lost on exit)");
            Arc::new(AssetStoreService::new(
                registry,
                InMemoryAssetRepository::new(),
            ))
        }
        StorageBackend::File => {
            let repository = FileAssetRepository::open(&storage.data_dir).with_context(|| {
                format!(
                    "Failed to open data directory {}",
                    storage.data_dir.display()
                )
            })?;
            Arc::new(AssetStoreService::new(registry, repository))
        }
    };
    Ok(store)
}

/// Build the gateway with every subsystem it depends on.
pub fn build_gateway(config: NodeConfig) -> Result<ApiGatewayService> {
    let registry = Arc::new(
        VariantRegistry::builtin().context("Failed to build the variant registry")?,
    );
    info!(
        kinds = ?registry.kinds(),
        "[dm-01] Variant registry ready"
    );

    let store = build_store(&config.storage, registry)?;
    ApiGatewayService::new(config.gateway, store).context("Failed to create API gateway")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_backend_writes_record_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig {
            backend: StorageBackend::File,
            data_dir: dir.path().join("assets"),
        };
        let registry = Arc::new(VariantRegistry::builtin().unwrap());

        let store = build_store(&storage, registry).unwrap();
        let id = store
            .create_asset(json!({"type": "type1", "name": "Alice"}))
            .unwrap();

        assert!(dir.path().join("assets").join(id.file_name()).is_file());
    }

    #[test]
    fn test_memory_backend() {
        let storage = StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        };
        let registry = Arc::new(VariantRegistry::builtin().unwrap());

        let store = build_store(&storage, registry).unwrap();
        let id = store
            .create_asset(json!({"type": "type2", "amount": 1.0}))
            .unwrap();
        assert!(store.get_asset(id.as_str()).is_ok());
    }

    #[test]
    fn test_build_gateway_rejects_invalid_config() {
        let mut config = NodeConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.gateway.limits.max_request_size = 0;

        assert!(build_gateway(config).is_err());
    }
}
