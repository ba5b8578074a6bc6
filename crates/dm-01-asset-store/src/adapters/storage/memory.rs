use crate::domain::entities::AssetId;
use crate::domain::errors::StoreError;
use crate::ports::outbound::AssetRepository;
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory asset repository for unit tests and ephemeral deployments.
///
/// Contents are lost when the process exits.
#[derive(Default)]
pub struct InMemoryAssetRepository {
    data: RwLock<HashMap<AssetId, Vec<u8>>>,
}

impl InMemoryAssetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl AssetRepository for InMemoryAssetRepository {
    fn put(&self, id: &AssetId, bytes: &[u8]) -> Result<(), StoreError> {
        self.data.write().insert(id.clone(), bytes.to_vec());
        Ok(())
    }

    fn get(&self, id: &AssetId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.data.read().get(id).cloned())
    }
}
