use crate::domain::entities::AssetId;
use crate::domain::errors::StoreError;
use crate::ports::outbound::AssetRepository;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed asset repository.
///
/// Each record lives in its own `<id>.json` file directly under the data
/// directory. Writes go through a temp file and a rename so a reader never
/// sees a half-written record.
pub struct FileAssetRepository {
    dir: PathBuf,
}

impl FileAssetRepository {
    /// Open (and create if needed) the data directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        info!(dir = %dir.display(), "[dm-01] 📁 Asset data directory ready");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `id`.
    pub fn path_for(&self, id: &AssetId) -> PathBuf {
        self.dir.join(id.file_name())
    }
}

impl AssetRepository for FileAssetRepository {
    fn put(&self, id: &AssetId, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(id);
        let temp_path = path.with_extension("json.tmp");

        let written = write_then_rename(&temp_path, &path, bytes);
        if let Err(e) = written {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!(path = %path.display(), bytes = bytes.len(), "wrote asset file");
        Ok(())
    }

    fn get(&self, id: &AssetId) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(id);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "asset file not found");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn write_then_rename(temp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    std::fs::rename(temp_path, path)
}
