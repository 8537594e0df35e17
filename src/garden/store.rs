//! Layout persistence
//!
//! One named slot holds the whole placed-plant collection as a JSON
//! array; save overwrites wholesale, load replaces wholesale. No schema
//! version: any shape mismatch is a parse failure, caught at the
//! boundary and logged, leaving the in-memory collection empty.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::layout::PlacedPlant;

/// File name of the single layout slot
pub const LAYOUT_SLOT: &str = "saved_garden.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access layout slot: {0}")]
    Io(#[from] io::Error),
    #[error("saved layout is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Persistence seam for the editor; file-backed in production,
/// swappable in tests.
pub trait LayoutStore: Send + Sync {
    fn save(&self, layout: &[PlacedPlant]) -> Result<(), StoreError>;
    fn load(&self) -> Result<Vec<PlacedPlant>, StoreError>;
}

/// Layout slot stored as a JSON file in a configured directory
pub struct FileLayoutStore {
    path: PathBuf,
}

impl FileLayoutStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        FileLayoutStore {
            path: dir.as_ref().join(LAYOUT_SLOT),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LayoutStore for FileLayoutStore {
    fn save(&self, layout: &[PlacedPlant]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let blob = serde_json::to_string(layout)?;
        fs::write(&self.path, blob)?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<PlacedPlant>, StoreError> {
        let blob = match fs::read_to_string(&self.path) {
            Ok(blob) => blob,
            // Nothing saved yet: an empty garden, not an error
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&blob)?)
    }
}
