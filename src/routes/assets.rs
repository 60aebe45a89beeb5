//! Static assets contributed by element kinds.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

/// Process-wide `"<owner>/<file>"` to file path map.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    assets: RwLock<HashMap<String, PathBuf>>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset. Returns `false` if the key was already present.
    pub fn register(&self, key: impl Into<String>, path: impl Into<PathBuf>) -> bool {
        let key = key.into();
        let mut assets = self.assets.write();
        if assets.contains_key(&key) {
            return false;
        }
        assets.insert(key, path.into());
        true
    }

    pub fn get(&self, key: &str) -> Option<PathBuf> {
        self.assets.read().get(key).cloned()
    }

    /// Resolve the path behind a served extension URL suffix.
    pub fn resolve(&self, owner: &str, file: &str) -> Option<PathBuf> {
        self.get(&format!("{owner}/{file}"))
    }

    pub fn contains_path(&self, path: &Path) -> bool {
        self.assets.read().values().any(|p| p == path)
    }

    pub fn len(&self) -> usize {
        self.assets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.read().is_empty()
    }

    pub fn reset(&self) {
        self.assets.write().clear();
    }
}
