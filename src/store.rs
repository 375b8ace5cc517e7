use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Durable key-value store holding the persisted crawl state.
///
/// `set` must replace the value atomically from a reader's perspective: a
/// concurrent or later `get` sees either the old value or the new one,
/// never a partial write.
pub trait IdStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
}

/// File-backed store keeping one JSON file per key under a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: &str) -> Result<Self> {
        fs::create_dir_all(dir)
            .context(format!("Failed to create store directory: {}", dir))?;
        Ok(FileStore { dir: PathBuf::from(dir) })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl IdStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)
            .context(format!("Failed to read store key: {}", path.display()))?;
        Ok(Some(bytes))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.key_path(key);
        // Write to a sibling temp file, then rename over the target, so a
        // reader never observes a half-written value.
        let tmp_path = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp_path, value)
            .context(format!("Failed to write store key: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path)
            .context(format!("Failed to replace store key: {}", path.display()))?;
        Ok(())
    }
}

/// In-memory store used by tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    entries: std::cell::RefCell<std::collections::HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
