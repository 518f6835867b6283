use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KvStore;
use crate::errors::StoreError;

/// JSON-file backed store for native builds
///
/// The whole file is one JSON object mapping keys to string values, rewritten
/// on every mutation (tmp file, then rename).
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let items = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).map_err(|source| StoreError::Corrupt {
                key: path.display().to_string(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No store at {}, starting fresh", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, items })
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.items).map_err(|source| {
            StoreError::Encode {
                key: self.path.display().to_string(),
                source,
            }
        })?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mini-arcade-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get_item("users").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = temp_path("reopen");
        {
            let mut store = FileStore::open(&path).unwrap();
            store.set_item("users", "[]").unwrap();
            store.set_item("current user", "{}").unwrap();
            store.remove_item("current user").unwrap();
        }
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get_item("users").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get_item("current user").unwrap(), None);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(StoreError::Corrupt { .. })
        ));
        fs::remove_file(&path).unwrap();
    }
}
