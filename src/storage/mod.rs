//! Key-value document storage
//!
//! Mirrors the browser LocalStorage contract: string keys, string values,
//! whole-document replace. Every persisted structure is a JSON blob under one key.
//!
//! Backends:
//! - `MemoryStore`: in-process map (tests, headless use)
//! - `FileStore`: one JSON file on disk (native only)
//! - `LocalStore`: `window.localStorage` (wasm32 only)

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::StoreError;

/// A string key-value store with LocalStorage semantics
pub trait KvStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Read and decode the JSON document stored under `key`
///
/// An absent key is `Ok(None)`; a present but undecodable value is
/// `StoreError::Corrupt` so callers can decide whether to fall back.
pub fn read_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    match store.get_item(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Encode `value` as JSON and replace the document under `key`
pub fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set_item(key, &json)
}
