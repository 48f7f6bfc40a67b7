//! Whole-document JSON persistence helpers
//!
//! Both stores persist their full state as one JSON document per mutation.
//! Writes go to a sibling temp file first and are renamed into place, so a
//! reader never observes a partially written document.

use std::fs;
use std::path::Path;

use coconut_core::{CoconutError, CoconutResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Load a document, bootstrapping the file with `T::default()` when absent.
///
/// A missing store is not an error; it is written out as an empty well-formed
/// document so later saves and external readers see a consistent file.
pub(crate) fn load_or_bootstrap<T>(path: &Path) -> CoconutResult<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    if path.exists() {
        let bytes = fs::read(path)
            .map_err(|e| CoconutError::storage(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| CoconutError::storage(format!("Corrupt store {}: {}", path.display(), e)))
    } else {
        let value = T::default();
        save_atomic(path, &value)?;
        Ok(value)
    }
}

/// Serialize and persist a document atomically (temp file + rename)
pub(crate) fn save_atomic<T: Serialize>(path: &Path, value: &T) -> CoconutResult<()> {
    let json = serde_json::to_vec_pretty(value)
        .map_err(|e| CoconutError::storage(format!("Failed to serialize store: {}", e)))?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, &json)
        .map_err(|e| CoconutError::storage(format!("Failed to write {}: {}", tmp.display(), e)))?;
    fs::rename(&tmp, path)
        .map_err(|e| CoconutError::storage(format!("Failed to replace {}: {}", path.display(), e)))?;

    Ok(())
}

/// Ensure the store's parent directory exists
pub(crate) fn ensure_parent_dir(path: &Path) -> CoconutResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                CoconutError::storage(format!("Failed to create store directory: {}", e))
            })?;
        }
    }
    Ok(())
}
