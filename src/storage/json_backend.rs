use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::errors::Result;
use crate::utils::atomic;

use super::KeyValueStore;

const ENTRY_EXTENSION: &str = "json";

/// Directory-backed store that keeps each key in its own JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), ENTRY_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key);
        atomic::replace_file(&path, value)?;
        tracing::trace!(key, path = %path.display(), "stored entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "entry".into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(temp.path().join("data")).expect("json store");
        (store, temp)
    }

    #[test]
    fn set_and_get_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        store.set("monthDay", "25").expect("set");
        assert_eq!(store.get("monthDay").expect("get").as_deref(), Some("25"));
        assert!(store.entry_path("monthDay").ends_with("monthDay.json"));
    }

    #[test]
    fn missing_key_reads_as_none_and_remove_is_idempotent() {
        let (store, _guard) = store_with_temp_dir();
        assert_eq!(store.get("expenses").expect("get"), None);
        store.remove("expenses").expect("remove missing");
    }

    #[test]
    fn keys_are_sanitized_into_file_names() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.entry_path("../escape").ends_with("___escape.json"));
        assert!(store.entry_path("  ").ends_with("entry.json"));
    }
}
