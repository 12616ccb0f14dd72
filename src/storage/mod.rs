// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

pub mod extension;
pub mod local;
#[cfg(test)]
pub mod memory;

use std::path::Path;

use async_trait::async_trait;

use crate::config::BackendChoice;
use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::storage::extension::EXTENSION_AREA_FILE;
use crate::storage::extension::ExtensionStore;
use crate::storage::local::LOCAL_DATABASE_FILE;
use crate::storage::local::LocalStore;
use crate::types::card::Card;

/// The key shared between the dashboard and the new-tab page.
pub const SYNC_KEY: &str = "codecards_sync";

/// The key used by older versions. Still read as a fallback, and still
/// written so older consumers see the same cards.
pub const LEGACY_KEY: &str = "flashcards";

/// A string key-value store.
#[async_trait]
pub trait Storage: Send + Sync {
    /// A short name for logging.
    fn name(&self) -> &'static str;

    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Fallible<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Fallible<()>;
}

/// Choose a storage backend for the collection in `directory`.
///
/// With [`BackendChoice::Auto`], the extension storage area is used if it is
/// present, and the page-local database otherwise.
pub fn detect_backend(directory: &Path, choice: BackendChoice) -> Fallible<Box<dyn Storage>> {
    let choice = match choice {
        BackendChoice::Auto => {
            if directory.join(EXTENSION_AREA_FILE).exists() {
                BackendChoice::Extension
            } else {
                BackendChoice::Local
            }
        }
        other => other,
    };
    let storage: Box<dyn Storage> = match choice {
        BackendChoice::Extension => {
            Box::new(ExtensionStore::new(directory.join(EXTENSION_AREA_FILE)))
        }
        _ => {
            let path = directory.join(LOCAL_DATABASE_FILE);
            let path: &str = path
                .to_str()
                .ok_or_else(|| ErrorReport::new("invalid path"))?;
            Box::new(LocalStore::new(path)?)
        }
    };
    log::debug!("Using the {} storage backend.", storage.name());
    Ok(storage)
}

/// Reads and writes the custom card list, applying the key policy on top of
/// a [`Storage`] backend.
pub struct Persistence {
    storage: Box<dyn Storage>,
}

impl Persistence {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn backend_name(&self) -> &'static str {
        self.storage.name()
    }

    /// Read the custom cards: the sync key first, then the legacy key. A key
    /// whose value is missing or malformed is skipped. If neither key yields
    /// a list, the result is empty.
    pub async fn read_custom(&self) -> Vec<Card> {
        for key in [SYNC_KEY, LEGACY_KEY] {
            if let Some(cards) = self.read_key(key).await {
                log::debug!("Loaded {} custom cards from `{key}`.", cards.len());
                return cards;
            }
        }
        log::debug!("No stored custom cards.");
        Vec::new()
    }

    async fn read_key(&self, key: &str) -> Option<Vec<Card>> {
        let raw: String = match self.storage.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read `{key}`: {e}");
                return None;
            }
        };
        if raw.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<Vec<Card>>(&raw) {
            Ok(cards) => Some(cards),
            Err(e) => {
                let e = ErrorReport::with_kind(
                    ErrorKind::StorageRead,
                    format!("malformed value under `{key}`: {e}"),
                );
                log::warn!("{e}");
                None
            }
        }
    }

    /// Write the custom cards under the sync key, then mirror them to the
    /// legacy key.
    pub async fn write_custom(&self, cards: &[Card]) -> Fallible<()> {
        let json: String = serde_json::to_string(cards).map_err(|e| {
            ErrorReport::with_kind(ErrorKind::StorageWrite, format!("serialization failed: {e}"))
        })?;
        self.storage.set(SYNC_KEY, &json).await?;
        self.storage.set(LEGACY_KEY, &json).await?;
        log::debug!("Saved {} custom cards.", cards.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::storage::memory::MemoryStore;

    fn cards_json(cards: &[Card]) -> String {
        serde_json::to_string(cards).unwrap()
    }

    #[tokio::test]
    async fn test_read_empty() {
        let persistence = Persistence::new(Box::new(MemoryStore::new()));
        assert!(persistence.read_custom().await.is_empty());
    }

    #[tokio::test]
    async fn test_read_prefers_sync_key() {
        let sync = vec![Card::new("sync", "a", "Java")];
        let legacy = vec![Card::new("legacy", "a", "Java")];
        let store = MemoryStore::new()
            .with_entry(SYNC_KEY, &cards_json(&sync))
            .with_entry(LEGACY_KEY, &cards_json(&legacy));
        let persistence = Persistence::new(Box::new(store));
        assert_eq!(persistence.read_custom().await, sync);
    }

    #[tokio::test]
    async fn test_read_falls_back_to_legacy_key() {
        let legacy = vec![Card::new("legacy", "a", "Java")];
        let store = MemoryStore::new().with_entry(LEGACY_KEY, &cards_json(&legacy));
        let persistence = Persistence::new(Box::new(store));
        assert_eq!(persistence.read_custom().await, legacy);
    }

    #[tokio::test]
    async fn test_malformed_sync_value_is_treated_as_absent() {
        let legacy = vec![Card::new("legacy", "a", "Java")];
        let store = MemoryStore::new()
            .with_entry(SYNC_KEY, "{not json")
            .with_entry(LEGACY_KEY, &cards_json(&legacy));
        let persistence = Persistence::new(Box::new(store));
        assert_eq!(persistence.read_custom().await, legacy);
    }

    #[tokio::test]
    async fn test_malformed_values_yield_empty_list() {
        let store = MemoryStore::new()
            .with_entry(SYNC_KEY, r#"{"front": "not a list"}"#)
            .with_entry(LEGACY_KEY, "garbage");
        let persistence = Persistence::new(Box::new(store));
        assert!(persistence.read_custom().await.is_empty());
    }

    #[tokio::test]
    async fn test_write_mirrors_to_legacy_key() -> Fallible<()> {
        let store = MemoryStore::new();
        let handle = store.clone();
        let persistence = Persistence::new(Box::new(store));
        let cards = vec![Card::new("q", "a", "DSA")];
        persistence.write_custom(&cards).await?;
        let expected = cards_json(&cards);
        assert_eq!(handle.value(SYNC_KEY), Some(expected.clone()));
        assert_eq!(handle.value(LEGACY_KEY), Some(expected));
        assert_eq!(handle.writes(), vec![SYNC_KEY.to_string(), LEGACY_KEY.to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let store = MemoryStore::new().failing_writes();
        let persistence = Persistence::new(Box::new(store));
        let result = persistence.write_custom(&[Card::new("q", "a", "C")]).await;
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StorageWrite);
    }

    #[test]
    fn test_detect_local_by_default() -> Fallible<()> {
        let dir = tempdir()?;
        let storage = detect_backend(dir.path(), BackendChoice::Auto)?;
        assert_eq!(storage.name(), "local");
        assert!(dir.path().join(LOCAL_DATABASE_FILE).exists());
        Ok(())
    }

    #[test]
    fn test_detect_extension_area() -> Fallible<()> {
        let dir = tempdir()?;
        std::fs::write(dir.path().join(EXTENSION_AREA_FILE), "{}")?;
        let storage = detect_backend(dir.path(), BackendChoice::Auto)?;
        assert_eq!(storage.name(), "extension");
        Ok(())
    }

    #[test]
    fn test_forced_backend() -> Fallible<()> {
        let dir = tempdir()?;
        let storage = detect_backend(dir.path(), BackendChoice::Extension)?;
        assert_eq!(storage.name(), "extension");
        let storage = detect_backend(dir.path(), BackendChoice::Local)?;
        assert_eq!(storage.name(), "local");
        Ok(())
    }
}
