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

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::storage::Storage;

/// The file holding the extension's local storage area.
pub const EXTENSION_AREA_FILE: &str = "extension-storage.json";

type Area = BTreeMap<String, String>;

/// The browser extension's local storage area: a JSON object of string
/// values, read and written asynchronously.
pub struct ExtensionStore {
    path: PathBuf,
}

impl ExtensionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn read_area(&self) -> Fallible<Area> {
        if !fs::try_exists(&self.path).await? {
            return Ok(Area::new());
        }
        let content: String = fs::read_to_string(&self.path).await.map_err(|e| {
            ErrorReport::with_kind(ErrorKind::StorageRead, format!("cannot read storage: {e}"))
        })?;
        if content.trim().is_empty() {
            return Ok(Area::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            ErrorReport::with_kind(ErrorKind::StorageRead, format!("malformed storage area: {e}"))
        })
    }

    async fn write_area(&self, area: &Area) -> Fallible<()> {
        let json: String = serde_json::to_string_pretty(area)?;
        // Write to a sibling file, then rename over the area.
        let tmp: PathBuf = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for ExtensionStore {
    fn name(&self) -> &'static str {
        "extension"
    }

    async fn get(&self, key: &str) -> Fallible<Option<String>> {
        let mut area: Area = self.read_area().await?;
        Ok(area.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Fallible<()> {
        let mut area: Area = match self.read_area().await {
            Ok(area) => area,
            Err(e) => {
                log::warn!("Discarding unreadable storage area: {e}");
                Area::new()
            }
        };
        area.insert(key.to_string(), value.to_string());
        self.write_area(&area).await.map_err(|e| {
            ErrorReport::with_kind(
                ErrorKind::StorageWrite,
                format!("failed to write `{key}`: {}", e.message()),
            )
        })
    }
}
