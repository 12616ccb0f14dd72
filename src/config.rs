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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;

pub const CONFIG_FILE: &str = "codecards.toml";

/// Which storage backend to use.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
    /// Use the extension storage area if present, the local database
    /// otherwise.
    #[default]
    Auto,
    Extension,
    Local,
}

#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub backend: BackendChoice,
    /// The port the dashboard listens on.
    pub port: u16,
    /// Whether to open the dashboard in a browser on startup.
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendChoice::Auto,
            port: 8000,
            open_browser: true,
        }
    }
}

impl Config {
    /// Load the configuration from the collection directory. A missing file
    /// means the defaults.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        log::debug!("Reading configuration from {}", path.display());
        let content = read_to_string(path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
