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

use std::env::current_dir;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::error::Fallible;
use crate::error::fail;
use crate::storage::Storage;
use crate::storage::detect_backend;
use crate::store::CardStore;

pub struct Collection {
    pub directory: PathBuf,
    pub config: Config,
    pub store: CardStore,
}

impl Collection {
    pub async fn open(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config: Config = Config::load(&directory)?;
        let storage: Box<dyn Storage> = detect_backend(&directory, config.backend)?;

        let store = {
            log::debug!("Loading cards...");
            let start = Instant::now();
            let store = CardStore::open(storage).await?;
            let duration = start.elapsed().as_millis();
            log::debug!("Cards loaded in {duration}ms.");
            store
        };

        Ok(Self {
            directory,
            config,
            store,
        })
    }
}
