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

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::practice::PracticeSession;
use crate::practice::Summary;
use crate::store::CardStore;

#[derive(Clone)]
pub struct ServerState {
    pub directory: PathBuf,
    /// Held for the whole of each request, so one action's
    /// load-mutate-persist-reload sequence finishes before the next starts.
    pub mutable: Arc<Mutex<MutableState>>,
}

pub struct MutableState {
    pub store: CardStore,
    pub practice: Option<PracticeSession>,
    pub last_summary: Option<Summary>,
    /// A message shown once, on the next page render.
    pub flash: Option<Flash>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Flash {
    Info(String),
    Error(String),
}

impl MutableState {
    pub fn new(store: CardStore) -> Self {
        Self {
            store,
            practice: None,
            last_summary: None,
            flash: None,
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.flash = Some(Flash::Info(message.into()));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.flash = Some(Flash::Error(message.into()));
    }

    /// Pick up cards written by other processes since the last load.
    pub async fn refresh(&mut self) {
        if let Err(e) = self.store.load().await {
            log::error!("Failed to reload cards: {e}");
            self.error(e.message().to_string());
        }
    }
}
