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

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use async_trait::async_trait;

use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail_with;
use crate::storage::Storage;

/// An in-memory store. Clones share the same contents, so a test can keep a
/// handle to inspect what was written.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    values: HashMap<String, String>,
    /// Keys in the order they were written.
    writes: Vec<String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.acquire()
            .values
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Make every subsequent write fail.
    pub fn failing_writes(self) -> Self {
        self.acquire().fail_writes = true;
        self
    }

    pub fn set_failing_writes(&self, fail: bool) {
        self.acquire().fail_writes = fail;
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.acquire().values.get(key).cloned()
    }

    pub fn writes(&self) -> Vec<String> {
        self.acquire().writes.clone()
    }

    fn acquire(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }
}

#[async_trait]
impl Storage for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.acquire().values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Fallible<()> {
        let mut inner = self.acquire();
        if inner.fail_writes {
            return fail_with(ErrorKind::StorageWrite, "storage is read-only");
        }
        inner.values.insert(key.to_string(), value.to_string());
        inner.writes.push(key.to_string());
        Ok(())
    }
}
