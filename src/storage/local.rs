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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use async_trait::async_trait;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::storage::Storage;
use crate::types::timestamp::Timestamp;

/// The database holding the page-local storage.
pub const LOCAL_DATABASE_FILE: &str = "codecards.db";

/// The page-local key-value store. Every operation completes synchronously.
#[derive(Clone)]
pub struct LocalStore {
    conn: Arc<Mutex<Connection>>,
}

impl LocalStore {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating storage schema.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    fn acquire(&self) -> Fallible<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ErrorReport::new("storage connection lock poisoned"))
    }

    fn get_sync(&self, key: &str) -> Fallible<Option<String>> {
        let conn = self.acquire()?;
        let sql = "select value from storage where key = ?;";
        let value: Option<String> = conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()
            .map_err(|e| ErrorReport::with_kind(ErrorKind::StorageRead, e.to_string()))?;
        Ok(value)
    }

    fn set_sync(&self, key: &str, value: &str) -> Fallible<()> {
        let mut conn = self.acquire()?;
        upsert(&mut conn, key, value).map_err(|e| {
            ErrorReport::with_kind(
                ErrorKind::StorageWrite,
                format!("failed to write `{key}`: {e}"),
            )
        })
    }
}

#[async_trait]
impl Storage for LocalStore {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn get(&self, key: &str) -> Fallible<Option<String>> {
        self.get_sync(key)
    }

    async fn set(&self, key: &str, value: &str) -> Fallible<()> {
        self.set_sync(key, value)
    }
}

fn upsert(conn: &mut Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    let sql = "insert into storage (key, value, updated_at) values (?, ?, ?) on conflict (key) do update set value = excluded.value, updated_at = excluded.updated_at;";
    tx.execute(sql, (key, value, Timestamp::now()))?;
    tx.commit()
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["storage"], |row| row.get(0))?;
    Ok(count > 0)
}
