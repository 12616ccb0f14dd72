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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::reconcile::ImportMode;
use crate::reconcile::Reconciliation;

pub async fn import_cards(directory: Option<String>, file: PathBuf, mode: String) -> Fallible<()> {
    // Reject a bad mode before touching anything.
    let mode: ImportMode = mode.parse()?;
    let payload: String = tokio::fs::read_to_string(&file).await?;
    let mut coll = Collection::open(directory).await?;
    let result = coll.store.import(&payload, mode).await?;
    println!("{}", describe(mode, &result));
    Ok(())
}

pub fn describe(mode: ImportMode, result: &Reconciliation) -> String {
    match mode {
        ImportMode::AddNew => format!(
            "Imported {} ({} skipped).",
            count(result.added, "new card", "new cards"),
            count(result.skipped, "duplicate", "duplicates"),
        ),
        ImportMode::MergeAll => format!("Merged {}.", count(result.added, "card", "cards")),
        ImportMode::Replace => format!("Replaced with {}.", count(result.added, "card", "cards")),
    }
}

fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("1 {singular}")
    } else {
        format!("{n} {plural}")
    }
}
