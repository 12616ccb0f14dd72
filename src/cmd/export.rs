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

/// Write the custom cards as JSON, to a file if one is given and to stdout
/// otherwise.
pub async fn export_cards(directory: Option<String>, output: Option<PathBuf>) -> Fallible<()> {
    let coll = Collection::open(directory).await?;
    let json: String = coll.store.export()?;
    match output {
        Some(path) => {
            tokio::fs::write(&path, format!("{json}\n")).await?;
            eprintln!(
                "Exported {} cards to {}.",
                coll.store.custom().len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
