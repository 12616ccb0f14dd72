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

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::store::CategoryCounts;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StatsFormat {
    /// Plain text output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub async fn print_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let coll = Collection::open(directory).await?;
    let stats = Stats {
        backend: coll.store.backend_name(),
        counts: coll.store.view().counts().clone(),
    };
    print!("{}", render_stats(&stats, format)?);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    backend: &'static str,
    #[serde(flatten)]
    counts: CategoryCounts,
}

fn render_stats(stats: &Stats, format: StatsFormat) -> Fallible<String> {
    let mut out = String::new();
    match format {
        StatsFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(stats)?)?;
        }
        StatsFormat::Text => {
            let counts = &stats.counts;
            writeln!(out, "Backend:      {}", stats.backend)?;
            writeln!(out, "Total cards:  {}", counts.total)?;
            writeln!(out, "Java:         {}", counts.java)?;
            writeln!(out, "DSA:          {}", counts.dsa)?;
            writeln!(out, "Custom:       {}", counts.custom)?;
            writeln!(out)?;
            for (label, count) in &counts.distribution {
                writeln!(out, "  {label:<10} {count}")?;
            }
        }
    }
    Ok(out)
}
