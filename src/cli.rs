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

use clap::Parser;

use crate::cmd::cards::add_card;
use crate::cmd::cards::delete_card;
use crate::cmd::cards::edit_card;
use crate::cmd::cards::list_cards;
use crate::cmd::export::export_cards;
use crate::cmd::import::import_cards;
use crate::cmd::practice::practice;
use crate::cmd::serve::server::start_server;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::error::Fallible;
use crate::types::card::DEFAULT_CATEGORY;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve the web dashboard.
    Serve {
        /// Path to the collection directory. Defaults to the current directory.
        #[arg(short, long)]
        directory: Option<String>,
        /// The port to use for the web server. Overrides the config file.
        #[arg(long)]
        port: Option<u16>,
        /// Don't open the browser automatically.
        #[arg(long, default_value_t = false)]
        no_open: bool,
    },
    /// List built-in and custom cards.
    List {
        #[arg(short, long)]
        directory: Option<String>,
        /// Only show cards in this category ("all" shows everything).
        #[arg(short, long)]
        category: Option<String>,
        /// Only show cards whose front or back contains this text.
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add a custom card.
    Add {
        #[arg(short, long)]
        directory: Option<String>,
        front: String,
        #[arg(default_value = "")]
        back: String,
        #[arg(long, default_value = DEFAULT_CATEGORY)]
        category: String,
    },
    /// Edit the custom card at the given index.
    Edit {
        #[arg(short, long)]
        directory: Option<String>,
        index: usize,
        #[arg(long)]
        front: Option<String>,
        #[arg(long)]
        back: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete the custom card at the given index.
    Delete {
        #[arg(short, long)]
        directory: Option<String>,
        index: usize,
    },
    /// Print card statistics.
    Stats {
        #[arg(short, long)]
        directory: Option<String>,
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Export the custom cards as JSON.
    Export {
        #[arg(short, long)]
        directory: Option<String>,
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import cards from an exported JSON file.
    Import {
        #[arg(short, long)]
        directory: Option<String>,
        file: PathBuf,
        /// One of: add-new, merge-all, replace.
        #[arg(long, default_value = "add-new")]
        mode: String,
    },
    /// Practice every card once in the terminal.
    Practice {
        #[arg(short, long)]
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            directory,
            port,
            no_open,
        } => start_server(directory, port, !no_open).await,
        Command::List {
            directory,
            category,
            search,
        } => list_cards(directory, category, search).await,
        Command::Add {
            directory,
            front,
            back,
            category,
        } => add_card(directory, front, back, category).await,
        Command::Edit {
            directory,
            index,
            front,
            back,
            category,
        } => edit_card(directory, index, front, back, category).await,
        Command::Delete { directory, index } => delete_card(directory, index).await,
        Command::Stats { directory, format } => print_stats(directory, format).await,
        Command::Export { directory, output } => export_cards(directory, output).await,
        Command::Import {
            directory,
            file,
            mode,
        } => import_cards(directory, file, mode).await,
        Command::Practice { directory } => practice(directory).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli =
            Command::try_parse_from(["codecards", "add", "Q", "A", "--category", "C"]).unwrap();
        match cli {
            Command::Add {
                directory,
                front,
                back,
                category,
            } => {
                assert_eq!(directory, None);
                assert_eq!(front, "Q");
                assert_eq!(back, "A");
                assert_eq!(category, "C");
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_import_defaults_to_add_new() {
        let cli = Command::try_parse_from(["codecards", "import", "backup.json"]).unwrap();
        match cli {
            Command::Import { mode, .. } => assert_eq!(mode, "add-new"),
            _ => panic!("expected import"),
        }
    }
}
