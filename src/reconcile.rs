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

//! Export of the custom card list, and reconciliation of imported cards with
//! the existing list.

use std::collections::HashSet;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde_json::Value;

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail_with;
use crate::types::card::Card;
use crate::types::card_key::CardKey;

/// The suggested name of an exported file.
pub const EXPORT_FILENAME: &str = "codecards-backup.json";

/// How imported cards are combined with the existing custom cards.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ImportMode {
    /// Discard the existing cards and keep the imported ones.
    Replace,
    /// Append the imported cards that are not already present.
    AddNew,
    /// Append every imported card, even duplicates.
    MergeAll,
}

impl ImportMode {
    pub const ALL: [ImportMode; 3] = [ImportMode::AddNew, ImportMode::MergeAll, ImportMode::Replace];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportMode::Replace => "replace",
            ImportMode::AddNew => "add-new",
            ImportMode::MergeAll => "merge-all",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ImportMode::Replace => "Replace all custom cards",
            ImportMode::AddNew => "Add new cards, skip duplicates",
            ImportMode::MergeAll => "Add all cards, keep duplicates",
        }
    }
}

impl Display for ImportMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ImportMode {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "replace" => Ok(ImportMode::Replace),
            "add-new" => Ok(ImportMode::AddNew),
            "merge-all" => Ok(ImportMode::MergeAll),
            other => fail_with(
                ErrorKind::InvalidMode,
                format!("unknown import mode `{other}` (expected replace, add-new, or merge-all)"),
            ),
        }
    }
}

/// The outcome of an import.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Reconciliation {
    /// The new custom card list.
    pub cards: Vec<Card>,
    /// How many imported cards ended up in the list.
    pub added: usize,
    /// How many imported cards were dropped as duplicates.
    pub skipped: usize,
}

/// Serialize the custom cards as a pretty-printed JSON array.
pub fn export_cards(cards: &[Card]) -> Fallible<String> {
    Ok(serde_json::to_string_pretty(cards)?)
}

/// Parse an import payload. The payload must be a JSON array of card records.
pub fn decode_import(payload: &str) -> Fallible<Vec<Card>> {
    let value: Value = serde_json::from_str(payload).map_err(|e| {
        ErrorReport::with_kind(ErrorKind::ImportFormat, format!("invalid JSON: {e}"))
    })?;
    if !value.is_array() {
        return fail_with(
            ErrorKind::ImportFormat,
            "invalid file format: expected an array of cards",
        );
    }
    serde_json::from_value(value).map_err(|e| {
        ErrorReport::with_kind(ErrorKind::ImportFormat, format!("invalid card record: {e}"))
    })
}

/// Combine the existing custom cards with imported ones.
pub fn reconcile(existing: &[Card], imported: Vec<Card>, mode: ImportMode) -> Reconciliation {
    match mode {
        ImportMode::Replace => {
            let added = imported.len();
            Reconciliation {
                cards: imported,
                added,
                skipped: 0,
            }
        }
        ImportMode::AddNew => {
            let existing_keys: HashSet<CardKey> =
                existing.iter().map(|card| card.dedup_key()).collect();
            let total = imported.len();
            let fresh: Vec<Card> = imported
                .into_iter()
                .filter(|card| {
                    let key = card.dedup_key();
                    let duplicate = existing_keys.contains(&key);
                    if duplicate {
                        log::debug!("Skipping duplicate card {key}.");
                    }
                    !duplicate
                })
                .collect();
            let added = fresh.len();
            let mut cards = existing.to_vec();
            cards.extend(fresh);
            Reconciliation {
                cards,
                added,
                skipped: total - added,
            }
        }
        ImportMode::MergeAll => {
            let added = imported.len();
            let mut cards = existing.to_vec();
            cards.extend(imported);
            Reconciliation {
                cards,
                added,
                skipped: 0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q1() -> Card {
        Card::new("Q1", "A1", "Java")
    }

    #[test]
    fn test_mode_from_str() -> Fallible<()> {
        assert_eq!("replace".parse::<ImportMode>()?, ImportMode::Replace);
        assert_eq!("add-new".parse::<ImportMode>()?, ImportMode::AddNew);
        assert_eq!("merge-all".parse::<ImportMode>()?, ImportMode::MergeAll);
        for mode in ImportMode::ALL {
            assert_eq!(mode.as_str().parse::<ImportMode>()?, mode);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_mode() {
        let err = "overwrite".parse::<ImportMode>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMode);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let err = decode_import(r#"{"front": "q", "back": "a"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImportFormat);
        let err = decode_import("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImportFormat);
    }

    #[test]
    fn test_decode_rejects_bad_records() {
        let err = decode_import(r#"[{"front": 1, "back": "a"}]"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImportFormat);
        let err = decode_import(r#"["just a string"]"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImportFormat);
    }

    #[test]
    fn test_decode_empty_array() -> Fallible<()> {
        assert!(decode_import("[]")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_export_then_replace_import() -> Fallible<()> {
        let cards = vec![
            q1(),
            Card::new("Q2", "", "HTML"),
            Card::new("Ünïcode?", "yes — ✓", "Other"),
        ];
        let exported = export_cards(&cards)?;
        let result = reconcile(&[], decode_import(&exported)?, ImportMode::Replace);
        assert_eq!(result.cards, cards);
        Ok(())
    }

    #[test]
    fn test_export_is_pretty_printed() -> Fallible<()> {
        let exported = export_cards(&[q1()])?;
        assert!(exported.starts_with("[\n"));
        assert!(exported.contains("\"front\": \"Q1\""));
        Ok(())
    }

    #[test]
    fn test_add_new_into_empty_list() -> Fallible<()> {
        let imported = decode_import(r#"[{"front":"Q1","back":"A1","category":"Java"}]"#)?;
        let result = reconcile(&[], imported, ImportMode::AddNew);
        assert_eq!(result.cards, vec![q1()]);
        assert_eq!(result.added, 1);
        assert_eq!(result.skipped, 0);
        Ok(())
    }

    #[test]
    fn test_add_new_skips_case_insensitive_duplicate() -> Fallible<()> {
        let imported = decode_import(r#"[{"front":"q1","back":"a1","category":"DSA"}]"#)?;
        let result = reconcile(&[q1()], imported, ImportMode::AddNew);
        assert_eq!(result.cards, vec![q1()]);
        assert_eq!(result.added, 0);
        assert_eq!(result.skipped, 1);
        Ok(())
    }

    #[test]
    fn test_add_new_keeps_order() {
        let existing = vec![q1(), Card::new("Q2", "A2", "DSA")];
        let imported = vec![
            Card::new("Q3", "A3", "C"),
            Card::new("q2", "A2", "C"),
            Card::new("Q4", "A4", "CSS"),
        ];
        let result = reconcile(&existing, imported, ImportMode::AddNew);
        let fronts: Vec<&str> = result.cards.iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts, vec!["Q1", "Q2", "Q3", "Q4"]);
        assert_eq!(result.added, 2);
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn test_add_new_length_bounds() {
        let existing = vec![q1(), Card::new("Q2", "A2", "DSA")];
        let imported = vec![
            q1(),
            Card::new("Q1", "A2", "Java"),
            Card::new("Q9", "A9", "Java"),
            Card::new("Q9", "A9", "Java"),
        ];
        let n = imported.len();
        let result = reconcile(&existing, imported, ImportMode::AddNew);
        assert!(result.cards.len() >= existing.len());
        assert!(result.cards.len() <= existing.len() + n);
        assert_eq!(result.added + result.skipped, n);
    }

    #[test]
    fn test_merge_all_keeps_duplicates() {
        let result = reconcile(&[q1()], vec![q1(), q1()], ImportMode::MergeAll);
        assert_eq!(result.cards, vec![q1(), q1(), q1()]);
        assert_eq!(result.added, 2);
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn test_replace_discards_existing() {
        let imported = vec![Card::new("Q2", "A2", "DSA")];
        let result = reconcile(&[q1()], imported.clone(), ImportMode::Replace);
        assert_eq!(result.cards, imported);
    }
}
