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

use serde::Deserialize;
use serde::Serialize;

use crate::types::card_key::CardKey;
use crate::types::card_key::Hasher;

/// The categories offered when creating a card. Other labels are tolerated,
/// since built-in cards and imports may carry them.
pub const CATEGORIES: [&str; 6] = ["Java", "DSA", "C", "HTML", "CSS", "Other"];

/// The category assigned when none is given.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Shown in place of an empty answer.
pub const EMPTY_BACK_PLACEHOLDER: &str = "(no answer)";

const KEY_SEPARATOR: &str = "|||";

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Card {
    pub front: String,
    pub back: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Card {
    pub fn new(
        front: impl Into<String>,
        back: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            category: category.into(),
        }
    }

    /// Construct a card from user input: the front and back are trimmed, and
    /// a blank category falls back to the default.
    pub fn from_input(front: &str, back: &str, category: &str) -> Self {
        let category = category.trim();
        let category = if category.is_empty() {
            DEFAULT_CATEGORY
        } else {
            category
        };
        Self::new(front.trim(), back.trim(), category)
    }

    /// The answer as it should be displayed.
    pub fn display_back(&self) -> &str {
        if self.back.trim().is_empty() {
            EMPTY_BACK_PLACEHOLDER
        } else {
            &self.back
        }
    }

    /// The identity of this card for duplicate detection: the front and back,
    /// compared case-insensitively. The category does not participate.
    pub fn dedup_key(&self) -> CardKey {
        let mut hasher = Hasher::new();
        hasher.update(self.front.to_lowercase().as_bytes());
        hasher.update(KEY_SEPARATOR.as_bytes());
        hasher.update(self.back.to_lowercase().as_bytes());
        hasher.finalize()
    }

    /// Case-insensitive substring match against the front and back.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.front.to_lowercase().contains(&term) || self.back.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_from_input_trims() {
        let card = Card::from_input("  What is O(1)?  ", "\tconstant\n", "DSA");
        assert_eq!(card.front, "What is O(1)?");
        assert_eq!(card.back, "constant");
        assert_eq!(card.category, "DSA");
    }

    #[test]
    fn test_from_input_blank_category() {
        let card = Card::from_input("q", "a", "  ");
        assert_eq!(card.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_display_back_placeholder() {
        let card = Card::new("q", "   ", "Java");
        assert_eq!(card.display_back(), EMPTY_BACK_PLACEHOLDER);
        let card = Card::new("q", "a", "Java");
        assert_eq!(card.display_back(), "a");
    }

    #[test]
    fn test_dedup_key_is_case_insensitive() {
        let a = Card::new("Q1", "A1", "Java");
        let b = Card::new("q1", "a1", "DSA");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_dedup_key_distinguishes_front_and_back() {
        let a = Card::new("Q1", "A1", "Java");
        let b = Card::new("Q1", "A2", "Java");
        assert_ne!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_matches_search() {
        let card = Card::new("Binary Search Time Complexity?", "O(log n)", "DSA");
        assert!(card.matches_search(""));
        assert!(card.matches_search("binary"));
        assert!(card.matches_search("LOG N"));
        assert!(!card.matches_search("hashmap"));
    }

    #[test]
    fn test_deserialize_without_category() -> Fallible<()> {
        let card: Card = serde_json::from_str(r#"{"front": "q", "back": "a"}"#)?;
        assert_eq!(card.category, DEFAULT_CATEGORY);
        Ok(())
    }

    #[test]
    fn test_deserialize_requires_front() {
        let result: Result<Card, _> = serde_json::from_str(r#"{"back": "a"}"#);
        assert!(result.is_err());
    }
}
