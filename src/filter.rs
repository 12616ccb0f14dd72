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

use crate::types::card::Card;

/// Selects cards by category and by a free-text search term.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CardFilter {
    category: Option<String>,
    search: String,
}

impl CardFilter {
    /// An empty category, or `all`, matches every category.
    pub fn new(category: Option<&str>, search: Option<&str>) -> Self {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != "all")
            .map(str::to_string);
        let search = search.map(str::trim).unwrap_or_default().to_string();
        Self { category, search }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn matches(&self, card: &Card) -> bool {
        let category_ok = match &self.category {
            Some(category) => card.category == *category,
            None => true,
        };
        category_ok && card.matches_search(&self.search)
    }

    /// The matching cards, with their index into `cards`.
    pub fn apply<'a>(&self, cards: &'a [Card]) -> Vec<(usize, &'a Card)> {
        cards
            .iter()
            .enumerate()
            .filter(|(_, card)| self.matches(card))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<Card> {
        vec![
            Card::new("How to sort array in Java?", "Arrays.sort(arr)", "Java"),
            Card::new("Merge Sort Time Complexity?", "O(n log n)", "DSA"),
            Card::new("What is a pointer?", "A variable holding an address", "C"),
        ]
    }

    #[test]
    fn test_no_filter() {
        let filter = CardFilter::new(None, None);
        assert_eq!(filter.apply(&cards()).len(), 3);
        let filter = CardFilter::new(Some("all"), Some("   "));
        assert_eq!(filter.category(), None);
        assert_eq!(filter.apply(&cards()).len(), 3);
    }

    #[test]
    fn test_category() {
        let cards = cards();
        let filter = CardFilter::new(Some("DSA"), None);
        let matched = filter.apply(&cards);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].0, 1);
    }

    #[test]
    fn test_search_front_and_back() {
        let cards = cards();
        let filter = CardFilter::new(None, Some("SORT"));
        let indices: Vec<usize> = filter.apply(&cards).iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1]);
        let filter = CardFilter::new(None, Some("address"));
        let indices: Vec<usize> = filter.apply(&cards).iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![2]);
    }

    #[test]
    fn test_category_and_search() {
        let cards = cards();
        let filter = CardFilter::new(Some("Java"), Some("merge"));
        assert!(filter.apply(&cards).is_empty());
    }
}
