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

use serde::Serialize;

use crate::builtin::BUILTIN_COUNT;
use crate::builtin::builtin_cards;
use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail;
use crate::error::fail_with;
use crate::migrate::migrate_categories;
use crate::reconcile::ImportMode;
use crate::reconcile::Reconciliation;
use crate::reconcile::decode_import;
use crate::reconcile::export_cards;
use crate::reconcile::reconcile;
use crate::storage::Persistence;
use crate::storage::Storage;
use crate::types::card::Card;

/// Card counts over the combined view.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCounts {
    pub total: usize,
    pub java: usize,
    pub dsa: usize,
    pub custom: usize,
    /// Cards per category, in order of first appearance.
    pub distribution: Vec<(String, usize)>,
}

impl CategoryCounts {
    fn compute(cards: &[Card], custom: usize) -> Self {
        let mut distribution: Vec<(String, usize)> = Vec::new();
        for card in cards {
            match distribution
                .iter_mut()
                .find(|(label, _)| *label == card.category)
            {
                Some((_, count)) => *count += 1,
                None => distribution.push((card.category.clone(), 1)),
            }
        }
        let count_of = |label: &str| {
            distribution
                .iter()
                .find(|(l, _)| l == label)
                .map_or(0, |(_, count)| *count)
        };
        Self {
            total: cards.len(),
            java: count_of("Java"),
            dsa: count_of("DSA"),
            custom,
            distribution,
        }
    }

    /// The sorted list of category labels present.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.distribution.iter().map(|(l, _)| l.as_str()).collect();
        labels.sort();
        labels
    }
}

/// Built-in cards followed by custom cards.
#[derive(Clone, Debug, Default)]
pub struct CombinedView {
    cards: Vec<Card>,
    counts: CategoryCounts,
}

impl CombinedView {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn counts(&self) -> &CategoryCounts {
        &self.counts
    }

    /// Map an index into the combined view to an index into the custom list.
    /// Built-in cards have no custom index.
    pub fn custom_index(&self, combined_index: usize) -> Option<usize> {
        if combined_index < BUILTIN_COUNT || combined_index >= self.cards.len() {
            None
        } else {
            Some(combined_index - BUILTIN_COUNT)
        }
    }
}

/// New values for an existing card. The front and back are trimmed; the
/// category is kept unless a new one is given.
#[derive(Clone, Debug)]
pub struct CardEdit {
    pub front: String,
    pub back: String,
    pub category: Option<String>,
}

impl CardEdit {
    fn apply(&self, card: &Card) -> Card {
        let category = match &self.category {
            Some(category) if !category.trim().is_empty() => category.trim().to_string(),
            _ => card.category.clone(),
        };
        Card::new(self.front.trim(), self.back.trim(), category)
    }
}

/// Owns the custom card list. Every mutation is persisted and followed by a
/// full reload; if persisting fails, the list is left as it was.
pub struct CardStore {
    persistence: Persistence,
    builtin: Vec<Card>,
    custom: Vec<Card>,
    view: CombinedView,
}

impl CardStore {
    /// Create a store over the given backend and load it.
    pub async fn open(storage: Box<dyn Storage>) -> Fallible<Self> {
        let mut store = Self {
            persistence: Persistence::new(storage),
            builtin: builtin_cards(),
            custom: Vec::new(),
            view: CombinedView::default(),
        };
        store.load().await?;
        Ok(store)
    }

    pub fn backend_name(&self) -> &'static str {
        self.persistence.backend_name()
    }

    pub fn custom(&self) -> &[Card] {
        &self.custom
    }

    pub fn view(&self) -> &CombinedView {
        &self.view
    }

    /// Re-read the custom cards from storage and rebuild the combined view.
    pub async fn load(&mut self) -> Fallible<&CombinedView> {
        let mut custom: Vec<Card> = self.persistence.read_custom().await;
        if migrate_categories(&mut custom) {
            log::debug!("Migrated retired category labels, saving.");
            self.persistence.write_custom(&custom).await?;
        }
        let mut cards: Vec<Card> = Vec::with_capacity(self.builtin.len() + custom.len());
        cards.extend(self.builtin.iter().cloned());
        cards.extend(custom.iter().cloned());
        let counts = CategoryCounts::compute(&cards, custom.len());
        self.custom = custom;
        self.view = CombinedView { cards, counts };
        Ok(&self.view)
    }

    async fn commit(&mut self, custom: Vec<Card>) -> Fallible<()> {
        self.persistence.write_custom(&custom).await?;
        self.custom = custom;
        self.load().await?;
        Ok(())
    }

    /// Re-read storage and return a copy of the custom list to mutate. Other
    /// processes may have written to the same backend since the last load.
    async fn fresh_custom(&mut self) -> Fallible<Vec<Card>> {
        self.load().await?;
        Ok(self.custom.clone())
    }

    pub async fn add(&mut self, card: Card) -> Fallible<()> {
        let mut custom = self.fresh_custom().await?;
        custom.push(card);
        self.commit(custom).await
    }

    /// Replace the custom card at `index`. The edited front may not be blank.
    pub async fn update_at(&mut self, index: usize, edit: &CardEdit) -> Fallible<()> {
        let mut custom = self.fresh_custom().await?;
        let Some(card) = custom.get(index) else {
            return self.index_error(index);
        };
        let updated = edit.apply(card);
        if updated.front.is_empty() {
            return fail("The front of a card cannot be empty.");
        }
        custom[index] = updated;
        self.commit(custom).await
    }

    /// Remove the custom card at `index`, returning it.
    pub async fn remove_at(&mut self, index: usize) -> Fallible<Card> {
        let mut custom = self.fresh_custom().await?;
        if index >= custom.len() {
            return self.index_error(index);
        }
        let removed = custom.remove(index);
        self.commit(custom).await?;
        Ok(removed)
    }

    /// Serialize the custom cards. Built-in cards are never exported.
    pub fn export(&self) -> Fallible<String> {
        export_cards(&self.custom)
    }

    /// Import cards from a JSON payload. Nothing changes if the payload is
    /// malformed.
    pub async fn import(&mut self, payload: &str, mode: ImportMode) -> Fallible<Reconciliation> {
        let imported: Vec<Card> = decode_import(payload)?;
        let existing = self.fresh_custom().await?;
        let result = reconcile(&existing, imported, mode);
        log::debug!(
            "Import ({mode}): {} added, {} skipped.",
            result.added,
            result.skipped
        );
        self.commit(result.cards.clone()).await?;
        Ok(result)
    }

    fn index_error<T>(&self, index: usize) -> Fallible<T> {
        fail_with(
            ErrorKind::Index,
            format!(
                "no custom card at index {index} (there are {})",
                self.custom.len()
            ),
        )
    }
}
