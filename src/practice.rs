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

use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// Which side of the current card is showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Face {
    Front,
    /// Front and back.
    Back,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Classification {
    Known,
    NeedsReview,
}

/// Whether a session continues after a classification.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
    Next,
    Finished,
}

/// The outcome of a practice session.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub known: usize,
    pub needs_review: usize,
    /// The size of the deck. Larger than `known + needs_review` if the session
    /// was exited early.
    pub total: usize,
    #[serde(skip)]
    pub duration: Duration,
}

impl Summary {
    pub fn completed(&self) -> bool {
        self.known + self.needs_review == self.total
    }
}

/// A single pass over a shuffled snapshot of the deck. Every card is shown
/// once, and classified as known or as needing review.
pub struct PracticeSession {
    deck: Vec<Card>,
    cursor: usize,
    face: Face,
    known: Vec<Card>,
    needs_review: Vec<Card>,
    started_at: Timestamp,
}

impl PracticeSession {
    /// Start a session over a random permutation of `cards`.
    pub fn start<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> Self {
        let mut deck: Vec<Card> = cards.to_vec();
        deck.shuffle(rng);
        log::debug!("Starting practice with {} cards.", deck.len());
        Self {
            deck,
            cursor: 0,
            face: Face::Front,
            known: Vec::new(),
            needs_review: Vec::new(),
            started_at: Timestamp::now(),
        }
    }

    /// The card being shown, or `None` once every card has been classified.
    pub fn current(&self) -> Option<&Card> {
        self.deck.get(self.cursor)
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.deck.len()
    }

    /// The one-based position of the current card, and the deck size.
    pub fn progress(&self) -> (usize, usize) {
        ((self.cursor + 1).min(self.deck.len()), self.deck.len())
    }

    pub fn progress_label(&self) -> String {
        let (position, total) = self.progress();
        format!("Card {position} of {total}")
    }

    pub fn reveal(&mut self) {
        if !self.is_finished() {
            self.face = Face::Back;
        }
    }

    pub fn mark_known(&mut self) -> Step {
        self.classify(Classification::Known)
    }

    pub fn mark_review(&mut self) -> Step {
        self.classify(Classification::NeedsReview)
    }

    pub fn classify(&mut self, classification: Classification) -> Step {
        let Some(card) = self.deck.get(self.cursor).cloned() else {
            return Step::Finished;
        };
        match classification {
            Classification::Known => self.known.push(card),
            Classification::NeedsReview => self.needs_review.push(card),
        }
        self.cursor += 1;
        self.face = Face::Front;
        if self.is_finished() {
            Step::Finished
        } else {
            Step::Next
        }
    }

    /// The cards classified as needing review so far.
    pub fn needs_review(&self) -> &[Card] {
        &self.needs_review
    }

    pub fn summary(&self) -> Summary {
        Summary {
            known: self.known.len(),
            needs_review: self.needs_review.len(),
            total: self.deck.len(),
            duration: Timestamp::now().duration_since(self.started_at),
        }
    }

    /// End the session, discarding its state.
    pub fn exit(self) -> Summary {
        let summary = self.summary();
        log::debug!(
            "Practice ended: {} known, {} need review.",
            summary.known,
            summary.needs_review
        );
        summary
    }
}
