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

/// Category labels that have been retired, and what replaces them.
const RENAMED_CATEGORIES: [(&str, &str); 1] = [("HTML/CSS", "HTML")];

/// Rewrite retired category labels in place. Returns true if any card was
/// changed, in which case the caller must persist the list.
pub fn migrate_categories(cards: &mut [Card]) -> bool {
    let mut changed = false;
    for card in cards.iter_mut() {
        for (old, new) in RENAMED_CATEGORIES {
            if card.category == old {
                card.category = new.to_string();
                changed = true;
            }
        }
    }
    changed
}
