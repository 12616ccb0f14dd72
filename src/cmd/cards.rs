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

use std::fmt::Write;

use crate::collection::Collection;
use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail;
use crate::error::fail_with;
use crate::filter::CardFilter;
use crate::store::CardEdit;
use crate::store::CombinedView;
use crate::types::card::Card;

pub async fn list_cards(
    directory: Option<String>,
    category: Option<String>,
    search: Option<String>,
) -> Fallible<()> {
    let coll = Collection::open(directory).await?;
    let filter = CardFilter::new(category.as_deref(), search.as_deref());
    print!("{}", render_list(coll.store.view(), &filter)?);
    Ok(())
}

/// One line per matching card. Custom cards are tagged with the index that
/// `edit` and `delete` take.
fn render_list(view: &CombinedView, filter: &CardFilter) -> Fallible<String> {
    let matched = filter.apply(view.cards());
    let mut out = String::new();
    if matched.is_empty() {
        writeln!(out, "No cards found.")?;
        return Ok(out);
    }
    for (combined_index, card) in matched {
        let tag = match view.custom_index(combined_index) {
            Some(index) => format!("#{index}"),
            None => "[builtin]".to_string(),
        };
        writeln!(
            out,
            "{tag:<10} {:<6} {} => {}",
            card.category,
            card.front,
            card.display_back()
        )?;
    }
    Ok(out)
}

pub async fn add_card(
    directory: Option<String>,
    front: String,
    back: String,
    category: String,
) -> Fallible<()> {
    let mut coll = Collection::open(directory).await?;
    let card = Card::from_input(&front, &back, &category);
    if card.front.is_empty() {
        return fail("the front of a card cannot be empty.");
    }
    coll.store.add(card).await?;
    println!("Card added successfully!");
    Ok(())
}

/// Fields left as `None` keep their current value.
pub async fn edit_card(
    directory: Option<String>,
    index: usize,
    front: Option<String>,
    back: Option<String>,
    category: Option<String>,
) -> Fallible<()> {
    let mut coll = Collection::open(directory).await?;
    let Some(card) = coll.store.custom().get(index) else {
        return fail_with(
            ErrorKind::Index,
            format!("no custom card at index {index}."),
        );
    };
    let edit = CardEdit {
        front: front.unwrap_or_else(|| card.front.clone()),
        back: back.unwrap_or_else(|| card.back.clone()),
        category,
    };
    coll.store.update_at(index, &edit).await?;
    println!("Card updated!");
    Ok(())
}

pub async fn delete_card(directory: Option<String>, index: usize) -> Fallible<()> {
    let mut coll = Collection::open(directory).await?;
    let removed = coll.store.remove_at(index).await?;
    println!("Card deleted: {}", removed.front);
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::builtin::BUILTIN_COUNT;

    async fn open(directory: &str) -> Fallible<Collection> {
        Collection::open(Some(directory.to_string())).await
    }

    #[tokio::test]
    async fn test_add_edit_delete() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = dir.path().display().to_string();

        add_card(
            Some(directory.clone()),
            "  What is a JVM? ".to_string(),
            "Java Virtual Machine".to_string(),
            "Java".to_string(),
        )
        .await?;
        let coll = open(&directory).await?;
        assert_eq!(
            coll.store.custom(),
            &[Card::new("What is a JVM?", "Java Virtual Machine", "Java")]
        );

        edit_card(
            Some(directory.clone()),
            0,
            None,
            Some("The Java Virtual Machine".to_string()),
            None,
        )
        .await?;
        let coll = open(&directory).await?;
        assert_eq!(
            coll.store.custom(),
            &[Card::new("What is a JVM?", "The Java Virtual Machine", "Java")]
        );

        delete_card(Some(directory.clone()), 0).await?;
        let coll = open(&directory).await?;
        assert!(coll.store.custom().is_empty());
        assert_eq!(coll.store.view().cards().len(), BUILTIN_COUNT);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_empty_front() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = dir.path().display().to_string();
        let result = add_card(
            Some(directory.clone()),
            "   ".to_string(),
            "answer".to_string(),
            "Other".to_string(),
        )
        .await;
        assert!(result.is_err());
        assert!(open(&directory).await?.store.custom().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_blank_front() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = dir.path().display().to_string();
        add_card(
            Some(directory.clone()),
            "Q".to_string(),
            "A".to_string(),
            "C".to_string(),
        )
        .await?;
        let blank = Some(" ".to_string());
        let result = edit_card(Some(directory.clone()), 0, blank, None, None).await;
        assert!(result.is_err());
        let coll = open(&directory).await?;
        assert_eq!(coll.store.custom(), &[Card::new("Q", "A", "C")]);
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_out_of_range() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = dir.path().display().to_string();
        let err = edit_card(Some(directory), 3, None, None, None)
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::Index);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_out_of_range() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = dir.path().display().to_string();
        let err = delete_card(Some(directory), 0).await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Index);
        Ok(())
    }

    #[tokio::test]
    async fn test_render_list() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = dir.path().display().to_string();
        add_card(
            Some(directory.clone()),
            "What is a segfault?".to_string(),
            String::new(),
            "C".to_string(),
        )
        .await?;
        let coll = open(&directory).await?;

        let everything = render_list(coll.store.view(), &CardFilter::new(None, None))?;
        assert_eq!(everything.lines().count(), BUILTIN_COUNT + 1);
        assert!(everything.contains("[builtin]"));

        let only_c = render_list(coll.store.view(), &CardFilter::new(Some("C"), None))?;
        assert_eq!(only_c.lines().count(), 1);
        assert!(only_c.starts_with("#0"));
        assert!(only_c.contains("(no answer)"));

        let nothing = render_list(
            coll.store.view(),
            &CardFilter::new(None, Some("no such card anywhere")),
        )?;
        assert_eq!(nothing, "No cards found.\n");
        Ok(())
    }
}
