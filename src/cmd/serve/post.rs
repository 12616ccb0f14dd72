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

use axum::Form;
use axum::extract::Path;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::cmd::import::describe;
use crate::cmd::serve::state::MutableState;
use crate::cmd::serve::state::ServerState;
use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::practice::PracticeSession;
use crate::practice::Step;
use crate::reconcile::ImportMode;
use crate::store::CardEdit;
use crate::types::card::Card;

#[derive(Deserialize)]
pub struct CardForm {
    front: String,
    #[serde(default)]
    back: String,
    #[serde(default)]
    category: String,
}

#[derive(Debug, Deserialize)]
enum EditAction {
    Save,
    Cancel,
}

#[derive(Deserialize)]
pub struct EditForm {
    front: String,
    #[serde(default)]
    back: String,
    #[serde(default)]
    category: String,
    action: EditAction,
}

#[derive(Deserialize)]
pub struct ImportForm {
    payload: String,
    mode: String,
}

#[derive(Debug, Deserialize)]
enum PracticeAction {
    Start,
    Reveal,
    Known,
    Review,
    Exit,
}

#[derive(Deserialize)]
pub struct PracticeForm {
    action: PracticeAction,
}

/// Record the outcome of an action as the flash message.
fn report(mutable: &mut MutableState, result: Fallible<String>) {
    match result {
        Ok(message) => mutable.info(message),
        Err(e) => {
            if e.kind() == ErrorKind::Index {
                log::error!("{e}");
            } else {
                log::warn!("{e}");
            }
            mutable.error(e.message().to_string());
        }
    }
}

pub async fn add_handler(State(state): State<ServerState>, Form(form): Form<CardForm>) -> Redirect {
    let mut mutable = state.mutable.lock().await;
    let card = Card::from_input(&form.front, &form.back, &form.category);
    let result = if card.front.is_empty() {
        Err(ErrorReport::new("The front of a card cannot be empty."))
    } else {
        mutable
            .store
            .add(card)
            .await
            .map(|_| "Card added successfully!".to_string())
    };
    report(&mut mutable, result);
    Redirect::to("/")
}

pub async fn edit_handler(
    State(state): State<ServerState>,
    Path(index): Path<usize>,
    Form(form): Form<EditForm>,
) -> Redirect {
    let mut mutable = state.mutable.lock().await;
    match form.action {
        EditAction::Cancel => {}
        EditAction::Save => {
            let edit = CardEdit {
                front: form.front,
                back: form.back,
                category: Some(form.category),
            };
            let result = mutable
                .store
                .update_at(index, &edit)
                .await
                .map(|_| "Card updated!".to_string());
            report(&mut mutable, result);
        }
    }
    Redirect::to("/")
}

pub async fn delete_handler(State(state): State<ServerState>, Path(index): Path<usize>) -> Redirect {
    let mut mutable = state.mutable.lock().await;
    let result = mutable
        .store
        .remove_at(index)
        .await
        .map(|_| "Card deleted!".to_string());
    report(&mut mutable, result);
    Redirect::to("/")
}

pub async fn import_handler(
    State(state): State<ServerState>,
    Form(form): Form<ImportForm>,
) -> Redirect {
    let mut mutable = state.mutable.lock().await;
    let result = match form.mode.parse::<ImportMode>() {
        Ok(mode) => mutable
            .store
            .import(&form.payload, mode)
            .await
            .map(|r| describe(mode, &r)),
        Err(e) => Err(e),
    };
    report(&mut mutable, result);
    Redirect::to("/")
}

pub async fn practice_handler(
    State(state): State<ServerState>,
    Form(form): Form<PracticeForm>,
) -> Redirect {
    let mut mutable = state.mutable.lock().await;
    match form.action {
        PracticeAction::Start => {
            mutable.refresh().await;
            let session = {
                let mut rng = rand::rng();
                PracticeSession::start(mutable.store.view().cards(), &mut rng)
            };
            mutable.practice = Some(session);
            if mutable.practice.as_ref().is_some_and(|s| s.is_finished()) {
                finish(&mut mutable);
            }
        }
        PracticeAction::Reveal => {
            if let Some(session) = mutable.practice.as_mut() {
                session.reveal();
            }
        }
        PracticeAction::Known | PracticeAction::Review => {
            let step = mutable.practice.as_mut().map(|session| match form.action {
                PracticeAction::Known => session.mark_known(),
                _ => session.mark_review(),
            });
            if step == Some(Step::Finished) {
                finish(&mut mutable);
            }
        }
        PracticeAction::Exit => {
            finish(&mut mutable);
        }
    }
    Redirect::to("/practice")
}

fn finish(mutable: &mut MutableState) {
    if let Some(session) = mutable.practice.take() {
        let summary = session.exit();
        mutable.info(format!(
            "Practice complete! Known: {}. Need review: {}.",
            summary.known, summary.needs_review
        ));
        mutable.last_summary = Some(summary);
    }
}
