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

use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use maud::Markup;
use maud::html;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use serde::Deserialize;

use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::template::page_template;
use crate::filter::CardFilter;
use crate::practice::Face;
use crate::practice::PracticeSession;
use crate::practice::Summary;
use crate::reconcile::EXPORT_FILENAME;
use crate::reconcile::ImportMode;
use crate::store::CombinedView;
use crate::types::card::CATEGORIES;
use crate::types::card::Card;

#[derive(Deserialize, Default)]
pub struct DashboardQuery {
    category: Option<String>,
    q: Option<String>,
}

pub async fn dashboard_handler(
    State(state): State<ServerState>,
    Query(query): Query<DashboardQuery>,
) -> (StatusCode, Html<String>) {
    let mut mutable = state.mutable.lock().await;
    mutable.refresh().await;
    let flash = mutable.flash.take();
    let filter = CardFilter::new(query.category.as_deref(), query.q.as_deref());
    let body = render_dashboard(mutable.store.view(), &filter);
    let html = page_template("Dashboard", flash, body);
    (StatusCode::OK, Html(html.into_string()))
}

pub async fn edit_handler(
    State(state): State<ServerState>,
    Path(index): Path<usize>,
) -> (StatusCode, Html<String>) {
    let mut mutable = state.mutable.lock().await;
    mutable.refresh().await;
    let flash = mutable.flash.take();
    match mutable.store.custom().get(index) {
        Some(card) => {
            let body = render_edit_form(index, card);
            let html = page_template("Edit card", flash, body);
            (StatusCode::OK, Html(html.into_string()))
        }
        None => {
            let body = html! {
                div.no-cards {
                    h3 { "No such card" }
                    p { a href="/" { "Back to the dashboard" } }
                }
            };
            let html = page_template("Edit card", flash, body);
            (StatusCode::NOT_FOUND, Html(html.into_string()))
        }
    }
}

pub async fn practice_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut mutable = state.mutable.lock().await;
    if mutable.practice.is_none() {
        mutable.refresh().await;
    }
    let flash = mutable.flash.take();
    let body = match &mutable.practice {
        Some(session) => render_session(session),
        None => render_practice_start(
            mutable.store.view().cards().len(),
            mutable.last_summary.as_ref(),
        ),
    };
    let html = page_template("Practice", flash, body);
    (StatusCode::OK, Html(html.into_string()))
}

pub async fn export_handler(
    State(state): State<ServerState>,
) -> (StatusCode, [(HeaderName, String); 2], String) {
    let mut mutable = state.mutable.lock().await;
    mutable.refresh().await;
    match mutable.store.export() {
        Ok(json) => (
            StatusCode::OK,
            [
                (CONTENT_TYPE, "application/json".to_string()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILENAME}\""),
                ),
            ],
            json,
        ),
        Err(e) => {
            log::error!("Export failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [
                    (CONTENT_TYPE, "text/plain".to_string()),
                    (CONTENT_DISPOSITION, "inline".to_string()),
                ],
                e.to_string(),
            )
        }
    }
}

fn filter_href(category: Option<&str>, search: &str) -> String {
    let category = category.unwrap_or("all");
    format!(
        "/?category={}&q={}",
        utf8_percent_encode(category, NON_ALPHANUMERIC),
        utf8_percent_encode(search, NON_ALPHANUMERIC)
    )
}

pub fn render_dashboard(view: &CombinedView, filter: &CardFilter) -> Markup {
    let counts = view.counts();
    let matched = filter.apply(view.cards());
    html! {
        section.stats {
            div.stat { span.value #total-cards { (counts.total) } span.label { "Total cards" } }
            div.stat { span.value #java-cards { (counts.java) } span.label { "Java" } }
            div.stat { span.value #dsa-cards { (counts.dsa) } span.label { "DSA" } }
            div.stat { span.value #custom-cards { (counts.custom) } span.label { "Custom" } }
        }
        section.chart-section {
            h2 { "Categories" }
            (render_distribution(view))
        }
        section.add-card-section {
            h2 { "Add a card" }
            form action="/cards" method="post" {
                label for="front" { "Front" }
                textarea #front name="front" required {}
                label for="back" { "Back" }
                textarea #back name="back" {}
                label for="category" { "Category" }
                select #category name="category" {
                    @for category in CATEGORIES {
                        option value=(category) { (category) }
                    }
                }
                input type="submit" value="Add card";
            }
        }
        section.filter-section {
            div.chips {
                @let all_class = if filter.category().is_none() { "chip active" } else { "chip" };
                a class=(all_class) href=(filter_href(None, filter.search())) { "All" }
                @for label in counts.labels() {
                    @let class = if filter.category() == Some(label) { "chip active" } else { "chip" };
                    a class=(class) href=(filter_href(Some(label), filter.search())) { (label) }
                }
            }
            form action="/" method="get" {
                input type="hidden" name="category" value=(filter.category().unwrap_or("all"));
                input type="search" name="q" placeholder="Search cards..." value=(filter.search());
                input type="submit" value="Search";
            }
        }
        section.cards-grid {
            @if matched.is_empty() {
                div.no-cards {
                    h3 { "No cards found" }
                    p { "Try adjusting your filters or add a new card!" }
                }
            }
            @for (combined_index, card) in &matched {
                (render_card(card, view.custom_index(*combined_index)))
            }
        }
        section.import-section {
            h2 { "Import" }
            form action="/import" method="post" {
                label for="payload" { "Paste an exported JSON file" }
                textarea #payload name="payload" required {}
                label for="mode" { "Mode" }
                select #mode name="mode" {
                    @for mode in ImportMode::ALL {
                        option value=(mode.as_str()) { (mode.description()) }
                    }
                }
                input type="submit" value="Import";
            }
        }
    }
}

fn render_distribution(view: &CombinedView) -> Markup {
    let counts = view.counts();
    let total = counts.total.max(1);
    html! {
        ul.distribution {
            @for (label, count) in &counts.distribution {
                @let width = format!("width: {}%;", count * 100 / total);
                li {
                    span.label { (label) }
                    span.bar { span.fill style=(width) {} }
                    span.count { (count) }
                }
            }
        }
    }
}

/// Edit and delete controls are only offered for custom cards.
fn render_card(card: &Card, custom_index: Option<usize>) -> Markup {
    html! {
        div.card {
            div.card-header {
                span.card-category { (card.category) }
                @if let Some(index) = custom_index {
                    div.card-actions {
                        a.edit-btn href=(format!("/cards/{index}/edit")) { "Edit" }
                        form.delete-form action=(format!("/cards/{index}/delete")) method="post" onsubmit="return confirm('Delete this card?');" {
                            input.delete-btn type="submit" value="Delete";
                        }
                    }
                }
            }
            div.card-front { (card.front) }
            div.card-back { (card.display_back()) }
        }
    }
}

pub fn render_edit_form(index: usize, card: &Card) -> Markup {
    html! {
        section.edit-section {
            h2 { "Edit card" }
            form action=(format!("/cards/{index}/edit")) method="post" {
                label for="front" { "Front" }
                textarea #front name="front" required { (card.front) }
                label for="back" { "Back" }
                textarea #back name="back" { (card.back) }
                label for="category" { "Category" }
                select #category name="category" {
                    @if !CATEGORIES.contains(&card.category.as_str()) {
                        option value=(card.category) selected { (card.category) }
                    }
                    @for category in CATEGORIES {
                        @if card.category == category {
                            option value=(category) selected { (category) }
                        } @else {
                            option value=(category) { (category) }
                        }
                    }
                }
                div.controls {
                    input type="submit" name="action" value="Cancel" formnovalidate;
                    input type="submit" name="action" value="Save";
                }
            }
        }
    }
}

pub fn render_session(session: &PracticeSession) -> Markup {
    let Some(card) = session.current() else {
        return html! {
            div.finished { h1 { "Practice complete" } }
        };
    };
    let revealed = session.face() == Face::Back;
    html! {
        section #practice-section {
            div.practice-header {
                span #practice-progress { (session.progress_label()) }
                span.card-category #practice-category { (card.category) }
            }
            div.card {
                div.card-front #practice-question { (card.front) }
                @if revealed {
                    div.card-back #practice-answer { (card.display_back()) }
                }
            }
            form.controls action="/practice" method="post" {
                @if revealed {
                    input #need-review-btn type="submit" name="action" value="Review";
                    input #know-it-btn type="submit" name="action" value="Known";
                } @else {
                    input #reveal-btn type="submit" name="action" value="Reveal";
                }
                div.spacer {}
                input #exit-practice-btn type="submit" name="action" value="Exit";
            }
        }
    }
}

pub fn render_practice_start(deck_size: usize, last: Option<&Summary>) -> Markup {
    html! {
        section #practice-section {
            h2 { "Practice" }
            p { "Go through all " (deck_size) " cards once, in random order." }
            @if let Some(summary) = last {
                div.summary {
                    h3 { "Last session" }
                    p.known { "Known: " (summary.known) }
                    p.review { "Need review: " (summary.needs_review) }
                    @if !summary.completed() {
                        p { "Exited after " (summary.known + summary.needs_review) " of " (summary.total) " cards." }
                    }
                }
            }
            form action="/practice" method="post" {
                input #start-practice-btn type="submit" name="action" value="Start";
            }
        }
    }
}
