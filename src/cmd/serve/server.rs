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

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::signal;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::cmd::serve::get::dashboard_handler;
use crate::cmd::serve::get::edit_handler;
use crate::cmd::serve::get::export_handler;
use crate::cmd::serve::get::practice_handler;
use crate::cmd::serve::post;
use crate::cmd::serve::state::MutableState;
use crate::cmd::serve::state::ServerState;
use crate::collection::Collection;
use crate::error::Fallible;

pub async fn start_server(
    directory: Option<String>,
    port: Option<u16>,
    open_browser: bool,
) -> Fallible<()> {
    let coll = Collection::open(directory).await?;
    let port: u16 = port.unwrap_or(coll.config.port);
    let open_browser = open_browser && coll.config.open_browser;

    let state = ServerState {
        directory: coll.directory,
        mutable: Arc::new(Mutex::new(MutableState::new(coll.store))),
    };
    log::debug!("Serving cards from {}", state.directory.display());
    let app = router(state);
    let bind = format!("127.0.0.1:{port}");

    if open_browser {
        // Start a separate task to open the browser.
        let url = format!("http://{bind}/");
        let probe = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&probe).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            let _ = open::that(url);
        });
    }

    log::debug!("Starting server on {bind}");
    println!("Dashboard running at http://{bind}/");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn router(state: ServerState) -> Router {
    let app = Router::new();
    let app = app.route("/", get(dashboard_handler));
    let app = app.route("/cards", post(post::add_handler));
    let app = app.route(
        "/cards/{index}/edit",
        get(edit_handler).post(post::edit_handler),
    );
    let app = app.route("/cards/{index}/delete", post(post::delete_handler));
    let app = app.route("/import", post(post::import_handler));
    let app = app.route("/export", get(export_handler));
    let app = app.route(
        "/practice",
        get(practice_handler).post(post::practice_handler),
    );
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    app.with_state(state)
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_err() {
        // Without a signal handler, run until killed.
        std::future::pending::<()>().await;
    }
    log::debug!("Shutting down.");
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
