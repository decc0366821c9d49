pub mod auth;
pub mod content;
pub mod rewriter;
pub mod state;
pub mod stylist;
pub mod views;

pub use auth::StudioApp;
pub use state::AppState;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use tracing::info;

/// Assemble the full three-app router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/content", get(content::page).post(content::generate))
        .route("/content/login", post(content::login))
        .route("/content/logout", post(content::logout))
        .route("/content/log.csv", get(content::download_log))
        .route("/stylist", get(stylist::page).post(stylist::validate))
        .route("/stylist/login", post(stylist::login))
        .route("/stylist/logout", post(stylist::logout))
        .route("/stylist/log.csv", get(stylist::download_log))
        .route("/rewriter", get(rewriter::page).post(rewriter::rewrite))
        .route("/rewriter/login", post(rewriter::login))
        .route("/rewriter/logout", post(rewriter::logout))
        .route("/rewriter/log.csv", get(rewriter::download_log))
        .with_state(state)
}

async fn index() -> Html<String> {
    let mut body = String::from("<h1>copydesk</h1><ul>");
    for app in [StudioApp::Content, StudioApp::Stylist, StudioApp::Rewriter] {
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>",
            app.base_path(),
            app.title()
        ));
    }
    body.push_str("</ul>");
    Html(views::layout("Home", &body))
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("listening on http://{addr}");
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
