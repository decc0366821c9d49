use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use tracing::warn;

use crate::models::{CritiqueReport, RewriteRecord, Session, Tone};
use crate::pipeline::{execute_review, PipelineError, ReviewOutcome};
use crate::store::{recent_for_user, RECENT_LIMIT};

use super::auth::{current_session, handle_login, handle_logout, StudioApp};
use super::state::AppState;
use super::views::{self, escape_html, notice, preview};

const APP: StudioApp = StudioApp::Rewriter;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct RewriteForm {
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub tone: String,
    /// Checkbox: remember the tone choice for next time. Present when on.
    #[serde(default)]
    pub memory: Option<String>,
    /// Checkbox: skip tone memory for this submission.
    #[serde(default)]
    pub reset: Option<String>,
}

impl RewriteForm {
    fn use_memory(&self) -> bool {
        self.memory.is_some() && self.reset.is_none()
    }
}

pub async fn page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(session) = current_session(&state.sessions, &headers, APP) else {
        return Html(views::login_page(APP, None)).into_response();
    };

    // Tone memory decides the pre-selected tone for this user
    let default_tone = match state.tones.get(&session.user) {
        Ok(tone) => tone.unwrap_or_default(),
        Err(e) => {
            warn!("couldn't load tone memory: {e}");
            Tone::default()
        }
    };

    Html(render_page(&state, &session, default_tone, None, None)).into_response()
}

pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    handle_login(&state, APP, &form.name, &form.code)
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    handle_logout(&state, APP, &headers)
}

pub async fn download_log(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(session) = current_session(&state.sessions, &headers, APP) else {
        return Html(views::login_page(APP, None)).into_response();
    };
    views::user_log_response(APP, state.rewrite_log.as_ref(), &session.user)
}

/// Run the four-stage pipeline for a submitted review.
pub async fn rewrite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RewriteForm>,
) -> Response {
    let Some(session) = current_session(&state.sessions, &headers, APP) else {
        return Html(views::login_page(APP, None)).into_response();
    };

    let tone = Tone::from_label(&form.tone).unwrap_or_default();

    if form.use_memory() {
        if let Err(e) = state.tones.set(&session.user, tone) {
            warn!("couldn't save tone memory: {e}");
        }
    }

    let flash = match execute_review(state.chat.as_ref(), &form.review, tone).await {
        Ok(outcome) => {
            let record = RewriteRecord::new(
                &session.user,
                tone,
                form.review.trim(),
                &outcome.final_text,
                &outcome.critique_text,
            );
            if let Err(e) = state.rewrite_log.append(&record) {
                warn!("failed to append rewrite audit row: {e}");
            }
            return Html(render_page(&state, &session, tone, Some(&outcome), None)).into_response();
        }
        Err(PipelineError::EmptyPrompt) => "Review text is required.".to_string(),
        Err(e) => {
            warn!("review pipeline failed: {e}");
            "Could not rewrite the review. Please try again.".to_string()
        }
    };

    Html(render_page(&state, &session, tone, None, Some(&flash))).into_response()
}

fn render_page(
    state: &AppState,
    session: &Session,
    selected_tone: Tone,
    outcome: Option<&ReviewOutcome>,
    flash: Option<&str>,
) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>", APP.title()));
    body.push_str(&views::user_bar(APP, &session.user));

    if let Some(flash) = flash {
        body.push_str(&notice("warning", flash));
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"{}\">\
         <label for=\"tone\">Choose tone preference</label><select name=\"tone\" id=\"tone\">",
        APP.base_path()
    ));
    for tone in Tone::ALL {
        let selected = if tone == selected_tone { " selected" } else { "" };
        body.push_str(&format!(
            "<option value=\"{0}\"{selected}>{0}</option>",
            escape_html(tone.label())
        ));
    }
    body.push_str(
        "</select>\
         <label><input type=\"checkbox\" name=\"memory\" value=\"on\" checked> Use tone memory</label>\
         <label><input type=\"checkbox\" name=\"reset\" value=\"on\"> Reset tone memory for this session</label>\
         <label for=\"review\">Paste a customer review here</label>\
         <textarea id=\"review\" name=\"review\"></textarea>\
         <button type=\"submit\">Rewrite + Evaluate</button></form>",
    );

    if let Some(outcome) = outcome {
        body.push_str(&notice("success", "Done."));
        body.push_str("<h2>Rewritten Review</h2>");
        body.push_str(&format!("<pre>{}</pre>", escape_html(&outcome.final_text)));
        body.push_str("<h2>Evaluation</h2>");
        body.push_str(&render_critique(&outcome.critique));
    }

    body.push_str("<h2>Recent Rewrites</h2>");
    body.push_str(&render_history(state, session));

    views::layout(APP.title(), &body)
}

/// One list item per critique line, scored lines with their score badge.
fn render_critique(critique: &CritiqueReport) -> String {
    let mut out = String::from("<ul>");
    for line in &critique.lines {
        match (&line.label, line.score) {
            (Some(label), Some(score)) => out.push_str(&format!(
                "<li><strong>{}:</strong> {score}/5. {}</li>",
                escape_html(label),
                escape_html(&line.remark)
            )),
            (Some(label), None) => out.push_str(&format!(
                "<li><strong>{}:</strong> {}</li>",
                escape_html(label),
                escape_html(&line.remark)
            )),
            (None, _) => out.push_str(&format!("<li>{}</li>", escape_html(&line.remark))),
        }
    }
    out.push_str("</ul>");
    out
}

fn render_history(state: &AppState, session: &Session) -> String {
    let rows = match recent_for_user(state.rewrite_log.as_ref(), &session.user, RECENT_LIMIT) {
        Ok(rows) => rows,
        Err(e) => {
            warn!("couldn't load rewrite history: {e}");
            return notice("warning", "Couldn't load rewrite history.");
        }
    };

    if rows.is_empty() {
        return notice("info", "No recent rewrites found.");
    }

    let mut out = String::new();
    for row in rows {
        out.push_str(&format!(
            "<div class=\"entry\"><p><strong>Time:</strong> {}</p>\
             <p><strong>Tone:</strong> {}</p>\
             <p><strong>Original:</strong> {}</p>\
             <p><strong>Rewritten:</strong> {}</p>\
             <p><strong>Evaluation:</strong></p>{}</div>",
            escape_html(&row.timestamp),
            escape_html(&row.tone),
            escape_html(&preview(&row.original, 150)),
            escape_html(&preview(&row.rewritten, 150)),
            render_critique(&CritiqueReport::parse(&row.evaluation))
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use async_trait::async_trait;
    use axum::http::{header, HeaderValue};

    use crate::llm::{ChatModel, ImageModel};
    use crate::models::{ContentRecord, SessionRegistry, StylistRecord};
    use crate::store::{LogStore, MemoryLog, MemoryToneStore, ToneStore};

    use super::*;

    struct EchoChat;

    #[async_trait]
    impl ChatModel for EchoChat {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
            Ok("Clarity: 4/5. Fine.".to_string())
        }
    }

    struct NoImage;

    #[async_trait]
    impl ImageModel for NoImage {
        async fn generate_image(&self, _prompt: &str) -> Result<String> {
            anyhow::bail!("not used in this app")
        }
    }

    fn test_state() -> AppState {
        AppState {
            chat: Arc::new(EchoChat),
            image: Arc::new(NoImage),
            sessions: SessionRegistry::new(),
            content_log: Arc::new(MemoryLog::<ContentRecord>::new()),
            stylist_log: Arc::new(MemoryLog::<StylistRecord>::new()),
            rewrite_log: Arc::new(MemoryLog::<RewriteRecord>::new()),
            tones: Arc::new(MemoryToneStore::new()),
        }
    }

    fn headers_for(state: &AppState, user: &str) -> HeaderMap {
        let id = state.sessions.insert(Session::authenticated(user));
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("rewriter_sid={id}")).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_rewrite_appends_audit_row_and_saves_tone() {
        let state = test_state();
        let headers = headers_for(&state, "bob");

        let form = RewriteForm {
            review: "it broke, twice".to_string(),
            tone: "Luxury & Premium".to_string(),
            memory: Some("on".to_string()),
            reset: None,
        };
        rewrite(State(state.clone()), headers, Form(form)).await;

        let rows = state.rewrite_log.read_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user, "bob");
        assert_eq!(rows[0].tone, "Luxury & Premium");
        assert_eq!(rows[0].original, "it broke, twice");

        assert_eq!(state.tones.get("bob").unwrap(), Some(Tone::LuxuryPremium));
        assert_eq!(state.tones.get("alice").unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_review_writes_nothing() {
        let state = test_state();
        let headers = headers_for(&state, "bob");

        let form = RewriteForm {
            review: "   ".to_string(),
            tone: "Warm & Friendly".to_string(),
            memory: None,
            reset: None,
        };
        rewrite(State(state.clone()), headers, Form(form)).await;

        assert!(state.rewrite_log.read_all().unwrap().is_empty());
        assert_eq!(state.tones.get("bob").unwrap(), None);
    }

    #[tokio::test]
    async fn test_reset_checkbox_skips_tone_memory() {
        let state = test_state();
        let headers = headers_for(&state, "bob");

        let form = RewriteForm {
            review: "a review".to_string(),
            tone: "Helpful & Technical".to_string(),
            memory: Some("on".to_string()),
            reset: Some("on".to_string()),
        };
        rewrite(State(state.clone()), headers, Form(form)).await;

        assert_eq!(state.tones.get("bob").unwrap(), None);
        // The pipeline itself still ran and was logged
        assert_eq!(state.rewrite_log.read_all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unauthenticated_post_gets_login_page() {
        let state = test_state();

        let form = RewriteForm {
            review: "a review".to_string(),
            tone: "Warm & Friendly".to_string(),
            memory: None,
            reset: None,
        };
        rewrite(State(state.clone()), HeaderMap::new(), Form(form)).await;

        assert!(state.rewrite_log.read_all().unwrap().is_empty());
    }
}
