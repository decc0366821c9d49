use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use tracing::warn;

use crate::models::{Session, StylistRecord};
use crate::pipeline::{validate_prompt, PipelineError, ValidationReport};
use crate::store::{recent_for_user, RECENT_LIMIT};

use super::auth::{current_session, handle_login, handle_logout, StudioApp};
use super::state::AppState;
use super::views::{self, escape_html, notice, preview};

const APP: StudioApp = StudioApp::Stylist;

/// Preset styling prompts offered above the free-text field.
const PRESETS: &[&str] = &[
    "Cozy Scandinavian Living Room",
    "Modern Japandi Bedroom",
    "Rustic Kitchen with Industrial Accents",
    "Art Deco Home Office",
    "Minimalist Zen Spa Bathroom",
];

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateForm {
    #[serde(default)]
    pub preset: String,
    #[serde(default)]
    pub prompt: String,
}

impl ValidateForm {
    fn chosen_prompt(&self) -> &str {
        if self.prompt.trim().is_empty() {
            &self.preset
        } else {
            &self.prompt
        }
    }
}

pub async fn page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(session) = current_session(&state.sessions, &headers, APP) else {
        return Html(views::login_page(APP, None)).into_response();
    };
    Html(render_page(&state, &session, None, None)).into_response()
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
    views::user_log_response(APP, state.stylist_log.as_ref(), &session.user)
}

/// Run the string-based validation workflow over a styling prompt.
///
/// Unlike the other two apps this makes no external calls, so the only
/// failure short of a log write is an empty prompt.
pub async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ValidateForm>,
) -> Response {
    let Some(session) = current_session(&state.sessions, &headers, APP) else {
        return Html(views::login_page(APP, None)).into_response();
    };

    match validate_prompt(form.chosen_prompt()) {
        Ok(report) => {
            let record = StylistRecord::new(&session.user, &report.prompt, &report.summary());
            if let Err(e) = state.stylist_log.append(&record) {
                warn!("failed to append stylist audit row: {e}");
            }
            Html(render_page(&state, &session, Some(&report), None)).into_response()
        }
        Err(PipelineError::EmptyPrompt) => {
            let flash = "Please enter a prompt or select a preset above.";
            Html(render_page(&state, &session, None, Some(flash))).into_response()
        }
        Err(e) => {
            warn!("stylist validation failed: {e}");
            let flash = "Could not validate the prompt. Please try again.";
            Html(render_page(&state, &session, None, Some(flash))).into_response()
        }
    }
}

fn render_page(
    state: &AppState,
    session: &Session,
    report: Option<&ValidationReport>,
    flash: Option<&str>,
) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>", APP.title()));
    body.push_str(&views::user_bar(APP, &session.user));

    if let Some(flash) = flash {
        body.push_str(&notice("info", flash));
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"{}\">\
         <label for=\"preset\">Choose a style preset (optional)</label>{}\
         <label for=\"prompt\">Enter your own interior styling prompt</label>\
         <input type=\"text\" id=\"prompt\" name=\"prompt\">\
         <button type=\"submit\">Validate</button></form>",
        APP.base_path(),
        views::preset_select("preset", PRESETS)
    ));

    if let Some(report) = report {
        body.push_str(&notice("success", "Review complete."));
        body.push_str("<h2>Validation Result</h2>");
        body.push_str(&format!("<pre>{}</pre>", escape_html(&report.summary())));
    }

    body.push_str("<h2>Recent Prompts</h2>");
    body.push_str(&render_history(state, session));

    views::layout(APP.title(), &body)
}

fn render_history(state: &AppState, session: &Session) -> String {
    let rows = match recent_for_user(state.stylist_log.as_ref(), &session.user, RECENT_LIMIT) {
        Ok(rows) => rows,
        Err(e) => {
            warn!("couldn't load prompt history: {e}");
            return notice("warning", "Couldn't load prompt history.");
        }
    };

    if rows.is_empty() {
        return notice("info", "No previous prompts found.");
    }

    let mut out = String::new();
    for row in rows {
        out.push_str(&format!(
            "<div class=\"entry\"><p><strong>Prompt:</strong> <code>{}</code></p>\
             <p><strong>Result:</strong></p><pre>{}</pre></div>",
            escape_html(&row.prompt),
            escape_html(&preview(&row.result, 300))
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_fallback() {
        let form = ValidateForm {
            preset: "Art Deco Home Office".to_string(),
            prompt: String::new(),
        };
        assert_eq!(form.chosen_prompt(), "Art Deco Home Office");
    }
}
