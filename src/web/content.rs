use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use tracing::warn;

use crate::models::{CaptionVariant, ContentRecord, Session};
use crate::pipeline::{execute_content, ContentOutcome, PipelineError};
use crate::store::{recent_for_user, RECENT_LIMIT};

use super::auth::{current_session, handle_login, handle_logout, StudioApp};
use super::state::AppState;
use super::views::{self, escape_html, notice, preview};

const APP: StudioApp = StudioApp::Content;

/// Preset style themes offered above the free-text field.
const PRESETS: &[&str] = &[
    "Rustic Fall Kitchen",
    "Coastal Summer Brunch",
    "Modern Farmhouse Dining Room",
    "Tuscan Outdoor Patio",
    "Luxury Chef's Kitchen",
];

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub preset: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub variant: String,
}

impl GenerateForm {
    /// The free-text field wins; the preset fills in when it is left blank.
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
    views::user_log_response(APP, state.content_log.as_ref(), &session.user)
}

pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<GenerateForm>,
) -> Response {
    let Some(session) = current_session(&state.sessions, &headers, APP) else {
        return Html(views::login_page(APP, None)).into_response();
    };

    let prompt = form.chosen_prompt();
    let variant = CaptionVariant::from_code(&form.variant).unwrap_or(CaptionVariant::WarmCozy);

    let flash = match execute_content(state.chat.as_ref(), state.image.as_ref(), prompt, variant).await
    {
        Ok(outcome) => {
            let record = ContentRecord::new(&session.user, prompt.trim(), variant, &outcome.image_url);
            if let Err(e) = state.content_log.append(&record) {
                warn!("failed to append content audit row: {e}");
            }
            return Html(render_page(&state, &session, Some(&outcome), None)).into_response();
        }
        Err(PipelineError::EmptyPrompt) => {
            "Please enter a valid style or choose one from the list.".to_string()
        }
        Err(e) => {
            warn!("content generation failed: {e}");
            "Could not generate content. Please try again.".to_string()
        }
    };

    Html(render_page(&state, &session, None, Some(&flash))).into_response()
}

fn render_page(
    state: &AppState,
    session: &Session,
    outcome: Option<&ContentOutcome>,
    flash: Option<&str>,
) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>", APP.title()));
    body.push_str(&views::user_bar(APP, &session.user));

    if let Some(flash) = flash {
        body.push_str(&notice("warning", flash));
    }

    // Prompt form: preset select, free-text style, A/B tone variant
    body.push_str(&format!(
        "<form method=\"post\" action=\"{}\">\
         <label for=\"preset\">Pick a popular style (optional)</label>{}\
         <label for=\"prompt\">Enter your style or theme</label>\
         <input type=\"text\" id=\"prompt\" name=\"prompt\">",
        APP.base_path(),
        views::preset_select("preset", PRESETS)
    ));
    body.push_str("<p>Choose a tone style for the product copy:</p>");
    for variant in CaptionVariant::ALL {
        let checked = if variant == CaptionVariant::WarmCozy {
            " checked"
        } else {
            ""
        };
        body.push_str(&format!(
            "<label><input type=\"radio\" name=\"variant\" value=\"{}\"{checked}> {}</label>",
            variant.code(),
            escape_html(variant.label())
        ));
    }
    body.push_str("<button type=\"submit\">Generate</button></form>");

    if let Some(outcome) = outcome {
        body.push_str(&notice("success", "Content generated."));
        body.push_str(&format!(
            "<img src=\"{}\" alt=\"AI-generated visual\">",
            escape_html(&outcome.image_url)
        ));
        body.push_str("<h2>Product Description</h2>");
        body.push_str(&format!("<p>{}</p>", escape_html(&outcome.caption)));
    }

    body.push_str("<h2>Your Recent Images</h2>");
    body.push_str(&render_history(state, session));

    views::layout(APP.title(), &body)
}

fn render_history(state: &AppState, session: &Session) -> String {
    let rows = match recent_for_user(state.content_log.as_ref(), &session.user, RECENT_LIMIT) {
        Ok(rows) => rows,
        Err(e) => {
            warn!("couldn't load previous images: {e}");
            return notice("warning", "Couldn't load previous images.");
        }
    };

    if rows.is_empty() {
        return notice("info", "No previous images found for this user.");
    }

    let mut out = String::new();
    for row in rows {
        out.push_str(&format!(
            "<div class=\"entry\"><img src=\"{}\" alt=\"{1}\"><p>{1}</p></div>",
            escape_html(&row.image_url),
            escape_html(&preview(&row.prompt, 150))
        ));
    }
    out
}
