use axum::http::header;
use axum::response::{Html, IntoResponse, Response};

use crate::models::Record;
use crate::store::{encode_row, LogStore};

use super::auth::StudioApp;

const STYLE: &str = "\
body{font-family:sans-serif;max-width:720px;margin:2rem auto;padding:0 1rem;color:#222}\
form{margin:1rem 0}\
label{display:block;margin:0.5rem 0 0.25rem}\
input[type=text],input[type=password],textarea,select{width:100%;padding:0.4rem;box-sizing:border-box}\
textarea{min-height:6rem}\
button{margin-top:0.75rem;padding:0.4rem 1rem}\
img{max-width:100%}\
.notice{padding:0.5rem 0.75rem;border-radius:4px}\
.notice.error{background:#fdd}\
.notice.warning{background:#fe9}\
.notice.info{background:#def}\
.notice.success{background:#dfd}\
.entry{border-top:1px solid #ccc;padding:0.5rem 0}\
.userbar{display:flex;justify-content:space-between;align-items:center}\
pre{white-space:pre-wrap;background:#f4f4f4;padding:0.75rem}";

/// Minimal HTML escaping for user-supplied text.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shared page chrome.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\">\
         <title>{} - copydesk</title><style>{STYLE}</style></head>\
         <body><main>{body}</main></body></html>",
        escape_html(title)
    )
}

/// One inline message. Kinds: error, warning, info, success.
pub fn notice(kind: &str, text: &str) -> String {
    format!("<p class=\"notice {kind}\">{}</p>", escape_html(text))
}

/// The login form shown to unauthenticated visitors.
pub fn login_page(app: StudioApp, error: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>", app.title()));
    body.push_str("<p>Please log in to continue.</p>");
    if let Some(error) = error {
        body.push_str(&notice("error", error));
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"{}/login\">\
         <label for=\"name\">Your name or email</label>\
         <input type=\"text\" id=\"name\" name=\"name\">\
         <label for=\"code\">Access code</label>\
         <input type=\"password\" id=\"code\" name=\"code\">\
         <button type=\"submit\">Login</button>\
         </form>",
        app.base_path()
    ));
    layout(app.title(), &body)
}

/// The logged-in header: user, log download link, logout button.
pub fn user_bar(app: StudioApp, user: &str) -> String {
    format!(
        "<div class=\"userbar\"><span>Logged in as <code>{}</code></span>\
         <span><a href=\"{base}/log.csv\">Download your session log</a> \
         <form method=\"post\" action=\"{base}/logout\" style=\"display:inline\">\
         <button type=\"submit\">Logout</button></form></span></div>",
        escape_html(user),
        base = app.base_path()
    )
}

/// A `<select>` populated from preset strings, with a leading empty option.
pub fn preset_select(name: &str, presets: &[&str]) -> String {
    let mut out = format!("<select name=\"{name}\"><option value=\"\"></option>");
    for preset in presets {
        out.push_str(&format!(
            "<option value=\"{0}\">{0}</option>",
            escape_html(preset)
        ));
    }
    out.push_str("</select>");
    out
}

/// First `limit` characters of a history field, with an ellipsis when cut.
pub fn preview(text: &str, limit: usize) -> String {
    let short: String = text.chars().take(limit).collect();
    if short.len() < text.len() {
        format!("{short}...")
    } else {
        short
    }
}

/// Serve the requesting user's audit rows as a CSV attachment.
///
/// Matching is the same trimmed-lowercase comparison the history view uses.
/// No rows: an inline notice page instead of an empty file. Read failure:
/// degrades to a warning page.
pub fn user_log_response<R: Record>(
    app: StudioApp,
    log: &dyn LogStore<R>,
    user: &str,
) -> Response {
    let rows = match crate::store::rows_for_user(log, user) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!("couldn't load session log: {e}");
            let body = notice("warning", "Couldn't load session log.");
            return Html(layout(app.title(), &body)).into_response();
        }
    };

    if rows.is_empty() {
        let body = notice("info", "No sessions found for current user.");
        return Html(layout(app.title(), &body)).into_response();
    }

    let mut csv = encode_row(&R::HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>());
    for row in &rows {
        csv.push_str(&encode_row(&row.to_fields()));
    }

    let filename = format!("{}_session_log.csv", user.trim().to_lowercase());
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response()
}
