use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::models::{Session, SessionRegistry};

use super::state::AppState;
use super::views;

/// The three studio apps hosted by this binary. Each keeps its own access
/// code, session cookie, and audit file; only the process is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudioApp {
    Content,
    Stylist,
    Rewriter,
}

impl StudioApp {
    pub fn title(&self) -> &'static str {
        match self {
            StudioApp::Content => "Content Studio",
            StudioApp::Stylist => "Prompt Stylist",
            StudioApp::Rewriter => "Review Desk",
        }
    }

    pub fn base_path(&self) -> &'static str {
        match self {
            StudioApp::Content => "/content",
            StudioApp::Stylist => "/stylist",
            StudioApp::Rewriter => "/rewriter",
        }
    }

    fn cookie_name(&self) -> &'static str {
        match self {
            StudioApp::Content => "content_sid",
            StudioApp::Stylist => "stylist_sid",
            StudioApp::Rewriter => "rewriter_sid",
        }
    }

    /// Fixed access code. No expiry, no hashing, no rate limiting.
    fn access_code(&self) -> &'static str {
        match self {
            StudioApp::Content => "content-ai",
            StudioApp::Stylist => "stylist-ai",
            StudioApp::Rewriter => "rewrite-ai",
        }
    }
}

/// Access gate: plain string comparison against the app's fixed code.
pub fn verify_access(app: StudioApp, code: &str) -> bool {
    code == app.access_code()
}

/// Extract this app's session id from the request's Cookie header.
pub fn session_id(headers: &HeaderMap, app: StudioApp) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == app.cookie_name())
        .map(|(_, value)| value.to_string())
}

/// The authenticated session attached to this request, if any.
pub fn current_session(
    sessions: &SessionRegistry,
    headers: &HeaderMap,
    app: StudioApp,
) -> Option<Session> {
    let id = session_id(headers, app)?;
    sessions.get(&id).filter(|s| s.authenticated)
}

/// Run the access gate for a login form submission.
///
/// Correct code: store the submitted name verbatim in a fresh authenticated
/// session, set the cookie, redirect into the app. Wrong code: re-render the
/// login form with an inline error and leave all state unchanged.
pub fn handle_login(state: &AppState, app: StudioApp, name: &str, code: &str) -> Response {
    if !verify_access(app, code) {
        return Html(views::login_page(app, Some("Incorrect access code."))).into_response();
    }

    let id = state.sessions.insert(Session::authenticated(name));
    let cookie = format!("{}={}; Path=/; HttpOnly", app.cookie_name(), id);
    (
        [(header::SET_COOKIE, cookie)],
        Redirect::to(app.base_path()),
    )
        .into_response()
}

/// Drop the server-side session and expire the cookie.
pub fn handle_logout(state: &AppState, app: StudioApp, headers: &HeaderMap) -> Response {
    if let Some(id) = session_id(headers, app) {
        state.sessions.remove(&id);
    }
    let cookie = format!("{}=; Path=/; Max-Age=0", app.cookie_name());
    (
        [(header::SET_COOKIE, cookie)],
        Redirect::to(app.base_path()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_only_the_exact_code_passes() {
        assert!(verify_access(StudioApp::Rewriter, "rewrite-ai"));
        assert!(!verify_access(StudioApp::Rewriter, "rewrite-ai "));
        assert!(!verify_access(StudioApp::Rewriter, "REWRITE-AI"));
        assert!(!verify_access(StudioApp::Rewriter, ""));
        // Codes do not bleed across apps
        assert!(!verify_access(StudioApp::Content, "rewrite-ai"));
    }

    #[test]
    fn test_session_id_picks_the_right_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; content_sid=abc-123; rewriter_sid=def-456"),
        );

        assert_eq!(
            session_id(&headers, StudioApp::Content).as_deref(),
            Some("abc-123")
        );
        assert_eq!(
            session_id(&headers, StudioApp::Rewriter).as_deref(),
            Some("def-456")
        );
        assert_eq!(session_id(&headers, StudioApp::Stylist), None);
    }

    #[test]
    fn test_current_session_requires_live_registry_entry() {
        let sessions = SessionRegistry::new();
        let id = sessions.insert(Session::authenticated("Alice"));

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("content_sid={id}")).unwrap(),
        );

        let session = current_session(&sessions, &headers, StudioApp::Content).unwrap();
        assert_eq!(session.user, "Alice");

        sessions.remove(&id);
        assert!(current_session(&sessions, &headers, StudioApp::Content).is_none());
    }
}
