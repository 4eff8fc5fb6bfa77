//! Dispatch sequencer module
//!
//! Entry point for request processing: a fixed, ordered list of guards runs
//! over each request and the first one that produces a response ends the
//! chain. The order is load-bearing — the `file` reserved-word check relies
//! on the API guard not having intercepted the request, and the
//! direct-file-access guard inspects the resolution result — so the guards
//! live in one function, top to bottom.

use std::convert::Infallible;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

use crate::api;
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing;
use crate::session::{session_id_from_cookie, Session, SessionStore};

use super::error::{handle_error, ErrorRecord};
use super::static_files;
use super::HandlerContext;

const FAVICON_NAMES: [&str; 3] = ["favicon.ico", "favicon.gif", "favicon.png"];
const RESERVED_WORDS: [&str; 3] = ["protected", "public", "template"];

/// Facts extracted once from the hyper request; the guard chain runs on
/// these alone, which keeps it testable without a connection
pub struct RequestFacts {
    /// Requested path without the surrounding slashes
    pub path: String,
    pub segments: Vec<String>,
    pub is_ajax: bool,
    pub is_head: bool,
    pub session_id: Option<String>,
}

impl RequestFacts {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.trim_matches('/').to_string(),
            segments: path_segments(path),
            is_ajax: false,
            is_head: false,
            session_id: None,
        }
    }

    pub fn from_request(req: &Request<hyper::body::Incoming>) -> Self {
        let mut facts = Self::new(req.uri().path());
        facts.is_head = *req.method() == Method::HEAD;
        facts.is_ajax = req
            .headers()
            .get("x-requested-with")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("xmlhttprequest"));
        facts.session_id =
            session_id_from_cookie(req.headers().get("cookie").and_then(|v| v.to_str().ok()));
        facts
    }
}

/// Split the normalized request path; the empty path is the index page
fn path_segments(path: &str) -> Vec<String> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return vec!["index".to_string()];
    }
    trimmed
        .split('/')
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Auth state derived once per request, never mutated afterwards
#[derive(Clone, Copy)]
struct AuthContext {
    auth_required: bool,
    logged_in: bool,
}

impl AuthContext {
    const fn is_authorized(self) -> bool {
        (self.auth_required && self.logged_in) || !self.auth_required
    }

    const fn needs_login(self) -> bool {
        self.auth_required && !self.logged_in
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: String,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    if method == Method::OPTIONS {
        return Ok(http::build_options_response());
    }
    if method != Method::GET && method != Method::HEAD {
        logger::log_warning(&format!("Method not allowed: {method}"));
        return Ok(http::build_405_response());
    }

    let facts = RequestFacts::from_request(&req);
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let response = dispatch(&facts, &state).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            remote_addr,
            method.to_string(),
            format!("/{}", facts.path),
        );
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        entry.user_agent = user_agent;
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Run the ordered guard chain for one request
pub async fn dispatch(facts: &RequestFacts, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let session = state.sessions.session(facts.session_id.as_deref());
    // Session state is read once; every guard sees the same auth context
    let auth = AuthContext {
        auth_required: state.config.site.auth_required,
        logged_in: session.is_logged_in(),
    };
    let first = facts.segments[0].as_str();

    // Guard 1: favicon
    if FAVICON_NAMES.contains(&first) {
        let candidates = static_files::favicon_candidates(&state.config.paths, first);
        return static_files::serve_first(&candidates, facts.is_head)
            .await
            .unwrap_or_else(http::build_404_response);
    }

    // Guard 2: exception route. The redirect is issued either way; the API
    // check still runs and its response wins when it produces one.
    if first == "exception" {
        logger::log_guard("exception redirect", &facts.path);
        let redirect = http::build_redirect_response("/");
        if let Some(api_response) = try_api(facts, state) {
            return api_response;
        }
        return redirect;
    }

    // Guard 3: API entry, bypassing the auth gate and handler resolution
    if let Some(api_response) = try_api(facts, state) {
        return api_response;
    }

    // Guard 4: css/js assets from the three tiers
    if matches!(first, "css" | "js") {
        let candidates =
            static_files::tier_candidates(&state.config.paths, &facts.path, auth.is_authorized());
        return static_files::serve_first(&candidates, facts.is_head)
            .await
            .unwrap_or_else(http::build_404_response);
    }

    // Guard 5: early error cases. File access requires auth when auth is
    // enabled; the tier directories are never addressable by name.
    if first == "file" && auth.needs_login() {
        logger::log_guard("file access without auth", &facts.path);
        return http::build_404_response();
    }
    if RESERVED_WORDS.contains(&first) {
        logger::log_guard("reserved word", &facts.path);
        return http::build_403_response();
    }

    // Guard 6: auth gate
    if auth.needs_login() {
        if facts.is_ajax {
            return http::build_404_response();
        }
        session.remember_requested_path(&facts.path);
        return invoke_login(facts, state, &session);
    }

    // Guard 7: handler resolution
    let resolution = routing::resolve(&facts.segments, &state.registry, false);

    // Guard 8: static-resource fallback when nothing resolved
    let Some(handler) = resolution.handler else {
        let candidates =
            static_files::tier_candidates(&state.config.paths, &facts.path, auth.is_authorized());
        return static_files::serve_first(&candidates, facts.is_head)
            .await
            .unwrap_or_else(http::build_404_response);
    };

    // Guard 9: requests must not reach implementation files directly
    if resolution.descriptor.source.ends_with(".php") {
        logger::log_guard("direct file access", &facts.path);
        return handle_error(
            state,
            &ErrorRecord::forbidden_direct_access(&resolution.descriptor),
            facts.is_head,
        );
    }

    // Guard 10: normal completion
    let ctx = HandlerContext {
        state,
        descriptor: &resolution.descriptor,
        session: &session,
        requested_path: &facts.path,
        is_head: facts.is_head,
    };
    handler.invoke(&ctx)
}

/// The API-access check shared by guards 2 and 3
fn try_api(facts: &RequestFacts, state: &Arc<AppState>) -> Option<Response<Full<Bytes>>> {
    if facts.segments[0] == state.config.site.api_name && state.config.site.api_available {
        return Some(api::dispatch(&facts.segments[1..], facts.is_head));
    }
    None
}

/// Resolve and invoke the configured login handler with the original path
fn invoke_login(
    facts: &RequestFacts,
    state: &Arc<AppState>,
    session: &Arc<Session>,
) -> Response<Full<Bytes>> {
    let login_segments = vec![state.config.site.login_handler.clone()];
    let resolution = routing::resolve(&login_segments, &state.registry, true);

    let Some(handler) = resolution.handler else {
        logger::log_error(&format!(
            "Login handler \"{}\" is not registered",
            state.config.site.login_handler
        ));
        return http::build_404_response();
    };

    let ctx = HandlerContext {
        state,
        descriptor: &resolution.descriptor,
        session,
        requested_path: &facts.path,
        is_head: facts.is_head,
    };
    handler.invoke(&ctx)
}
