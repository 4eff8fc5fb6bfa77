//! Request handler module
//!
//! Owns the dispatch sequencer (the ordered guard chain), the static file
//! tiers, the `Handler` contract routed units implement, and the built-in
//! framework handlers.

pub mod builtin;
pub mod error;
pub mod sequencer;
pub mod static_files;

pub use builtin::{LoginHandler, PageHandler};
pub use sequencer::handle_request;

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;
use crate::routing::HandlerDescriptor;
use crate::session::Session;

/// A routed unit of request-handling logic, exposing named actions
pub trait Handler: Send + Sync {
    /// Whether this handler exposes a named action; the resolver promotes
    /// the segment after the handler name to the action only when it does
    fn has_action(&self, name: &str) -> bool {
        let _ = name;
        false
    }

    /// Run the selected action and produce the response
    fn invoke(&self, ctx: &HandlerContext<'_>) -> Response<Full<Bytes>>;
}

/// Everything a handler gets to see for one invocation
pub struct HandlerContext<'a> {
    pub state: &'a AppState,
    pub descriptor: &'a HandlerDescriptor,
    pub session: &'a Arc<Session>,
    /// The path originally requested, without the leading slash
    pub requested_path: &'a str,
    pub is_head: bool,
}
