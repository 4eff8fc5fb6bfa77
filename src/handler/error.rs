//! Error handler module
//!
//! The built-in error handler: takes a structured error record, renders the
//! exception page through the template engine, and answers with the record's
//! HTTP status. Recovery is total; the exception page itself falls back to
//! the built-in one when missing.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;
use crate::http::build_html_response;
use crate::logger;
use crate::routing::HandlerDescriptor;
use crate::template::{self, RenderContext};

/// Structured error record handed to the error handler
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub code: i32,
    pub message: String,
    pub source_handler: String,
    pub source_action: String,
    pub requested_params: String,
    pub http_status: u16,
}

impl ErrorRecord {
    /// A request tried to reach an implementation file directly
    pub fn forbidden_direct_access(descriptor: &HandlerDescriptor) -> Self {
        Self {
            code: 403,
            message: "forbidden direct access".to_string(),
            source_handler: descriptor.handler_id.clone(),
            source_action: descriptor.action.clone(),
            requested_params: descriptor.args.join("/"),
            http_status: 403,
        }
    }

    /// The template load fallback chain was exhausted
    pub fn template_missing(descriptor: &HandlerDescriptor) -> Self {
        Self {
            code: 500,
            message: format!("template \"{}\" missing", descriptor.page),
            source_handler: descriptor.handler_id.clone(),
            source_action: descriptor.action.clone(),
            requested_params: descriptor.args.join("/"),
            http_status: 500,
        }
    }
}

/// Render the exception page for a record
pub fn handle_error(state: &AppState, record: &ErrorRecord, is_head: bool) -> Response<Full<Bytes>> {
    logger::log_error(&format!(
        "{} ({}) from {}::{} params \"{}\"",
        record.message, record.code, record.source_handler, record.source_action,
        record.requested_params
    ));

    let mut vars = RenderContext::new();
    vars.set_scalar("code", record.code.to_string());
    vars.set_scalar("message", record.message.clone());
    vars.set_scalar("handler", record.source_handler.clone());
    vars.set_scalar("action", record.source_action.clone());
    vars.set_scalar("params", record.requested_params.clone());
    vars.set_flag("detail", !record.source_handler.is_empty());

    let rendered = template::render(
        "exception",
        &state.config.paths.framework_view_dir(),
        &state.config.site,
        &vars,
    );

    build_html_response(rendered.html, record.http_status, is_head)
}
