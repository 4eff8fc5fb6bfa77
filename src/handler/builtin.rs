//! Built-in framework handlers
//!
//! `PageHandler` renders its descriptor's template page and is the default
//! unit applications register for plain pages. `LoginHandler` renders the
//! login page from the framework view tree; the auth gate invokes it with
//! the originally requested path so the client can be sent back after
//! authenticating.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::http::build_html_response;
use crate::session::SessionStore;
use crate::template::{self, RenderContext};

use super::error::{handle_error, ErrorRecord};
use super::{Handler, HandlerContext};

/// Renders the template page named by the resolved descriptor
pub struct PageHandler;

impl Handler for PageHandler {
    fn invoke(&self, ctx: &HandlerContext<'_>) -> Response<Full<Bytes>> {
        let mut vars = RenderContext::new();
        vars.set_scalar("action", ctx.descriptor.action.clone());
        vars.set_array("arg", ctx.descriptor.args.clone());
        vars.set_flag("logged_in", ctx.session.is_logged_in());

        let rendered = template::render(
            &ctx.descriptor.page,
            &ctx.state.config.paths.view_root(),
            &ctx.state.config.site,
            &vars,
        );

        if rendered.missing_template {
            return handle_error(
                ctx.state,
                &ErrorRecord::template_missing(ctx.descriptor),
                ctx.is_head,
            );
        }

        build_html_response(rendered.html, 200, ctx.is_head)
    }
}

/// Renders the login page; invoked by the auth gate
pub struct LoginHandler;

impl Handler for LoginHandler {
    fn invoke(&self, ctx: &HandlerContext<'_>) -> Response<Full<Bytes>> {
        let mut vars = RenderContext::new();
        vars.set_scalar("requested", ctx.requested_path.to_string());
        vars.set_flag("have_requested", !ctx.requested_path.is_empty());

        let rendered = template::render(
            "login",
            &ctx.state.config.paths.framework_view_dir(),
            &ctx.state.config.site,
            &vars,
        );

        if rendered.missing_template {
            return handle_error(
                ctx.state,
                &ErrorRecord::template_missing(ctx.descriptor),
                ctx.is_head,
            );
        }

        build_html_response(rendered.html, 200, ctx.is_head)
    }
}
