//! Template load step
//!
//! Resolves a page name to template text through the fallback chain:
//! `<view root>/template/<page>.html`, then `<view root>/index.html`, then
//! the built-in exception page embedded in the binary.

use std::fs;
use std::path::Path;

use crate::logger;

/// Exception page used when the fallback chain is exhausted. Carries the
/// `{$$...}` tokens the error handler fills in.
pub const BUILTIN_EXCEPTION_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Error</title>
</head>
<body>
    <h1>Something went wrong</h1>
    <p class="error-code">{$$code}</p>
    <p class="error-message">{$$message}</p>
    {Switch$detail}
    <dl>
        <dt>Handler</dt><dd>{$$handler}</dd>
        <dt>Action</dt><dd>{$$action}</dd>
        <dt>Parameters</dt><dd>{$$params}</dd>
    </dl>
    {/Switch}
    <p><a href="{RootURL$}">Back to the start page</a></p>
</body>
</html>
"#;

pub(crate) struct LoadedTemplate {
    pub text: String,
    /// True when both the page and index.html were absent
    pub missing: bool,
}

pub(crate) fn load(page: &str, view_root: &Path) -> LoadedTemplate {
    let page_path = view_root.join("template").join(format!("{page}.html"));
    if let Ok(text) = fs::read_to_string(&page_path) {
        return LoadedTemplate {
            text,
            missing: false,
        };
    }

    let index_path = view_root.join("index.html");
    if let Ok(text) = fs::read_to_string(&index_path) {
        return LoadedTemplate {
            text,
            missing: false,
        };
    }

    logger::log_warning(&format!(
        "Template \"{page}\" not found under {} and no index.html fallback",
        view_root.display()
    ));

    LoadedTemplate {
        text: BUILTIN_EXCEPTION_PAGE.to_string(),
        missing: true,
    }
}
