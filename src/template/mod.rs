//! Template engine module
//!
//! Renders a page by running raw template text through six ordered passes:
//! load, binder, environment injector, repeater, conditional, substitution +
//! ajax expander. Every pass is a pure text-in/text-out function; this
//! module's `render` is the single driver composing them. Each pass consumes
//! the complete output of the previous one and tolerates zero matches.

mod binder;
mod cond;
mod environ;
mod loader;
mod repeat;
mod subst;

use std::collections::HashMap;
use std::path::Path;

use crate::config::SiteConfig;

/// Output variables a handler hands to the engine, consumed exactly once per
/// render. Keys are unique; last write wins.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    scalars: HashMap<String, String>,
    arrays: HashMap<String, Vec<String>>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a scalar for `{$$key}` substitution and `{Switch$key}` tests
    pub fn set_scalar(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.scalars.insert(key.into(), value.into());
    }

    /// Bind a conditional flag; `{Switch$key}` sees `"1"` as true and `""`
    /// as false
    pub fn set_flag(&mut self, key: impl Into<String>, on: bool) {
        self.scalars
            .insert(key.into(), if on { "1" } else { "" }.to_string());
    }

    /// Bind an array for `{F$key}` tokens inside `{Foreach}` blocks
    pub fn set_array(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.arrays.insert(key.into(), values);
    }

    pub(crate) fn scalars(&self) -> &HashMap<String, String> {
        &self.scalars
    }

    pub(crate) fn arrays(&self) -> &HashMap<String, Vec<String>> {
        &self.arrays
    }
}

/// Result of one render
#[derive(Debug)]
pub struct Rendered {
    pub html: String,
    /// Set when the load fallback chain was exhausted and the built-in
    /// exception page was used; the caller reports this to the error handler
    pub missing_template: bool,
}

/// Render a page against a view root
///
/// Rendering never fails: a missing template recovers to the built-in
/// exception page and the flag on [`Rendered`] tells the caller to report it.
pub fn render(
    page: &str,
    view_root: &Path,
    site: &SiteConfig,
    vars: &RenderContext,
) -> Rendered {
    let loaded = loader::load(page, view_root);
    let text = binder::bind(loaded.text, view_root);
    let text = environ::inject(text, site);
    let text = repeat::expand_foreach(text, vars.arrays());
    let text = cond::apply_switch(text, vars.scalars());
    let html = subst::substitute(text, vars.scalars());

    Rendered {
        html,
        missing_template: loaded.missing,
    }
}
