//! Handler registry module
//!
//! Handlers are registered once at start-up under lowercased namespace keys
//! (`report`, `admin/report`). The resolver probes these keys instead of a
//! filesystem or class loader. App and framework handlers live in separate
//! namespaces; framework lookups never see app handlers and vice versa.

use std::collections::HashMap;
use std::sync::Arc;

use crate::handler::Handler;

/// A registered handler plus the source location recorded for it
pub struct HandlerEntry {
    pub handler: Arc<dyn Handler>,
    /// Source location reported in descriptors; the direct-file-access guard
    /// inspects its extension
    pub source: String,
}

/// Registration map probed by the resolver
#[derive(Default)]
pub struct HandlerRegistry {
    app: HashMap<String, HandlerEntry>,
    framework: HashMap<String, HandlerEntry>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an app handler under a namespace key such as `admin/report`
    pub fn register(&mut self, id: &str, source: &str, handler: Arc<dyn Handler>) {
        self.app.insert(
            id.to_ascii_lowercase(),
            HandlerEntry {
                handler,
                source: source.to_string(),
            },
        );
    }

    /// Register a framework handler (login and other built-ins)
    pub fn register_framework(&mut self, id: &str, source: &str, handler: Arc<dyn Handler>) {
        self.framework.insert(
            id.to_ascii_lowercase(),
            HandlerEntry {
                handler,
                source: source.to_string(),
            },
        );
    }

    /// Probe a namespace key; `framework_search` selects the namespace
    pub fn lookup(&self, key: &str, framework_search: bool) -> Option<&HandlerEntry> {
        if framework_search {
            self.framework.get(key)
        } else {
            self.app.get(key)
        }
    }
}
