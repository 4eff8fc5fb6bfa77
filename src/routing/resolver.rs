//! Route resolution module
//!
//! Implements the greedy handler lookup: walk the path segments, probe the
//! registry at each depth, first match wins. Misses descend one namespace
//! level; the scan never backtracks to an earlier depth even if a deeper
//! candidate would also have matched.

use std::sync::Arc;

use crate::handler::Handler;

use super::registry::HandlerRegistry;

/// Outcome of a resolution attempt
///
/// `source` is empty when no handler was found; the sequencer turns that
/// into a static-resource fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerDescriptor {
    /// Display name of the handler, e.g. `ReportHandler`
    pub handler_id: String,
    /// Selected action; `index` unless the following segment names one
    pub action: String,
    /// Template page name, the lowercased matched segment
    pub page: String,
    /// Positional arguments left over after handler and action selection
    pub args: Vec<String>,
    /// Source location recorded at registration; empty when not found
    pub source: String,
}

impl HandlerDescriptor {
    pub fn is_found(&self) -> bool {
        !self.source.is_empty()
    }
}

/// Descriptor plus the handler it names, when one was found
pub struct Resolution {
    pub descriptor: HandlerDescriptor,
    pub handler: Option<Arc<dyn Handler>>,
}

/// Resolve path segments against the registry
///
/// Resolution never fails; absence is the empty descriptor.
pub fn resolve(
    segments: &[String],
    registry: &HandlerRegistry,
    framework_search: bool,
) -> Resolution {
    let mut prefix = String::new();

    for (i, segment) in segments.iter().enumerate() {
        let lowered = segment.to_ascii_lowercase();
        let key = format!("{prefix}{lowered}");

        let Some(entry) = registry.lookup(&key, framework_search) else {
            // No handler here: treat the segment as a namespace level
            prefix.push_str(&lowered);
            prefix.push('/');
            continue;
        };

        let (action, args) = match segments.get(i + 1) {
            Some(next) if entry.handler.has_action(next) => (
                next.clone(),
                segments.get(i + 2..).unwrap_or_default().to_vec(),
            ),
            _ => (
                "index".to_string(),
                segments.get(i + 1..).unwrap_or_default().to_vec(),
            ),
        };

        return Resolution {
            descriptor: HandlerDescriptor {
                handler_id: format!("{}Handler", title_case(segment)),
                action,
                page: lowered,
                args,
                source: entry.source.clone(),
            },
            handler: Some(Arc::clone(&entry.handler)),
        };
    }

    Resolution {
        descriptor: HandlerDescriptor::default(),
        handler: None,
    }
}

/// Title-case a path segment for the handler display name
fn title_case(segment: &str) -> String {
    let mut chars = segment.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + &chars.as_str().to_ascii_lowercase()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;
    use hyper::Response;

    use crate::handler::HandlerContext;

    struct TestHandler {
        actions: Vec<&'static str>,
    }

    impl Handler for TestHandler {
        fn has_action(&self, name: &str) -> bool {
            self.actions.contains(&name)
        }

        fn invoke(&self, _ctx: &HandlerContext<'_>) -> Response<Full<Bytes>> {
            Response::new(Full::new(Bytes::new()))
        }
    }

    fn registry_with(entries: &[(&str, &[&'static str])]) -> HandlerRegistry {
        let mut registry = HandlerRegistry::new();
        for (id, actions) in entries {
            registry.register(
                id,
                &format!("handlers/{id}.rs"),
                Arc::new(TestHandler {
                    actions: actions.to_vec(),
                }),
            );
        }
        registry
    }

    fn segments(path: &str) -> Vec<String> {
        path.split('/').map(ToString::to_string).collect()
    }

    #[test]
    fn test_top_level_match() {
        let registry = registry_with(&[("report", &[])]);
        let resolution = resolve(&segments("report"), &registry, false);
        assert_eq!(resolution.descriptor.handler_id, "ReportHandler");
        assert_eq!(resolution.descriptor.action, "index");
        assert_eq!(resolution.descriptor.page, "report");
        assert!(resolution.descriptor.args.is_empty());
        assert!(resolution.descriptor.is_found());
    }

    #[test]
    fn test_action_promotion() {
        let registry = registry_with(&[("report", &["monthly"])]);
        let resolution = resolve(&segments("report/monthly/2026/06"), &registry, false);
        assert_eq!(resolution.descriptor.action, "monthly");
        assert_eq!(resolution.descriptor.args, vec!["2026", "06"]);
    }

    #[test]
    fn test_unknown_action_defaults_to_index_with_all_args() {
        let registry = registry_with(&[("report", &["monthly"])]);
        let resolution = resolve(&segments("report/weekly/2026"), &registry, false);
        assert_eq!(resolution.descriptor.action, "index");
        // The unrecognized segment stays in the args, it is not dropped
        assert_eq!(resolution.descriptor.args, vec!["weekly", "2026"]);
    }

    #[test]
    fn test_deepest_candidate_reached_only_through_misses() {
        // Only the deepest candidate exists: every shallower probe must
        // fail before the match at depth 2
        let registry = registry_with(&[("admin/billing/invoice", &[])]);
        let resolution = resolve(&segments("admin/billing/invoice/42"), &registry, false);
        assert_eq!(resolution.descriptor.handler_id, "InvoiceHandler");
        assert_eq!(resolution.descriptor.args, vec!["42"]);
    }

    #[test]
    fn test_first_match_wins_over_deeper_candidate() {
        // Greedy: once `admin` matches, the deeper `admin/report` candidate
        // is never considered
        let registry = registry_with(&[("admin", &[]), ("admin/report", &[])]);
        let resolution = resolve(&segments("admin/report"), &registry, false);
        assert_eq!(resolution.descriptor.handler_id, "AdminHandler");
        assert_eq!(resolution.descriptor.args, vec!["report"]);
    }

    #[test]
    fn test_case_insensitive_match() {
        let registry = registry_with(&[("report", &[])]);
        let resolution = resolve(&segments("Report"), &registry, false);
        assert_eq!(resolution.descriptor.handler_id, "ReportHandler");
        assert_eq!(resolution.descriptor.page, "report");
    }

    #[test]
    fn test_exhausted_path_yields_empty_descriptor() {
        let registry = registry_with(&[("report", &[])]);
        let resolution = resolve(&segments("no/such/handler"), &registry, false);
        assert!(!resolution.descriptor.is_found());
        assert!(resolution.handler.is_none());
        assert!(resolution.descriptor.source.is_empty());
    }

    #[test]
    fn test_namespaces_are_separate() {
        let mut registry = HandlerRegistry::new();
        registry.register_framework(
            "login",
            "framework/login.rs",
            Arc::new(TestHandler { actions: vec![] }),
        );
        assert!(!resolve(&segments("login"), &registry, false)
            .descriptor
            .is_found());
        assert!(resolve(&segments("login"), &registry, true)
            .descriptor
            .is_found());
    }
}
