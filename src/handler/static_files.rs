//! Static file serving module
//!
//! Serves the guard chain's static short-circuits: an ordered candidate
//! list is tried until one path streams, with the content type derived from
//! the file extension. Candidate lists come from the 3-tier search order
//! (app-protected, app-public, framework-view); the protected tier is only
//! offered to authorized viewers.

use std::path::PathBuf;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::PathsConfig;
use crate::http::{build_resource_response, mime};
use crate::logger;

/// Try each candidate in order; stream the first readable file
pub async fn serve_first(
    candidates: &[PathBuf],
    is_head: bool,
) -> Option<Response<Full<Bytes>>> {
    for candidate in candidates {
        let Ok(content) = fs::read(candidate).await else {
            continue;
        };
        let content_type =
            mime::get_content_type(candidate.extension().and_then(|e| e.to_str()));
        return Some(build_resource_response(content, content_type, is_head));
    }
    None
}

/// Candidate paths for a relative resource path, in tier order
pub fn tier_candidates(
    paths: &PathsConfig,
    relative_path: &str,
    authorized: bool,
) -> Vec<PathBuf> {
    let clean = sanitize(relative_path);
    let mut candidates = Vec::with_capacity(3);
    if authorized {
        candidates.push(paths.protected_dir().join(&clean));
    }
    candidates.push(paths.public_dir().join(&clean));
    candidates.push(paths.framework_view_dir().join(&clean));
    candidates
}

/// Candidate paths for a favicon file name
pub fn favicon_candidates(paths: &PathsConfig, name: &str) -> Vec<PathBuf> {
    vec![
        paths.public_dir().join(name),
        paths.framework_view_dir().join(name),
    ]
}

/// Drop empty and parent-directory segments so candidates cannot escape
/// their tier directory
fn sanitize(relative_path: &str) -> String {
    let clean: Vec<&str> = relative_path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "..")
        .collect();
    if clean.len() != relative_path.split('/').filter(|s| !s.is_empty()).count() {
        logger::log_warning(&format!("Path traversal attempt blocked: {relative_path}"));
    }
    clean.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathsConfig;

    fn paths() -> PathsConfig {
        PathsConfig {
            app_root: "app".to_string(),
            framework_view: "view".to_string(),
        }
    }

    #[test]
    fn test_tier_order_with_authorization() {
        let candidates = tier_candidates(&paths(), "css/site.css", true);
        assert_eq!(candidates.len(), 3);
        assert!(candidates[0].ends_with("app/protected/css/site.css"));
        assert!(candidates[1].ends_with("app/public/css/site.css"));
        assert!(candidates[2].ends_with("view/css/site.css"));
    }

    #[test]
    fn test_protected_tier_skipped_when_unauthorized() {
        let candidates = tier_candidates(&paths(), "css/site.css", false);
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].ends_with("app/public/css/site.css"));
    }

    #[test]
    fn test_traversal_segments_removed() {
        let candidates = tier_candidates(&paths(), "css/../../etc/passwd", false);
        assert!(candidates[0].ends_with("app/public/css/etc/passwd"));
    }

    #[test]
    fn test_favicon_candidates() {
        let candidates = favicon_candidates(&paths(), "favicon.ico");
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].ends_with("app/public/favicon.ico"));
        assert!(candidates[1].ends_with("view/favicon.ico"));
    }

    #[tokio::test]
    async fn test_serve_first_miss_returns_none() {
        let candidates = vec![PathBuf::from("no/such/file.css")];
        assert!(serve_first(&candidates, false).await.is_none());
    }

    #[tokio::test]
    async fn test_serve_first_streams_first_hit() {
        let dir = crate::template::testutil::scratch_dir("static-serve");
        std::fs::write(dir.join("a.css"), "p{}").unwrap();
        let candidates = vec![dir.join("missing.css"), dir.join("a.css")];
        let response = serve_first(&candidates, false).await.expect("served");
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers().get("Content-Type").unwrap(), "text/css");
    }
}
