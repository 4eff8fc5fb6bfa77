//! Binder pass
//!
//! Expands `{Bind$<filename>}` markers by inlining the named resource. The
//! filename is searched across a fixed nine-path order under the view root;
//! the first match wins. Content is wrapped according to the file extension;
//! a missing resource leaves an HTML comment naming it.

use std::fs;
use std::path::Path;

const MARKER: &str = "{Bind$";

/// Search order for bound resources, relative to the view root
const SEARCH_ORDER: [&str; 9] = [
    "template",
    "protected",
    "protected/css",
    "protected/js",
    "protected/resources",
    "public",
    "public/css",
    "public/js",
    "public/resources",
];

pub(crate) fn bind(text: String, view_root: &Path) -> String {
    if !text.contains(MARKER) {
        return text;
    }

    let mut pieces = text.split(MARKER);
    let mut out = String::with_capacity(text.len());
    out.push_str(pieces.next().unwrap_or_default());

    for piece in pieces {
        match piece.find('}') {
            Some(end) => {
                out.push_str(&include_resource(&piece[..end], view_root));
                out.push_str(&piece[end + 1..]);
            }
            // Unclosed marker: reproduce it as it appeared
            None => {
                out.push_str(MARKER);
                out.push_str(piece);
            }
        }
    }

    out
}

fn include_resource(name: &str, view_root: &Path) -> String {
    for dir in SEARCH_ORDER {
        let candidate = view_root.join(dir).join(name);
        if let Ok(content) = fs::read_to_string(&candidate) {
            return wrap_by_extension(name, &content);
        }
    }

    format!("<!-- {} \"{name}\" not found -->", resource_kind(name))
}

fn wrap_by_extension(name: &str, content: &str) -> String {
    match extension(name) {
        "js" => format!("<script>\n{content}\n</script>"),
        "css" => format!("<style>\n{content}\n</style>"),
        // .htm/.html and everything else: raw inclusion
        _ => content.to_string(),
    }
}

fn resource_kind(name: &str) -> String {
    let ext = extension(name);
    if ext.is_empty() {
        "RESOURCE".to_string()
    } else {
        ext.to_ascii_uppercase()
    }
}

fn extension(name: &str) -> &str {
    name.rsplit_once('.').map_or("", |(_, ext)| ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::testutil::scratch_dir;

    #[test]
    fn test_js_wrapped_in_script_tag() {
        let dir = scratch_dir("binder-js");
        std::fs::create_dir_all(dir.join("public/js")).unwrap();
        std::fs::write(dir.join("public/js/a.js"), "var x = 1;").unwrap();

        let out = bind("before {Bind$a.js} after".to_string(), &dir);
        assert_eq!(out, "before <script>\nvar x = 1;\n</script> after");
    }

    #[test]
    fn test_css_wrapped_in_style_tag() {
        let dir = scratch_dir("binder-css");
        std::fs::create_dir_all(dir.join("protected/css")).unwrap();
        std::fs::write(dir.join("protected/css/a.css"), "p { margin: 0 }").unwrap();

        let out = bind("{Bind$a.css}".to_string(), &dir);
        assert_eq!(out, "<style>\np { margin: 0 }\n</style>");
    }

    #[test]
    fn test_html_included_raw() {
        let dir = scratch_dir("binder-html");
        std::fs::create_dir_all(dir.join("template")).unwrap();
        std::fs::write(dir.join("template/nav.html"), "<nav>menu</nav>").unwrap();

        let out = bind("{Bind$nav.html}".to_string(), &dir);
        assert_eq!(out, "<nav>menu</nav>");
    }

    #[test]
    fn test_search_order_first_match_wins() {
        let dir = scratch_dir("binder-order");
        std::fs::create_dir_all(dir.join("template")).unwrap();
        std::fs::create_dir_all(dir.join("public")).unwrap();
        std::fs::write(dir.join("template/x.html"), "from template").unwrap();
        std::fs::write(dir.join("public/x.html"), "from public").unwrap();

        let out = bind("{Bind$x.html}".to_string(), &dir);
        assert_eq!(out, "from template");
    }

    #[test]
    fn test_missing_resource_comment() {
        let dir = scratch_dir("binder-missing");
        let out = bind("{Bind$missing.css}".to_string(), &dir);
        assert_eq!(out, "<!-- CSS \"missing.css\" not found -->");
    }

    #[test]
    fn test_unclosed_marker_left_alone() {
        let dir = scratch_dir("binder-unclosed");
        let out = bind("text {Bind$broken".to_string(), &dir);
        assert_eq!(out, "text {Bind$broken");
    }

    #[test]
    fn test_no_markers_passthrough() {
        let dir = scratch_dir("binder-none");
        let out = bind("plain text".to_string(), &dir);
        assert_eq!(out, "plain text");
    }
}
