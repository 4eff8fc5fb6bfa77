//! Environment injector pass
//!
//! Fixed literal insertions driven by the site configuration: the head
//! boilerplate block directly after `<head>`, the title prefix after
//! `<title>`, the title suffix before `</title>`, and replacement of every
//! `{RootURL$}` / `{MyFQDN$}` token. Tag matching is ASCII case-insensitive.

use crate::config::SiteConfig;

pub(crate) fn inject(text: String, site: &SiteConfig) -> String {
    let mut text = text;

    if let Some(pos) = find_ci(&text, "<head>") {
        text.insert_str(pos + "<head>".len(), &head_block(site));
    }

    if let Some(pos) = find_ci(&text, "<title>") {
        text.insert_str(pos + "<title>".len(), &site.title_prefix);
    }

    if let Some(pos) = find_ci(&text, "</title>") {
        text.insert_str(pos, &site.title_suffix);
    }

    text.replace("{RootURL$}", &site.root_url)
        .replace("{MyFQDN$}", &site.fqdn)
}

/// Boilerplate inserted after `<head>`: base href, viewport, the fixed
/// third-party assets, and the local stylesheet/favicon links
fn head_block(site: &SiteConfig) -> String {
    format!(
        "\n    <base href=\"{}\">\
         \n    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         \n    <link rel=\"stylesheet\" href=\"https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css\">\
         \n    <script src=\"https://cdn.jsdelivr.net/npm/jquery@3.7.1/dist/jquery.min.js\"></script>\
         \n    <link rel=\"stylesheet\" href=\"css/site.css\">\
         \n    <link rel=\"icon\" href=\"favicon.ico\">",
        site.root_url
    )
}

/// ASCII case-insensitive substring search
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}
