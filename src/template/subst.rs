//! Substitution pass
//!
//! Three steps in fixed order over the same text: replace every `{$$key}`
//! with its bound scalar and delete tokens for unbound keys; un-escape
//! `{\key}` into the literal text `{$$key}` (strictly after substitution,
//! so an escaped token is never itself substituted); expand
//! `{AjaxGetText$url|elementId}` into an inline fetch script. Ajax tokens
//! without a pipe pair are left untouched.

use std::collections::HashMap;

const TOKEN: &str = "{$$";
const ESCAPE: &str = "{\\";
const AJAX: &str = "{AjaxGetText$";

pub(crate) fn substitute(text: String, scalars: &HashMap<String, String>) -> String {
    let text = replace_scalars(&text, scalars);
    let text = unescape(&text);
    expand_ajax(&text)
}

fn replace_scalars(text: &str, scalars: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(rel) = text[cursor..].find(TOKEN) {
        let start = cursor + rel;
        let key_start = start + TOKEN.len();
        let Some(end_rel) = text[key_start..].find('}') else {
            break;
        };
        let key = &text[key_start..key_start + end_rel];

        out.push_str(&text[cursor..start]);
        // Unbound keys: the token is deleted
        if let Some(value) = scalars.get(key) {
            out.push_str(value);
        }
        cursor = key_start + end_rel + 1;
    }

    out.push_str(&text[cursor..]);
    out
}

/// Turn `{\key}` back into the literal text `{$$key}`
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(rel) = text[cursor..].find(ESCAPE) {
        let start = cursor + rel;
        let key_start = start + ESCAPE.len();
        let Some(end_rel) = text[key_start..].find('}') else {
            break;
        };
        let key = &text[key_start..key_start + end_rel];

        out.push_str(&text[cursor..start]);
        out.push_str("{$$");
        out.push_str(key);
        out.push('}');
        cursor = key_start + end_rel + 1;
    }

    out.push_str(&text[cursor..]);
    out
}

fn expand_ajax(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(rel) = text[cursor..].find(AJAX) {
        let start = cursor + rel;
        let body_start = start + AJAX.len();
        let Some(end_rel) = text[body_start..].find('}') else {
            break;
        };
        let body = &text[body_start..body_start + end_rel];

        out.push_str(&text[cursor..start]);
        match body.split_once('|') {
            Some((url, element_id)) => out.push_str(&ajax_script(url, element_id)),
            // No pipe pair: the token stays as written
            None => out.push_str(&text[start..body_start + end_rel + 1]),
        }
        cursor = body_start + end_rel + 1;
    }

    out.push_str(&text[cursor..]);
    out
}

/// Inline script performing a GET and writing the response text into the
/// target element
fn ajax_script(url: &str, element_id: &str) -> String {
    format!(
        "<script>\n\
         (function () {{\n\
             var xhr = new XMLHttpRequest();\n\
             xhr.open(\"GET\", \"{url}\");\n\
             xhr.onload = function () {{\n\
                 document.getElementById(\"{element_id}\").innerText = xhr.responseText;\n\
             }};\n\
             xhr.send();\n\
         }})();\n\
         </script>"
    )
}
