//! Repeater pass
//!
//! Expands `{Foreach}...{/Foreach}` spans. Spans are located by sequential
//! offset scanning with an explicit cursor: the next `{Foreach}` after the
//! previous span's end, paired with the first `{/Foreach}` after it. Nested
//! blocks are not supported. All arrays referenced by `{F$key}` tokens in a
//! span are iterated in lockstep; the first index missing from any of them
//! ends the loop, so the shortest array bounds the output and longer arrays
//! lose their tail. After span expansion, leftover `{F$...}` tokens and
//! stray markers are deleted wherever they appear.

use std::collections::HashMap;

const OPEN: &str = "{Foreach}";
const CLOSE: &str = "{/Foreach}";
const TOKEN: &str = "{F$";

pub(crate) fn expand_foreach(text: String, arrays: &HashMap<String, Vec<String>>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(open_rel) = text[cursor..].find(OPEN) {
        let open = cursor + open_rel;
        let body_start = open + OPEN.len();
        let Some(close_rel) = text[body_start..].find(CLOSE) else {
            break;
        };
        let close = body_start + close_rel;

        out.push_str(&text[cursor..open]);
        out.push_str(&render_span(&text[body_start..close], arrays));
        cursor = close + CLOSE.len();
    }

    out.push_str(&text[cursor..]);
    strip_leftovers(&out)
}

/// Render one span body once per lockstep index
fn render_span(body: &str, arrays: &HashMap<String, Vec<String>>) -> String {
    let keys = referenced_keys(body);
    if keys.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let mut index = 0;
    loop {
        // Every referenced key must have an entry at this index; the first
        // miss ends the iteration without emitting the row
        for key in &keys {
            if arrays.get(key).and_then(|v| v.get(index)).is_none() {
                return out;
            }
        }

        let mut row = body.to_string();
        for key in &keys {
            let value = &arrays[key][index];
            row = row.replace(&format!("{{F${key}}}"), value);
        }
        out.push_str(&row);
        index += 1;
    }
}

/// Collect the distinct `{F$key}` keys in a span body, in order of first use
fn referenced_keys(body: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    let mut cursor = 0;

    while let Some(rel) = body[cursor..].find(TOKEN) {
        let key_start = cursor + rel + TOKEN.len();
        let Some(end_rel) = body[key_start..].find('}') else {
            break;
        };
        let key = &body[key_start..key_start + end_rel];
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
        cursor = key_start + end_rel + 1;
    }

    keys
}

/// Delete leftover `{F$...}` tokens and stray span markers
fn strip_leftovers(text: &str) -> String {
    let text = text.replace(OPEN, "").replace(CLOSE, "");

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(rel) = text[cursor..].find(TOKEN) {
        let start = cursor + rel;
        let key_start = start + TOKEN.len();
        let Some(end_rel) = text[key_start..].find('}') else {
            break;
        };
        out.push_str(&text[cursor..start]);
        cursor = key_start + end_rel + 1;
    }
    out.push_str(&text[cursor..]);
    out
}
