//! Conditional pass
//!
//! Resolves `{Switch$key}...{/Switch}` blocks. A leading `!` on the key
//! negates the test. A block is replaced by its inner content when the key
//! is bound and `negation XOR truthy(value)` holds, otherwise by nothing.
//! An unbound key behaves as false and removes the block regardless of
//! negation. Blocks do not nest; all independent blocks resolve in one
//! linear cursor pass.

use std::collections::HashMap;

const OPEN: &str = "{Switch$";
const CLOSE: &str = "{/Switch}";

pub(crate) fn apply_switch(text: String, scalars: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(open_rel) = text[cursor..].find(OPEN) {
        let open = cursor + open_rel;
        let key_start = open + OPEN.len();
        let Some(key_end_rel) = text[key_start..].find('}') else {
            break;
        };
        let key_end = key_start + key_end_rel;
        let body_start = key_end + 1;
        let Some(close_rel) = text[body_start..].find(CLOSE) else {
            break;
        };
        let close = body_start + close_rel;

        out.push_str(&text[cursor..open]);

        let raw_key = &text[key_start..key_end];
        let (negated, key) = raw_key
            .strip_prefix('!')
            .map_or((false, raw_key), |stripped| (true, stripped));

        // Unbound keys are false and drop the block even when negated
        let keep = scalars.get(key).is_some_and(|value| negated ^ truthy(value));
        if keep {
            out.push_str(&text[body_start..close]);
        }

        cursor = close + CLOSE.len();
    }

    out.push_str(&text[cursor..]);
    out
}

/// Truth value of a bound scalar: non-empty and not `"0"`
fn truthy(value: &str) -> bool {
    !value.is_empty() && value != "0"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalars(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_truthy_key_keeps_content() {
        let out = apply_switch(
            "{Switch$k}H{/Switch}".to_string(),
            &scalars(&[("k", "1")]),
        );
        assert_eq!(out, "H");
    }

    #[test]
    fn test_negated_truthy_key_drops_content() {
        let out = apply_switch(
            "{Switch$!k}H{/Switch}".to_string(),
            &scalars(&[("k", "1")]),
        );
        assert_eq!(out, "");
    }

    #[test]
    fn test_falsey_values() {
        let bound = scalars(&[("k", "")]);
        assert_eq!(apply_switch("{Switch$k}H{/Switch}".to_string(), &bound), "");
        // A bound falsey key does satisfy the negated test
        assert_eq!(
            apply_switch("{Switch$!k}H{/Switch}".to_string(), &bound),
            "H"
        );
        let zero = scalars(&[("k", "0")]);
        assert_eq!(apply_switch("{Switch$k}H{/Switch}".to_string(), &zero), "");
    }

    #[test]
    fn test_absent_key_removes_block_regardless_of_negation() {
        let empty = HashMap::new();
        assert_eq!(apply_switch("{Switch$k}H{/Switch}".to_string(), &empty), "");
        assert_eq!(
            apply_switch("{Switch$!k}H{/Switch}".to_string(), &empty),
            ""
        );
    }

    #[test]
    fn test_sequential_blocks_resolve_independently() {
        let out = apply_switch(
            "{Switch$a}A{/Switch}-{Switch$b}B{/Switch}".to_string(),
            &scalars(&[("a", "1")]),
        );
        assert_eq!(out, "A-");
    }

    #[test]
    fn test_unclosed_block_left_alone() {
        let input = "x {Switch$k}open";
        let out = apply_switch(input.to_string(), &scalars(&[("k", "1")]));
        assert_eq!(out, input);
    }

    #[test]
    fn test_no_blocks_passthrough() {
        let out = apply_switch("plain".to_string(), &HashMap::new());
        assert_eq!(out, "plain");
    }
}
