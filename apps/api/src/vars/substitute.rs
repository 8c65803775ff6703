//! Placeholder substitution.
//!
//! A single precompiled scanner tokenizes every `{{…}}` span in one pass and
//! resolves each token against a normalized key lookup. This replaces the
//! per-key pattern rebuild the naive approach would need, and guarantees text
//! produced by one replacement is never reinterpreted by another.
//!
//! Three naming conventions resolve to the same dictionary key, all
//! case-insensitively: `{{firstName}}`, `{{firstname}}`, `{{first_name}}`.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::warn;

use crate::vars::dict::VariableDict;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("valid placeholder regex"))
}

/// Folds a key or token to its canonical lookup form: lowercase, underscores
/// removed. `firstName`, `FIRSTNAME` and `first_name` all fold to `firstname`.
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Replaces every recognized placeholder occurrence in `text`.
///
/// Unmatched placeholders are left verbatim. A dictionary key that cannot form
/// a usable lookup entry is skipped with a warning; it never aborts the pass.
pub fn substitute(text: &str, dict: &VariableDict) -> String {
    let mut lookup: BTreeMap<String, &str> = BTreeMap::new();
    for (key, value) in dict {
        let normalized = normalize_key(key);
        if normalized.is_empty() {
            warn!("Skipping dictionary key {key:?}: no usable placeholder form");
            continue;
        }
        // First key wins on collision; BTreeMap iteration makes this stable.
        lookup.entry(normalized).or_insert(value.as_str());
    }

    placeholder_re()
        .replace_all(text, |caps: &Captures| {
            match lookup.get(&normalize_key(&caps[1])) {
                Some(value) => (*value).to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
