//! App settings document: prefix lists driving the compact unit summary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Core abilities starting with one of these are hidden from the summary.
    #[serde(default)]
    pub summary_ignore_abilities: Vec<String>,
    /// Keywords starting with one of these are surfaced as pseudo-abilities.
    #[serde(default)]
    pub summary_keywords: Vec<String>,
    #[serde(default)]
    pub ranged_summary_abilities: Vec<String>,
    #[serde(default)]
    pub melee_summary_abilities: Vec<String>,
}

/// True when the lower-cased `text` starts with any of `prefixes`.
/// Prefixes are lowered too, so `"Deadly"` and `"deadly"` configure the same rule.
pub fn matches_any_prefix(text: &str, prefixes: &[String]) -> bool {
    let lowered = text.to_lowercase();
    prefixes
        .iter()
        .any(|prefix| lowered.starts_with(&prefix.to_lowercase()))
}
