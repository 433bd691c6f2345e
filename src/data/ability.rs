use serde::{Deserialize, Serialize};

/// Canonical rules text for a core ability or keyword, shown in the info popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityGlossaryEntry {
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}
