use serde::{Deserialize, Serialize};

use crate::data::strategem::Strategem;

/// Named package of army rules, strategems and enhancements. Joined to an army by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detachment {
    pub name: String,
    #[serde(default)]
    pub abilities: Vec<RuleText>,
    #[serde(default)]
    pub strategems: Vec<Strategem>,
    #[serde(default)]
    pub enhancements: Vec<RuleText>,
}

/// Name plus rich text (HTML fragment); used for army rules and enhancements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleText {
    pub name: String,
    #[serde(default)]
    pub text: String,
}
