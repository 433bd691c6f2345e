use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::unit::Stat;

/// One-time rules effect bought with command points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategem {
    pub name: String,
    #[serde(default)]
    pub cost: Stat,
    #[serde(default)]
    pub turn: Turn,
    #[serde(default)]
    pub when: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub effect: String,
}

/// Whose turn a strategem may be used in. Unrecognized tags load as `Unspecified`
/// so one malformed entry does not sink the whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    Your,
    Opponent,
    Either,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl Turn {
    /// Parse a filter value. Only `your` and `opponent` are meaningful filters.
    pub fn parse_filter(value: &str) -> Option<Turn> {
        match value.trim().to_ascii_lowercase().as_str() {
            "your" => Some(Turn::Your),
            "opponent" => Some(Turn::Opponent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Your => "your",
            Self::Opponent => "opponent",
            Self::Either => "either",
            Self::Unspecified => "unspecified",
        }
    }

    /// Display label used when grouping strategems on screen.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Your => "Your Turn",
            Self::Opponent => "Opponent's Turn",
            Self::Either => "Either Turn",
            Self::Unspecified => "",
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
