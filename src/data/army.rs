use serde::{Deserialize, Serialize};

/// A player's army: references one detachment by name and a roster of unit names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Army {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub faction: String,
    /// Menu grouping, e.g. "Combat Patrol".
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub detachment: String,
    #[serde(default)]
    pub units: Vec<String>,
    /// Core strategem names this army cannot use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignorestrats: Option<Vec<String>>,
}

impl Army {
    pub fn includes_unit(&self, unit_name: &str) -> bool {
        self.units.iter().any(|name| name == unit_name)
    }

    /// True when `strategem_name` is on the ignore-list (case-insensitive).
    pub fn ignores_strategem(&self, strategem_name: &str) -> bool {
        self.ignorestrats.as_ref().map_or(false, |ignored| {
            let wanted = strategem_name.to_lowercase();
            ignored.iter().any(|name| name.to_lowercase() == wanted)
        })
    }
}
