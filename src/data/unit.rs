//! Unit documents: stat profiles, weapons, abilities and keywords.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stat value as written in the source. Numbers and strings (`4`, `"D6+1"`, `"3+"`) both load as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawStat", into = "String")]
pub struct Stat(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStat {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<RawStat> for Stat {
    fn from(raw: RawStat) -> Self {
        match raw {
            RawStat::Text(s) => Stat(s),
            RawStat::Int(n) => Stat(n.to_string()),
            RawStat::Float(n) => Stat(n.to_string()),
        }
    }
}

impl From<Stat> for String {
    fn from(stat: Stat) -> Self {
        stat.0
    }
}

impl From<&str> for Stat {
    fn from(value: &str) -> Self {
        Stat(value.to_string())
    }
}

impl Stat {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    #[serde(default)]
    pub profiles: Vec<StatProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranged: Option<Vec<Weapon>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub melee: Option<Vec<Weapon>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<AbilityGroups>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Faction keywords.
    #[serde(default)]
    pub factions: Vec<String>,
    #[serde(default)]
    pub composition: Vec<LabeledText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damaged: Option<Damaged>,
    /// Squad-count note for patrol lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squads: Option<String>,
}

impl Unit {
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    /// Core abilities, or an empty slice when the unit declares none.
    pub fn core_abilities(&self) -> &[AbilityEntry] {
        self.abilities
            .as_ref()
            .and_then(|groups| groups.core.as_deref())
            .unwrap_or(&[])
    }

    pub fn other_abilities(&self) -> &[AbilityEntry] {
        self.abilities
            .as_ref()
            .and_then(|groups| groups.other.as_deref())
            .unwrap_or(&[])
    }

    pub fn wargear_abilities(&self) -> &[AbilityEntry] {
        self.abilities
            .as_ref()
            .and_then(|groups| groups.wargear.as_deref())
            .unwrap_or(&[])
    }

    pub fn ranged_weapons(&self) -> &[Weapon] {
        self.ranged.as_deref().unwrap_or(&[])
    }

    pub fn melee_weapons(&self) -> &[Weapon] {
        self.melee.as_deref().unwrap_or(&[])
    }
}

/// One named stat line. Vehicles may carry several (e.g. front/rear).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatProfile {
    #[serde(default)]
    pub name: String,
    /// Movement.
    #[serde(default)]
    pub m: Stat,
    /// Toughness.
    #[serde(default)]
    pub t: Stat,
    /// Save.
    #[serde(default)]
    pub sv: Stat,
    /// Invulnerable save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv: Option<Stat>,
    /// Wounds.
    #[serde(default)]
    pub w: Stat,
    /// Leadership.
    #[serde(default)]
    pub ld: Stat,
    /// Objective control.
    #[serde(default)]
    pub oc: Stat,
    /// Pivot value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<Stat>,
}

/// Ranged or melee weapon line. `bs` applies to ranged, `ws` to melee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Stat>,
    #[serde(default)]
    pub a: Stat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bs: Option<Stat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws: Option<Stat>,
    #[serde(default)]
    pub s: Stat,
    #[serde(default)]
    pub ap: Stat,
    #[serde(default)]
    pub d: Stat,
    #[serde(default)]
    pub abilities: Vec<String>,
    /// Alternate firing mode of the preceding weapon.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub profile: bool,
}

impl Weapon {
    /// Ballistic or weapon skill, whichever the line carries.
    pub fn skill(&self) -> Option<&Stat> {
        self.bs.as_ref().or(self.ws.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityGroups {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core: Option<Vec<AbilityEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction: Option<Vec<String>>,
    /// Units this model can lead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<Vec<AbilityEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wargear: Option<Vec<AbilityEntry>>,
}

/// Ability as written in the source: a bare string or a label/value pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AbilityEntry {
    Text(String),
    Labeled(LabeledText),
}

impl AbilityEntry {
    /// Text used for matching and lookup: the bare string or the label.
    pub fn label(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Labeled(labeled) => &labeled.label,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Labeled(labeled) => Some(&labeled.value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabeledText {
    pub label: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Damaged {
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub text: String,
}
