//! Dataset keys: the six independently fetchable documents.
//! The same key names the cache record and the source document (`<key>.yaml`).

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKey {
    Settings,
    Armies,
    Detachments,
    Units,
    Strategems,
    Abilities,
}

impl DatasetKey {
    pub const ALL: [DatasetKey; 6] = [
        DatasetKey::Settings,
        DatasetKey::Armies,
        DatasetKey::Detachments,
        DatasetKey::Units,
        DatasetKey::Strategems,
        DatasetKey::Abilities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Armies => "armies",
            Self::Detachments => "detachments",
            Self::Units => "units",
            Self::Strategems => "strategems",
            Self::Abilities => "abilities",
        }
    }

    /// Source document file name, e.g. `units.yaml`.
    pub fn file_name(&self) -> String {
        format!("{}.yaml", self.as_str())
    }

    pub fn parse(value: &str) -> Option<DatasetKey> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
