//! In-memory dataset slots. Each slot is `None` until its load delivers (and stays `None`
//! if the load fails), so every read path must cope with any subset missing.

use std::sync::{Arc, RwLock};

use crate::data::ability::AbilityGlossaryEntry;
use crate::data::army::Army;
use crate::data::dataset::DatasetKey;
use crate::data::detachment::Detachment;
use crate::data::resolver;
use crate::data::settings::AppSettings;
use crate::data::strategem::Strategem;
use crate::data::unit::Unit;

#[derive(Debug, Clone, Default)]
pub struct Library {
    pub settings: Option<AppSettings>,
    pub armies: Option<Vec<Army>>,
    pub detachments: Option<Vec<Detachment>>,
    pub units: Option<Vec<Unit>>,
    pub strategems: Option<Vec<Strategem>>,
    pub abilities: Option<Vec<AbilityGlossaryEntry>>,
}

/// Library shared between the loader's sinks and readers (server handlers, CLI).
pub type SharedLibrary = Arc<RwLock<Library>>;

pub fn shared(library: Library) -> SharedLibrary {
    Arc::new(RwLock::new(library))
}

impl Library {
    pub fn is_loaded(&self, key: DatasetKey) -> bool {
        match key {
            DatasetKey::Settings => self.settings.is_some(),
            DatasetKey::Armies => self.armies.is_some(),
            DatasetKey::Detachments => self.detachments.is_some(),
            DatasetKey::Units => self.units.is_some(),
            DatasetKey::Strategems => self.strategems.is_some(),
            DatasetKey::Abilities => self.abilities.is_some(),
        }
    }

    pub fn loaded_keys(&self) -> Vec<DatasetKey> {
        DatasetKey::ALL
            .into_iter()
            .filter(|key| self.is_loaded(*key))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        DatasetKey::ALL.iter().all(|key| self.is_loaded(*key))
    }

    /// Settings, or the empty default when the settings document has not arrived.
    pub fn settings_or_default(&self) -> AppSettings {
        self.settings.clone().unwrap_or_default()
    }

    pub fn armies(&self) -> Option<&[Army]> {
        self.armies.as_deref()
    }

    pub fn detachments(&self) -> Option<&[Detachment]> {
        self.detachments.as_deref()
    }

    pub fn units(&self) -> Option<&[Unit]> {
        self.units.as_deref()
    }

    pub fn strategems(&self) -> Option<&[Strategem]> {
        self.strategems.as_deref()
    }

    pub fn glossary(&self) -> Option<&[AbilityGlossaryEntry]> {
        self.abilities.as_deref()
    }

    pub fn army(&self, id: &str) -> Option<&Army> {
        resolver::find_army(self.armies(), id)
    }

    pub fn detachment_for(&self, army: Option<&Army>) -> Option<&Detachment> {
        resolver::find_detachment(self.detachments(), army)
    }

    pub fn unit(&self, name: &str) -> Option<&Unit> {
        resolver::find_unit(self.units(), name)
    }

    pub fn units_for(&self, army: Option<&Army>) -> Vec<&Unit> {
        resolver::units_for_army(army, self.units())
    }
}
