//! Presentation derivation: compact, settings-driven views of units and strategems.
//! Everything here is a pure function of loaded data and [AppSettings].

pub mod abilities;
pub mod strategems;
pub mod weapons;

use serde::Serialize;

use crate::data::settings::AppSettings;
use crate::data::unit::{LabeledText, StatProfile, Unit};

pub use abilities::{
    big_guns_never_tire, core_ability_summary, keyword_abilities, other_abilities, wargear_abilities,
    BIG_GUNS_NEVER_TIRE, WARGEAR_SUFFIX,
};
pub use strategems::{army_strategems, group_by_turn, TurnGroups};
pub use weapons::{
    has_alternate_profiles, melee_summary, ranged_summary, representative_weapons, MeleeSummary,
    RangedSummary, PROFILE_REMINDER,
};

/// Compact card for one unit in an army's unit list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitSummary {
    pub name: String,
    pub profiles: Vec<StatProfile>,
    pub abilities: Vec<String>,
    pub keyword_abilities: Vec<String>,
    pub other: Vec<LabeledText>,
    pub wargear: Vec<LabeledText>,
    pub ranged: Vec<RangedSummary>,
    pub melee: Vec<MeleeSummary>,
}

impl UnitSummary {
    /// True when there is nothing to show beside the stat line.
    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
            && self.keyword_abilities.is_empty()
            && self.other.is_empty()
            && self.wargear.is_empty()
            && self.ranged.is_empty()
            && self.melee.is_empty()
    }
}

pub fn summarize_unit(unit: &Unit, settings: &AppSettings) -> UnitSummary {
    UnitSummary {
        name: unit.name.clone(),
        profiles: unit.profiles.clone(),
        abilities: core_ability_summary(Some(unit), settings),
        keyword_abilities: keyword_abilities(Some(unit), settings),
        other: other_abilities(Some(unit)),
        wargear: wargear_abilities(Some(unit)),
        ranged: ranged_summary(Some(unit), settings),
        melee: melee_summary(Some(unit), settings),
    }
}

/// Full unit page: the unit itself plus the flags that gate static rules notes.
#[derive(Debug, Clone, Serialize)]
pub struct UnitDetail<'a> {
    pub unit: &'a Unit,
    pub big_guns_never_tire: bool,
    pub ranged_profile_reminder: bool,
    pub melee_profile_reminder: bool,
    /// Rules text for each raised flag, in display order.
    pub notes: Vec<&'static str>,
}

pub fn unit_detail(unit: &Unit) -> UnitDetail<'_> {
    let big_guns = big_guns_never_tire(Some(unit));
    let ranged_reminder = has_alternate_profiles(unit.ranged_weapons());
    let melee_reminder = has_alternate_profiles(unit.melee_weapons());

    let mut notes = Vec::new();
    if big_guns {
        notes.push(BIG_GUNS_NEVER_TIRE);
    }
    if ranged_reminder || melee_reminder {
        notes.push(PROFILE_REMINDER);
    }

    UnitDetail {
        unit,
        big_guns_never_tire: big_guns,
        ranged_profile_reminder: ranged_reminder,
        melee_profile_reminder: melee_reminder,
        notes,
    }
}
