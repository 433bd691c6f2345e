//! Weapon summary rows. Consecutive alternate-profile weapons collapse to their first entry,
//! and only abilities matching the configured prefixes survive.

use serde::Serialize;

use crate::data::settings::{matches_any_prefix, AppSettings};
use crate::data::unit::{Stat, Unit, Weapon};

pub const PROFILE_REMINDER: &str =
    "Before selecting targets with this weapon, select one of its profiles to make attacks with.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangedSummary {
    pub name: String,
    pub range: Option<Stat>,
    pub abilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeleeSummary {
    pub name: String,
    pub abilities: Vec<String>,
}

/// One entry per non-profile weapon, plus the first entry of each maximal run of
/// consecutive profile-flagged weapons.
pub fn representative_weapons(weapons: &[Weapon]) -> Vec<&Weapon> {
    let (representatives, _) = weapons.iter().fold(
        (Vec::new(), false),
        |(mut reps, in_profile_run), weapon| {
            if !(weapon.profile && in_profile_run) {
                reps.push(weapon);
            }
            (reps, weapon.profile)
        },
    );
    representatives
}

/// Abilities starting with one of `prefixes`, first occurrence only.
pub fn summarized_abilities(weapon: &Weapon, prefixes: &[String]) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    for ability in &weapon.abilities {
        if matches_any_prefix(ability, prefixes) && !kept.contains(ability) {
            kept.push(ability.clone());
        }
    }
    kept
}

/// Ranged rows are always emitted: the range alone is worth showing.
pub fn ranged_summary(unit: Option<&Unit>, settings: &AppSettings) -> Vec<RangedSummary> {
    let Some(unit) = unit else {
        return Vec::new();
    };
    representative_weapons(unit.ranged_weapons())
        .into_iter()
        .map(|weapon| RangedSummary {
            name: weapon.name.clone(),
            range: weapon.range.clone(),
            abilities: summarized_abilities(weapon, &settings.ranged_summary_abilities),
        })
        .collect()
}

/// Melee rows with no surviving ability are dropped.
pub fn melee_summary(unit: Option<&Unit>, settings: &AppSettings) -> Vec<MeleeSummary> {
    let Some(unit) = unit else {
        return Vec::new();
    };
    representative_weapons(unit.melee_weapons())
        .into_iter()
        .filter_map(|weapon| {
            let abilities = summarized_abilities(weapon, &settings.melee_summary_abilities);
            (!abilities.is_empty()).then(|| MeleeSummary {
                name: weapon.name.clone(),
                abilities,
            })
        })
        .collect()
}

/// True when any weapon is an alternate profile; gates [PROFILE_REMINDER].
pub fn has_alternate_profiles(weapons: &[Weapon]) -> bool {
    weapons.iter().any(|weapon| weapon.profile)
}
