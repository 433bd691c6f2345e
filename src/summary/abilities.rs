//! Ability-side summary: filtered core abilities, keyword pseudo-abilities, Big Guns Never Tire.

use crate::data::settings::{matches_any_prefix, AppSettings};
use crate::data::unit::{AbilityEntry, LabeledText, Unit};

pub const WARGEAR_SUFFIX: &str = "(Wargear)";

pub const BIG_GUNS_NEVER_TIRE: &str = "MONSTER and VEHICLE units can shoot, and be shot at, even while \
they are within Engagement Range of enemy units. Each time a ranged attack is made by or against such a \
unit, subtract 1 from that attack's Hit roll (unless shooting with a Pistol).";

/// Core abilities minus those matching `summary_ignore_abilities`, in source order.
pub fn core_ability_summary(unit: Option<&Unit>, settings: &AppSettings) -> Vec<String> {
    let Some(unit) = unit else {
        return Vec::new();
    };
    unit.core_abilities()
        .iter()
        .map(AbilityEntry::label)
        .filter(|label| !matches_any_prefix(label, &settings.summary_ignore_abilities))
        .map(str::to_string)
        .collect()
}

/// Keywords matching `summary_keywords`, surfaced as if they were abilities.
pub fn keyword_abilities(unit: Option<&Unit>, settings: &AppSettings) -> Vec<String> {
    let Some(unit) = unit else {
        return Vec::new();
    };
    unit.keywords
        .iter()
        .filter(|keyword| matches_any_prefix(keyword, &settings.summary_keywords))
        .cloned()
        .collect()
}

fn labeled(entry: &AbilityEntry, label: String) -> LabeledText {
    LabeledText {
        label,
        value: entry.value().unwrap_or_default().to_string(),
    }
}

/// `abilities.other` as label/value pairs. Bare strings get an empty value.
pub fn other_abilities(unit: Option<&Unit>) -> Vec<LabeledText> {
    let Some(unit) = unit else {
        return Vec::new();
    };
    unit.other_abilities()
        .iter()
        .map(|entry| labeled(entry, entry.label().to_string()))
        .collect()
}

/// `abilities.wargear` entries, each label marked with [WARGEAR_SUFFIX].
pub fn wargear_abilities(unit: Option<&Unit>) -> Vec<LabeledText> {
    let Some(unit) = unit else {
        return Vec::new();
    };
    unit.wargear_abilities()
        .iter()
        .map(|entry| labeled(entry, format!("{} {WARGEAR_SUFFIX}", entry.label())))
        .collect()
}

/// True iff the unit is a `Vehicle` or `Monster`.
pub fn big_guns_never_tire(unit: Option<&Unit>) -> bool {
    unit.map_or(false, |u| u.has_keyword("Vehicle") || u.has_keyword("Monster"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> AppSettings {
        AppSettings {
            summary_ignore_abilities: vec!["leader".to_string(), "deep strike".to_string()],
            summary_keywords: vec!["smoke".to_string(), "grenades".to_string()],
            ..AppSettings::default()
        }
    }

    fn unit(yaml: &str) -> Unit {
        serde_yaml::from_str(yaml).expect("unit fixture")
    }

    #[test]
    fn ignored_core_abilities_are_dropped_case_insensitively() {
        let u = unit("name: Captain\nabilities:\n  core: [\"Deep Strike\", \"Leader\", \"Feel No Pain 5+\", \"Lone Operative\"]\n");
        assert_eq!(
            core_ability_summary(Some(&u), &settings()),
            vec!["Feel No Pain 5+", "Lone Operative"]
        );
    }

    #[test]
    fn missing_unit_or_core_list_yields_empty() {
        assert!(core_ability_summary(None, &settings()).is_empty());
        let bare = unit("name: Grot\n");
        assert!(core_ability_summary(Some(&bare), &settings()).is_empty());
        let no_core = unit("name: Grot\nabilities:\n  faction: [\"Waaagh!\"]\n");
        assert!(core_ability_summary(Some(&no_core), &settings()).is_empty());
    }

    #[test]
    fn labeled_core_entries_match_on_label() {
        let u = unit("name: Captain\nabilities:\n  core:\n    - label: Leader\n      value: Attaches to squads\n    - Scouts 6\"\n");
        assert_eq!(core_ability_summary(Some(&u), &settings()), vec!["Scouts 6\""]);
    }

    #[test]
    fn keywords_with_configured_prefix_become_pseudo_abilities() {
        let u = unit("name: Rhino\nkeywords: [\"Vehicle\", \"Smoke\", \"Transport\", \"Grenades\"]\n");
        assert_eq!(keyword_abilities(Some(&u), &settings()), vec!["Smoke", "Grenades"]);
        assert!(keyword_abilities(Some(&u), &AppSettings::default()).is_empty());
        assert!(keyword_abilities(None, &settings()).is_empty());
    }

    #[test]
    fn other_and_wargear_abilities_keep_label_value_pairs() {
        let u = unit(
            "name: Lieutenant\nabilities:\n  other:\n    - label: Tactical Precision\n      value: Lethal Hits\n    - Target Priority\n  wargear:\n    - label: Storm shield\n      value: 4+ invulnerable save\n",
        );
        let other = other_abilities(Some(&u));
        assert_eq!(other.len(), 2);
        assert_eq!(other[0].label, "Tactical Precision");
        assert_eq!(other[0].value, "Lethal Hits");
        assert_eq!(other[1].label, "Target Priority");
        assert_eq!(other[1].value, "");

        let wargear = wargear_abilities(Some(&u));
        assert_eq!(wargear.len(), 1);
        assert_eq!(wargear[0].label, "Storm shield (Wargear)");
        assert_eq!(wargear[0].value, "4+ invulnerable save");

        assert!(other_abilities(None).is_empty());
        assert!(wargear_abilities(Some(&unit("name: Grot\n"))).is_empty());
    }

    #[test]
    fn big_guns_needs_exact_vehicle_or_monster_keyword() {
        assert!(big_guns_never_tire(Some(&unit("name: Rhino\nkeywords: [\"Vehicle\"]\n"))));
        assert!(big_guns_never_tire(Some(&unit("name: Carnifex\nkeywords: [\"Monster\"]\n"))));
        assert!(!big_guns_never_tire(Some(&unit("name: Bike\nkeywords: [\"Mounted\", \"vehicle\"]\n"))));
        assert!(!big_guns_never_tire(None));
    }
}
