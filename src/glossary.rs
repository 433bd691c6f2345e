//! Ability lookup: map a free-text ability label to its glossary entry by prefix.
//! `"Deadly Demise D3"` resolves to the `Deadly Demise` entry.

use crate::data::ability::AbilityGlossaryEntry;

/// First entry (in glossary order) whose name, case-insensitively, prefixes `free_text`.
/// Empty text, an absent glossary or an empty entry name never match.
pub fn resolve<'a>(
    free_text: Option<&str>,
    glossary: Option<&'a [AbilityGlossaryEntry]>,
) -> Option<&'a AbilityGlossaryEntry> {
    let text = free_text.map(str::trim).filter(|t| !t.is_empty())?.to_lowercase();
    glossary?
        .iter()
        .filter(|entry| !entry.name.is_empty())
        .find(|entry| text.starts_with(&entry.name.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> AbilityGlossaryEntry {
        AbilityGlossaryEntry {
            name: name.to_string(),
            text: format!("{name} rules"),
            summary: None,
            example: None,
        }
    }

    #[test]
    fn qualifier_suffix_still_matches_base_entry() {
        let glossary = vec![entry("Deadly Demise")];
        let hit = resolve(Some("Deadly Demise D3"), Some(&glossary));
        assert_eq!(hit.map(|e| e.name.as_str()), Some("Deadly Demise"));
        assert!(resolve(Some("Demise"), Some(&glossary)).is_none());
    }

    #[test]
    fn match_is_case_insensitive() {
        let glossary = vec![entry("Feel No Pain")];
        assert!(resolve(Some("feel no pain 5+"), Some(&glossary)).is_some());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let glossary = vec![entry("Deadly Demise")];
        let hit = resolve(Some("  Deadly Demise D3 \n"), Some(&glossary));
        assert_eq!(hit.map(|e| e.name.as_str()), Some("Deadly Demise"));
    }

    #[test]
    fn first_declared_prefix_wins() {
        let glossary = vec![entry("Deep Strike"), entry("Deep")];
        let hit = resolve(Some("Deep Strike"), Some(&glossary));
        assert_eq!(hit.map(|e| e.name.as_str()), Some("Deep Strike"));

        let reversed = vec![entry("Deep"), entry("Deep Strike")];
        let hit = resolve(Some("Deep Strike"), Some(&reversed));
        assert_eq!(hit.map(|e| e.name.as_str()), Some("Deep"));
    }

    #[test]
    fn nothing_to_show_without_text_or_glossary() {
        let glossary = vec![entry("Scouts"), entry("")];
        assert!(resolve(None, Some(&glossary)).is_none());
        assert!(resolve(Some(""), Some(&glossary)).is_none());
        assert!(resolve(Some("   "), Some(&glossary)).is_none());
        assert!(resolve(Some("Scouts 6\""), None).is_none());
        assert!(resolve(Some("Lone Operative"), Some(&glossary)).is_none());
    }
}
