use std::collections::HashSet;

use crate::model::{champion::Champion, language::Language};

use super::keyboard;

/// Expands a raw query into every string form the user may have intended:
/// the literal query, its Hangul-to-keystroke reading, and its
/// keystroke-to-jamo reading. Duplicates collapse; comparison downstream is
/// case-insensitive, so everything is lowercased here.
pub fn expand_search_variants(query: &str) -> HashSet<String> {
    let literal = query.to_lowercase();
    let mut variants = HashSet::new();

    let keys_variant = keyboard::hangul_to_keys(query).to_lowercase();
    if keys_variant != literal {
        variants.insert(keys_variant);
    }

    let jamo_variant = keyboard::keys_to_jamo(&literal);
    if jamo_variant != literal {
        variants.insert(jamo_variant);
    }

    variants.insert(literal);
    variants
}

/// Champion name matching over the expanded query variants.
pub struct SearchService {
    language: Language,
}

impl SearchService {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Filters the champion list down to those matching the query. An empty
    /// query matches everything.
    pub fn filter<'a>(&self, champions: &'a [Champion], query: &str) -> Vec<&'a Champion> {
        if query.is_empty() {
            return champions.iter().collect();
        }

        let variants = expand_search_variants(query);
        champions
            .iter()
            .filter(|champ| self.matches(champ, &variants))
            .collect()
    }

    fn matches(&self, champ: &Champion, variants: &HashSet<String>) -> bool {
        let name = champ.name.to_lowercase();
        let hangul = champ.hangul.as_deref().map(str::to_lowercase);
        let id = champ.id.as_str().to_lowercase();

        for variant in variants {
            if name.contains(variant) || id.contains(variant) {
                return true;
            }
            if let Some(hangul) = &hangul {
                if hangul.contains(variant) {
                    return true;
                }
            }

            // In Korean mode the candidate side gets the same layout
            // reinterpretation, so a Latin-keystroke query can hit a Hangul
            // name and vice versa.
            // TODO: expansions of a fixed champion list could be built once
            // per list instead of once per query.
            if self.language == Language::KoKr {
                if Self::expanded_name_contains(&champ.name, variant) {
                    return true;
                }
                if let Some(hangul) = &champ.hangul {
                    if Self::expanded_name_contains(hangul, variant) {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn expanded_name_contains(name: &str, variant: &str) -> bool {
        expand_search_variants(name)
            .iter()
            .any(|expanded| expanded.contains(variant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{champion::ChampionStats, ids::ChampionId};

    fn champion(id: &str, name: &str, hangul: Option<&str>) -> Champion {
        Champion {
            id: ChampionId::from(id),
            key: String::new(),
            name: name.to_string(),
            title: String::new(),
            hangul: hangul.map(str::to_string),
            stats: ChampionStats::default(),
        }
    }

    #[test]
    fn unmappable_query_yields_only_the_literal() {
        // Digits and punctuation have no layout mapping in either direction.
        let variants = expand_search_variants("103!");
        assert_eq!(variants.len(), 1);
        assert!(variants.contains("103!"));
    }

    #[test]
    fn latin_letters_always_gain_their_jamo_reading() {
        // Every Latin letter sits on a Korean key, so even an "English"
        // query like "zed" carries its layout reinterpretation.
        let variants = expand_search_variants("Zed");
        assert_eq!(variants.len(), 2);
        assert!(variants.contains("zed"));
        assert!(variants.contains("ㅋㄷㅇ"));
    }

    #[test]
    fn empty_query_yields_only_the_empty_string() {
        let variants = expand_search_variants("");
        assert_eq!(variants.len(), 1);
        assert!(variants.contains(""));
    }

    #[test]
    fn latin_keystrokes_gain_a_jamo_variant() {
        let variants = expand_search_variants("dkssud");
        assert!(variants.contains("dkssud"));
        assert!(variants.contains("ㅇㅏㄴㄴㅕㅇ"));
    }

    #[test]
    fn hangul_query_gains_a_keystroke_variant() {
        let variants = expand_search_variants("안녕");
        assert!(variants.contains("안녕"));
        assert!(variants.contains("dkssud"));
    }

    #[test]
    fn mixed_script_query_converts_both_ways() {
        let variants = expand_search_variants("아리ri");
        assert!(variants.contains("아리ri"));
        // Hangul side becomes keystrokes, Latin side passes through.
        assert!(variants.contains("dkflri"));
    }

    #[test]
    fn filter_matches_by_id_name_and_hangul() {
        let champs = vec![
            champion("Ahri", "Ahri", Some("아리")),
            champion("Zed", "Zed", Some("제드")),
        ];
        let service = SearchService::new(Language::EnUs);

        let hits = service.filter(&champs, "ahr");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "Ahri");

        let hits = service.filter(&champs, "아리");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "Ahri");
    }

    #[test]
    fn wrong_layout_query_hits_hangul_name_only_in_korean_mode() {
        // "dkfl" is 아리 typed with the Latin layout active. The jamo
        // variant "ㅇㅏㄹㅣ" is not a substring of the composed name, so the
        // hit needs the candidate-side expansion that runs in Korean mode.
        let champs = vec![champion("Ahri", "Ahri", Some("아리"))];

        assert!(SearchService::new(Language::EnUs)
            .filter(&champs, "dkfl")
            .is_empty());
        assert_eq!(
            SearchService::new(Language::KoKr)
                .filter(&champs, "dkfl")
                .len(),
            1
        );
    }

    #[test]
    fn korean_mode_expands_the_candidate_side_too() {
        // 제드 typed with the Latin layout active is "wpem". Only in Korean
        // mode is the candidate name itself expanded, so "wpem" can match a
        // champion that carries no Latin name at all.
        let champs = vec![champion("X9", "제드", None)];

        let en = SearchService::new(Language::EnUs);
        assert!(en.filter(&champs, "wpem").is_empty());

        let ko = SearchService::new(Language::KoKr);
        assert_eq!(ko.filter(&champs, "wpem").len(), 1);
    }

    #[test]
    fn empty_query_matches_everything() {
        let champs = vec![
            champion("Ahri", "Ahri", None),
            champion("Zed", "Zed", None),
        ];
        let service = SearchService::new(Language::EnUs);
        assert_eq!(service.filter(&champs, "").len(), 2);
    }
}
