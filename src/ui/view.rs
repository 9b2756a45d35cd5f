//! Text rendering for tab contents. Pure string builders so the layouts can
//! be tested without a terminal.

use crate::model::champion::{Champion, ChampionDetail, ChampionStats, Spell};

const SPELL_SLOTS: [&str; 4] = ["Q", "W", "E", "R"];

/// Single-champion card: name, title, base stats, passive and spell
/// cooldowns per rank.
pub fn champion_card(champ: &Champion, detail: &ChampionDetail) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}  {}\n", display_name(champ), champ.title));
    for (label, value) in stat_rows(&champ.stats) {
        out.push_str(&format!("  {:<6} {}\n", label, value));
    }
    for line in spell_lines(detail) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Two-champion comparison: stats side by side, then each champion's
/// spell cooldowns.
pub fn comparison_card(
    left: &Champion,
    left_detail: &ChampionDetail,
    right: &Champion,
    right_detail: &ChampionDetail,
) -> String {
    let left_rows = stat_rows(&left.stats);
    let right_rows = stat_rows(&right.stats);

    let left_name = display_name(left);
    let column = left_rows
        .iter()
        .map(|(_, value)| value.len())
        .chain(std::iter::once(left_name.len()))
        .max()
        .unwrap_or(0)
        + 3;

    let mut out = String::new();
    out.push_str(&format!(
        "  {:<6} {:<column$}{}\n",
        "",
        left_name,
        display_name(right)
    ));
    for ((label, left_value), (_, right_value)) in left_rows.into_iter().zip(right_rows) {
        out.push_str(&format!(
            "  {:<6} {:<column$}{}\n",
            label, left_value, right_value
        ));
    }

    for (champ, detail) in [(left, left_detail), (right, right_detail)] {
        out.push('\n');
        out.push_str(&display_name(champ));
        out.push('\n');
        for line in spell_lines(detail) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

fn display_name(champ: &Champion) -> String {
    match &champ.hangul {
        Some(hangul) if *hangul != champ.name => format!("{} ({})", champ.name, hangul),
        _ => champ.name.clone(),
    }
}

fn stat_rows(stats: &ChampionStats) -> Vec<(&'static str, String)> {
    vec![
        ("HP", with_growth(stats.hp, stats.hp_per_level)),
        ("MP", fmt_num(stats.mp)),
        ("MS", fmt_num(stats.move_speed)),
        ("Range", fmt_num(stats.attack_range)),
        ("AD", with_growth(stats.attack_damage, stats.attack_damage_per_level)),
        ("AS", fmt_num(stats.attack_speed)),
        ("Armor", with_growth(stats.armor, stats.armor_per_level)),
        ("MR", with_growth(stats.spell_block, stats.spell_block_per_level)),
    ]
}

fn spell_lines(detail: &ChampionDetail) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(passive) = &detail.passive_name {
        lines.push(format!("  P  {}", passive));
    }

    let name_width = detail
        .spells
        .iter()
        .map(|spell| spell.name.len())
        .max()
        .unwrap_or(0);
    for (index, spell) in detail.spells.iter().enumerate() {
        let slot = SPELL_SLOTS.get(index).copied().unwrap_or("?");
        lines.push(format!(
            "  {}  {:<name_width$}  {}",
            slot,
            spell.name,
            fmt_cooldowns(&spell.cooldowns)
        ));
    }
    lines
}

fn fmt_cooldowns(cooldowns: &[f64]) -> String {
    cooldowns
        .iter()
        .map(|cd| fmt_num(*cd))
        .collect::<Vec<_>>()
        .join("/")
}

/// Whole seconds without a decimal point, fractional values as they come.
fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn with_growth(base: f64, per_level: f64) -> String {
    if per_level == 0.0 {
        fmt_num(base)
    } else {
        format!("{} (+{})", fmt_num(base), fmt_num(per_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::ChampionId;

    fn ahri() -> (Champion, ChampionDetail) {
        let champ = Champion {
            id: ChampionId::from("Ahri"),
            key: "103".to_string(),
            name: "Ahri".to_string(),
            title: "the Nine-Tailed Fox".to_string(),
            hangul: Some("아리".to_string()),
            stats: ChampionStats {
                hp: 590.0,
                hp_per_level: 104.0,
                mp: 418.0,
                move_speed: 330.0,
                armor: 21.0,
                armor_per_level: 4.7,
                spell_block: 30.0,
                spell_block_per_level: 1.3,
                attack_damage: 53.0,
                attack_damage_per_level: 3.0,
                attack_speed: 0.668,
                attack_range: 550.0,
            },
        };
        let detail = ChampionDetail {
            passive_name: Some("Essence Theft".to_string()),
            spells: vec![
                Spell {
                    name: "Orb of Deception".to_string(),
                    cooldowns: vec![7.0; 5],
                },
                Spell {
                    name: "Fox-Fire".to_string(),
                    cooldowns: vec![9.0, 8.0, 7.0, 6.0, 5.0],
                },
                Spell {
                    name: "Charm".to_string(),
                    cooldowns: vec![14.0; 5],
                },
                Spell {
                    name: "Spirit Rush".to_string(),
                    cooldowns: vec![130.0, 105.0, 80.0],
                },
            ],
        };
        (champ, detail)
    }

    fn zed() -> (Champion, ChampionDetail) {
        let champ = Champion {
            id: ChampionId::from("Zed"),
            key: "238".to_string(),
            name: "Zed".to_string(),
            title: "the Master of Shadows".to_string(),
            hangul: Some("제드".to_string()),
            stats: ChampionStats {
                hp: 654.0,
                hp_per_level: 99.0,
                mp: 200.0,
                move_speed: 345.0,
                armor: 32.0,
                armor_per_level: 4.7,
                spell_block: 29.0,
                spell_block_per_level: 2.05,
                attack_damage: 63.0,
                attack_damage_per_level: 3.4,
                attack_speed: 0.651,
                attack_range: 125.0,
            },
        };
        let detail = ChampionDetail {
            passive_name: Some("Contempt for the Weak".to_string()),
            spells: vec![Spell {
                name: "Razor Shuriken".to_string(),
                cooldowns: vec![6.0, 5.5, 5.0, 4.5, 4.0],
            }],
        };
        (champ, detail)
    }

    #[test]
    fn cooldown_ranks_are_slash_separated_without_trailing_zeros() {
        assert_eq!(fmt_cooldowns(&[130.0, 105.0, 80.0]), "130/105/80");
        assert_eq!(fmt_cooldowns(&[6.0, 5.5, 5.0]), "6/5.5/5");
        assert_eq!(fmt_num(0.668), "0.668");
    }

    #[test]
    fn champion_card_shows_stats_and_spell_cooldowns() {
        let (champ, detail) = ahri();
        let card = champion_card(&champ, &detail);

        assert!(card.starts_with("Ahri (아리)  the Nine-Tailed Fox\n"));
        assert!(card.contains("HP     590 (+104)"));
        assert!(card.contains("AS     0.668"));
        assert!(card.contains("P  Essence Theft"));
        assert!(card.contains("W  Fox-Fire"));
        assert!(card.contains("9/8/7/6/5"));
        assert!(card.contains("R  Spirit Rush"));
        assert!(card.contains("130/105/80"));
    }

    #[test]
    fn champion_card_without_a_distinct_korean_name_skips_the_parens() {
        let (mut champ, detail) = ahri();
        champ.hangul = Some("Ahri".to_string());
        let card = champion_card(&champ, &detail);
        assert!(card.starts_with("Ahri  the Nine-Tailed Fox\n"));
    }

    #[test]
    fn comparison_card_pairs_both_champions_stats_per_row() {
        let left = ahri();
        let right = zed();
        let card = comparison_card(&left.0, &left.1, &right.0, &right.1);

        let hp_row = card
            .lines()
            .find(|line| line.trim_start().starts_with("HP"))
            .unwrap();
        assert!(hp_row.contains("590 (+104)"));
        assert!(hp_row.contains("654 (+99)"));

        let ad_row = card
            .lines()
            .find(|line| line.trim_start().starts_with("AD"))
            .unwrap();
        assert!(ad_row.contains("53 (+3)"));
        assert!(ad_row.contains("63 (+3.4)"));
    }

    #[test]
    fn comparison_card_lists_each_champions_spells() {
        let left = ahri();
        let right = zed();
        let card = comparison_card(&left.0, &left.1, &right.0, &right.1);

        assert!(card.contains("Ahri (아리)\n"));
        assert!(card.contains("Q  Orb of Deception"));
        assert!(card.contains("Zed (제드)\n"));
        assert!(card.contains("Q  Razor Shuriken"));
        assert!(card.contains("6/5.5/5/4.5/4"));
    }
}
