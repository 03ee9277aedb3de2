//! Derived character statistics: ability modifiers, proficiency, armor
//! class, attack and save bonuses, and hit-point progression.
//!
//! All functions here are total. Unknown armor and class names degrade to
//! documented defaults with a warning rather than failing, so a typo in
//! authored content never blocks play.

use lazy_static::lazy_static;
use tracing::warn;

use crate::class_data::CharacterClass;

/// Ability modifier for a 3-20 ability score: floor((score - 10) / 2).
pub fn ability_modifier(score: i32) -> i32 {
    // Floor division keeps odd scores below 10 correct (8-9 -> -1).
    (score - 10).div_euclid(2)
}

/// Proficiency bonus by level: 2 at levels 1-4, +1 every 4 levels after.
/// Out-of-range levels clamp to the nearest end.
pub fn proficiency_bonus(level: i32) -> i32 {
    let level = level.clamp(1, 20);
    2 + (level - 1) / 4
}

/// Armor weight class, which determines how DEX applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmorType {
    Light,
    Medium,
    Heavy,
}

struct ArmorEntry {
    name: &'static str,
    base_ac: i32,
    armor_type: ArmorType,
}

lazy_static! {
    /// The SRD armor table, keyed by lowercase name.
    static ref ARMOR: Vec<ArmorEntry> = vec![
        ArmorEntry { name: "padded", base_ac: 11, armor_type: ArmorType::Light },
        ArmorEntry { name: "leather", base_ac: 11, armor_type: ArmorType::Light },
        ArmorEntry { name: "studded leather", base_ac: 12, armor_type: ArmorType::Light },
        ArmorEntry { name: "hide", base_ac: 12, armor_type: ArmorType::Medium },
        ArmorEntry { name: "chain shirt", base_ac: 13, armor_type: ArmorType::Medium },
        ArmorEntry { name: "scale mail", base_ac: 14, armor_type: ArmorType::Medium },
        ArmorEntry { name: "breastplate", base_ac: 14, armor_type: ArmorType::Medium },
        ArmorEntry { name: "half plate", base_ac: 15, armor_type: ArmorType::Medium },
        ArmorEntry { name: "ring mail", base_ac: 14, armor_type: ArmorType::Heavy },
        ArmorEntry { name: "chain mail", base_ac: 16, armor_type: ArmorType::Heavy },
        ArmorEntry { name: "splint", base_ac: 17, armor_type: ArmorType::Heavy },
        ArmorEntry { name: "plate", base_ac: 18, armor_type: ArmorType::Heavy },
    ];
}

fn armor_lookup(name: &str) -> Option<&'static ArmorEntry> {
    let normalized = name.trim().to_ascii_lowercase();
    let normalized = normalized.strip_suffix(" armor").unwrap_or(&normalized);
    ARMOR.iter().find(|entry| entry.name == normalized)
}

/// Calculate armor class.
///
/// - No armor: `10 + DEX mod + unarmored_bonus`.
/// - Light armor: base AC plus the full DEX modifier.
/// - Medium armor: base AC plus DEX modifier capped at +2.
/// - Heavy armor: base AC only.
/// - A shield always adds a flat +2, whatever the armor.
/// - An unrecognized armor name counts as unarmored without the unarmored
///   bonus.
pub fn armor_class(
    armor: Option<&str>,
    dex_score: i32,
    has_shield: bool,
    unarmored_bonus: i32,
) -> i32 {
    let dex_mod = ability_modifier(dex_score);
    let shield_bonus = if has_shield { 2 } else { 0 };

    let base = match armor {
        None => 10 + dex_mod + unarmored_bonus,
        Some(name) => match armor_lookup(name) {
            Some(entry) => match entry.armor_type {
                ArmorType::Light => entry.base_ac + dex_mod,
                ArmorType::Medium => entry.base_ac + dex_mod.min(2),
                ArmorType::Heavy => entry.base_ac,
            },
            None => {
                warn!(armor = name, "unknown armor, treating as unarmored");
                10 + dex_mod
            }
        },
    };

    base + shield_bonus
}

/// Attack bonus: ability modifier, plus proficiency bonus when proficient.
pub fn attack_bonus(level: i32, ability_score: i32, proficient: bool) -> i32 {
    let proficiency = if proficient {
        proficiency_bonus(level)
    } else {
        0
    };
    ability_modifier(ability_score) + proficiency
}

/// Saving throw bonus, same shape as the attack bonus.
pub fn saving_throw_bonus(level: i32, ability_score: i32, proficient: bool) -> i32 {
    attack_bonus(level, ability_score, proficient)
}

fn hit_die_for(class_name: &str) -> i32 {
    match CharacterClass::from_name(class_name) {
        Some(class) => class.hit_die(),
        None => {
            warn!(class = class_name, "unknown class, using a d8 hit die");
            8
        }
    }
}

/// Level-1 HP: hit die maximum plus CON modifier.
pub fn starting_hp(class_name: &str, con_score: i32) -> i32 {
    hit_die_for(class_name) + ability_modifier(con_score)
}

/// HP gained over one or more level-ups using the average-roll rule:
/// `hit_die / 2 + 1 + CON mod` per level, minimum 1 HP per level gained.
pub fn hp_gain_on_level_up(class_name: &str, con_score: i32, levels_gained: i32) -> i32 {
    if levels_gained <= 0 {
        return 0;
    }
    let per_level = hit_die_for(class_name) / 2 + 1 + ability_modifier(con_score);
    (per_level * levels_gained).max(levels_gained)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_modifier_table() {
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(14), 2);
        assert_eq!(ability_modifier(15), 2);
        assert_eq!(ability_modifier(20), 5);
    }

    #[test]
    fn test_proficiency_bonus_progression() {
        assert_eq!(proficiency_bonus(1), 2);
        assert_eq!(proficiency_bonus(4), 2);
        assert_eq!(proficiency_bonus(5), 3);
        assert_eq!(proficiency_bonus(8), 3);
        assert_eq!(proficiency_bonus(9), 4);
        assert_eq!(proficiency_bonus(13), 5);
        assert_eq!(proficiency_bonus(17), 6);
        assert_eq!(proficiency_bonus(20), 6);
        // Out-of-range levels clamp.
        assert_eq!(proficiency_bonus(0), 2);
        assert_eq!(proficiency_bonus(-3), 2);
        assert_eq!(proficiency_bonus(25), 6);
    }

    #[test]
    fn test_proficiency_bonus_monotonic() {
        let mut previous = 0;
        for level in 1..=20 {
            let bonus = proficiency_bonus(level);
            assert!(bonus >= previous);
            assert!((2..=6).contains(&bonus));
            previous = bonus;
        }
    }

    #[test]
    fn test_armor_class_heavy_ignores_dex() {
        assert_eq!(armor_class(Some("Plate"), 14, false, 0), 18);
        assert_eq!(armor_class(Some("Chain Mail"), 18, false, 0), 16);
    }

    #[test]
    fn test_armor_class_light_full_dex() {
        assert_eq!(armor_class(Some("Leather Armor"), 14, false, 0), 13);
        assert_eq!(armor_class(Some("Studded Leather"), 18, false, 0), 16);
    }

    #[test]
    fn test_armor_class_medium_caps_dex() {
        assert_eq!(armor_class(Some("Breastplate"), 20, false, 0), 16);
        assert_eq!(armor_class(Some("Hide"), 12, false, 0), 13);
    }

    #[test]
    fn test_armor_class_unarmored_and_shield() {
        assert_eq!(armor_class(None, 14, true, 0), 14);
        assert_eq!(armor_class(None, 14, false, 3), 15);
        // Shield stacks on any armor.
        assert_eq!(armor_class(Some("Plate"), 10, true, 0), 20);
    }

    #[test]
    fn test_armor_class_unknown_name_drops_unarmored_bonus() {
        assert_eq!(armor_class(Some("Dragonhide"), 14, false, 3), 12);
        assert_eq!(armor_class(Some("Dragonhide"), 14, true, 3), 14);
    }

    #[test]
    fn test_attack_and_save_bonuses() {
        assert_eq!(attack_bonus(1, 16, true), 5);
        assert_eq!(attack_bonus(5, 16, true), 6);
        assert_eq!(attack_bonus(5, 16, false), 3);
        assert_eq!(attack_bonus(1, 8, false), -1);
        assert_eq!(saving_throw_bonus(9, 14, true), 6);
        assert_eq!(saving_throw_bonus(9, 14, false), 2);
    }

    #[test]
    fn test_starting_hp() {
        assert_eq!(starting_hp("Barbarian", 16), 15);
        assert_eq!(starting_hp("Wizard", 14), 8);
        assert_eq!(starting_hp("fighter", 10), 10);
        // Unknown classes use a d8.
        assert_eq!(starting_hp("Bloodhunter", 12), 9);
    }

    #[test]
    fn test_hp_gain_on_level_up() {
        // Fighter, CON 14: (10/2 + 1 + 2) = 8 per level.
        assert_eq!(hp_gain_on_level_up("Fighter", 14, 1), 8);
        assert_eq!(hp_gain_on_level_up("Fighter", 14, 3), 24);
        // Wizard with CON 3: 6/2 + 1 - 4 = 0, floored to 1 per level.
        assert_eq!(hp_gain_on_level_up("Wizard", 3, 2), 2);
        assert_eq!(hp_gain_on_level_up("Wizard", 3, 0), 0);
    }
}
