//! Experience, levels, and encounter budgeting.
//!
//! Static SRD tables plus the pure formulas the campaign backend uses when
//! characters gain XP, when the DM sizes an encounter, and when quest
//! rewards are paid out.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Cumulative XP required to reach each level, 1 through 20.
pub const XP_THRESHOLDS: [u32; 20] = [
    0, 300, 900, 2_700, 6_500, 14_000, 23_000, 34_000, 48_000, 64_000, 85_000, 100_000, 120_000,
    140_000, 165_000, 195_000, 225_000, 265_000, 305_000, 355_000,
];

/// The highest level whose XP threshold has been reached. Never below 1.
pub fn level_for_xp(xp: u32) -> u8 {
    let mut level = 1;
    for (index, threshold) in XP_THRESHOLDS.iter().enumerate() {
        if xp >= *threshold {
            level = index as u8 + 1;
        }
    }
    level
}

/// XP threshold for a level. Out-of-range levels clamp to `[1, 20]`.
pub fn xp_for_level(level: u8) -> u32 {
    let level = level.clamp(1, 20);
    XP_THRESHOLDS[level as usize - 1]
}

/// Progress toward the next level at a given XP total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u8,
    /// XP still needed to reach the next level; 0 at level 20.
    pub xp_needed: u32,
    /// XP earned past the current level's threshold.
    pub xp_into_level: u32,
    /// Integer percent of the current level completed, floored.
    pub percent_complete: u32,
}

/// Where a character stands between their current level and the next.
pub fn xp_to_next_level(xp: u32) -> LevelProgress {
    let level = level_for_xp(xp);
    if level >= 20 {
        return LevelProgress {
            level: 20,
            xp_needed: 0,
            xp_into_level: xp - xp_for_level(20),
            percent_complete: 100,
        };
    }

    let current = xp_for_level(level);
    let next = xp_for_level(level + 1);
    let xp_into_level = xp - current;
    LevelProgress {
        level,
        xp_needed: next - xp,
        xp_into_level,
        percent_complete: xp_into_level * 100 / (next - current),
    }
}

lazy_static! {
    /// XP award by challenge rating (SRD monster XP table).
    static ref CR_XP: HashMap<&'static str, u32> = [
        ("0", 10),
        ("1/8", 25),
        ("1/4", 50),
        ("1/2", 100),
        ("1", 200),
        ("2", 450),
        ("3", 700),
        ("4", 1_100),
        ("5", 1_800),
        ("6", 2_300),
        ("7", 2_900),
        ("8", 3_900),
        ("9", 5_000),
        ("10", 5_900),
        ("11", 7_200),
        ("12", 8_400),
        ("13", 10_000),
        ("14", 11_500),
        ("15", 13_000),
        ("16", 15_000),
        ("17", 18_000),
        ("18", 20_000),
        ("19", 22_000),
        ("20", 25_000),
        ("21", 33_000),
        ("22", 41_000),
        ("23", 50_000),
        ("24", 62_000),
        ("25", 75_000),
        ("26", 90_000),
        ("27", 105_000),
        ("28", 120_000),
        ("29", 135_000),
        ("30", 155_000),
    ]
    .into_iter()
    .collect();
}

/// XP for a single monster by challenge rating.
///
/// Accepts integer (`"3"`), fractional (`"1/4"`), or decimal (`"0.25"`) CR
/// strings. Unknown ratings award nothing.
pub fn xp_for_challenge_rating(cr: &str) -> u32 {
    let key = match cr.trim() {
        "0.125" => "1/8",
        "0.25" => "1/4",
        "0.5" => "1/2",
        other => other,
    };
    match CR_XP.get(key) {
        Some(xp) => *xp,
        None => {
            warn!(cr = key, "unknown challenge rating, awarding 0 XP");
            0
        }
    }
}

/// Encounter XP multiplier by monster count.
pub fn encounter_multiplier(count: usize) -> f64 {
    match count {
        0 | 1 => 1.0,
        2 => 1.5,
        3..=6 => 2.0,
        7..=10 => 2.5,
        11..=14 => 3.0,
        _ => 4.0,
    }
}

/// Encounter difficulty bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Trivial,
    Easy,
    Medium,
    Hard,
    Deadly,
}

// Per-character thresholds (easy, medium, hard, deadly) from the level-5
// row of the encounter-difficulty table. Difficulty is always judged
// against this row, whatever the party's actual level.
const LEVEL_5_THRESHOLDS: (u32, u32, u32, u32) = (250, 500, 750, 1_100);

/// XP budget for an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterXp {
    /// Raw sum of each monster's XP value.
    pub total_xp: u32,
    /// Total scaled by the count multiplier and party-size adjustment.
    pub adjusted_xp: u32,
    /// Even share of the adjusted total per party member.
    pub xp_per_character: u32,
    pub difficulty: Difficulty,
}

/// Budget an encounter from its monsters' challenge ratings.
///
/// The count multiplier shifts by +0.5 for small parties (fewer than 3) and
/// -0.5 for large ones (more than 5). Difficulty compares the adjusted
/// total against the level-5 per-character thresholds scaled by party size.
pub fn encounter_xp(monster_crs: &[&str], party_size: usize) -> EncounterXp {
    let total_xp: u32 = monster_crs
        .iter()
        .map(|cr| xp_for_challenge_rating(cr))
        .sum();

    let mut multiplier = encounter_multiplier(monster_crs.len());
    if party_size < 3 {
        multiplier += 0.5;
    } else if party_size > 5 {
        multiplier -= 0.5;
    }

    let adjusted_xp = (total_xp as f64 * multiplier).floor() as u32;
    let share_count = party_size.max(1) as u32;
    let (easy, medium, hard, deadly) = LEVEL_5_THRESHOLDS;

    let difficulty = if adjusted_xp >= deadly * share_count {
        Difficulty::Deadly
    } else if adjusted_xp >= hard * share_count {
        Difficulty::Hard
    } else if adjusted_xp >= medium * share_count {
        Difficulty::Medium
    } else if adjusted_xp >= easy * share_count {
        Difficulty::Easy
    } else {
        Difficulty::Trivial
    };

    EncounterXp {
        total_xp,
        adjusted_xp,
        xp_per_character: adjusted_xp / share_count,
        difficulty,
    }
}

/// Quest scale, which sets the base reward band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestType {
    Minor,
    Standard,
    Major,
    Epic,
}

impl QuestType {
    /// Base XP band before level scaling.
    pub fn reward_range(&self) -> (u32, u32) {
        match self {
            QuestType::Minor => (50, 100),
            QuestType::Standard => (100, 300),
            QuestType::Major => (300, 600),
            QuestType::Epic => (600, 1_200),
        }
    }
}

/// Per-character XP for completing a quest: the band midpoint, scaled up
/// 10% per party level past the first, split evenly across the party and
/// floored.
pub fn quest_xp(quest_type: QuestType, party_level: u8, party_size: usize) -> u32 {
    let (min, max) = quest_type.reward_range();
    let midpoint = (min + max) as f64 / 2.0;
    let level = party_level.clamp(1, 20) as f64;
    let scaled = midpoint * (1.0 + 0.1 * (level - 1.0));
    (scaled / party_size.max(1) as f64).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_xp_round_trip() {
        for level in 1..=20u8 {
            assert_eq!(level_for_xp(xp_for_level(level)), level);
        }
    }

    #[test]
    fn test_level_for_xp_boundaries() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(299), 1);
        assert_eq!(level_for_xp(300), 2);
        assert_eq!(level_for_xp(899), 2);
        assert_eq!(level_for_xp(355_000), 20);
        assert_eq!(level_for_xp(u32::MAX), 20);
    }

    #[test]
    fn test_xp_for_level_clamps() {
        assert_eq!(xp_for_level(0), 0);
        assert_eq!(xp_for_level(1), 0);
        assert_eq!(xp_for_level(21), 355_000);
    }

    #[test]
    fn test_xp_to_next_level() {
        let progress = xp_to_next_level(450);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.xp_needed, 450);
        assert_eq!(progress.xp_into_level, 150);
        assert_eq!(progress.percent_complete, 25);

        let fresh = xp_to_next_level(0);
        assert_eq!(fresh.level, 1);
        assert_eq!(fresh.xp_needed, 300);
        assert_eq!(fresh.percent_complete, 0);

        let capped = xp_to_next_level(400_000);
        assert_eq!(capped.level, 20);
        assert_eq!(capped.xp_needed, 0);
        assert_eq!(capped.percent_complete, 100);
    }

    #[test]
    fn test_percent_complete_floors() {
        // 100 into a 300-wide level is 33.3%, reported as 33.
        assert_eq!(xp_to_next_level(100).percent_complete, 33);
    }

    #[test]
    fn test_cr_lookups() {
        assert_eq!(xp_for_challenge_rating("0"), 10);
        assert_eq!(xp_for_challenge_rating("1/4"), 50);
        assert_eq!(xp_for_challenge_rating("1/2"), 100);
        assert_eq!(xp_for_challenge_rating("5"), 1_800);
        assert_eq!(xp_for_challenge_rating("30"), 155_000);
        // Decimal forms normalize to the fractional keys.
        assert_eq!(xp_for_challenge_rating("0.25"), 50);
        // Unknown ratings award nothing.
        assert_eq!(xp_for_challenge_rating("31"), 0);
        assert_eq!(xp_for_challenge_rating("gargantuan"), 0);
    }

    #[test]
    fn test_encounter_multiplier_tiers() {
        assert_eq!(encounter_multiplier(1), 1.0);
        assert_eq!(encounter_multiplier(2), 1.5);
        assert_eq!(encounter_multiplier(3), 2.0);
        assert_eq!(encounter_multiplier(6), 2.0);
        assert_eq!(encounter_multiplier(7), 2.5);
        assert_eq!(encounter_multiplier(10), 2.5);
        assert_eq!(encounter_multiplier(11), 3.0);
        assert_eq!(encounter_multiplier(14), 3.0);
        assert_eq!(encounter_multiplier(15), 4.0);
    }

    #[test]
    fn test_encounter_xp_three_goblins() {
        let result = encounter_xp(&["1/4", "1/4", "1/2"], 4);
        assert_eq!(result.total_xp, 200);
        assert_eq!(result.adjusted_xp, 400);
        assert_eq!(result.xp_per_character, 100);
        assert_eq!(result.difficulty, Difficulty::Trivial);
    }

    #[test]
    fn test_encounter_xp_party_size_adjustment() {
        // A duo gets the multiplier bumped by 0.5: 200 * 2.5 = 500.
        let duo = encounter_xp(&["1/4", "1/4", "1/2"], 2);
        assert_eq!(duo.adjusted_xp, 500);

        // Six players shave 0.5 off: 200 * 1.5 = 300.
        let six = encounter_xp(&["1/4", "1/4", "1/2"], 6);
        assert_eq!(six.adjusted_xp, 300);
    }

    #[test]
    fn test_encounter_difficulty_uses_level_5_thresholds() {
        // Thresholds are not parameterized by party level: a single CR 5
        // monster is "easy" for a party of four by the level-5 row
        // (1800 >= 250 * 4 but < 500 * 4), whatever level the party is.
        let result = encounter_xp(&["5"], 4);
        assert_eq!(result.adjusted_xp, 1_800);
        assert_eq!(result.difficulty, Difficulty::Easy);

        let deadly = encounter_xp(&["10"], 4);
        assert_eq!(deadly.adjusted_xp, 5_900);
        assert_eq!(deadly.difficulty, Difficulty::Deadly);
    }

    #[test]
    fn test_quest_xp() {
        // Standard midpoint 200 at level 1, four players: 50 each.
        assert_eq!(quest_xp(QuestType::Standard, 1, 4), 50);
        // Level 5 scales by 1.4: 280 / 4 = 70.
        assert_eq!(quest_xp(QuestType::Standard, 5, 4), 70);
        // Solo epic at level 3: 900 * 1.2 = 1080.
        assert_eq!(quest_xp(QuestType::Epic, 3, 1), 1_080);
        // Party size never divides by zero.
        assert_eq!(quest_xp(QuestType::Minor, 1, 0), 75);
    }
}
