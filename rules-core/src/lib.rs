//! Combat resolution and character progression rules for a tabletop
//! campaign companion.
//!
//! This crate is the deterministic rules core behind the campaign backend.
//! It knows nothing about HTTP, WebSockets, or storage: the backend hands
//! it combatant snapshots and gets back updated copies plus narrated log
//! entries, which it persists and pushes to the table.
//!
//! Two halves:
//! - Combat resolution ([`combat`], [`dice`], [`combatant`]): d20 attack
//!   rolls with advantage and critical handling, damage rolls, HP clamping,
//!   and per-event mechanics breakdowns.
//! - Ruleset tables ([`stats`], [`progression`], [`class_data`]): pure
//!   formulas for ability modifiers, proficiency, armor class, hit points,
//!   XP thresholds, and encounter budgeting.
//!
//! # Quick start
//!
//! ```
//! use rules_core::{resolve_attack, Advantage, Combatant, CombatantType};
//!
//! let fighter = Combatant::new(1, "Brenna", CombatantType::Player)
//!     .with_hp(24, 24)
//!     .with_armor_class(16)
//!     .with_attack(5, "1d8+3");
//! let goblin = Combatant::new(2, "Goblin", CombatantType::Enemy)
//!     .with_hp(7, 7)
//!     .with_armor_class(13)
//!     .with_attack(4, "1d6+2");
//!
//! let outcome = resolve_attack(&fighter, &goblin, Advantage::Normal);
//! println!("{}", outcome.log.description);
//! println!("{}", outcome.log.mechanics);
//! ```
//!
//! Every rolling function also has a `*_with_rng` form taking any
//! [`rand::Rng`], so tests can pass a seeded generator.

pub mod class_data;
pub mod combat;
pub mod combatant;
pub mod dice;
pub mod progression;
pub mod stats;

// Primary public API
pub use class_data::CharacterClass;
pub use combat::{
    resolve_attack, resolve_attack_with_rng, resolve_enemy_turn, resolve_enemy_turn_with_rng,
    AttackOutcome, CombatLogEntry, CombatTurnResult, DamageSummary,
};
pub use combatant::{Combatant, CombatantStatus, CombatantType};
pub use dice::{
    roll_damage, roll_damage_with_rng, Advantage, AttackRoll, DamageExpr, DamageRoll, DiceError,
};
pub use progression::{
    encounter_xp, level_for_xp, quest_xp, xp_for_challenge_rating, xp_for_level, xp_to_next_level,
    Difficulty, EncounterXp, LevelProgress, QuestType,
};
pub use stats::{
    ability_modifier, armor_class, attack_bonus, hp_gain_on_level_up, proficiency_bonus,
    saving_throw_bonus, starting_hp,
};
