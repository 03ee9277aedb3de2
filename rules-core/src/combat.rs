//! Attack resolution and enemy-phase turn processing.
//!
//! Resolvers are pure with respect to their inputs: combatants come in by
//! reference and updated copies go out, alongside narrated log entries that
//! show both the outcome and the arithmetic behind it. The mechanics
//! breakdown exists so the table can see exactly how a result was reached.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combatant::{Combatant, CombatantStatus, CombatantType};
use crate::dice::{roll_damage_with_rng, Advantage, AttackRoll, DamageRoll};

/// One narrated, auditable combat event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatLogEntry {
    pub attacker: String,
    pub attacker_kind: CombatantType,
    pub target: String,
    pub target_kind: CombatantType,
    pub attack: AttackRoll,
    /// The target's AC at the time of the attack.
    pub target_ac: i32,
    pub hit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<DamageRoll>,
    pub target_hp_after: i32,
    pub target_status_after: CombatantStatus,
    /// Natural-language narration of the event.
    pub description: String,
    /// Raw arithmetic behind the narration, one line per roll.
    pub mechanics: String,
}

/// Result of one resolved attack: the log entry plus the updated target.
#[derive(Debug, Clone)]
pub struct AttackOutcome {
    pub log: CombatLogEntry,
    pub target: Combatant,
}

/// Damage a single combatant took during an enemy phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageSummary {
    pub name: String,
    pub damage_taken: i32,
    pub new_hp: i32,
    pub max_hp: i32,
    pub defeated: bool,
}

/// Aggregate outcome of a full enemy phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatTurnResult {
    pub log: Vec<CombatLogEntry>,
    /// The complete updated party roster, untouched members included.
    /// Callers replace their roster with this wholesale.
    pub party: Vec<Combatant>,
    /// Per-target damage records, hit targets only.
    pub damage_summaries: Vec<DamageSummary>,
    pub summary: String,
    pub mechanics: String,
}

/// Resolve a single attack against a target.
///
/// Advantage and disadvantage each roll twice and keep the better or worse
/// total; requesting both cancels to one roll (see
/// [`Advantage::from_flags`]). On a hit, the attacker's damage expression is
/// rolled (dice doubled on a natural 20), the target's HP drops, clamped at
/// 0, and a target reaching 0 HP falls unconscious. The input combatants are
/// not modified.
pub fn resolve_attack_with_rng<R: Rng>(
    rng: &mut R,
    attacker: &Combatant,
    target: &Combatant,
    advantage: Advantage,
) -> AttackOutcome {
    let attack = AttackRoll::with_advantage_rng(rng, attacker.attack_bonus, advantage);
    let hit = attack.hits(target.armor_class);

    let mut updated = target.clone();
    let damage = if hit {
        let damage = roll_damage_with_rng(rng, &attacker.damage_roll, attack.natural_20);
        updated.current_hp = (updated.current_hp - damage.total).max(0);
        if updated.current_hp == 0 {
            updated.status = CombatantStatus::Unconscious;
        }
        Some(damage)
    } else {
        None
    };

    let description = describe_attack(attacker, &updated, &attack, damage.as_ref());
    let mechanics = explain_mechanics(&attack, target.armor_class, hit, damage.as_ref());

    AttackOutcome {
        log: CombatLogEntry {
            attacker: attacker.name.clone(),
            attacker_kind: attacker.kind,
            target: target.name.clone(),
            target_kind: target.kind,
            attack,
            target_ac: target.armor_class,
            hit,
            damage,
            target_hp_after: updated.current_hp,
            target_status_after: updated.status,
            description,
            mechanics,
        },
        target: updated,
    }
}

/// [`resolve_attack_with_rng`] with the thread-local generator.
pub fn resolve_attack(
    attacker: &Combatant,
    target: &Combatant,
    advantage: Advantage,
) -> AttackOutcome {
    resolve_attack_with_rng(&mut rand::thread_rng(), attacker, target, advantage)
}

/// Resolve one full enemy phase: every active enemy attacks one active
/// party member chosen uniformly at random.
///
/// The target pool is fixed when the phase starts; a member dropped partway
/// through can still draw further attacks from later enemies. If either side
/// has no active combatants the phase is a no-op with a neutral summary.
pub fn resolve_enemy_turn_with_rng<R: Rng>(
    rng: &mut R,
    enemies: &[Combatant],
    party: &[Combatant],
) -> CombatTurnResult {
    let attackers: Vec<&Combatant> = enemies.iter().filter(|e| e.is_active()).collect();
    let mut roster: Vec<Combatant> = party.to_vec();
    let targets: Vec<usize> = roster
        .iter()
        .enumerate()
        .filter(|(_, member)| member.is_active())
        .map(|(index, _)| index)
        .collect();

    if attackers.is_empty() || targets.is_empty() {
        return CombatTurnResult {
            log: Vec::new(),
            party: roster,
            damage_summaries: Vec::new(),
            summary: "No exchanges this round.".to_string(),
            mechanics: String::new(),
        };
    }

    let mut log: Vec<CombatLogEntry> = Vec::new();
    let mut summaries: Vec<DamageSummary> = Vec::new();

    for enemy in attackers {
        let target_index = targets[rng.gen_range(0..targets.len())];
        let outcome =
            resolve_attack_with_rng(rng, enemy, &roster[target_index], Advantage::Normal);
        if let Some(damage) = &outcome.log.damage {
            record_damage(&mut summaries, &outcome.target, damage.total);
        }
        roster[target_index] = outcome.target;
        log.push(outcome.log);
    }

    let summary = summarize_turn(&log, &summaries);
    let mechanics = log
        .iter()
        .map(|entry| entry.mechanics.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    CombatTurnResult {
        log,
        party: roster,
        damage_summaries: summaries,
        summary,
        mechanics,
    }
}

/// [`resolve_enemy_turn_with_rng`] with the thread-local generator.
pub fn resolve_enemy_turn(enemies: &[Combatant], party: &[Combatant]) -> CombatTurnResult {
    resolve_enemy_turn_with_rng(&mut rand::thread_rng(), enemies, party)
}

fn describe_attack(
    attacker: &Combatant,
    target: &Combatant,
    attack: &AttackRoll,
    damage: Option<&DamageRoll>,
) -> String {
    let mut description = match damage {
        Some(damage) if attack.natural_20 => format!(
            "{} lands a critical hit on {} for {} damage!",
            attacker.name, target.name, damage.total
        ),
        Some(damage) => format!(
            "{} hits {} for {} damage.",
            attacker.name, target.name, damage.total
        ),
        None if attack.natural_1 => format!(
            "{} fumbles the attack against {}!",
            attacker.name, target.name
        ),
        None => format!("{} misses {}.", attacker.name, target.name),
    };
    if damage.is_some() && target.current_hp == 0 {
        description.push_str(&format!(" {} falls unconscious!", target.name));
    }
    description
}

fn explain_mechanics(
    attack: &AttackRoll,
    target_ac: i32,
    hit: bool,
    damage: Option<&DamageRoll>,
) -> String {
    let verdict = if attack.natural_20 {
        "natural 20, automatic hit".to_string()
    } else if attack.natural_1 {
        "natural 1, automatic miss".to_string()
    } else if hit {
        format!("{} vs AC {}, hit", attack.total, target_ac)
    } else {
        format!("{} vs AC {}, miss", attack.total, target_ac)
    };

    let mut lines = vec![format!("Attack: {attack} ({verdict})")];
    if let Some(damage) = damage {
        let note = if damage.critical { ", dice doubled" } else { "" };
        lines.push(format!("Damage: {damage}{note}"));
    }
    lines.join("\n")
}

fn record_damage(summaries: &mut Vec<DamageSummary>, target: &Combatant, amount: i32) {
    if let Some(existing) = summaries.iter_mut().find(|s| s.name == target.name) {
        existing.damage_taken += amount;
        existing.new_hp = target.current_hp;
        existing.defeated = target.current_hp == 0;
    } else {
        summaries.push(DamageSummary {
            name: target.name.clone(),
            damage_taken: amount,
            new_hp: target.current_hp,
            max_hp: target.max_hp,
            defeated: target.current_hp == 0,
        });
    }
}

fn summarize_turn(log: &[CombatLogEntry], summaries: &[DamageSummary]) -> String {
    let hits = log.iter().filter(|entry| entry.hit).count();
    let total_damage: i32 = summaries.iter().map(|s| s.damage_taken).sum();
    let mut summary = format!(
        "{} attack(s): {} hit for {} total damage.",
        log.len(),
        hits,
        total_damage
    );
    let fallen = summaries.iter().filter(|s| s.defeated).count();
    if fallen > 0 {
        summary.push_str(&format!(" {fallen} party member(s) fell!"));
    }
    summary
}
