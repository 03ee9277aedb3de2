//! Combatant snapshots exchanged with the campaign backend.
//!
//! The backend builds these from persisted character and NPC data before
//! each combat action. Resolvers treat them as immutable snapshots and hand
//! back updated copies, so callers can diff before/after state when
//! persisting results.

use serde::{Deserialize, Serialize};

/// Which side of the table a combatant fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatantType {
    Player,
    Companion,
    Enemy,
}

/// Consciousness state.
///
/// The attack resolvers only ever perform the `Conscious -> Unconscious`
/// transition when HP reaches 0. `Dead` and `Stabilized` are set by the
/// death-save logic that lives outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CombatantStatus {
    #[default]
    Conscious,
    Unconscious,
    Dead,
    Stabilized,
}

/// A participant in combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    /// Caller-scoped identity, unique within one combat.
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CombatantType,
    pub current_hp: i32,
    pub max_hp: i32,
    pub armor_class: i32,
    /// Flat attack-roll bonus; may be negative.
    pub attack_bonus: i32,
    /// Damage expression, e.g. `1d8+3`.
    pub damage_roll: String,
    #[serde(default)]
    pub status: CombatantStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl Combatant {
    /// Create a combatant with baseline stats (10 HP, AC 10, unarmed 1d4).
    pub fn new(id: u32, name: impl Into<String>, kind: CombatantType) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            current_hp: 10,
            max_hp: 10,
            armor_class: 10,
            attack_bonus: 0,
            damage_roll: "1d4".to_string(),
            status: CombatantStatus::Conscious,
            class: None,
            level: None,
        }
    }

    pub fn with_hp(mut self, current: i32, max: i32) -> Self {
        self.current_hp = current;
        self.max_hp = max;
        self
    }

    pub fn with_armor_class(mut self, armor_class: i32) -> Self {
        self.armor_class = armor_class;
        self
    }

    pub fn with_attack(mut self, attack_bonus: i32, damage_roll: impl Into<String>) -> Self {
        self.attack_bonus = attack_bonus;
        self.damage_roll = damage_roll.into();
        self
    }

    pub fn with_status(mut self, status: CombatantStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>, level: u8) -> Self {
        self.class = Some(class.into());
        self.level = Some(level);
        self
    }

    /// Whether this combatant can still act: conscious with HP remaining.
    pub fn is_active(&self) -> bool {
        self.status == CombatantStatus::Conscious && self.current_hp > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active() {
        let fighter = Combatant::new(1, "Brenna", CombatantType::Player).with_hp(8, 20);
        assert!(fighter.is_active());

        let downed = fighter
            .clone()
            .with_hp(0, 20)
            .with_status(CombatantStatus::Unconscious);
        assert!(!downed.is_active());

        // Status wins even if HP is stale.
        let stabilized = fighter.clone().with_status(CombatantStatus::Stabilized);
        assert!(!stabilized.is_active());

        // Zero HP alone also deactivates.
        let at_zero = fighter.with_hp(0, 20);
        assert!(!at_zero.is_active());
    }

    #[test]
    fn test_wire_shape() {
        let goblin = Combatant::new(3, "Goblin", CombatantType::Enemy)
            .with_hp(7, 7)
            .with_armor_class(15)
            .with_attack(4, "1d6+2");

        let json = serde_json::to_value(&goblin).unwrap();
        assert_eq!(json["type"], "enemy");
        assert_eq!(json["status"], "conscious");
        assert_eq!(json["damage_roll"], "1d6+2");
        // Optional fields stay off the wire when unset.
        assert!(json.get("class").is_none());

        let back: Combatant = serde_json::from_value(json).unwrap();
        assert_eq!(back, goblin);
    }

    #[test]
    fn test_status_defaults_on_deserialize() {
        let parsed: Combatant = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Orc",
                "type": "enemy",
                "current_hp": 15,
                "max_hp": 15,
                "armor_class": 13,
                "attack_bonus": 5,
                "damage_roll": "1d12+3"
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.status, CombatantStatus::Conscious);
        assert_eq!(parsed.level, None);
    }
}
