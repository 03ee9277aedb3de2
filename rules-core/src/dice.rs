//! Dice rolling primitives for attack and damage resolution.
//!
//! Damage expressions use standard notation (`2d6+3`). Attack rolls are
//! single d20 rolls with critical hit/fumble detection on the natural die,
//! optionally rolled with advantage or disadvantage.
//!
//! Every rolling function has a `*_with_rng` form that takes any
//! [`rand::Rng`], so callers (and tests) can supply a seeded generator. The
//! plain forms draw from `rand::thread_rng()`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for damage-expression parsing.
#[derive(Debug, Error)]
pub enum DiceError {
    #[error("Invalid dice notation: {0}")]
    InvalidNotation(String),
    #[error("Die must have at least one side (in {0})")]
    ZeroSides(String),
}

/// Advantage state for d20 attack rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Advantage {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl Advantage {
    /// Build an advantage state from a pair of request flags. Requesting
    /// both at once cancels to a normal roll.
    pub fn from_flags(has_advantage: bool, has_disadvantage: bool) -> Advantage {
        match (has_advantage, has_disadvantage) {
            (true, false) => Advantage::Advantage,
            (false, true) => Advantage::Disadvantage,
            _ => Advantage::Normal,
        }
    }

    /// Combine two advantage states (advantage + disadvantage = normal).
    pub fn combine(self, other: Advantage) -> Advantage {
        match (self, other) {
            (Advantage::Normal, x) | (x, Advantage::Normal) => x,
            (Advantage::Advantage, Advantage::Disadvantage) => Advantage::Normal,
            (Advantage::Disadvantage, Advantage::Advantage) => Advantage::Normal,
            (Advantage::Advantage, Advantage::Advantage) => Advantage::Advantage,
            (Advantage::Disadvantage, Advantage::Disadvantage) => Advantage::Disadvantage,
        }
    }
}

/// Uniform roll in `[1, sides]`. A degenerate zero-sided die rolls 1.
pub fn roll_die<R: Rng>(rng: &mut R, sides: u32) -> u32 {
    rng.gen_range(1..=sides.max(1))
}

/// Roll a single d20.
pub fn roll_d20<R: Rng>(rng: &mut R) -> u32 {
    roll_die(rng, 20)
}

/// A parsed damage expression: `<count>d<sides>[+<modifier>]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageExpr {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

impl DamageExpr {
    /// Substitute expression for malformed authored content.
    pub const DEFAULT: DamageExpr = DamageExpr {
        count: 1,
        sides: 6,
        modifier: 0,
    };

    /// Parse a damage expression. The grammar is strict: a dice count, a
    /// lowercase or uppercase `d`, a die size, and an optional `+<flat>`
    /// bonus. Anything else (including negative modifiers) is rejected.
    pub fn parse(notation: &str) -> Result<DamageExpr, DiceError> {
        let lowered = notation.trim().to_ascii_lowercase();

        let (dice, bonus) = match lowered.split_once('+') {
            Some((dice, bonus)) => (dice, Some(bonus)),
            None => (lowered.as_str(), None),
        };
        let (count, sides) = dice
            .split_once('d')
            .ok_or_else(|| DiceError::InvalidNotation(notation.to_string()))?;

        let count = parse_digits(count, notation)?;
        let sides = parse_digits(sides, notation)?;
        if sides == 0 {
            return Err(DiceError::ZeroSides(notation.to_string()));
        }
        let modifier = match bonus {
            Some(bonus) => parse_digits(bonus, notation)? as i32,
            None => 0,
        };

        Ok(DamageExpr {
            count,
            sides,
            modifier,
        })
    }

    /// Parse a damage expression, substituting `1d6` on malformed input.
    ///
    /// A bad monster-stat entry must not abort a session; the warning keeps
    /// the content error discoverable without interrupting play.
    pub fn parse_or_default(notation: &str) -> DamageExpr {
        match DamageExpr::parse(notation) {
            Ok(expr) => expr,
            Err(error) => {
                tracing::warn!(notation, %error, "malformed damage expression, rolling 1d6");
                DamageExpr::DEFAULT
            }
        }
    }

    /// Roll the expression. A critical roll doubles the number of dice; the
    /// flat modifier is never doubled. The total is floored at 1.
    pub fn roll_with_rng<R: Rng>(&self, rng: &mut R, critical: bool) -> DamageRoll {
        let count = if critical { self.count * 2 } else { self.count };
        let rolls: Vec<u32> = (0..count).map(|_| roll_die(rng, self.sides)).collect();
        let dice_total: i32 = rolls.iter().map(|r| *r as i32).sum();
        DamageRoll {
            rolls,
            sides: self.sides,
            modifier: self.modifier,
            total: (dice_total + self.modifier).max(1),
            critical,
        }
    }

    /// Roll the expression with the thread-local generator.
    pub fn roll(&self, critical: bool) -> DamageRoll {
        self.roll_with_rng(&mut rand::thread_rng(), critical)
    }
}

fn parse_digits(s: &str, notation: &str) -> Result<u32, DiceError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DiceError::InvalidNotation(notation.to_string()));
    }
    s.parse()
        .map_err(|_| DiceError::InvalidNotation(notation.to_string()))
}

impl FromStr for DamageExpr {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DamageExpr::parse(s)
    }
}

impl fmt::Display for DamageExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifier != 0 {
            write!(f, "{}d{}+{}", self.count, self.sides, self.modifier)
        } else {
            write!(f, "{}d{}", self.count, self.sides)
        }
    }
}

/// Roll damage from an authored expression string, doubling the dice on a
/// critical hit. Malformed expressions roll the `1d6` substitute.
pub fn roll_damage_with_rng<R: Rng>(rng: &mut R, notation: &str, critical: bool) -> DamageRoll {
    DamageExpr::parse_or_default(notation).roll_with_rng(rng, critical)
}

/// Roll damage with the thread-local generator.
pub fn roll_damage(notation: &str, critical: bool) -> DamageRoll {
    roll_damage_with_rng(&mut rand::thread_rng(), notation, critical)
}

/// Outcome of rolling a damage expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRoll {
    /// Individual die results, in roll order.
    pub rolls: Vec<u32>,
    pub sides: u32,
    pub modifier: i32,
    /// Sum of dice plus modifier, floored at 1.
    pub total: i32,
    /// Whether the dice count was doubled.
    pub critical: bool,
}

impl DamageRoll {
    /// The die rolled, rendered as `d8`-style notation.
    pub fn die_type(&self) -> String {
        format!("d{}", self.sides)
    }
}

impl fmt::Display for DamageRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rolls = self
            .rolls
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        if self.modifier != 0 {
            write!(f, "{}: [{}] + {} = {}", self.die_type(), rolls, self.modifier, self.total)
        } else {
            write!(f, "{}: [{}] = {}", self.die_type(), rolls, self.total)
        }
    }
}

/// Outcome of one d20 attack roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRoll {
    /// The natural die result, 1 through 20.
    pub roll: u32,
    /// The attacker's attack bonus.
    pub modifier: i32,
    pub total: i32,
    pub natural_20: bool,
    pub natural_1: bool,
}

impl AttackRoll {
    /// Roll one d20 and apply the attack bonus. The critical flags depend
    /// only on the natural die, never on the modifier.
    pub fn with_rng<R: Rng>(rng: &mut R, attack_bonus: i32) -> AttackRoll {
        let roll = roll_d20(rng);
        AttackRoll {
            roll,
            modifier: attack_bonus,
            total: roll as i32 + attack_bonus,
            natural_20: roll == 20,
            natural_1: roll == 1,
        }
    }

    /// Roll with the thread-local generator.
    pub fn new(attack_bonus: i32) -> AttackRoll {
        AttackRoll::with_rng(&mut rand::thread_rng(), attack_bonus)
    }

    /// Roll with advantage or disadvantage: two independent rolls, keeping
    /// the higher or lower total respectively.
    pub fn with_advantage_rng<R: Rng>(
        rng: &mut R,
        attack_bonus: i32,
        advantage: Advantage,
    ) -> AttackRoll {
        match advantage {
            Advantage::Normal => AttackRoll::with_rng(rng, attack_bonus),
            Advantage::Advantage | Advantage::Disadvantage => {
                let first = AttackRoll::with_rng(rng, attack_bonus);
                let second = AttackRoll::with_rng(rng, attack_bonus);
                let keep_first = match advantage {
                    Advantage::Advantage => first.total >= second.total,
                    _ => first.total <= second.total,
                };
                if keep_first {
                    first
                } else {
                    second
                }
            }
        }
    }

    /// Whether this roll hits a target with the given armor class.
    ///
    /// A natural 20 always hits and a natural 1 always misses; only when
    /// neither applies is the total compared against AC. The priority order
    /// matters: a natural 20 hits even when the total falls short, and a
    /// natural 1 misses even when the total would clear the AC.
    pub fn hits(&self, target_ac: i32) -> bool {
        if self.natural_20 {
            true
        } else if self.natural_1 {
            false
        } else {
            self.total >= target_ac
        }
    }
}

impl fmt::Display for AttackRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifier < 0 {
            write!(f, "d20({}) - {} = {}", self.roll, -self.modifier, self.total)
        } else {
            write!(f, "d20({}) + {} = {}", self.roll, self.modifier, self.total)
        }
    }
}
