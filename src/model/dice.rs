//! Dice notation: `[count]d<faces>[+|-<modifier>]`.
//!
//! The modifier applies to every die rolled, so `3d6+1` ranges over `6..=21`
//! rather than `4..=19`.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed base die every settlement attacks with.
pub const BASE_ATTACK_DIE: &str = "d20";

/// Largest die count a single expression may roll.
pub const MAX_DICE: u32 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("{expr} is not a valid roll: {reason}")]
    InvalidExpression { expr: String, reason: String },
}

impl DiceError {
    pub(crate) fn invalid(expr: &str, reason: impl Into<String>) -> Self {
        DiceError::InvalidExpression {
            expr: expr.to_string(),
            reason: reason.into(),
        }
    }
}

/// A parsed dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceExpression {
    pub count: u32,
    pub faces: u32,
    pub modifier: i32,
}

impl DiceExpression {
    pub fn parse(text: &str) -> Result<Self, DiceError> {
        let normalized = text.trim().to_lowercase();

        let parts: Vec<&str> = normalized.split('d').collect();
        let [count_str, rest] = parts.as_slice() else {
            return Err(DiceError::invalid(
                &normalized,
                format!("expected one 'd' separator, found {}", parts.len().saturating_sub(1)),
            ));
        };

        let count = if count_str.is_empty() {
            1
        } else {
            let parsed: i32 = count_str
                .parse()
                .map_err(|e| DiceError::invalid(&normalized, format!("die count {count_str:?}: {e}")))?;
            u32::try_from(parsed)
                .map_err(|_| DiceError::invalid(&normalized, "die count cannot be negative"))?
        };
        if count > MAX_DICE {
            return Err(DiceError::invalid(
                &normalized,
                format!("at most {MAX_DICE} dice per roll, got {count}"),
            ));
        }

        let (faces, modifier) = parse_faces_and_modifier(rest)
            .map_err(|reason| DiceError::invalid(&normalized, reason))?;

        if faces <= 0 {
            return Err(DiceError::invalid(
                &normalized,
                format!("die needs at least one face, got {faces}"),
            ));
        }

        Ok(Self {
            count,
            faces: faces as u32,
            modifier,
        })
    }

    /// Roll every die, adding the modifier to each one.
    pub fn roll(&self, rng: &mut dyn RngCore) -> Result<i32, DiceError> {
        let mut total: i64 = 0;
        for _ in 0..self.count {
            total += roll_die(rng, self.faces) + i64::from(self.modifier);
        }
        i32::try_from(total)
            .map_err(|_| DiceError::invalid(&self.to_string(), format!("total {total} out of range")))
    }

    pub fn min(&self) -> i64 {
        i64::from(self.count) * (1 + i64::from(self.modifier))
    }

    pub fn max(&self) -> i64 {
        i64::from(self.count) * (i64::from(self.faces) + i64::from(self.modifier))
    }
}

fn roll_die(rng: &mut dyn RngCore, faces: u32) -> i64 {
    (rng.next_u64() % u64::from(faces)) as i64 + 1
}

/// Split `F`, `F+M` or `F-M`. An additive split takes precedence over a subtractive one.
fn parse_faces_and_modifier(text: &str) -> Result<(i32, i32), String> {
    let (split, sign) = if text.contains('+') {
        ('+', 1)
    } else if text.contains('-') {
        ('-', -1)
    } else {
        let faces = text
            .parse()
            .map_err(|e| format!("faces {text:?}: {e}"))?;
        return Ok((faces, 0));
    };

    let parts: Vec<&str> = text.split(split).collect();
    let [faces_str, modifier_str] = parts.as_slice() else {
        return Err(format!("expected two values around '{split}' but got {parts:?}"));
    };
    let faces = faces_str
        .parse()
        .map_err(|e| format!("faces {faces_str:?}: {e}"))?;
    let modifier: i32 = modifier_str
        .parse()
        .map_err(|e| format!("modifier {modifier_str:?}: {e}"))?;
    Ok((faces, sign * modifier))
}

impl FromStr for DiceExpression {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifier > 0 {
            write!(f, "{}d{}+{}", self.count, self.faces, self.modifier)
        } else if self.modifier < 0 {
            write!(f, "{}d{}{}", self.count, self.faces, self.modifier)
        } else {
            write!(f, "{}d{}", self.count, self.faces)
        }
    }
}

/// A single dice expression as written in a scenario, parsed when rolled.
///
/// Keeping the text lets a world carry a malformed roll until something
/// actually tries to roll it, which is where the error is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Die(String);

impl Die {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn base_attack() -> Self {
        Self::new(BASE_ATTACK_DIE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(&self) -> Result<DiceExpression, DiceError> {
        DiceExpression::parse(&self.0)
    }

    pub fn roll(&self, rng: &mut dyn RngCore) -> Result<i32, DiceError> {
        self.parse()?.roll(rng)
    }
}

impl From<&str> for Die {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.trim().to_lowercase())
    }
}

/// A composite roll: every die is rolled and the results summed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollSpec(Vec<Die>);

impl RollSpec {
    pub fn new(dice: Vec<Die>) -> Self {
        Self(dice)
    }

    pub fn dice(&self) -> &[Die] {
        &self.0
    }

    /// Sum every die. Stops at the first invalid expression.
    pub fn roll(&self, rng: &mut dyn RngCore) -> Result<i32, DiceError> {
        let mut sum: i64 = 0;
        for die in &self.0 {
            sum += i64::from(die.roll(rng)?);
        }
        i32::try_from(sum).map_err(|_| DiceError::invalid(&self.to_string(), format!("total {sum} out of range")))
    }
}

impl From<&str> for RollSpec {
    fn from(text: &str) -> Self {
        Self(vec![Die::from(text)])
    }
}

impl FromIterator<Die> for RollSpec {
    fn from_iter<I: IntoIterator<Item = Die>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for RollSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, die) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{die}")?;
        }
        Ok(())
    }
}
