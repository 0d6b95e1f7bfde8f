//! Per-phase combat resolution.
//!
//! Attacks hit when the roll meets or beats the defender's armor class.

mod armies;
mod settlements;

pub use armies::step_armies;
pub use settlements::step_settlements;

use rand::RngCore;

use super::error::TurnError;
use crate::model::RollSpec;

pub(crate) fn lands(roll: i32, armor_class: i32) -> bool {
    roll >= armor_class
}

/// Roll `spec` on behalf of `entity`, tagging any failure with its name.
pub(crate) fn roll_for(
    entity: &str,
    spec: &RollSpec,
    rng: &mut dyn RngCore,
) -> Result<i32, TurnError> {
    spec.roll(rng).map_err(|source| TurnError::InvalidRoll {
        entity: entity.to_string(),
        source,
    })
}
