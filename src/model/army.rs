use serde::{Deserialize, Serialize};

use super::dice::RollSpec;
use super::health::HealthTracker;

/// A field army. Destroyed armies stay in the world for the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Army {
    pub name: String,
    pub hp: HealthTracker,
    pub armor_class: i32,
    pub attack_roll: RollSpec,
    pub damage_roll: RollSpec,
    pub location: String,
    pub destination: String,
    pub allegiance: String,
    #[serde(default)]
    pub destroyed: bool,
}

impl Army {
    /// An army still has somewhere to go this turn.
    pub fn is_moving(&self) -> bool {
        self.destination != self.location
    }

    pub fn is_hostile_to(&self, allegiance: &str) -> bool {
        self.allegiance != allegiance
    }
}
