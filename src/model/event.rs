use std::fmt;

use serde::{Deserialize, Serialize};

/// Who struck a blow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Combatant {
    Army(String),
    Settlement(String),
}

impl Combatant {
    pub fn name(&self) -> &str {
        match self {
            Combatant::Army(name) | Combatant::Settlement(name) => name,
        }
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combatant::Army(name) => write!(f, "Army {name}"),
            Combatant::Settlement(name) => write!(f, "Settlement {name}"),
        }
    }
}

/// One discrete thing that happened during a turn, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    Moved {
        army: String,
        from: String,
        to: String,
    },
    Hit {
        attacker: Combatant,
        target: Combatant,
        armor_class: i32,
        roll: i32,
        damage: i32,
    },
    Miss {
        attacker: Combatant,
        target: Combatant,
        armor_class: i32,
        roll: i32,
    },
    Destroyed {
        attacker: Combatant,
        army: String,
    },
    Occupied {
        settlement: String,
        army: String,
        allegiance: String,
    },
    Liberated {
        settlement: String,
        army: String,
        allegiance: String,
    },
    /// An occupied settlement with a war guard forgoes its action.
    Idle {
        settlement: String,
    },
}

impl CombatEvent {
    /// Whether the event counts toward a turn's activity.
    pub fn is_activity(&self) -> bool {
        matches!(
            self,
            CombatEvent::Moved { .. } | CombatEvent::Hit { .. } | CombatEvent::Miss { .. }
        )
    }
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::Moved { army, from, to } => {
                write!(f, "Army {army} is travelling from {from} to {to}.")
            }
            CombatEvent::Hit {
                attacker,
                target,
                armor_class,
                roll,
                damage,
            } => write!(
                f,
                "{attacker} attacks {} {} (AC: {armor_class}) with a {roll} attack roll and {damage} damage!",
                target_label(target),
                target.name()
            ),
            CombatEvent::Miss {
                attacker,
                target,
                armor_class,
                roll,
            } => write!(
                f,
                "{attacker} misses {} {} (AC: {armor_class}) with a(n) {roll} attack roll!",
                target_label(target),
                target.name()
            ),
            CombatEvent::Destroyed { attacker, army } => {
                write!(f, "{attacker} has destroyed army {army}!")
            }
            CombatEvent::Occupied {
                settlement, army, ..
            } => write!(f, "Settlement {settlement} has been occupied by army {army}!"),
            CombatEvent::Liberated {
                settlement, army, ..
            } => write!(f, "Settlement {settlement} has been liberated by army {army}!"),
            CombatEvent::Idle { settlement } => {
                write!(f, "Settlement {settlement} is occupied and gets no action.")
            }
        }
    }
}

fn target_label(target: &Combatant) -> &'static str {
    match target {
        Combatant::Army(_) => "army",
        Combatant::Settlement(_) => "settlement",
    }
}
