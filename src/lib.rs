pub mod flush;
pub mod model;
pub mod report;
pub mod scenario;
pub mod sim;

#[cfg(test)]
mod testutil;

pub use model::{
    Actor, Army, CombatEvent, Combatant, DiceError, DiceExpression, Die, Fortification,
    FortificationType, HealthTracker, RollSpec, Settlement, World,
};
pub use sim::{EventSink, SimConfig, TurnEngine, TurnError, TurnOutcome, run, run_turn, run_with};
