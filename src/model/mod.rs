#[macro_use]
mod macros;

pub mod actor;
pub mod army;
pub mod dice;
pub mod event;
pub mod fortification;
pub mod health;
pub mod settlement;
pub mod world;

pub use actor::Actor;
pub use army::Army;
pub use dice::{DiceError, DiceExpression, Die, RollSpec};
pub use event::{Combatant, CombatEvent};
pub use fortification::{Fortification, FortificationType};
pub use health::HealthTracker;
pub use settlement::Settlement;
pub use world::World;
