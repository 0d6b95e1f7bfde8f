mod context;
mod engine;
mod error;
mod resolver;
mod runner;
mod sink;

pub use context::TurnContext;
pub use engine::{Phase, TurnEngine, TurnOutcome, run_turn, validate};
pub use error::TurnError;
pub use resolver::{step_armies, step_settlements};
pub use runner::{RunError, RunSummary, SimConfig, run, run_with};
pub use sink::{EventSink, Recorder, TracingSink};
