//! Persistence at the edge of the simulation. Nothing in here runs during a turn.

mod jsonl;
mod snapshot;
mod state;

pub use jsonl::flush_turn;
pub use snapshot::{load_world, save_world};
pub use state::{STATE_FILENAME, SimulationState, document_id};
