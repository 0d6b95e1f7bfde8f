use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::model::{CombatEvent, World};
use crate::sim::{TurnContext, TurnError, step_armies, step_settlements};

const DEFAULT_SEED: u64 = 42;

// ---------------------------------------------------------------------------
// Phase execution helpers
// ---------------------------------------------------------------------------

/// Run the army phase once with a fixed seed. Returns the activity flag and events.
pub fn army_step(world: &mut World) -> Result<(bool, Vec<CombatEvent>), TurnError> {
    army_step_with_seed(world, DEFAULT_SEED)
}

pub fn army_step_with_seed(
    world: &mut World,
    seed: u64,
) -> Result<(bool, Vec<CombatEvent>), TurnError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut events: Vec<CombatEvent> = Vec::new();
    let mut ctx = TurnContext {
        world,
        rng: &mut rng,
        sink: &mut events,
    };
    let active = step_armies(&mut ctx)?;
    Ok((active, events))
}

/// Run the settlement phase once with a fixed seed. Returns the activity flag and events.
pub fn settlement_step(world: &mut World) -> Result<(bool, Vec<CombatEvent>), TurnError> {
    let mut rng = SmallRng::seed_from_u64(DEFAULT_SEED);
    let mut events: Vec<CombatEvent> = Vec::new();
    let mut ctx = TurnContext {
        world,
        rng: &mut rng,
        sink: &mut events,
    };
    let active = step_settlements(&mut ctx)?;
    Ok((active, events))
}
