use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use super::context::TurnContext;
use super::error::TurnError;
use super::resolver::{step_armies, step_settlements};
use super::sink::EventSink;
use crate::model::World;

/// The two phases of a turn, always run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Army,
    Settlement,
}

impl Phase {
    pub const ORDER: [Phase; 2] = [Phase::Army, Phase::Settlement];

    pub fn name(self) -> &'static str {
        match self {
            Phase::Army => "army",
            Phase::Settlement => "settlement",
        }
    }

    fn step(self, ctx: &mut TurnContext) -> Result<bool, TurnError> {
        match self {
            Phase::Army => step_armies(ctx),
            Phase::Settlement => step_settlements(ctx),
        }
    }
}

/// What a completed turn did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    pub turn_id: u32,
    pub armies_active: bool,
    pub settlements_active: bool,
}

impl TurnOutcome {
    /// False means nothing moved or fought: the world has settled.
    pub fn active(&self) -> bool {
        self.armies_active || self.settlements_active
    }
}

/// Check that every allegiance in the world names a known actor.
pub fn validate(world: &World) -> Result<(), TurnError> {
    match world.unknown_allegiances().first() {
        Some((entity, allegiance)) => Err(TurnError::UnknownActor {
            entity: entity.to_string(),
            allegiance: allegiance.to_string(),
        }),
        None => Ok(()),
    }
}

/// Advance the turn counter and run the army phase, then the settlement phase.
///
/// A bad roll abandons the rest of the phase it happened in; the remaining
/// phase still runs and the first such error is returned afterwards. A fatal
/// error returns immediately. Either way the world has been partly mutated and
/// should not be persisted.
pub fn run_turn(
    world: &mut World,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
) -> Result<TurnOutcome, TurnError> {
    world.turn_id += 1;
    let turn_id = world.turn_id;
    tracing::debug!(turn_id, "turn started");

    let mut outcome = TurnOutcome {
        turn_id,
        armies_active: false,
        settlements_active: false,
    };
    let mut deferred: Option<TurnError> = None;
    let mut ctx = TurnContext { world, rng, sink };

    for phase in Phase::ORDER {
        let active = match phase.step(&mut ctx) {
            Ok(active) => active,
            Err(err) if err.is_fatal() => {
                tracing::error!(turn_id, phase = phase.name(), error = %err, "turn aborted");
                return Err(err);
            }
            Err(err) => {
                tracing::warn!(turn_id, phase = phase.name(), error = %err, "phase cut short");
                deferred.get_or_insert(err);
                true
            }
        };
        match phase {
            Phase::Army => outcome.armies_active = active,
            Phase::Settlement => outcome.settlements_active = active,
        }
    }

    if let Some(err) = deferred {
        return Err(err);
    }

    tracing::debug!(
        turn_id,
        armies_active = outcome.armies_active,
        settlements_active = outcome.settlements_active,
        "turn finished"
    );
    Ok(outcome)
}

/// Owns the randomness source for a run of turns.
pub struct TurnEngine<R: RngCore = SmallRng> {
    rng: R,
}

impl TurnEngine<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> TurnEngine<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn run_turn(
        &mut self,
        world: &mut World,
        sink: &mut dyn EventSink,
    ) -> Result<TurnOutcome, TurnError> {
        run_turn(world, &mut self.rng, sink)
    }
}
