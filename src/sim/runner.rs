use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::engine::{TurnEngine, validate};
use super::error::TurnError;
use super::engine::TurnOutcome;
use super::sink::{EventSink, Recorder};
use crate::flush::flush_turn;
use crate::model::{CombatEvent, World};

/// Configuration for a run of turns.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub seed: u64,
    /// Stop after this many turns even if the world is still active.
    pub max_turns: u32,
    /// If set, write a checkpoint directory here after every turn.
    pub flush_dir: Option<PathBuf>,
    /// End the run at the first turn with no activity.
    pub stop_when_quiet: bool,
}

impl SimConfig {
    pub fn new(seed: u64, max_turns: u32) -> Self {
        Self {
            seed,
            max_turns,
            flush_dir: None,
            stop_when_quiet: true,
        }
    }

    pub fn stop_when_quiet(mut self, stop: bool) -> Self {
        self.stop_when_quiet = stop;
        self
    }

    pub fn flush_to(mut self, dir: impl Into<PathBuf>) -> Self {
        self.flush_dir = Some(dir.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub turns_run: u32,
    /// The world's turn counter when the run stopped.
    pub last_turn: u32,
    /// True if the last turn run saw no activity.
    pub quiescent: bool,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("turn failed: {0}")]
    Turn(#[from] TurnError),
    #[error("failed to write checkpoint: {0}")]
    Flush(#[from] io::Error),
}

/// Run turns until one passes with no activity or `config.max_turns` is reached.
///
/// Creates a deterministic RNG from `config.seed`, so the same seed and world
/// always play out the same way. Stops at the first failed turn; checkpoints
/// are only written for turns that completed.
pub fn run(
    world: &mut World,
    config: &SimConfig,
    sink: &mut dyn EventSink,
) -> Result<RunSummary, RunError> {
    run_with(world, config, sink, |_, _, _| Ok(()))
}

/// Like [`run`], calling `on_turn` after each completed turn and its checkpoint.
///
/// An error from `on_turn` ends the run.
pub fn run_with<F>(
    world: &mut World,
    config: &SimConfig,
    sink: &mut dyn EventSink,
    mut on_turn: F,
) -> Result<RunSummary, RunError>
where
    F: FnMut(&World, &TurnOutcome, &[CombatEvent]) -> io::Result<()>,
{
    validate(world)?;

    let mut engine = TurnEngine::seeded(config.seed);
    let mut summary = RunSummary {
        turns_run: 0,
        last_turn: world.turn_id,
        quiescent: false,
    };

    while summary.turns_run < config.max_turns {
        let mut recorder = Recorder::new(sink);
        let outcome = engine.run_turn(world, &mut recorder)?;
        let events = recorder.into_events();
        summary.turns_run += 1;
        summary.last_turn = outcome.turn_id;
        summary.quiescent = !outcome.active();

        if let Some(dir) = &config.flush_dir {
            let checkpoint_dir = dir.join(format!("turn_{:06}", outcome.turn_id));
            flush_turn(world, &events, &checkpoint_dir)?;
        }
        on_turn(&*world, &outcome, &events)?;

        tracing::debug!(
            turn_id = outcome.turn_id,
            actions = events.iter().filter(|e| e.is_activity()).count(),
            events = events.len(),
            "turn recorded"
        );

        if summary.quiescent && config.stop_when_quiet {
            tracing::info!(turn_id = outcome.turn_id, "world is quiet");
            break;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    /// A sure-hit army grinding down a 3 HP settlement that cannot fight back.
    fn slow_siege() -> World {
        let mut s = Scenario::new();
        s.actor("Aundair");
        s.actor("Thrane");
        s.settlement("Olath", "Thrane").hp(3);
        s.army("First Cog", "Aundair", "Olath")
            .attack_roll("1d20+100")
            .damage_roll("1d1");
        s.build()
    }

    #[test]
    fn stops_when_the_world_goes_quiet() {
        let mut world = slow_siege();
        let mut events: Vec<CombatEvent> = Vec::new();

        let summary = run(&mut world, &SimConfig::new(42, 100), &mut events).unwrap();

        // Three turns to take it, one more to notice nothing happens.
        assert_eq!(summary.turns_run, 4);
        assert_eq!(summary.last_turn, 4);
        assert!(summary.quiescent);
        assert!(world.settlements["Olath"].occupied);
        assert_eq!(world.settlements["Olath"].allegiance, "Aundair");
    }

    #[test]
    fn stops_at_the_turn_limit() {
        let mut world = slow_siege();

        let summary = run(&mut world, &SimConfig::new(42, 2), &mut ()).unwrap();

        assert_eq!(summary.turns_run, 2);
        assert!(!summary.quiescent);
        assert_eq!(world.settlements["Olath"].hp.current(), 1);
    }

    #[test]
    fn zero_turns_does_nothing() {
        let mut world = slow_siege();
        let summary = run(&mut world, &SimConfig::new(42, 0), &mut ()).unwrap();
        assert_eq!(summary.turns_run, 0);
        assert_eq!(world.turn_id, 0);
    }

    #[test]
    fn unknown_actor_fails_before_any_turn() {
        let mut world = slow_siege();
        world.actors.remove("Aundair");

        let err = run(&mut world, &SimConfig::new(42, 5), &mut ()).unwrap_err();

        assert!(matches!(err, RunError::Turn(TurnError::UnknownActor { .. })));
        assert_eq!(world.turn_id, 0);
    }

    #[test]
    fn same_seed_same_history() {
        let build = || {
            let mut s = Scenario::new();
            s.actor("Aundair");
            s.actor("Thrane");
            s.settlement("Olath", "Thrane").war_guard(true).hp(30);
            s.army("First Cog", "Aundair", "Olath").hp(30);
            s.army("Second Cog", "Aundair", "Olath").hp(30);
            s.build()
        };
        let (mut a, mut b) = (build(), build());
        let (mut events_a, mut events_b): (Vec<CombatEvent>, Vec<CombatEvent>) = (Vec::new(), Vec::new());

        run(&mut a, &SimConfig::new(7, 20), &mut events_a).unwrap();
        run(&mut b, &SimConfig::new(7, 20), &mut events_b).unwrap();

        assert_eq!(events_a, events_b);
        assert_eq!(a, b);
    }

    #[test]
    fn writes_a_checkpoint_per_turn() {
        let mut world = slow_siege();
        let dir = tempfile::tempdir().unwrap();
        let config = SimConfig::new(42, 2).flush_to(dir.path());

        run(&mut world, &config, &mut ()).unwrap();

        assert!(dir.path().join("turn_000001").join("events.jsonl").exists());
        assert!(dir.path().join("turn_000002").join("armies.jsonl").exists());
        assert!(!dir.path().join("turn_000003").exists());
    }

    #[test]
    fn keeps_going_through_quiet_turns_when_asked() {
        let mut world = slow_siege();
        let config = SimConfig::new(42, 6).stop_when_quiet(false);

        let summary = run(&mut world, &config, &mut ()).unwrap();

        assert_eq!(summary.turns_run, 6);
        assert_eq!(world.turn_id, 6);
        assert!(summary.quiescent);
    }

    #[test]
    fn hook_sees_every_completed_turn() {
        let mut world = slow_siege();
        let mut seen: Vec<(u32, usize, bool)> = Vec::new();

        run_with(&mut world, &SimConfig::new(42, 100), &mut (), |world, outcome, events| {
            assert_eq!(world.turn_id, outcome.turn_id);
            let actions = events.iter().filter(|e| e.is_activity()).count();
            seen.push((outcome.turn_id, actions, outcome.active()));
            Ok(())
        })
        .unwrap();

        assert_eq!(seen, vec![(1, 1, true), (2, 1, true), (3, 1, true), (4, 0, false)]);
    }

    #[test]
    fn hook_failure_ends_the_run() {
        let mut world = slow_siege();

        let err = run_with(&mut world, &SimConfig::new(42, 100), &mut (), |_, outcome, _| {
            if outcome.turn_id == 2 {
                Err(io::Error::other("disk full"))
            } else {
                Ok(())
            }
        })
        .unwrap_err();

        assert!(matches!(err, RunError::Flush(_)));
        assert_eq!(world.turn_id, 2);
    }
}
