use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::snapshot::{load_world, save_world};
use crate::model::World;

pub const STATE_FILENAME: &str = "state.json";

/// Which world snapshot a simulation is up to.
///
/// Lives in `<state_dir>/state.json`. The world after step N is stored next to
/// it as `<name>.<N>.json`, so every completed step stays on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    pub name: String,
    pub step: u32,
}

impl SimulationState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            step: 0,
        }
    }

    pub fn state_path(state_dir: &Path) -> PathBuf {
        state_dir.join(STATE_FILENAME)
    }

    pub fn load(state_dir: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(Self::state_path(state_dir))?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn write(&self, state_dir: &Path) -> io::Result<()> {
        fs::create_dir_all(state_dir)?;
        let text = serde_json::to_string_pretty(self)?;
        fs::write(Self::state_path(state_dir), text + "\n")
    }

    /// Path of the world snapshot for `step`.
    pub fn world_path(&self, state_dir: &Path, step: u32) -> PathBuf {
        state_dir.join(format!("{}.{step}.json", document_id(&self.name)))
    }

    pub fn load_world(&self, state_dir: &Path) -> io::Result<World> {
        load_world(&self.world_path(state_dir, self.step))
    }

    /// Save `world` as the next step, then advance the state file to point at it.
    pub fn commit(&mut self, state_dir: &Path, world: &World) -> io::Result<()> {
        let next = self.step + 1;
        save_world(world, &self.world_path(state_dir, next))?;
        self.step = next;
        self.write(state_dir)
    }

    /// Save `world` as the snapshot for the current step (used when seeding).
    pub fn save_current(&self, state_dir: &Path, world: &World) -> io::Result<()> {
        save_world(world, &self.world_path(state_dir, self.step))?;
        self.write(state_dir)
    }
}

/// Lower-case, trimmed, spaces replaced with underscores.
pub fn document_id(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}
