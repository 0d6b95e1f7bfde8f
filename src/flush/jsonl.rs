use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::model::{CombatEvent, World};

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Flush a finished turn to JSONL files in the given output directory.
///
/// Creates the output directory if it does not exist. Writes 4 files:
/// - `settlements.jsonl`: one Settlement per line, in name order
/// - `armies.jsonl`: one Army per line, destroyed armies included
/// - `actors.jsonl`: one Actor per line
/// - `events.jsonl`: the turn's combat events in the order they happened
pub fn flush_turn(world: &World, events: &[CombatEvent], output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(
        &output_dir.join("settlements.jsonl"),
        world.settlements.values(),
    )?;
    write_jsonl(&output_dir.join("armies.jsonl"), world.armies.values())?;
    write_jsonl(&output_dir.join("actors.jsonl"), world.actors.values())?;
    write_jsonl(&output_dir.join("events.jsonl"), events.iter())?;

    Ok(())
}
