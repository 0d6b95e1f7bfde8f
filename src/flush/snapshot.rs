use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::model::World;

/// Write the whole world as a single JSON document, replacing any existing file.
pub fn save_world(world: &World, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, world)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

pub fn load_world(path: &Path) -> io::Result<World> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
