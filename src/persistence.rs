//! Save and restore a complete world as versioned JSON.

use crate::error::{Result, SimError};
use crate::world::World;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

#[derive(Serialize)]
struct SaveFileRef<'a> {
    version: u32,
    world: &'a World,
}

#[derive(Deserialize)]
struct SaveHeader {
    version: u32,
}

#[derive(Deserialize)]
struct SaveFile {
    world: World,
}

/// Encode `world` into the save format
pub fn to_json(world: &World) -> Result<String> {
    Ok(serde_json::to_string(&SaveFileRef {
        version: SAVE_VERSION,
        world,
    })?)
}

/// Decode a world from the save format, rejecting other versions and
/// worlds that fail [`World::check_integrity`]
pub fn from_json(src: &str) -> Result<World> {
    let header: SaveHeader = serde_json::from_str(src)?;
    if header.version != SAVE_VERSION {
        return Err(SimError::UnsupportedVersion(header.version));
    }
    let save: SaveFile = serde_json::from_str(src)?;
    save.world.check_integrity()?;
    Ok(save.world)
}

pub fn save_world<P: AsRef<Path>>(world: &World, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(
        &mut writer,
        &SaveFileRef {
            version: SAVE_VERSION,
            world,
        },
    )?;
    writer.flush()?;
    info!(path = %path.display(), step = world.current_step(), "world saved");
    Ok(())
}

pub fn load_world<P: AsRef<Path>>(path: P) -> Result<World> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let world = from_json(&content)?;
    info!(path = %path.display(), step = world.current_step(), "world loaded");
    Ok(world)
}
