// src/config.rs
use clap::Parser;
use error::GameError;
use std::{path::PathBuf, process, time::SystemTime};

/// Dungeon Explorer - 随机生成的地牢探险
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "dungeon_explorer")]
#[command(version, about = "Explore a procedurally generated dungeon", long_about = None)]
pub struct GameConfig {
    /// Map width in cells
    #[arg(long, default_value_t = 10)]
    pub width: i32,

    /// Map height in cells
    #[arg(long, default_value_t = 10)]
    pub height: i32,

    /// Upper bound on the number of rooms
    #[arg(long, default_value_t = 30)]
    pub rooms: usize,

    /// Starting (and maximum) hit points
    #[arg(long, default_value_t = 10)]
    pub hp: u32,

    /// RNG seed; derived from the clock when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where `save` writes the world (.json or .ron)
    #[arg(long, default_value = "dungeon_save.json")]
    pub save: PathBuf,

    /// Resume a saved world instead of generating one
    #[arg(long)]
    pub load: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            rooms: 30,
            hp: 10,
            seed: None,
            save: PathBuf::from("dungeon_save.json"),
            load: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GameError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.rooms == 0 {
            return Err(GameError::InvalidRoomCount);
        }
        if self.hp == 0 {
            return Err(GameError::InvalidHp);
        }
        Ok(())
    }

    /// The configured seed, or one mixed from the clock and process id.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            let time = SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or_default();
            (time ^ process::id() as u128) as u64
        })
    }
}
