// src/command.rs
use dungeon::Direction;
use std::str::FromStr;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  north | south | east | west   (n, s, e, w)  move through a connection
  explore                       interact with the room's content
  look                          describe the current room
  status                        show hit points and inventory
  map                           draw the explored map
  stats                         dungeon statistics
  save | load                   write or read the save file
  help                          this list
  quit                          leave the game";

/// 玩家命令
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Explore,
    Look,
    Status,
    Map,
    Stats,
    Save,
    Load,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown command '{0}'. Type 'help' for a list.")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim();
        if let Ok(direction) = Direction::from_str(word) {
            return Ok(Command::Move(direction));
        }
        match word.to_ascii_lowercase().as_str() {
            "explore" => Ok(Command::Explore),
            "look" => Ok(Command::Look),
            "status" => Ok(Command::Status),
            "map" => Ok(Command::Map),
            "stats" => Ok(Command::Stats),
            "save" => Ok(Command::Save),
            "load" => Ok(Command::Load),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(UnknownCommand(word.to_string())),
        }
    }
}
