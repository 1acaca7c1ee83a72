//! Dungeon Explorer: 地牢生成、探险与存档的上层组装

pub mod command;
pub mod config;
pub mod render;
pub mod session;

pub use command::{Command, UnknownCommand};
pub use config::GameConfig;
pub use session::{GameSession, Progress};
