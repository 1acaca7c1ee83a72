//src/dungeon/src/lib.rs
//! 地牢图：房间、内容、生成与分配

pub mod builder;
pub mod content;
pub mod direction;
pub mod distribute;
pub mod graph;
pub mod rng;
pub mod room;

pub use content::{Boss, Content, ContentKind, Event, Monster, Portal};
pub use direction::Direction;
pub use distribute::Distribution;
pub use graph::{DungeonGraph, DungeonStats, GraphId};
pub use rng::DungeonRng;
pub use room::{Coord, Room};

use error::GameError;

/// 生成新地牢（不含内容）
///
/// `room_count` is an upper bound; the graph may come back smaller.
pub fn new_dungeon(
    width: i32,
    height: i32,
    room_count: usize,
    rng: &mut DungeonRng,
) -> Result<DungeonGraph, GameError> {
    DungeonGraph::generate(width, height, room_count, rng)
}
