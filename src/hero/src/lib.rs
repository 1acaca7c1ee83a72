//src/hero/src/lib.rs
//! 探险者：位置、生命值、背包，以及与房间内容的交互

pub mod combat;
mod core;
mod interact;

pub use self::{
    core::{Explorer, HeroError, Movement},
    interact::Interaction,
};

#[cfg(test)]
pub(crate) mod test_support {
    use dungeon::{Direction, DungeonGraph, Room};

    /// A straight east-west corridor of `len` rooms with the entry at (0, 0).
    pub fn corridor(len: i32) -> DungeonGraph {
        let rooms = (0..len).map(|x| {
            let mut room = Room::new(x as u32 + 1, x, 0, x == 0, x as u32);
            if x > 0 {
                room.connections.insert(Direction::West, (x - 1, 0));
            }
            if x + 1 < len {
                room.connections.insert(Direction::East, (x + 1, 0));
            }
            room
        });
        let mut graph = DungeonGraph::from_rooms(len, 1, len as u32 + 1, rooms).unwrap();
        graph.verify_connections().unwrap();
        graph.bind_entry((0, 0)).unwrap();
        graph
    }
}
