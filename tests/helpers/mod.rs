//! Shared builders for the integration tests.
#![allow(dead_code)]

use dungeon::{Content, Coord, Direction, DungeonGraph, DungeonRng, Event, Room};
use hero::Explorer;
use std::collections::{BTreeSet, VecDeque};

/// A generated and populated world with at least `min_rooms` rooms, found by
/// scanning seeds upward from `seed`.
pub fn populated_world(seed: u64, min_rooms: usize) -> (DungeonGraph, Explorer, DungeonRng) {
    (seed..)
        .find_map(|s| {
            let mut rng = DungeonRng::new(s);
            let mut graph = DungeonGraph::generate(10, 10, 30, &mut rng).ok()?;
            if graph.len() < min_rooms {
                return None;
            }
            graph.distribute(&mut rng).ok()?;
            let explorer = Explorer::new(&graph, 10).ok()?;
            Some((graph, explorer, rng))
        })
        .unwrap()
}

/// Like [`populated_world`], but the world is guaranteed to hold a portal.
pub fn portal_world(seed: u64) -> (DungeonGraph, Explorer, DungeonRng) {
    (seed..)
        .map(|s| populated_world(s, 10))
        .find(|(graph, _, _)| graph.rooms().any(has_portal))
        .unwrap()
}

pub fn has_portal(room: &Room) -> bool {
    matches!(room.content, Some(Content::Event(Event::Portal(_))))
}

/// Rooms reachable from the entry by following connections.
pub fn reachable(graph: &DungeonGraph) -> BTreeSet<Coord> {
    let mut seen = BTreeSet::new();
    let mut queue: VecDeque<Coord> = graph.entry_coord().into_iter().collect();
    while let Some(coord) = queue.pop_front() {
        if !seen.insert(coord) {
            continue;
        }
        if let Some(room) = graph.room(coord) {
            queue.extend(room.connections.values().copied());
        }
    }
    seen
}

/// Two rooms joined east-west; the entry at (0, 0) and `content` at (1, 0).
pub fn pair_with(content: Content) -> DungeonGraph {
    let mut entry = Room::new(1, 0, 0, true, 0);
    entry.connections.insert(Direction::East, (1, 0));
    let mut other = Room::new(2, 1, 0, false, 1);
    other.connections.insert(Direction::West, (0, 0));
    other.place(content);
    let mut graph = DungeonGraph::from_rooms(2, 1, 3, [entry, other]).unwrap();
    graph.verify_connections().unwrap();
    graph.bind_entry((0, 0)).unwrap();
    graph.rebind_portals();
    graph
}
