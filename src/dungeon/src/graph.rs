//src/dungeon/src/graph.rs
use error::GameError;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::content::{Content, Event};
use crate::direction::Direction;
use crate::room::{Coord, Room};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one `DungeonGraph` instance.
///
/// Portal events and explorers hold this instead of a pointer to the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GraphId(u64);

impl GraphId {
    pub const UNBOUND: GraphId = GraphId(0);

    fn fresh() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_bound(self) -> bool {
        self != GraphId::UNBOUND
    }
}

/// 地牢图：拥有全部房间
#[derive(Debug)]
pub struct DungeonGraph {
    id: GraphId,
    width: i32,
    height: i32,
    rooms: BTreeMap<Coord, Room>,
    entry: Option<Coord>,
    boss_room: Option<Coord>,
    next_id: u32,
}

/// 地图统计信息
#[derive(Clone, Debug, PartialEq)]
pub struct DungeonStats {
    pub total_rooms: usize,
    /// Room count per content kind, with `"empty"` for rooms without content.
    pub content: BTreeMap<String, usize>,
    pub average_connections: f64,
}

impl DungeonGraph {
    /// 创建空地图
    pub fn new(width: i32, height: i32) -> Result<Self, GameError> {
        if width <= 0 || height <= 0 {
            return Err(GameError::InvalidDimensions { width, height });
        }
        Ok(Self {
            id: GraphId::fresh(),
            width,
            height,
            rooms: BTreeMap::new(),
            entry: None,
            boss_room: None,
            next_id: 1,
        })
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn in_bounds(&self, (x, y): Coord) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    pub fn room(&self, coord: Coord) -> Option<&Room> {
        self.rooms.get(&coord)
    }

    pub fn room_mut(&mut self, coord: Coord) -> Option<&mut Room> {
        self.rooms.get_mut(&coord)
    }

    /// Rooms in coordinate order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn entry(&self) -> Option<&Room> {
        self.entry.and_then(|coord| self.rooms.get(&coord))
    }

    pub fn entry_coord(&self) -> Option<Coord> {
        self.entry
    }

    pub fn boss_room(&self) -> Option<Coord> {
        self.boss_room
    }

    /// Room reached by leaving `from` through `direction`, if connected.
    pub fn neighbor(&self, from: Coord, direction: Direction) -> Option<&Room> {
        self.room(from)?
            .neighbor(direction)
            .and_then(|coord| self.room(coord))
    }

    pub(crate) fn add_room(&mut self, (x, y): Coord, initial: bool, distance: u32) -> Coord {
        let room = Room::new(self.next_id, x, y, initial, distance);
        self.next_id += 1;
        self.rooms.insert((x, y), room);
        if initial {
            self.entry = Some((x, y));
        }
        (x, y)
    }

    pub(crate) fn connect(&mut self, from: Coord, direction: Direction, to: Coord) {
        if let Some(room) = self.rooms.get_mut(&from) {
            room.connections.insert(direction, to);
        }
        if let Some(room) = self.rooms.get_mut(&to) {
            room.connections.insert(direction.opposite(), from);
        }
    }

    pub(crate) fn set_boss_room(&mut self, coord: Coord) {
        self.boss_room = Some(coord);
    }

    pub fn stats(&self) -> DungeonStats {
        let mut content = BTreeMap::new();
        let mut total_connections = 0;
        for room in self.rooms.values() {
            let key = match &room.content {
                Some(c) => c.kind().to_string(),
                None => "empty".to_string(),
            };
            *content.entry(key).or_insert(0) += 1;
            total_connections += room.connections.len();
        }
        let average_connections = if self.rooms.is_empty() {
            0.0
        } else {
            total_connections as f64 / self.rooms.len() as f64
        };
        DungeonStats {
            total_rooms: self.rooms.len(),
            content,
            average_connections,
        }
    }

    // ------------------------------------------------------------------
    // Reconstruction. A saved world is rebuilt in two phases: the room
    // table is assembled from plain values first, then every relational
    // field is resolved against it in a fixed order.
    // ------------------------------------------------------------------

    /// Phase one: a fresh graph owning `rooms`, with no entry, boss or
    /// portal bindings yet.
    pub fn from_rooms(
        width: i32,
        height: i32,
        next_id: u32,
        rooms: impl IntoIterator<Item = Room>,
    ) -> Result<Self, GameError> {
        let mut graph = Self::new(width, height)?;
        let mut max_id = 0;
        for room in rooms {
            let coord = room.coord();
            if !graph.in_bounds(coord) {
                return Err(GameError::CorruptedSave(format!(
                    "room ({}, {}) lies outside the {}x{} map",
                    coord.0, coord.1, width, height
                )));
            }
            max_id = max_id.max(room.id);
            if graph.rooms.insert(coord, room).is_some() {
                return Err(GameError::CorruptedSave(format!(
                    "two rooms share ({}, {})",
                    coord.0, coord.1
                )));
            }
        }
        graph.next_id = next_id.max(max_id + 1);
        Ok(graph)
    }

    /// Every stored connection must name an existing room that links back.
    pub fn verify_connections(&self) -> Result<(), GameError> {
        for room in self.rooms.values() {
            for (&direction, &target) in &room.connections {
                let other = self.rooms.get(&target).ok_or_else(|| {
                    GameError::CorruptedSave(format!(
                        "room ({}, {}) connects {} to missing room ({}, {})",
                        room.x, room.y, direction, target.0, target.1
                    ))
                })?;
                if direction.step(room.coord()) != target
                    || other.neighbor(direction.opposite()) != Some(room.coord())
                {
                    return Err(GameError::CorruptedSave(format!(
                        "connection {} from ({}, {}) is not symmetric",
                        direction, room.x, room.y
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn bind_entry(&mut self, coord: Coord) -> Result<(), GameError> {
        let room = self
            .rooms
            .get(&coord)
            .ok_or(GameError::UnknownRoom(coord.0, coord.1))?;
        if !room.initial || room.distance != 0 {
            return Err(GameError::CorruptedSave(format!(
                "room ({}, {}) is not a valid entry",
                coord.0, coord.1
            )));
        }
        if let Some(other) = self.rooms.values().find(|r| r.initial && r.coord() != coord) {
            return Err(GameError::CorruptedSave(format!(
                "second entry room at ({}, {})",
                other.x, other.y
            )));
        }
        self.entry = Some(coord);
        Ok(())
    }

    pub fn bind_boss_room(&mut self, coord: Option<Coord>) -> Result<(), GameError> {
        if let Some(c) = coord {
            if !self.rooms.contains_key(&c) {
                return Err(GameError::UnknownRoom(c.0, c.1));
            }
        }
        self.boss_room = coord;
        Ok(())
    }

    /// Points every portal at this graph. Returns how many were rebound.
    pub fn rebind_portals(&mut self) -> usize {
        let id = self.id;
        let mut count = 0;
        for room in self.rooms.values_mut() {
            if let Some(Content::Event(Event::Portal(portal))) = room.content.as_mut() {
                portal.bind(id);
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Portal;

    fn line_graph() -> DungeonGraph {
        let mut graph = DungeonGraph::new(3, 1).unwrap();
        let a = graph.add_room((0, 0), true, 0);
        let b = graph.add_room((1, 0), false, 1);
        let c = graph.add_room((2, 0), false, 2);
        graph.connect(a, Direction::East, b);
        graph.connect(b, Direction::East, c);
        graph
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(matches!(
            DungeonGraph::new(0, 5),
            Err(GameError::InvalidDimensions { width: 0, height: 5 })
        ));
    }

    #[test]
    fn every_graph_gets_its_own_id() {
        let a = DungeonGraph::new(1, 1).unwrap();
        let b = DungeonGraph::new(1, 1).unwrap();
        assert_ne!(a.id(), b.id());
        assert!(a.id().is_bound());
    }

    #[test]
    fn connect_is_symmetric() {
        let graph = line_graph();
        assert_eq!(graph.neighbor((1, 0), Direction::West).map(Room::coord), Some((0, 0)));
        assert_eq!(graph.neighbor((0, 0), Direction::East).map(Room::coord), Some((1, 0)));
        assert!(graph.neighbor((0, 0), Direction::North).is_none());
        assert!(graph.verify_connections().is_ok());
    }

    #[test]
    fn stats_count_content_and_connections() {
        let mut graph = line_graph();
        graph.room_mut((2, 0)).unwrap().place(Content::heal());
        let stats = graph.stats();
        assert_eq!(stats.total_rooms, 3);
        assert_eq!(stats.content.get("event"), Some(&1));
        assert_eq!(stats.content.get("empty"), Some(&2));
        assert!((stats.average_connections - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn from_rooms_rejects_duplicate_coordinates() {
        let rooms = vec![Room::new(1, 0, 0, true, 0), Room::new(2, 0, 0, false, 0)];
        assert!(matches!(
            DungeonGraph::from_rooms(2, 2, 3, rooms),
            Err(GameError::CorruptedSave(_))
        ));
    }

    #[test]
    fn verify_connections_rejects_one_way_links() {
        let mut a = Room::new(1, 0, 0, true, 0);
        a.connections.insert(Direction::East, (1, 0));
        let b = Room::new(2, 1, 0, false, 1);
        let graph = DungeonGraph::from_rooms(2, 1, 3, vec![a, b]).unwrap();
        assert!(graph.verify_connections().is_err());
    }

    #[test]
    fn bind_entry_requires_initial_room() {
        let rooms = vec![Room::new(1, 0, 0, true, 0), Room::new(2, 1, 0, false, 1)];
        let mut graph = DungeonGraph::from_rooms(2, 1, 3, rooms).unwrap();
        assert!(graph.bind_entry((1, 0)).is_err());
        assert!(matches!(graph.bind_entry((5, 5)), Err(GameError::UnknownRoom(5, 5))));
        graph.bind_entry((0, 0)).unwrap();
        assert_eq!(graph.entry_coord(), Some((0, 0)));
    }

    #[test]
    fn rebind_portals_targets_this_graph() {
        let mut room = Room::new(2, 1, 0, false, 1);
        room.place(Content::Event(Event::Portal(Portal::unbound())));
        let mut graph =
            DungeonGraph::from_rooms(2, 1, 3, vec![Room::new(1, 0, 0, true, 0), room]).unwrap();
        assert_eq!(graph.rebind_portals(), 1);
        match &graph.room((1, 0)).unwrap().content {
            Some(Content::Event(Event::Portal(p))) => assert!(p.is_bound_to(graph.id())),
            other => panic!("unexpected content {:?}", other),
        }
    }
}
