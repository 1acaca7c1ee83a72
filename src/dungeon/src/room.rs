//src/dungeon/src/room.rs
use std::collections::BTreeMap;

use crate::content::Content;
use crate::direction::Direction;

/// 网格坐标 (x, y)
pub type Coord = (i32, i32);

pub const LABEL_ENTRY: &str = "Safe Entrance";
pub const LABEL_EMPTY: &str = "Empty";

/// 地牢中的一个房间（图节点）
///
/// Neighbours are stored as coordinates and resolved through the owning
/// `DungeonGraph`, never as direct references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub initial: bool,
    pub connections: BTreeMap<Direction, Coord>,
    pub content: Option<Content>,
    pub visited: bool,
    /// Manhattan distance from the entry, fixed at creation.
    pub distance: u32,
    pub state_label: String,
}

impl Room {
    pub fn new(id: u32, x: i32, y: i32, initial: bool, distance: u32) -> Self {
        Self {
            id,
            x,
            y,
            initial,
            connections: BTreeMap::new(),
            content: None,
            visited: false,
            distance,
            state_label: if initial { LABEL_ENTRY } else { LABEL_EMPTY }.to_string(),
        }
    }

    pub fn coord(&self) -> Coord {
        (self.x, self.y)
    }

    pub fn neighbor(&self, direction: Direction) -> Option<Coord> {
        self.connections.get(&direction).copied()
    }

    /// 可用出口
    pub fn exits(&self) -> impl Iterator<Item = Direction> + '_ {
        self.connections.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    /// Places content and updates the display label. A room receives content
    /// at most once; returns `false` if it already holds something.
    pub fn place(&mut self, content: Content) -> bool {
        if self.content.is_some() {
            return false;
        }
        self.state_label = content.kind().label().to_string();
        self.content = Some(content);
        true
    }
}

pub fn manhattan(a: Coord, b: Coord) -> u32 {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}
