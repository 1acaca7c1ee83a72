//src/dungeon/src/builder.rs
use error::GameError;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::direction::Direction;
use crate::graph::DungeonGraph;
use crate::rng::DungeonRng;
use crate::room::{manhattan, Coord};

/// 每条边生成房间的概率
pub const EDGE_PROBABILITY: f64 = 0.6;

impl DungeonGraph {
    /// 生成地牢结构
    ///
    /// Grows a connected room network from a random border cell. Rooms are
    /// popped from the frontier at a random index, so growth is neither
    /// depth-first nor breadth-first. The result may hold fewer than
    /// `target_rooms` rooms when the frontier runs dry.
    pub fn generate(
        width: i32,
        height: i32,
        target_rooms: usize,
        rng: &mut DungeonRng,
    ) -> Result<Self, GameError> {
        if target_rooms == 0 {
            return Err(GameError::InvalidRoomCount);
        }
        let mut graph = DungeonGraph::new(width, height)?;

        let border = border_cells(width, height);
        let start = *rng.choose(&border).ok_or(GameError::MissingEntry)?;
        graph.add_room(start, true, 0);
        debug!(x = start.0, y = start.1, "placed entry room");

        let mut frontier: Vec<Coord> = vec![start];
        while !frontier.is_empty() && graph.len() < target_rooms {
            let current = frontier.remove(rng.random_range(0..frontier.len()));

            let mut directions = Direction::ALL;
            rng.shuffle(&mut directions);

            for direction in directions {
                if graph.len() >= target_rooms {
                    break;
                }
                let next = direction.step(current);
                if graph.in_bounds(next)
                    && graph.room(next).is_none()
                    && rng.random_bool(EDGE_PROBABILITY)
                {
                    graph.add_room(next, false, manhattan(next, start));
                    graph.connect(current, direction, next);
                    frontier.push(next);
                }
            }
        }

        if graph.len() < target_rooms {
            warn!(
                requested = target_rooms,
                created = graph.len(),
                "frontier exhausted before reaching the requested room count"
            );
        }
        info!(
            width,
            height,
            rooms = graph.len(),
            seed = rng.seed(),
            "dungeon structure generated"
        );
        Ok(graph)
    }
}

/// 所有边界格子（去重，按坐标排序）
fn border_cells(width: i32, height: i32) -> Vec<Coord> {
    let mut cells = BTreeSet::new();
    for x in 0..width {
        cells.insert((x, 0));
        cells.insert((x, height - 1));
    }
    for y in 0..height {
        cells.insert((0, y));
        cells.insert((width - 1, y));
    }
    cells.into_iter().collect()
}
