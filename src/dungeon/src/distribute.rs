//src/dungeon/src/distribute.rs
use error::GameError;
use std::cmp::Reverse;
use tracing::{debug, info};

use crate::content::{Boss, Content, Monster};
use crate::graph::DungeonGraph;
use crate::rng::DungeonRng;
use crate::room::Coord;

/// How many of the farthest rooms compete for the boss.
pub const BOSS_CANDIDATES: usize = 3;

/// 内容分配结果
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Distribution {
    pub boss: Option<Coord>,
    /// Non-entry rooms still empty after the boss was placed.
    pub eligible: usize,
    pub monsters: usize,
    pub treasure: usize,
    pub events: usize,
}

/// Bucket sizes drawn as random fractions of the eligible pool, rescaled so
/// that they never exceed it. Monsters absorb the rounding slack.
pub fn bucket_sizes(eligible: usize, rng: &mut DungeonRng) -> (usize, usize, usize) {
    let fraction = |rng: &mut DungeonRng, low: usize, high: usize| {
        rng.random_range(eligible * low / 100..=eligible * high / 100)
    };
    let mut monsters = fraction(rng, 20, 30);
    let mut treasure = fraction(rng, 15, 25);
    let mut events = fraction(rng, 5, 10);

    let total = monsters + treasure + events;
    if total > eligible {
        events = events * eligible / total;
        treasure = treasure * eligible / total;
        monsters = eligible.saturating_sub(treasure + events);
    }
    (monsters, treasure, events)
}

impl DungeonGraph {
    /// 放置首领与其余内容
    ///
    /// Must run once, right after generation. The boss goes to one of the
    /// three farthest non-entry rooms; the remaining rooms are shuffled
    /// before being split into monster, treasure and event buckets so the
    /// growth order of the builder does not skew placement.
    pub fn distribute(&mut self, rng: &mut DungeonRng) -> Result<Distribution, GameError> {
        if self.boss_room().is_some() {
            return Err(GameError::AlreadyDistributed);
        }

        let mut candidates: Vec<(Coord, u32)> = self
            .rooms()
            .filter(|room| !room.initial)
            .map(|room| (room.coord(), room.distance))
            .collect();
        if candidates.is_empty() {
            debug!("no rooms besides the entry; nothing to distribute");
            return Ok(Distribution::default());
        }

        // 1. 首领
        candidates.sort_by_key(|&(_, distance)| Reverse(distance));
        let top = candidates.len().min(BOSS_CANDIDATES);
        let (boss_coord, boss_distance) = candidates[rng.random_range(0..top)];
        if let Some(room) = self.room_mut(boss_coord) {
            room.place(Content::Boss(Boss::for_distance(boss_distance)));
        }
        self.set_boss_room(boss_coord);
        debug!(x = boss_coord.0, y = boss_coord.1, distance = boss_distance, "placed boss");

        // 2. 打乱剩余房间，消除生长方向带来的偏差
        let mut pool: Vec<(Coord, u32)> = candidates
            .into_iter()
            .filter(|&(coord, _)| self.room(coord).is_some_and(|r| r.is_empty()))
            .collect();
        rng.shuffle(&mut pool);

        let eligible = pool.len();
        let (monsters, treasure, events) = bucket_sizes(eligible, rng);

        // 3. 顺序分配
        let graph_id = self.id();
        for (index, &(coord, distance)) in pool.iter().enumerate() {
            let content = if index < monsters {
                Content::Monster(Monster::for_distance(distance))
            } else if index < monsters + treasure {
                Content::treasure(distance)
            } else if index < monsters + treasure + events {
                match rng.random_range(0..3) {
                    0 => Content::trap(),
                    1 => Content::heal(),
                    _ => Content::portal(graph_id),
                }
            } else {
                break;
            };
            if let Some(room) = self.room_mut(coord) {
                room.place(content);
            }
        }

        info!(eligible, monsters, treasure, events, "content distributed");
        Ok(Distribution {
            boss: Some(boss_coord),
            eligible,
            monsters,
            treasure,
            events,
        })
    }
}
