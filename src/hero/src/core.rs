//src/hero/src/core.rs
use dungeon::{Coord, Direction, DungeonGraph, GraphId, Room};
use error::GameError;
use items::Item;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum HeroError {
    #[error("The explorer has fallen and cannot act")]
    Fallen,
    #[error("Hit points {hp} exceed the maximum of {hp_max}")]
    HpOutOfRange { hp: u32, hp_max: u32 },
    #[error(transparent)]
    Game(#[from] GameError),
}

/// 移动结果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    Moved(Coord),
    /// No connection that way; nothing changed.
    Blocked,
}

/// 探险者
///
/// Refers to its room by coordinate and to its dungeon by `GraphId`, so it
/// can be rebound after a teleport or a load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Explorer {
    hp: u32,
    hp_max: u32,
    inventory: Vec<Item>,
    position: Coord,
    combat_bonus: u32,
    graph: GraphId,
}

impl Explorer {
    /// 在入口处创建探险者
    pub fn new(graph: &DungeonGraph, hp: u32) -> Result<Self, HeroError> {
        if hp == 0 {
            return Err(GameError::InvalidHp.into());
        }
        let entry = graph.entry_coord().ok_or(GameError::MissingEntry)?;
        Ok(Self {
            hp,
            hp_max: hp,
            inventory: Vec::new(),
            position: entry,
            combat_bonus: 0,
            graph: graph.id(),
        })
    }

    /// Rebuilds an explorer from saved values. The result is not bound to
    /// any graph until [`Explorer::bind`] is called.
    pub fn restore(
        position: Coord,
        hp: u32,
        hp_max: u32,
        inventory: Vec<Item>,
        combat_bonus: u32,
    ) -> Result<Self, HeroError> {
        if hp_max == 0 {
            return Err(GameError::InvalidHp.into());
        }
        if hp > hp_max {
            return Err(HeroError::HpOutOfRange { hp, hp_max });
        }
        Ok(Self {
            hp,
            hp_max,
            inventory,
            position,
            combat_bonus,
            graph: GraphId::UNBOUND,
        })
    }

    pub fn bind(&mut self, graph: &DungeonGraph) -> Result<(), HeroError> {
        if graph.room(self.position).is_none() {
            return Err(GameError::UnknownRoom(self.position.0, self.position.1).into());
        }
        self.graph = graph.id();
        Ok(())
    }

    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn hp_max(&self) -> u32 {
        self.hp_max
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn combat_bonus(&self) -> u32 {
        self.combat_bonus
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Grants a bonus that wears off one step per successful move.
    pub fn grant_combat_bonus(&mut self, moves: u32) {
        self.combat_bonus += moves;
    }

    /// 受到伤害，生命值不低于0
    pub fn apply_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
        if !self.is_alive() {
            debug!("explorer has fallen");
        }
    }

    /// 治疗，不超过上限。Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.hp_max - self.hp);
        self.hp += restored;
        restored
    }

    pub(crate) fn pick_up(&mut self, item: Item) {
        self.inventory.push(item);
    }

    pub(crate) fn teleport(&mut self, to: Coord) {
        self.position = to;
    }

    pub(crate) fn ensure_bound(&self, graph: &DungeonGraph) -> Result<(), HeroError> {
        if self.graph.is_bound() && self.graph == graph.id() {
            Ok(())
        } else {
            Err(GameError::StaleReference("explorer is bound to another dungeon".into()).into())
        }
    }

    pub fn current_room<'g>(&self, graph: &'g DungeonGraph) -> Result<&'g Room, HeroError> {
        self.ensure_bound(graph)?;
        graph
            .room(self.position)
            .ok_or_else(|| GameError::UnknownRoom(self.position.0, self.position.1).into())
    }

    /// 可用方向
    pub fn exits(&self, graph: &DungeonGraph) -> Result<Vec<Direction>, HeroError> {
        Ok(self.current_room(graph)?.exits().collect())
    }

    /// 沿连接移动
    pub fn move_to(
        &mut self,
        graph: &DungeonGraph,
        direction: Direction,
    ) -> Result<Movement, HeroError> {
        if !self.is_alive() {
            return Err(HeroError::Fallen);
        }
        let Some(next) = self.current_room(graph)?.neighbor(direction) else {
            return Ok(Movement::Blocked);
        };
        self.position = next;
        self.combat_bonus = self.combat_bonus.saturating_sub(1);
        Ok(Movement::Moved(next))
    }
}
