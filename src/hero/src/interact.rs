//src/hero/src/interact.rs
use dungeon::{Content, Coord, DungeonGraph, DungeonRng, Event};
use error::GameError;
use items::Item;
use std::fmt;
use tracing::debug;

use crate::combat::{encounter, Outcome, BOSS_WIN_CHANCE, MONSTER_WIN_CHANCE};
use crate::core::{Explorer, HeroError};

/// 房间交互的叙述结果
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Interaction {
    Nothing,
    TreasureTaken { item: Item },
    MonsterDefeated { name: String },
    MonsterStruck { name: String, damage: u32, hp: u32, hp_max: u32 },
    AlreadyDefeated { name: String },
    BossDefeated { name: String, reward: Item },
    BossStruck { name: String, damage: u32, hp: u32, hp_max: u32 },
    TrapSprung { damage: u32, hp: u32 },
    Healed { restored: u32, hp: u32, hp_max: u32 },
    Teleported { to: Coord },
    PortalFlickered,
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interaction::Nothing => write!(f, "The room is empty. Nothing to do here."),
            Interaction::TreasureTaken { item } => {
                write!(f, "TREASURE! You found {} (value {}).", item.name, item.value)
            }
            Interaction::MonsterDefeated { name } => write!(f, "VICTORY! You defeated the {}.", name),
            Interaction::MonsterStruck { name, damage, hp, hp_max } => write!(
                f,
                "The {} hits you for {} damage. HP: {}/{}",
                name, damage, hp, hp_max
            ),
            Interaction::AlreadyDefeated { name } => write!(f, "The {} was already defeated.", name),
            Interaction::BossDefeated { name, reward } => write!(
                f,
                "EPIC VICTORY! You defeated the {} and claimed the {}.",
                name, reward.name
            ),
            Interaction::BossStruck { name, damage, hp, hp_max } => write!(
                f,
                "The {} deals {} damage. HP: {}/{}",
                name, damage, hp, hp_max
            ),
            Interaction::TrapSprung { damage, hp } => {
                write!(f, "TRAP! You lose {} HP. Remaining: {}.", damage, hp)
            }
            Interaction::Healed { restored, hp, hp_max } => write!(
                f,
                "You drink from the fountain and recover {} HP. HP: {}/{}",
                restored, hp, hp_max
            ),
            Interaction::Teleported { to } => {
                write!(f, "The portal pulls you to ({}, {}).", to.0, to.1)
            }
            Interaction::PortalFlickered => {
                write!(f, "The portal flickers but finds no destination.")
            }
        }
    }
}

impl Explorer {
    /// 与当前房间的内容交互
    ///
    /// Marks the room visited, then resolves its content completely before
    /// returning. Completed content is cleared; a monster or boss that wins
    /// the exchange stays in the room.
    pub fn explore_room(
        &mut self,
        graph: &mut DungeonGraph,
        rng: &mut DungeonRng,
    ) -> Result<Interaction, HeroError> {
        if !self.is_alive() {
            return Err(HeroError::Fallen);
        }
        self.ensure_bound(graph)?;

        let graph_id = graph.id();
        let position = self.position();
        let room = graph
            .room_mut(position)
            .ok_or(GameError::UnknownRoom(position.0, position.1))?;
        room.visited = true;

        if let Some(Content::Event(Event::Portal(portal))) = &room.content {
            if !portal.is_bound_to(graph_id) {
                return Err(GameError::StaleReference(format!(
                    "portal at ({}, {}) is bound to another dungeon",
                    position.0, position.1
                ))
                .into());
            }
        }

        let Some(content) = room.content.take() else {
            return Ok(Interaction::Nothing);
        };

        let (result, remaining) = match content {
            Content::Treasure { reward } => {
                self.pick_up(reward.clone());
                (Interaction::TreasureTaken { item: reward }, None)
            }
            Content::Monster(monster) if monster.is_defeated() => (
                Interaction::AlreadyDefeated {
                    name: monster.name.clone(),
                },
                Some(Content::Monster(monster)),
            ),
            Content::Monster(mut monster) => match encounter(rng, MONSTER_WIN_CHANCE) {
                Outcome::Victory => {
                    monster.hp = 0;
                    (Interaction::MonsterDefeated { name: monster.name }, None)
                }
                Outcome::Defeat => {
                    self.apply_damage(monster.attack);
                    let result = Interaction::MonsterStruck {
                        name: monster.name.clone(),
                        damage: monster.attack,
                        hp: self.hp(),
                        hp_max: self.hp_max(),
                    };
                    (result, Some(Content::Monster(monster)))
                }
            },
            Content::Boss(boss) if boss.is_defeated() => (
                Interaction::AlreadyDefeated {
                    name: boss.name.clone(),
                },
                Some(Content::Boss(boss)),
            ),
            Content::Boss(mut boss) => match encounter(rng, BOSS_WIN_CHANCE) {
                Outcome::Victory => {
                    boss.hp = 0;
                    self.pick_up(boss.special_reward.clone());
                    let result = Interaction::BossDefeated {
                        name: boss.name,
                        reward: boss.special_reward,
                    };
                    (result, None)
                }
                Outcome::Defeat => {
                    self.apply_damage(boss.attack);
                    let result = Interaction::BossStruck {
                        name: boss.name.clone(),
                        damage: boss.attack,
                        hp: self.hp(),
                        hp_max: self.hp_max(),
                    };
                    (result, Some(Content::Boss(boss)))
                }
            },
            Content::Event(Event::Trap { damage }) => {
                self.apply_damage(damage);
                (Interaction::TrapSprung { damage, hp: self.hp() }, None)
            }
            Content::Event(Event::Heal { amount }) => {
                let restored = self.heal(amount);
                let result = Interaction::Healed {
                    restored,
                    hp: self.hp(),
                    hp_max: self.hp_max(),
                };
                (result, None)
            }
            Content::Event(Event::Portal(_)) => (self.use_portal(graph, rng), None),
        };

        if let Some(content) = remaining {
            if let Some(room) = graph.room_mut(position) {
                room.content = Some(content);
            }
        }
        debug!(x = position.0, y = position.1, ?result, "room explored");
        Ok(result)
    }

    /// 传送到另一个已访问过的房间
    fn use_portal(&mut self, graph: &mut DungeonGraph, rng: &mut DungeonRng) -> Interaction {
        let here = self.position();
        let targets: Vec<Coord> = graph
            .rooms()
            .filter(|room| room.visited && room.coord() != here)
            .map(|room| room.coord())
            .collect();

        match rng.choose(&targets).copied() {
            Some(to) => {
                self.teleport(to);
                if let Some(room) = graph.room_mut(to) {
                    room.visited = true;
                }
                Interaction::Teleported { to }
            }
            None => Interaction::PortalFlickered,
        }
    }
}
