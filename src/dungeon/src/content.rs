//src/dungeon/src/content.rs
use items::Item;
use std::fmt;

use crate::graph::GraphId;

pub const MONSTER_NAME: &str = "Wild Orc";
pub const BOSS_NAME: &str = "Great Dark Lord";
pub const TRAP_DAMAGE: u32 = 2;
pub const HEAL_AMOUNT: u32 = 3;

/// 房间内容：宝藏、怪物、首领或随机事件
///
/// Each variant is consumed exactly once; the room's `content` goes back to
/// `None` after a completed interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Treasure { reward: Item },
    Monster(Monster),
    Boss(Boss),
    Event(Event),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentKind {
    Treasure,
    Monster,
    Boss,
    Event,
}

impl ContentKind {
    /// Label shown for a room holding this kind of content.
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Treasure => "Treasure",
            ContentKind::Monster => "Monster",
            ContentKind::Boss => "Boss",
            ContentKind::Event => "Event",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Monster {
    pub name: String,
    pub hp: u32,
    pub attack: u32,
}

impl Monster {
    /// 根据距离生成怪物
    pub fn for_distance(distance: u32) -> Self {
        Self {
            name: MONSTER_NAME.to_string(),
            hp: 5 + 2 * distance,
            attack: 2 + distance / 2,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Boss {
    pub name: String,
    pub hp: u32,
    pub attack: u32,
    pub special_reward: Item,
}

impl Boss {
    pub fn for_distance(distance: u32) -> Self {
        Self {
            name: BOSS_NAME.to_string(),
            hp: 20 + 5 * distance,
            attack: 5 + 2 * distance,
            special_reward: Item::boss_crown(distance),
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Trap { damage: u32 },
    Heal { amount: u32 },
    Portal(Portal),
}

/// 传送门事件
///
/// Holds a handle to the graph it teleports within. The handle is never
/// persisted; loading a world rebinds it to the freshly built graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Portal {
    graph: GraphId,
}

impl Portal {
    pub fn new(graph: GraphId) -> Self {
        Self { graph }
    }

    /// A portal read back from a document, not yet tied to any graph.
    pub fn unbound() -> Self {
        Self {
            graph: GraphId::UNBOUND,
        }
    }

    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn is_bound_to(&self, graph: GraphId) -> bool {
        graph.is_bound() && self.graph == graph
    }

    pub(crate) fn bind(&mut self, graph: GraphId) {
        self.graph = graph;
    }
}

impl Content {
    pub fn treasure(distance: u32) -> Self {
        Content::Treasure {
            reward: Item::gem(distance),
        }
    }

    pub fn trap() -> Self {
        Content::Event(Event::Trap {
            damage: TRAP_DAMAGE,
        })
    }

    pub fn heal() -> Self {
        Content::Event(Event::Heal {
            amount: HEAL_AMOUNT,
        })
    }

    pub fn portal(graph: GraphId) -> Self {
        Content::Event(Event::Portal(Portal::new(graph)))
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Content::Treasure { .. } => ContentKind::Treasure,
            Content::Monster(_) => ContentKind::Monster,
            Content::Boss(_) => ContentKind::Boss,
            Content::Event(_) => ContentKind::Event,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Content::Treasure { reward } => format!("A glittering treasure: {}.", reward.name),
            Content::Monster(m) => {
                format!("A monster ({}) with {} HP blocks the way.", m.name, m.hp)
            }
            Content::Boss(b) => format!("The final boss ({}) with {} HP. Danger!", b.name, b.hp),
            Content::Event(Event::Trap { .. }) => {
                "A pressure plate hides a trap. Careful.".to_string()
            }
            Content::Event(Event::Heal { amount }) => {
                format!("A magic fountain radiates healing (+{} HP).", amount)
            }
            Content::Event(Event::Portal(_)) => {
                "An unstable portal hums here: you could end up anywhere you've been.".to_string()
            }
        }
    }
}
