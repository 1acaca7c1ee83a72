// src/save/src/lib.rs
//! 存档：把地牢图与探险者压平成文档，并按两阶段重建

mod format;

pub use format::DocumentFormat;

use dungeon::{Boss, Content, Coord, Direction, DungeonGraph, Event, Monster, Portal, Room};
use error::GameError;
use hero::{Explorer, HeroError};
use items::Item;
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor},
};
use std::{collections::BTreeMap, fmt, fs, io::Write, path::Path};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Current document format version
pub const SAVE_VERSION: u32 = 1;

fn default_version() -> u32 {
    1 // Documents written before versioning
}

/// 整个世界的存档文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldDocument {
    pub map: MapRecord,
    pub explorer: ExplorerRecord,
    /// Keyed by `"(x, y)"`.
    pub rooms: BTreeMap<String, RoomRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRecord {
    #[serde(default = "default_version")]
    pub version: u32,
    pub width: i32,
    pub height: i32,
    pub next_id: u32,
    pub entry: Coord,
    #[serde(default)]
    pub boss_room: Option<Coord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerRecord {
    pub hp: u32,
    pub hp_max: u32,
    pub inventory: Vec<Item>,
    pub position: Coord,
    #[serde(default)]
    pub combat_bonus: u32,
}

/// 房间记录，连接只存坐标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub initial: bool,
    pub connections: BTreeMap<Direction, Coord>,
    pub content: Option<ContentRecord>,
    pub visited: bool,
    pub distance: u32,
    pub state: String,
}

/// 房间内容记录
///
/// The discriminator strings are part of the document format and must not
/// change. Portals carry no fields: their graph handle is rebuilt on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", content = "data")]
pub enum ContentRecord {
    #[serde(rename = "Tesoro")]
    Treasure { reward: Item },
    #[serde(rename = "Monstruo")]
    Monster { name: String, hp: u32, attack: u32 },
    #[serde(rename = "Jefe")]
    Boss {
        name: String,
        hp: u32,
        attack: u32,
        special_reward: Item,
    },
    #[serde(rename = "EventoTeletransporte")]
    Portal(PortalRecord),
    #[serde(rename = "EventoCuracion")]
    Heal { amount: u32 },
    #[serde(rename = "EventoTrampa")]
    Trap { damage: u32 },
}

/// Discriminator strings of every content record.
pub const CONTENT_TAGS: [&str; 6] = [
    "Tesoro",
    "Monstruo",
    "Jefe",
    "EventoTeletransporte",
    "EventoCuracion",
    "EventoTrampa",
];

/// 传送门记录：没有字段
///
/// JSON writes it as `{}` and RON as `()`. Reading accepts either shape, and
/// `null`, so a document survives a trip through both codecs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PortalRecord {}

impl<'de> Deserialize<'de> for PortalRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EmptyVisitor;

        impl<'de> Visitor<'de> for EmptyVisitor {
            type Value = PortalRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an empty portal record")
            }

            fn visit_unit<E: de::Error>(self) -> Result<PortalRecord, E> {
                Ok(PortalRecord {})
            }

            fn visit_none<E: de::Error>(self) -> Result<PortalRecord, E> {
                Ok(PortalRecord {})
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PortalRecord, A::Error> {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(PortalRecord {})
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<PortalRecord, A::Error> {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(PortalRecord {})
            }
        }

        deserializer.deserialize_any(EmptyVisitor)
    }
}

impl From<&Content> for ContentRecord {
    fn from(content: &Content) -> Self {
        match content {
            Content::Treasure { reward } => ContentRecord::Treasure {
                reward: reward.clone(),
            },
            Content::Monster(m) => ContentRecord::Monster {
                name: m.name.clone(),
                hp: m.hp,
                attack: m.attack,
            },
            Content::Boss(b) => ContentRecord::Boss {
                name: b.name.clone(),
                hp: b.hp,
                attack: b.attack,
                special_reward: b.special_reward.clone(),
            },
            Content::Event(Event::Portal(_)) => ContentRecord::Portal(PortalRecord {}),
            Content::Event(Event::Heal { amount }) => ContentRecord::Heal { amount: *amount },
            Content::Event(Event::Trap { damage }) => ContentRecord::Trap { damage: *damage },
        }
    }
}

impl From<ContentRecord> for Content {
    fn from(record: ContentRecord) -> Self {
        match record {
            ContentRecord::Treasure { reward } => Content::Treasure { reward },
            ContentRecord::Monster { name, hp, attack } => {
                Content::Monster(Monster { name, hp, attack })
            }
            ContentRecord::Boss {
                name,
                hp,
                attack,
                special_reward,
            } => Content::Boss(Boss {
                name,
                hp,
                attack,
                special_reward,
            }),
            ContentRecord::Portal(_) => Content::Event(Event::Portal(Portal::unbound())),
            ContentRecord::Heal { amount } => Content::Event(Event::Heal { amount }),
            ContentRecord::Trap { damage } => Content::Event(Event::Trap { damage }),
        }
    }
}

impl From<&Room> for RoomRecord {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            x: room.x,
            y: room.y,
            initial: room.initial,
            connections: room.connections.clone(),
            content: room.content.as_ref().map(ContentRecord::from),
            visited: room.visited,
            distance: room.distance,
            state: room.state_label.clone(),
        }
    }
}

impl RoomRecord {
    fn into_room(self) -> Room {
        Room {
            id: self.id,
            x: self.x,
            y: self.y,
            initial: self.initial,
            connections: self.connections,
            content: self.content.map(Content::from),
            visited: self.visited,
            distance: self.distance,
            state_label: self.state,
        }
    }
}

/// 房间键 `"(x, y)"`
pub fn room_key((x, y): Coord) -> String {
    format!("({}, {})", x, y)
}

pub fn parse_room_key(key: &str) -> Result<Coord, GameError> {
    let bad = || GameError::CorruptedSave(format!("malformed room key {:?}", key));
    let inner = key
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(bad)?;
    let (x, y) = inner.split_once(',').ok_or_else(bad)?;
    let x = x.trim().parse().map_err(|_| bad())?;
    let y = y.trim().parse().map_err(|_| bad())?;
    Ok((x, y))
}

fn hero_failure(err: HeroError) -> GameError {
    match err {
        HeroError::Game(e) => e,
        other => GameError::CorruptedSave(other.to_string()),
    }
}

impl WorldDocument {
    /// 捕获当前世界
    pub fn capture(graph: &DungeonGraph, explorer: &Explorer) -> Result<Self, GameError> {
        let entry = graph.entry_coord().ok_or(GameError::MissingEntry)?;
        if explorer.graph() != graph.id() {
            return Err(GameError::StaleReference(
                "explorer does not belong to this dungeon".into(),
            ));
        }
        let rooms = graph
            .rooms()
            .map(|room| (room_key(room.coord()), RoomRecord::from(room)))
            .collect();
        Ok(Self {
            map: MapRecord {
                version: SAVE_VERSION,
                width: graph.width(),
                height: graph.height(),
                next_id: graph.next_id(),
                entry,
                boss_room: graph.boss_room(),
            },
            explorer: ExplorerRecord {
                hp: explorer.hp(),
                hp_max: explorer.hp_max(),
                inventory: explorer.inventory().to_vec(),
                position: explorer.position(),
                combat_bonus: explorer.combat_bonus(),
            },
            rooms,
        })
    }

    /// 重建世界
    ///
    /// Rooms are first created from their plain values. Relations are then
    /// resolved in order: connections, entry, boss room, portals, and last
    /// the explorer's position. Nothing is returned unless every step holds.
    pub fn restore(self) -> Result<(DungeonGraph, Explorer), GameError> {
        let WorldDocument {
            map,
            explorer,
            rooms,
        } = self;
        if map.version > SAVE_VERSION {
            return Err(GameError::VersionMismatch(format!(
                "document version {} is newer than supported version {}",
                map.version, SAVE_VERSION
            )));
        }

        let mut built = Vec::with_capacity(rooms.len());
        for (key, record) in rooms {
            let coord = parse_room_key(&key)?;
            if coord != (record.x, record.y) {
                return Err(GameError::CorruptedSave(format!(
                    "room keyed {} claims position ({}, {})",
                    key, record.x, record.y
                )));
            }
            built.push(record.into_room());
        }
        let mut graph = DungeonGraph::from_rooms(map.width, map.height, map.next_id, built)?;

        graph.verify_connections()?;
        graph.bind_entry(map.entry)?;
        graph.bind_boss_room(map.boss_room)?;
        let portals = graph.rebind_portals();
        debug!(portals, "portals rebound");

        let mut restored = Explorer::restore(
            explorer.position,
            explorer.hp,
            explorer.hp_max,
            explorer.inventory,
            explorer.combat_bonus,
        )
        .map_err(hero_failure)?;
        restored.bind(&graph).map_err(hero_failure)?;

        Ok((graph, restored))
    }
}

/// 保存到文件（按扩展名选择格式）
///
/// Writes to a temporary file in the same directory and renames it over the
/// target, so an interrupted save never leaves a partial document behind.
pub fn save_world(
    path: impl AsRef<Path>,
    graph: &DungeonGraph,
    explorer: &Explorer,
) -> Result<(), GameError> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    let text = format.encode(&WorldDocument::capture(graph, explorer)?)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(text.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| GameError::IoError(e.error))?;

    info!(path = %path.display(), rooms = graph.len(), "world saved");
    Ok(())
}

/// 从文件加载
pub fn load_world(path: impl AsRef<Path>) -> Result<(DungeonGraph, Explorer), GameError> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    let text = fs::read_to_string(path)?;
    let world = format.decode(&text)?.restore()?;
    info!(path = %path.display(), rooms = world.0.len(), "world loaded");
    Ok(world)
}
