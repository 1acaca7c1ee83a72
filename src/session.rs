// src/session.rs
use crate::{
    command::{Command, HELP},
    config::GameConfig,
    render::{map_snapshot, stats_report},
};
use dungeon::{DungeonGraph, DungeonRng};
use error::GameError;
use hero::{Explorer, HeroError, Movement};
use items::total_value;
use std::path::Path;
use tracing::info;

/// 游戏进度
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Playing,
    Victory,
    GameOver,
}

/// 一局游戏：地牢、探险者与随机源
pub struct GameSession {
    graph: DungeonGraph,
    explorer: Explorer,
    rng: DungeonRng,
    config: GameConfig,
}

impl GameSession {
    /// Generates and populates a fresh dungeon.
    pub fn new(config: GameConfig) -> Result<Self, HeroError> {
        config.validate()?;
        let seed = config.resolve_seed();
        let mut rng = DungeonRng::new(seed);
        let mut graph = DungeonGraph::generate(config.width, config.height, config.rooms, &mut rng)?;
        let report = graph.distribute(&mut rng)?;
        let explorer = Explorer::new(&graph, config.hp)?;
        // 起点在开局时即视为已访问
        if let Some(room) = graph.room_mut(explorer.position()) {
            room.visited = true;
        }
        info!(
            seed,
            rooms = graph.len(),
            boss = ?report.boss,
            "new dungeon ready"
        );
        Ok(Self {
            graph,
            explorer,
            rng,
            config,
        })
    }

    /// Resumes a saved world. Later interactions draw from the configured
    /// seed, since the document does not record RNG state.
    pub fn resume(config: GameConfig, path: impl AsRef<Path>) -> Result<Self, GameError> {
        let (graph, explorer) = save::load_world(path)?;
        let rng = DungeonRng::new(config.resolve_seed());
        Ok(Self {
            graph,
            explorer,
            rng,
            config,
        })
    }

    pub fn graph(&self) -> &DungeonGraph {
        &self.graph
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn progress(&self) -> Progress {
        if !self.explorer.is_alive() {
            return Progress::GameOver;
        }
        let boss_cleared = self
            .graph
            .boss_room()
            .and_then(|c| self.graph.room(c))
            .is_some_and(|room| room.content.is_none());
        if boss_cleared {
            Progress::Victory
        } else {
            Progress::Playing
        }
    }

    pub fn save(&self) -> Result<(), GameError> {
        save::save_world(&self.config.save, &self.graph, &self.explorer)
    }

    /// Replaces the current world with the one in the save file. On failure
    /// the current world is left untouched.
    pub fn load(&mut self) -> Result<(), GameError> {
        let (graph, explorer) = save::load_world(&self.config.save)?;
        self.graph = graph;
        self.explorer = explorer;
        Ok(())
    }

    /// 描述当前房间
    pub fn describe(&self) -> Result<String, HeroError> {
        let room = self.explorer.current_room(&self.graph)?;
        let content = match &room.content {
            Some(c) => c.description(),
            None => "Nothing here.".to_string(),
        };
        let exits: Vec<String> = room.exits().map(|d| d.to_string()).collect();
        Ok(format!(
            "Room ({}, {}) [{}]\n{}\nExits: {}",
            room.x,
            room.y,
            room.state_label,
            content,
            exits.join(", ")
        ))
    }

    pub fn status(&self) -> String {
        let e = &self.explorer;
        let (x, y) = e.position();
        let mut text = format!(
            "HP {}/{} | Position ({}, {}) | Items {} (value {})",
            e.hp(),
            e.hp_max(),
            x,
            y,
            e.inventory().len(),
            total_value(e.inventory())
        );
        if e.combat_bonus() > 0 {
            text.push_str(&format!(" | Combat bonus {}", e.combat_bonus()));
        }
        text
    }

    /// Runs one command and returns the text to show the player.
    pub fn execute(&mut self, command: Command) -> Result<String, HeroError> {
        let reply = match command {
            Command::Move(direction) => match self.explorer.move_to(&self.graph, direction)? {
                Movement::Moved(_) => format!("You go {}.\n{}", direction, self.describe()?),
                Movement::Blocked => format!("There is no passage {}.", direction),
            },
            Command::Explore => {
                let outcome = self.explorer.explore_room(&mut self.graph, &mut self.rng)?;
                outcome.to_string()
            }
            Command::Look => self.describe()?,
            Command::Status => self.status(),
            Command::Map => map_snapshot(&self.graph, &self.explorer),
            Command::Stats => stats_report(&self.graph.stats()),
            Command::Save => {
                self.save()?;
                format!("World saved to {}.", self.config.save.display())
            }
            Command::Load => {
                self.load()?;
                format!("World loaded from {}.", self.config.save.display())
            }
            Command::Help => HELP.to_string(),
            Command::Quit => "Farewell, explorer.".to_string(),
        };
        Ok(match self.progress() {
            Progress::Playing => reply,
            Progress::Victory => format!("{}\nThe dungeon is conquered. You win!", reply),
            Progress::GameOver => format!("{}\nYou have fallen. Game over.", reply),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon::Content;

    fn config(seed: u64) -> GameConfig {
        GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        }
    }

    #[test]
    fn same_seed_same_dungeon() {
        let a = GameSession::new(config(42)).unwrap();
        let b = GameSession::new(config(42)).unwrap();
        assert_eq!(a.graph().stats(), b.graph().stats());
        assert_eq!(a.graph().entry_coord(), b.graph().entry_coord());
        assert_eq!(a.graph().boss_room(), b.graph().boss_room());
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn entry_is_visited_from_the_start() {
        let session = GameSession::new(config(42)).unwrap();
        let entry = session.graph().entry().unwrap();
        assert!(entry.visited);
        assert_eq!(session.explorer().position(), entry.coord());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let bad = GameConfig {
            height: 0,
            ..config(1)
        };
        assert!(matches!(
            GameSession::new(bad),
            Err(HeroError::Game(GameError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn clearing_the_boss_room_is_victory() {
        let mut session = (1..)
            .map(|s| GameSession::new(config(s)).unwrap())
            .find(|s| s.graph().boss_room().is_some())
            .unwrap();
        assert_eq!(session.progress(), Progress::Playing);
        let boss = session.graph.boss_room().unwrap();
        let room = session.graph.room_mut(boss).unwrap();
        assert!(matches!(room.content, Some(Content::Boss(_))));
        room.content = None;
        assert_eq!(session.progress(), Progress::Victory);
    }

    #[test]
    fn zero_hp_is_game_over() {
        let mut session = GameSession::new(config(3)).unwrap();
        session.explorer.apply_damage(1_000);
        assert_eq!(session.progress(), Progress::GameOver);
        assert!(matches!(
            session.execute(Command::Explore),
            Err(HeroError::Fallen)
        ));
    }

    #[test]
    fn read_only_commands_leave_state_alone() {
        let mut session = GameSession::new(config(5)).unwrap();
        let before = session.explorer().clone();
        for command in [Command::Look, Command::Status, Command::Map, Command::Stats, Command::Help] {
            assert!(!session.execute(command).unwrap().is_empty());
        }
        assert_eq!(session.explorer(), &before);
    }

    #[test]
    fn blocked_move_reports_and_stays() {
        let mut session = GameSession::new(config(9)).unwrap();
        let start = session.explorer().position();
        let exits = session.explorer().exits(session.graph()).unwrap();
        if let Some(closed) = dungeon::Direction::ALL.into_iter().find(|d| !exits.contains(d)) {
            let reply = session.execute(Command::Move(closed)).unwrap();
            assert!(reply.starts_with("There is no passage"));
            assert_eq!(session.explorer().position(), start);
        }
    }
}
