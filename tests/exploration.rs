mod helpers;

use dungeon::{Content, Direction, DungeonRng, Event, Portal};
use dungeon_explorer::{Command, GameConfig, GameSession, Progress};
use helpers::{pair_with, populated_world};
use hero::{Explorer, HeroError, Interaction, Movement};
use pretty_assertions::assert_eq;
use save::WorldDocument;

#[test]
fn same_seed_builds_the_same_world() {
    let config = GameConfig {
        seed: Some(42),
        ..GameConfig::default()
    };
    let a = GameSession::new(config.clone()).unwrap();
    let b = GameSession::new(config).unwrap();
    assert_ne!(a.graph().id(), b.graph().id());
    assert_eq!(
        WorldDocument::capture(a.graph(), a.explorer()).unwrap(),
        WorldDocument::capture(b.graph(), b.explorer()).unwrap()
    );
}

#[test]
fn fountain_heals_up_to_the_maximum() {
    let mut graph = pair_with(Content::heal());
    let mut explorer = Explorer::new(&graph, 10).unwrap();
    let mut rng = DungeonRng::new(1);
    explorer.apply_damage(1);

    assert_eq!(
        explorer.move_to(&graph, Direction::East).unwrap(),
        Movement::Moved((1, 0))
    );
    let outcome = explorer.explore_room(&mut graph, &mut rng).unwrap();
    assert_eq!(
        outcome,
        Interaction::Healed {
            restored: 1,
            hp: 10,
            hp_max: 10
        }
    );
    assert!(graph.room((1, 0)).unwrap().content.is_none());
    assert_eq!(
        explorer.explore_room(&mut graph, &mut rng).unwrap(),
        Interaction::Nothing
    );
}

#[test]
fn trap_can_end_the_game() {
    let mut graph = pair_with(Content::Event(Event::Trap { damage: 5 }));
    let mut explorer = Explorer::new(&graph, 3).unwrap();
    let mut rng = DungeonRng::new(1);
    explorer.move_to(&graph, Direction::East).unwrap();

    let outcome = explorer.explore_room(&mut graph, &mut rng).unwrap();
    assert_eq!(outcome, Interaction::TrapSprung { damage: 5, hp: 0 });
    assert!(!explorer.is_alive());
    assert!(matches!(
        explorer.move_to(&graph, Direction::West),
        Err(HeroError::Fallen)
    ));
}

#[test]
fn lone_portal_flickers_and_is_spent() {
    let mut graph = pair_with(Content::Event(Event::Portal(Portal::unbound())));
    let mut explorer = Explorer::new(&graph, 10).unwrap();
    let mut rng = DungeonRng::new(1);
    explorer.move_to(&graph, Direction::East).unwrap();

    assert_eq!(
        explorer.explore_room(&mut graph, &mut rng).unwrap(),
        Interaction::PortalFlickered
    );
    assert!(graph.room((1, 0)).unwrap().content.is_none());
}

#[test]
fn portal_returns_to_a_visited_room() {
    let mut graph = pair_with(Content::Event(Event::Portal(Portal::unbound())));
    let mut explorer = Explorer::new(&graph, 10).unwrap();
    let mut rng = DungeonRng::new(1);
    explorer.explore_room(&mut graph, &mut rng).unwrap();
    explorer.move_to(&graph, Direction::East).unwrap();

    assert_eq!(
        explorer.explore_room(&mut graph, &mut rng).unwrap(),
        Interaction::Teleported { to: (0, 0) }
    );
    assert_eq!(explorer.position(), (0, 0));
}

/// Random walks through generated dungeons never break the explorer's
/// invariants.
#[test]
fn random_walks_keep_invariants() {
    for seed in 0..25 {
        let (mut graph, mut explorer, mut rng) = populated_world(seed * 31, 5);
        let mut walker = DungeonRng::new(seed);
        for _ in 0..300 {
            if !explorer.is_alive() {
                assert!(matches!(
                    explorer.explore_room(&mut graph, &mut rng),
                    Err(HeroError::Fallen)
                ));
                break;
            }
            explorer.explore_room(&mut graph, &mut rng).unwrap();
            assert!(explorer.hp() <= explorer.hp_max());
            if !explorer.is_alive() {
                continue;
            }
            assert!(graph.room(explorer.position()).unwrap().visited);

            let exits = explorer.exits(&graph).unwrap();
            if let Some(&direction) = walker.choose(&exits) {
                explorer.move_to(&graph, direction).unwrap();
            }
        }
        let boss = graph.boss_room().unwrap();
        assert_eq!(graph.room(boss).unwrap().state_label, "Boss");
    }
}

#[test]
fn session_reports_the_end_of_the_game() {
    let config = GameConfig {
        seed: Some(7),
        hp: 1,
        ..GameConfig::default()
    };
    let mut session = GameSession::new(config).unwrap();
    let mut walker = DungeonRng::new(7);
    for _ in 0..2_000 {
        if session.progress() != Progress::Playing {
            break;
        }
        let reply = session.execute(Command::Explore).unwrap();
        if session.progress() == Progress::GameOver {
            assert!(reply.ends_with("Game over."));
            break;
        }
        if session.progress() == Progress::Victory {
            assert!(reply.ends_with("You win!"));
            break;
        }
        let exits = session.explorer().exits(session.graph()).unwrap();
        if let Some(&direction) = walker.choose(&exits) {
            session.execute(Command::Move(direction)).unwrap();
        }
    }
}
