//src/hero/src/combat.rs
use dungeon::DungeonRng;

/// 普通怪物战胜概率
pub const MONSTER_WIN_CHANCE: f64 = 0.6;
/// 首领战胜概率
pub const BOSS_WIN_CHANCE: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// A single weighted coin flip decides the whole encounter.
pub fn encounter(rng: &mut DungeonRng, win_chance: f64) -> Outcome {
    if rng.random_bool(win_chance) {
        Outcome::Victory
    } else {
        Outcome::Defeat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certain_outcomes() {
        let mut rng = DungeonRng::new(1);
        assert_eq!(encounter(&mut rng, 1.0), Outcome::Victory);
        assert_eq!(encounter(&mut rng, 0.0), Outcome::Defeat);
    }

    #[test]
    fn win_rate_tracks_chance() {
        let mut rng = DungeonRng::new(2024);
        let wins = (0..10_000)
            .filter(|_| encounter(&mut rng, MONSTER_WIN_CHANCE) == Outcome::Victory)
            .count();
        assert!((5_500..6_500).contains(&wins), "wins = {}", wins);
    }
}
