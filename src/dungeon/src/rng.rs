//src/dungeon/src/rng.rs
use rand::{
    distr::uniform,
    seq::SliceRandom,
    {Rng, SeedableRng},
};
use rand_pcg::Pcg32;

/// 地牢生成与交互共用的确定性RNG
///
/// Threaded explicitly through generation, distribution and every encounter;
/// nothing in the workspace reads process-wide random state.
#[derive(Debug, Clone)]
pub struct DungeonRng {
    rng: Pcg32,
    seed: u64,
}

impl DungeonRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// 获取当前种子值
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 生成随机布尔值
    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability)
    }

    /// 从列表中随机选择
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            let idx = self.random_range(0..items.len());
            Some(&items[idx])
        }
    }

    /// 随机打乱切片
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.rng);
    }

    /// 生成指定范围内的随机值
    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: uniform::SampleUniform,
        R: uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}
