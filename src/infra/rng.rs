use rand::Rng;

use crate::engine::RandomSource;

/// Системный RNG поверх `thread_rng`. Боевой источник случайности;
/// если ОС не может дать энтропию, `rand` паникует — это единственный
/// фатальный отказ во всей системе (честность не гарантировать).
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        use rand::thread_rng;

        slice.shuffle(&mut thread_rng());
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же раунды при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::from_seed(seed),
        }
    }

    /// Для удобства тестов: seed из u64.
    pub fn from_u64(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        self.inner.gen_range(0..bound)
    }
}
