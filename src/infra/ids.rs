use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{BetId, RoundId};

/// Простая генерация ID на основе монотонных счётчиков.
/// Удобно для локальных прогонов, dev-CLI и тестов.
///
/// Движкам счётчики не навязываются: крэпс-стол минтит id своих
/// ставок сам, `Casino` ведёт собственный счётчик раундов. Этот
/// генератор — для кода, который управляет столами напрямую.
#[derive(Debug)]
pub struct IdGenerator {
    round_counter: AtomicU64,
    bet_counter: AtomicU64,
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1 для всех сущностей.
    pub fn new() -> Self {
        Self {
            round_counter: AtomicU64::new(1),
            bet_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_round_id(&self) -> RoundId {
        self.round_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_bet_id(&self) -> BetId {
        self.bet_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
