use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};

/// Значение карты по системе Hi-Lo: −1 за десятки/картинки/тузы,
/// +1 за 2–6, 0 за 7–9.
pub fn hi_lo_value(rank: Rank) -> i32 {
    match rank {
        Rank::Two | Rank::Three | Rank::Four | Rank::Five | Rank::Six => 1,
        Rank::Seven | Rank::Eight | Rank::Nine => 0,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King | Rank::Ace => -1,
    }
}

/// Счётчик карт: running count по всем ОТКРЫТЫМ картам, раздача которых
/// видна игроку, с момента последней пересборки шуза.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardCounter {
    running: i32,
}

impl CardCounter {
    pub fn new() -> Self {
        Self { running: 0 }
    }

    /// Сброс при пересборке шуза.
    pub fn reset(&mut self) {
        self.running = 0;
    }

    /// Учесть карту. Закрытые карты не считаются — движок вызывает
    /// `observe` повторно в момент вскрытия "дырки".
    pub fn observe(&mut self, card: &Card) {
        if card.face_up {
            self.running += hi_lo_value(card.rank);
        }
    }

    pub fn running_count(&self) -> i32 {
        self.running
    }

    /// True count: running, нормированный на оставшиеся колоды,
    /// округлённый до одного знака. Когда в шузе меньше одной колоды —
    /// определён как 0 (чтобы не раздувать деление).
    pub fn true_count(&self, cards_remaining: usize) -> f32 {
        if cards_remaining < 52 {
            return 0.0;
        }
        let decks_remaining = cards_remaining as f32 / 52.0;
        (self.running as f32 / decks_remaining * 10.0).round() / 10.0
    }
}
