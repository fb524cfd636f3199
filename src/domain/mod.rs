//! Доменная модель казино: карты, деньги, шуз, кости, леджер.

pub mod amount;
pub mod card;
pub mod dice;
pub mod ledger;
pub mod shoe;

use serde::{Deserialize, Serialize};

// Базовые идентификаторы (минтит infra::IdGenerator либо сам движок).
pub type RoundId = u64;
pub type BetId = u64;

/// Какая из игр казино. Используется в событиях, seed-derivation и API.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GameKind {
    Blackjack,
    Baccarat,
    Craps,
    Roulette,
    Slots,
}

impl core::fmt::Display for GameKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            GameKind::Blackjack => "blackjack",
            GameKind::Baccarat => "baccarat",
            GameKind::Craps => "craps",
            GameKind::Roulette => "roulette",
            GameKind::Slots => "slots",
        };
        write!(f, "{name}")
    }
}

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use amount::*;
pub use card::*;
pub use dice::*;
pub use ledger::*;
pub use shoe::*;
