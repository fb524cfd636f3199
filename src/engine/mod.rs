//! Движки раундов пяти игр: блэкджек, баккара, крэпс, рулетка, слоты.
//!
//! Каждый движок — синхронная машина состояний: действие игрока
//! (ставка, добор, бросок, спин) полностью разрешается за один вызов и
//! возвращает итог с выплатами. Деньги ходят только через `domain::Ledger`,
//! случайность — только через [`RandomSource`]. Анимация и прочая
//! презентация воспроизводят уже разрешённый `RoundLog`, движок на неё
//! никогда не ждёт.

pub mod baccarat;
pub mod blackjack;
pub mod casino;
pub mod craps;
pub mod errors;
pub mod events;
pub mod roulette;
pub mod slots;

use serde::{Deserialize, Serialize};

pub use baccarat::{BaccaratConfig, BaccaratPhase, BaccaratSummary, BaccaratTable, BetSide};
pub use blackjack::{
    BlackjackAction, BlackjackActionKind, BlackjackConfig, BlackjackHand, BlackjackPhase,
    BlackjackSummary, BlackjackTable, HandResolution,
};
pub use casino::{Casino, CasinoError};
pub use craps::{CrapsBet, CrapsBetKind, CrapsConfig, CrapsPhase, CrapsTable, RollOutcome};
pub use errors::EngineError;
pub use events::{BetOutcome, RoundEvent, RoundEventKind, RoundLog};
pub use roulette::{RouletteBetKind, RouletteConfig, RouletteOutcome, RouletteTable};
pub use slots::{SlotGrid, SlotMachine, SlotSymbol, SlotsConfig, SlotsOutcome};

/// RNG интерфейс для движков. Реализации живут в infra (обёртки над `rand`),
/// в тестах подменяется детерминированной/скриптованной.
pub trait RandomSource {
    /// Равномерная перестановка среза (Фишер–Йетс).
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Равномерное целое в [0, bound). Кости, рулеточное колесо,
    /// взвешенный выбор символа слота.
    fn next_below(&mut self, bound: u32) -> u32;
}

/// Статус раунда для внешнего кода: раунд идёт либо завершён с итогом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum RoundStatus<S> {
    Ongoing,
    Finished(S),
}

impl<S> RoundStatus<S> {
    pub fn is_finished(&self) -> bool {
        matches!(self, RoundStatus::Finished(_))
    }
}
