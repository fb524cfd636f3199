use thiserror::Error;

use crate::domain::{Amount, BetId, InsufficientFunds};

/// Ошибки движков казино.
///
/// Все они локальные и восстановимые: действие отклоняется ДО любой
/// мутации состояния раунда, леджер не трогается. Фатальных ошибок
/// у движка нет.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Ставка/доп.ставка превышает баланс. Проброс из леджера.
    #[error(transparent)]
    InsufficientFunds(#[from] InsufficientFunds),

    /// Ставка меньше минимума стола.
    #[error("ставка {0} меньше минимальной {1}")]
    BetBelowMinimum(Amount, Amount),

    /// Действие недопустимо в текущей фазе/состоянии раунда.
    #[error("действие недопустимо в текущем состоянии раунда")]
    InvalidAction,

    /// Рука с таким индексом не существует, завершена или сейчас не активна.
    #[error("рука {0} не существует или не активна")]
    InvalidHand(usize),

    /// Ставка с таким id не найдена на столе.
    #[error("ставка {0} не найдена")]
    UnknownBet(BetId),

    /// Odds-ставка уже на максимуме (3× от линейной).
    #[error("odds по ставке {0} уже на лимите")]
    OddsLimitReached(BetId),

    /// Внутренняя ошибка — нарушен инвариант движка.
    #[error("внутренняя ошибка движка: {0}")]
    Internal(&'static str),
}
