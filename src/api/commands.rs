use serde::{Deserialize, Serialize};

use crate::domain::{Amount, BetId};
use crate::engine::baccarat::BetSide;
use crate::engine::blackjack::BlackjackAction;
use crate::engine::craps::CrapsBetKind;
use crate::engine::roulette::RouletteBetKind;

/// Команда верхнего уровня: к какому столу обращаемся.
///
/// `Casino::dispatch` разбирает команду и вызывает соответствующий
/// движок; ответ — `api::dto::CommandResponse`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    Blackjack(BlackjackCommand),
    Baccarat(BaccaratCommand),
    Craps(CrapsCommand),
    Roulette(RouletteCommand),
    Slots(SlotsCommand),
}

/// Команды блэкджек-стола.
///
/// `Deal` сам перезаряжает стол после разрешённого раунда, отдельной
/// команды "новый раунд" у фронта нет — как и в исходной игре, где
/// кнопка Deal появляется после расчёта.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum BlackjackCommand {
    /// Начать раунд со ставкой.
    Deal { bet: Amount },

    /// Действие игрока над рукой (hit/stand/double/split).
    Action { action: BlackjackAction },
}

/// Команды баккара-стола.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum BaccaratCommand {
    /// Разыграть раунд: сторона + ставка. Раунд одношаговый.
    Deal { side: BetSide, amount: Amount },
}

/// Команды крэпс-стола.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CrapsCommand {
    /// Поставить линейную ставку (pass/don't pass/come/don't come).
    PlaceBet { kind: CrapsBetKind, amount: Amount },

    /// Прикрепить odds к ставке с установленным пойнтом.
    PlaceOdds { bet_id: BetId, amount: Amount },

    /// Бросить кости и разрешить все выставленные ставки.
    Roll,
}

/// Команды рулетки.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum RouletteCommand {
    /// Поставить на покрытие (номер/цвет/чёт-нечет/диапазон/дюжину).
    PlaceBet {
        kind: RouletteBetKind,
        amount: Amount,
    },

    /// Снять все ставки с доски с возвратом денег.
    ClearBets,

    /// Крутить колесо.
    Spin,
}

/// Команды слот-автомата.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SlotsCommand {
    /// Спин со ставкой (бесплатные спины ставку не списывают).
    Spin { bet: Amount },
}
