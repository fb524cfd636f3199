use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::dice::DiceRoll;
use crate::domain::{Amount, GameKind, RoundId};

/// Денежный исход одной ставки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BetOutcome {
    Win,
    Lose,
    Push,
}

/// Тип события в раунде.
///
/// Движок пишет события синхронно, по мере разрешения раунда;
/// презентационный слой потом воспроизводит их со своим таймингом
/// (задержки/анимации никогда не блокируют движок).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum RoundEventKind {
    /// Новый раунд начался.
    RoundStarted { game: GameKind, round_id: RoundId },

    /// Шуз пересобран и перемешан (между раундами либо — аварийно —
    /// при полном исчерпании посреди раздачи).
    ShoeReplaced { num_decks: u8 },

    /// Ставка принята, деньги списаны. `bet` — человекочитаемая метка
    /// ("pass", "banker", "Red", "hand 2" и т.п.).
    BetPlaced { bet: String, amount: Amount },

    /// Ставка возвращена без розыгрыша (очистка рулеточного стола).
    BetRefunded { bet: String, amount: Amount },

    /// Карта легла на стол. Закрытая карта логируется как есть
    /// (face_up = false) и позже вскрывается отдельным событием.
    CardDealt { to: String, card: Card },

    /// Вскрытие дилерской "дырки".
    HoleCardRevealed { card: Card },

    /// Рука разделена на две.
    HandSplit { hand: usize, new_hand: usize },

    /// Удвоение ставки руки.
    DoubledDown { hand: usize },

    /// Бросок костей.
    DiceRolled { dice: DiceRoll },

    /// Установлен пойнт стола.
    PointEstablished { point: u8 },

    /// Пойнт снят (выброшен сам пойнт либо seven-out).
    PointCleared { total: u8 },

    /// Рулетка: выпал номер.
    WheelSpun { number: u8 },

    /// Слоты: барабаны остановились; скаттеров на поле — `scatters`.
    ReelsSpun { scatters: u8 },

    /// Ставка разрешена и снята со стола. Выплата уже зачислена.
    BetResolved {
        bet: String,
        outcome: BetOutcome,
        payout: Amount,
    },

    /// Начислены бесплатные спины.
    FreeSpinsAwarded { count: u32 },

    /// Раунд завершён.
    RoundFinished { round_id: RoundId },
}

/// Событие с порядковым номером внутри лога.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoundEvent {
    pub index: u32,
    pub kind: RoundEventKind,
}

/// Полный лог раунда (или, для крэпса, серии бросков).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RoundLog {
    pub events: Vec<RoundEvent>,
}

impl RoundLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: RoundEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(RoundEvent { index: idx, kind });
    }

    /// Очистить лог перед новым раундом.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
