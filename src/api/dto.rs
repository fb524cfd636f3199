use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::ledger::Ledger;
use crate::domain::{Amount, BetId};
use crate::engine::baccarat::{BaccaratPhase, BaccaratSummary, BaccaratTable};
use crate::engine::blackjack::{BlackjackPhase, BlackjackSummary, BlackjackTable};
use crate::engine::craps::{CrapsBetKind, CrapsPhase, CrapsTable, RollOutcome};
use crate::engine::roulette::{RouletteBetKind, RouletteOutcome, RouletteTable};
use crate::engine::slots::{SlotMachine, SlotsOutcome};
use crate::eval::blackjack::{self as bj, HandOutcome};

/// DTO одной руки игрока в блэкджеке.
///
/// `can_split`/`can_double` — аффордансы для фронта: кнопки показываются
/// только там, где движок примет действие (сам движок всё равно
/// валидирует).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlackjackHandDto {
    /// Индекс руки в арене стола — его же принимает `BlackjackAction`.
    pub index: usize,
    pub cards: Vec<Card>,
    pub total: u8,
    pub soft: bool,
    pub bet: Amount,
    pub doubled: bool,
    pub done: bool,
    /// Рука сейчас активна (ход за ней).
    pub active: bool,
    pub can_split: bool,
    pub can_double: bool,
    pub outcome: Option<HandOutcome>,
}

/// DTO блэкджек-стола.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlackjackViewDto {
    pub phase: BlackjackPhase,
    /// Руки в порядке стола (порядок арены может отличаться после сплитов).
    pub hands: Vec<BlackjackHandDto>,
    /// Карты дилера как лежат: закрытая "дырка" остаётся face_down.
    pub dealer_cards: Vec<Card>,
    /// Видимый тотал дилера — только по открытым картам.
    pub dealer_visible_total: u8,
    pub active_hand: Option<usize>,
    pub shoe_remaining: usize,
    pub running_count: i32,
    pub true_count: f32,
    pub balance: Amount,
}

/// Собрать вид блэкджек-стола для фронта.
pub fn build_blackjack_view(table: &BlackjackTable, ledger: &Ledger) -> BlackjackViewDto {
    let active = table.active_hand();

    let hands = table
        .order
        .iter()
        .map(|&idx| {
            let hand = &table.hands()[idx];
            let total = bj::hand_total(&hand.cards);
            BlackjackHandDto {
                index: idx,
                cards: hand.cards.clone(),
                total: total.total,
                soft: total.soft,
                bet: hand.bet,
                doubled: hand.doubled,
                done: hand.done,
                active: active == Some(idx),
                can_split: table.can_split(idx, ledger),
                can_double: table.can_double(idx, ledger),
                outcome: hand.outcome,
            }
        })
        .collect();

    let visible: Vec<Card> = table
        .dealer_cards()
        .iter()
        .copied()
        .filter(|c| c.face_up)
        .collect();

    BlackjackViewDto {
        phase: table.phase(),
        hands,
        dealer_cards: table.dealer_cards().to_vec(),
        dealer_visible_total: bj::hand_total(&visible).total,
        active_hand: active,
        shoe_remaining: table.shoe_remaining(),
        running_count: table.running_count(),
        true_count: table.true_count(),
        balance: ledger.balance(),
    }
}

/// DTO баккара-стола.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BaccaratViewDto {
    pub phase: BaccaratPhase,
    pub shoe_remaining: usize,
    pub balance: Amount,
}

pub fn build_baccarat_view(table: &BaccaratTable, ledger: &Ledger) -> BaccaratViewDto {
    BaccaratViewDto {
        phase: table.phase(),
        shoe_remaining: table.shoe_remaining(),
        balance: ledger.balance(),
    }
}

/// DTO одной ставки на крэпс-столе.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CrapsBetDto {
    pub id: BetId,
    pub kind: CrapsBetKind,
    pub amount: Amount,
    pub point: Option<u8>,
    pub odds: Amount,
    /// Человекочитаемая метка вида "pass" / "come 6".
    pub label: String,
}

/// DTO крэпс-стола.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CrapsViewDto {
    pub phase: CrapsPhase,
    pub point: Option<u8>,
    pub bets: Vec<CrapsBetDto>,
    pub balance: Amount,
}

pub fn build_craps_view(table: &CrapsTable, ledger: &Ledger) -> CrapsViewDto {
    let bets = table
        .bets()
        .iter()
        .map(|bet| CrapsBetDto {
            id: bet.id,
            kind: bet.kind,
            amount: bet.amount,
            point: bet.point,
            odds: bet.odds,
            label: match bet.point {
                Some(p) => format!("{} {p}", bet.kind),
                None => bet.kind.to_string(),
            },
        })
        .collect();

    CrapsViewDto {
        phase: table.phase(),
        point: table.table_point(),
        bets,
        balance: ledger.balance(),
    }
}

/// DTO одной ставки на рулеточной доске.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouletteBetDto {
    pub kind: RouletteBetKind,
    pub label: String,
    pub amount: Amount,
}

/// DTO рулеточной доски.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouletteViewDto {
    pub bets: Vec<RouletteBetDto>,
    pub total_staked: Amount,
    pub balance: Amount,
}

pub fn build_roulette_view(table: &RouletteTable, ledger: &Ledger) -> RouletteViewDto {
    let bets = table
        .bets
        .iter()
        .map(|bet| RouletteBetDto {
            kind: bet.kind,
            label: bet.kind.label(),
            amount: bet.amount,
        })
        .collect();

    RouletteViewDto {
        bets,
        total_staked: table.total_staked(),
        balance: ledger.balance(),
    }
}

/// DTO слот-автомата.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SlotsViewDto {
    pub free_spins: u32,
    pub free_spin_multiplier: u64,
    pub balance: Amount,
}

pub fn build_slots_view(machine: &SlotMachine, ledger: &Ledger) -> SlotsViewDto {
    SlotsViewDto {
        free_spins: machine.free_spins(),
        free_spin_multiplier: machine.config.free_spin_multiplier,
        balance: ledger.balance(),
    }
}

/// Ответ API на команду: обновлённый вид стола и, где раунд завершился,
/// его итог. Итоги несут лог событий не сами — лог живёт на столе и
/// доступен отдельным запросом.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CommandResponse {
    /// Блэкджек: раунд продолжается, ход за игроком.
    Blackjack(BlackjackViewDto),

    /// Блэкджек: раунд разрешён.
    BlackjackFinished {
        view: BlackjackViewDto,
        summary: BlackjackSummary,
    },

    /// Баккара: раунд одношаговый, всегда сразу итог.
    Baccarat {
        view: BaccaratViewDto,
        summary: BaccaratSummary,
    },

    /// Крэпс: ставка принята.
    CrapsBetPlaced { bet_id: BetId, view: CrapsViewDto },

    /// Крэпс: odds прикреплены; `staked` — фактически списанное
    /// (стейк мог быть срезан лимитом 3×).
    CrapsOddsPlaced { staked: Amount, view: CrapsViewDto },

    /// Крэпс: бросок разрешён.
    CrapsRolled {
        outcome: RollOutcome,
        view: CrapsViewDto,
    },

    /// Рулетка: состояние доски (после place/clear).
    RouletteBoard(RouletteViewDto),

    /// Рулетка: спин разрешён.
    RouletteSpun {
        outcome: RouletteOutcome,
        view: RouletteViewDto,
    },

    /// Слоты: спин разрешён.
    SlotsSpun {
        outcome: SlotsOutcome,
        view: SlotsViewDto,
    },
}
