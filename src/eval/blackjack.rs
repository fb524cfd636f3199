use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};

/// Стоимость ранга в блэкджеке: туз считаем как 11 (редукция ниже),
/// картинки — 10.
pub fn card_value(rank: Rank) -> u8 {
    match rank {
        Rank::Ace => 11,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        r => r as u8,
    }
}

/// Тотал руки после редукции тузов.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackTotal {
    pub total: u8,
    /// Остался ли хотя бы один туз, посчитанный как 11 ("мягкий" тотал).
    pub soft: bool,
}

/// Тотал руки: тузы сначала по 11, затем вычитаем по 10, пока тотал > 21
/// и остаются тузы-одиннадцать. Редукций ровно столько, сколько нужно.
pub fn hand_total(cards: &[Card]) -> BlackjackTotal {
    let mut total: u32 = 0;
    let mut aces = 0u8;

    for card in cards {
        total += card_value(card.rank) as u32;
        if card.rank == Rank::Ace {
            aces += 1;
        }
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    BlackjackTotal {
        total: total as u8,
        soft: aces > 0,
    }
}

/// Натуральный блэкджек: ровно 2 карты с тоталом 21.
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_total(cards).total == 21
}

/// Перебор: тотал (после всех редукций) больше 21.
pub fn is_bust(cards: &[Card]) -> bool {
    hand_total(cards).total > 21
}

/// Фиксированная политика дилера: добирает на тотале < 17
/// и на "мягких" 17 (туз как 11). Не конфигурируется.
pub fn dealer_must_draw(total: BlackjackTotal) -> bool {
    total.total < 17 || (total.total == 17 && total.soft)
}

/// Исход одной руки игрока против руки дилера.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandOutcome {
    Win,
    Lose,
    Push,
    /// Натуральный блэкджек (2 карты, не сплит) — повышенная выплата.
    Blackjack,
    Bust,
}

/// Исход руки с учётом натуралов: натуралы старше числового сравнения,
/// пуш — только оба натурала либо равные непереборные тоталы, перебор
/// дилера проигрывает любой непереборной руке игрока.
pub fn determine_outcome(player: &[Card], dealer: &[Card]) -> HandOutcome {
    let player_bj = is_blackjack(player);
    let dealer_bj = is_blackjack(dealer);

    if player_bj && dealer_bj {
        return HandOutcome::Push;
    }
    if player_bj {
        return HandOutcome::Blackjack;
    }
    if dealer_bj {
        return HandOutcome::Lose;
    }

    outcome_by_totals(player, dealer)
}

/// Числовое сравнение без учёта натуралов. Движок использует его для рук,
/// полученных сплитом: 21 из двух карт после сплита — не блэкджек.
pub fn outcome_by_totals(player: &[Card], dealer: &[Card]) -> HandOutcome {
    let player_total = hand_total(player).total;
    if player_total > 21 {
        return HandOutcome::Bust;
    }

    let dealer_total = hand_total(dealer).total;
    if dealer_total > 21 || player_total > dealer_total {
        HandOutcome::Win
    } else if player_total < dealer_total {
        HandOutcome::Lose
    } else {
        HandOutcome::Push
    }
}
