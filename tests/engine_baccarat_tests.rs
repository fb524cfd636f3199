//! Тесты баккара-стола:
//! - натуралы закрывают раунд без третьих карт
//! - правила третьей карты игрока и банкира (включая ключевые строки
//!   таблицы: банкир 3 против третьей карты 8 / 5)
//! - таблица выплат: 1:1, 0.95:1 с округлением, 8:1 за ничью, пуш
//!   сторонних ставок при ничьей
//!
//! Раздача идёт с чередованием (игрок, банкир, игрок, банкир), затем
//! третьи карты; карты перечисляются в этом порядке.

use casino_engine::domain::{Amount, Card, Ledger, Shoe};
use casino_engine::engine::baccarat::{BaccaratConfig, BaccaratPhase, BaccaratTable, BetSide};
use casino_engine::engine::errors::EngineError;
use casino_engine::engine::events::BetOutcome;
use casino_engine::engine::RandomSource;

struct NoShuffleRng;

impl RandomSource for NoShuffleRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
    fn next_below(&mut self, _bound: u32) -> u32 {
        0
    }
}

fn stacked_shoe(draw_order: &[&str]) -> Shoe {
    let mut cards: Vec<Card> = draw_order
        .iter()
        .map(|s| s.parse().expect("битая карта в сценарии"))
        .collect();
    cards.reverse();
    Shoe { cards, num_decks: 1 }
}

fn stacked_table(draw_order: &[&str]) -> BaccaratTable {
    let config = BaccaratConfig {
        num_decks: 1,
        min_bet: Amount::from_dollars(1),
        reshuffle_threshold: 0,
    };
    let mut table = BaccaratTable::new(config);
    table.shoe = stacked_shoe(draw_order);
    table
}

fn dollars(d: u64) -> Amount {
    Amount::from_dollars(d)
}

#[test]
fn natural_nine_wins_without_third_cards() {
    // Игрок [K,9] = 9 (натурал), банкир [2,3] = 5.
    let mut table = stacked_table(&["Kh", "2c", "9d", "3s"]);
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = NoShuffleRng;

    let summary = table
        .deal(&mut rng, &mut ledger, 1, BetSide::Player, dollars(10))
        .unwrap();

    assert!(summary.natural);
    assert_eq!(summary.player_total, 9);
    assert_eq!(summary.banker_total, 5);
    assert_eq!(summary.winner, BetSide::Player);
    assert_eq!(summary.player_cards.len(), 2);
    assert_eq!(summary.banker_cards.len(), 2);
    assert_eq!(summary.outcome, BetOutcome::Win);
    assert_eq!(summary.payout, dollars(20));
    assert_eq!(table.phase(), BaccaratPhase::Resolved);
    assert_eq!(ledger.balance(), dollars(110));
}

#[test]
fn banker_stands_on_three_against_player_third_eight() {
    // Игрок [2,2] = 4 → берёт третью (8) → 2; банкир [K,3] = 3 стоит.
    let mut table = stacked_table(&["2h", "Kc", "2d", "3s", "8c"]);
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = NoShuffleRng;

    let summary = table
        .deal(&mut rng, &mut ledger, 1, BetSide::Banker, dollars(20))
        .unwrap();

    assert_eq!(summary.player_cards.len(), 3);
    assert_eq!(summary.banker_cards.len(), 2, "банкир не берёт против восьмёрки");
    assert_eq!(summary.player_total, 2);
    assert_eq!(summary.banker_total, 3);
    assert_eq!(summary.winner, BetSide::Banker);

    // 0.95:1 — $20 ставка возвращается с выигрышем $19.
    assert_eq!(summary.payout, dollars(39));
    assert_eq!(ledger.balance(), dollars(119));
}

#[test]
fn banker_draws_on_three_against_player_third_five() {
    // Игрок [2,2] = 4 → третья 5 → 9; банкир [K,3] = 3 → берёт (4) → 7.
    let mut table = stacked_table(&["2h", "Kc", "2d", "3s", "5c", "4d"]);
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = NoShuffleRng;

    let summary = table
        .deal(&mut rng, &mut ledger, 1, BetSide::Player, dollars(10))
        .unwrap();

    assert_eq!(summary.player_cards.len(), 3);
    assert_eq!(summary.banker_cards.len(), 3);
    assert_eq!(summary.player_total, 9);
    assert_eq!(summary.banker_total, 7);
    assert_eq!(summary.winner, BetSide::Player);
    assert_eq!(summary.payout, dollars(20));
    assert_eq!(ledger.balance(), dollars(110));
}

#[test]
fn standing_player_banker_draws_to_five() {
    // Игрок [K,7] = 7 стоит; банкир [2,3] = 5 — без третьей карты
    // игрока берёт на тотале ≤ 5.
    let mut table = stacked_table(&["Kh", "2c", "7d", "3s", "4h"]);
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = NoShuffleRng;

    let summary = table
        .deal(&mut rng, &mut ledger, 1, BetSide::Player, dollars(10))
        .unwrap();

    assert_eq!(summary.player_cards.len(), 2);
    assert_eq!(summary.banker_cards.len(), 3);
    assert_eq!(summary.banker_total, 9);
    assert_eq!(summary.winner, BetSide::Banker);
    assert_eq!(summary.outcome, BetOutcome::Lose);
    assert_eq!(summary.payout, Amount::ZERO);
    assert_eq!(ledger.balance(), dollars(90));
}

#[test]
fn tie_pushes_side_bet() {
    // 7 против 7: ставка на игрока возвращается.
    let mut table = stacked_table(&["Kh", "3c", "7d", "4s"]);
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = NoShuffleRng;

    let summary = table
        .deal(&mut rng, &mut ledger, 1, BetSide::Player, dollars(10))
        .unwrap();

    assert_eq!(summary.winner, BetSide::Tie);
    assert_eq!(summary.outcome, BetOutcome::Push);
    assert_eq!(summary.payout, dollars(10));
    assert_eq!(ledger.balance(), dollars(100));
}

#[test]
fn tie_bet_pays_eight_to_one() {
    let mut table = stacked_table(&["Kh", "3c", "7d", "4s"]);
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = NoShuffleRng;

    let summary = table
        .deal(&mut rng, &mut ledger, 1, BetSide::Tie, dollars(10))
        .unwrap();

    assert_eq!(summary.outcome, BetOutcome::Win);
    assert_eq!(summary.payout, dollars(90));
    assert_eq!(ledger.balance(), dollars(180));
}

#[test]
fn natural_tie_is_push_for_side_bets() {
    // Оба натурала по 9: пуш независимо от стороны.
    let mut table = stacked_table(&["9h", "9c", "Kd", "Qs"]);
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = NoShuffleRng;

    let summary = table
        .deal(&mut rng, &mut ledger, 1, BetSide::Banker, dollars(10))
        .unwrap();

    assert!(summary.natural);
    assert_eq!(summary.winner, BetSide::Tie);
    assert_eq!(summary.outcome, BetOutcome::Push);
    assert_eq!(ledger.balance(), dollars(100));
}

#[test]
fn commission_rounds_half_up_at_credit() {
    // $10.01 на банкира: 1001 × 39/20 = 1952.45¢ → $19.52.
    let mut table = stacked_table(&["2h", "Kc", "2d", "3s", "8c"]);
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = NoShuffleRng;

    let summary = table
        .deal(&mut rng, &mut ledger, 1, BetSide::Banker, Amount::new(1001))
        .unwrap();

    assert_eq!(summary.winner, BetSide::Banker);
    assert_eq!(summary.payout, Amount::new(1952));
    assert_eq!(ledger.balance(), Amount::new(10_000 - 1001 + 1952));
}

#[test]
fn bet_validation_rejects_without_debit() {
    let config = BaccaratConfig {
        num_decks: 1,
        min_bet: dollars(5),
        reshuffle_threshold: 0,
    };
    let mut table = BaccaratTable::new(config);
    table.shoe = stacked_shoe(&["Kh", "2c", "9d", "3s"]);
    let mut rng = NoShuffleRng;

    let mut ledger = Ledger::new(dollars(100));
    let err = table
        .deal(&mut rng, &mut ledger, 1, BetSide::Player, dollars(1))
        .unwrap_err();
    assert!(matches!(err, EngineError::BetBelowMinimum(_, _)));
    assert_eq!(ledger.balance(), dollars(100));
    assert_eq!(table.phase(), BaccaratPhase::Betting);

    let mut poor = Ledger::new(dollars(3));
    let err = table
        .deal(&mut rng, &mut poor, 1, BetSide::Player, dollars(10))
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds(_)));
    assert_eq!(poor.balance(), dollars(3));
}

#[test]
fn deal_requires_new_round_after_resolution() {
    let mut table = stacked_table(&["Kh", "2c", "9d", "3s"]);
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = NoShuffleRng;

    table
        .deal(&mut rng, &mut ledger, 1, BetSide::Player, dollars(10))
        .unwrap();

    let err = table
        .deal(&mut rng, &mut ledger, 2, BetSide::Player, dollars(10))
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidAction);

    table.new_round().unwrap();
    table.shoe = stacked_shoe(&["Kh", "2c", "9d", "3s"]);
    table
        .deal(&mut rng, &mut ledger, 2, BetSide::Player, dollars(10))
        .unwrap();
}
