//! Тесты крэпс-стола:
//! - come-out: 7/11, крэпс 2/3, bar-12 (пуш don't pass)
//! - установка и снятие пойнта, true odds по пойнту
//! - come/don't-come: "локальный come-out" и путешествие к пойнту
//! - лимит odds 3× со срезкой стейка
//! - атомарное разрешение всех ставок одним броском, без повторного
//!   разрешения снятых ставок
//!
//! Кости задаются скриптом: RNG отдаёт заранее перечисленные значения.

use std::collections::VecDeque;

use casino_engine::domain::{Amount, Ledger};
use casino_engine::engine::craps::{CrapsBetKind, CrapsConfig, CrapsPhase, CrapsTable};
use casino_engine::engine::errors::EngineError;
use casino_engine::engine::events::BetOutcome;
use casino_engine::engine::RandomSource;

/// RNG по сценарию: отдаёт заданные броски костей, не перемешивает.
struct ScriptedRng {
    values: VecDeque<u32>,
}

impl ScriptedRng {
    fn dice(rolls: &[(u8, u8)]) -> Self {
        let values = rolls
            .iter()
            .flat_map(|&(a, b)| [a as u32 - 1, b as u32 - 1])
            .collect();
        Self { values }
    }
}

impl RandomSource for ScriptedRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}

    fn next_below(&mut self, bound: u32) -> u32 {
        let v = self.values.pop_front().expect("сценарий костей исчерпан");
        assert!(v < bound, "значение сценария вне диапазона");
        v
    }
}

fn table() -> CrapsTable {
    CrapsTable::new(CrapsConfig::default()) // $5 минимум, odds до 3×
}

fn dollars(d: u64) -> Amount {
    Amount::from_dollars(d)
}

//
// ---------- come-out ----------
//

#[test]
fn comeout_seven_wins_pass_and_stays_comeout() {
    let mut table = table();
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = ScriptedRng::dice(&[(3, 4)]);

    table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(10))
        .unwrap();
    assert_eq!(ledger.balance(), dollars(90));

    let outcome = table.roll(&mut rng, &mut ledger).unwrap();

    assert_eq!(outcome.total, 7);
    assert_eq!(outcome.resolutions.len(), 1);
    assert_eq!(outcome.resolutions[0].outcome, BetOutcome::Win);
    assert_eq!(outcome.resolutions[0].payout, dollars(20));
    assert_eq!(outcome.phase_after, CrapsPhase::ComeOut);
    assert!(table.bets().is_empty());
    assert_eq!(ledger.balance(), dollars(110));
}

#[test]
fn comeout_eleven_wins_pass() {
    let mut table = table();
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = ScriptedRng::dice(&[(5, 6)]);

    table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(10))
        .unwrap();
    let outcome = table.roll(&mut rng, &mut ledger).unwrap();

    assert_eq!(outcome.total, 11);
    assert_eq!(outcome.resolutions[0].payout, dollars(20));
    assert_eq!(ledger.balance(), dollars(110));
}

#[test]
fn comeout_craps_resolves_both_lines() {
    let mut table = table();
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = ScriptedRng::dice(&[(1, 2)]);

    table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(10))
        .unwrap();
    table
        .place_bet(&mut ledger, CrapsBetKind::DontPass, dollars(10))
        .unwrap();
    assert_eq!(ledger.balance(), dollars(80));

    let outcome = table.roll(&mut rng, &mut ledger).unwrap();

    assert_eq!(outcome.total, 3);
    assert_eq!(outcome.resolutions.len(), 2);
    let pass = outcome
        .resolutions
        .iter()
        .find(|r| r.kind == CrapsBetKind::Pass)
        .unwrap();
    let dont = outcome
        .resolutions
        .iter()
        .find(|r| r.kind == CrapsBetKind::DontPass)
        .unwrap();
    assert_eq!(pass.outcome, BetOutcome::Lose);
    assert_eq!(dont.outcome, BetOutcome::Win);
    assert_eq!(dont.payout, dollars(20));
    assert!(table.bets().is_empty());
    assert_eq!(ledger.balance(), dollars(100));
}

#[test]
fn bar_twelve_pushes_dont_pass_and_loses_pass() {
    let mut table = table();
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = ScriptedRng::dice(&[(6, 6)]);

    table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(10))
        .unwrap();
    table
        .place_bet(&mut ledger, CrapsBetKind::DontPass, dollars(10))
        .unwrap();

    let outcome = table.roll(&mut rng, &mut ledger).unwrap();

    assert_eq!(outcome.total, 12);
    let pass = outcome
        .resolutions
        .iter()
        .find(|r| r.kind == CrapsBetKind::Pass)
        .unwrap();
    let dont = outcome
        .resolutions
        .iter()
        .find(|r| r.kind == CrapsBetKind::DontPass)
        .unwrap();
    assert_eq!(pass.outcome, BetOutcome::Lose);
    assert_eq!(dont.outcome, BetOutcome::Push);
    assert_eq!(dont.payout, dollars(10), "bar-12: ставка возвращается");
    assert_eq!(outcome.phase_after, CrapsPhase::ComeOut);
    assert_eq!(ledger.balance(), dollars(90));
}

//
// ---------- пойнт и true odds ----------

#[test]
fn point_hit_pays_flat_and_true_odds() {
    let mut table = table();
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = ScriptedRng::dice(&[(3, 3), (2, 4)]);

    let bet_id = table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(10))
        .unwrap();

    // Установка пойнта 6: ставка путешествует, ничего не разрешено.
    let outcome = table.roll(&mut rng, &mut ledger).unwrap();
    assert!(outcome.resolutions.is_empty());
    assert_eq!(outcome.travelled, vec![bet_id]);
    assert_eq!(outcome.phase_after, CrapsPhase::Point(6));
    assert_eq!(table.table_point(), Some(6));

    let staked = table.place_odds(&mut ledger, bet_id, dollars(10)).unwrap();
    assert_eq!(staked, dollars(10));
    assert_eq!(ledger.balance(), dollars(80));

    // Пойнт выбит: 2× флет + возврат odds + 6/5 odds.
    let outcome = table.roll(&mut rng, &mut ledger).unwrap();
    assert_eq!(outcome.total, 6);
    assert_eq!(outcome.resolutions.len(), 1);
    assert_eq!(outcome.resolutions[0].outcome, BetOutcome::Win);
    assert_eq!(outcome.resolutions[0].payout, dollars(42));
    assert_eq!(outcome.phase_after, CrapsPhase::ComeOut);
    assert_eq!(table.table_point(), None);
    assert!(table.bets().is_empty());
    assert_eq!(ledger.balance(), dollars(122));
}

#[test]
fn seven_out_loses_pass_and_odds() {
    let mut table = table();
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = ScriptedRng::dice(&[(3, 3), (3, 4)]);

    let bet_id = table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(10))
        .unwrap();
    table.roll(&mut rng, &mut ledger).unwrap();
    table.place_odds(&mut ledger, bet_id, dollars(10)).unwrap();

    let outcome = table.roll(&mut rng, &mut ledger).unwrap();

    assert_eq!(outcome.total, 7);
    assert_eq!(outcome.resolutions[0].outcome, BetOutcome::Lose);
    assert_eq!(outcome.resolutions[0].payout, Amount::ZERO);
    assert_eq!(outcome.phase_after, CrapsPhase::ComeOut);
    assert!(table.bets().is_empty());
    assert_eq!(ledger.balance(), dollars(80));
}

#[test]
fn dont_pass_wins_on_seven_with_true_odds() {
    let mut table = table();
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = ScriptedRng::dice(&[(2, 2), (3, 4)]);

    let bet_id = table
        .place_bet(&mut ledger, CrapsBetKind::DontPass, dollars(10))
        .unwrap();
    table.roll(&mut rng, &mut ledger).unwrap();
    assert_eq!(table.table_point(), Some(4));

    table.place_odds(&mut ledger, bet_id, dollars(20)).unwrap();
    assert_eq!(ledger.balance(), dollars(70));

    // Seven-out: don't pass выигрывает, odds по пойнту 4 платят 1/2.
    let outcome = table.roll(&mut rng, &mut ledger).unwrap();
    assert_eq!(outcome.resolutions[0].outcome, BetOutcome::Win);
    assert_eq!(outcome.resolutions[0].payout, dollars(50));
    assert_eq!(ledger.balance(), dollars(120));
}

#[test]
fn odds_clamped_to_three_times_flat() {
    let mut table = table();
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = ScriptedRng::dice(&[(3, 3)]);

    let bet_id = table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(10))
        .unwrap();
    table.roll(&mut rng, &mut ledger).unwrap();

    // Запрошено $50, лимит 3 × $10: списывается только $30.
    let staked = table.place_odds(&mut ledger, bet_id, dollars(50)).unwrap();
    assert_eq!(staked, dollars(30));
    assert_eq!(ledger.balance(), dollars(60));
    assert_eq!(table.bets()[0].odds, dollars(30));

    let err = table.place_odds(&mut ledger, bet_id, dollars(5)).unwrap_err();
    assert_eq!(err, EngineError::OddsLimitReached(bet_id));
    assert_eq!(ledger.balance(), dollars(60));
}

#[test]
fn odds_require_established_point() {
    let mut table = table();
    let mut ledger = Ledger::new(dollars(100));

    let bet_id = table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(10))
        .unwrap();

    let err = table.place_odds(&mut ledger, bet_id, dollars(10)).unwrap_err();
    assert_eq!(err, EngineError::InvalidAction);

    let err = table.place_odds(&mut ledger, 999, dollars(10)).unwrap_err();
    assert_eq!(err, EngineError::UnknownBet(999));
    assert_eq!(ledger.balance(), dollars(90));
}

//
// ---------- фазовые правила размещения ----------

#[test]
fn placement_respects_table_phase() {
    let mut table = table();
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = ScriptedRng::dice(&[(3, 3)]);

    // Come до установки пойнта недопустим.
    let err = table
        .place_bet(&mut ledger, CrapsBetKind::Come, dollars(5))
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidAction);

    table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(10))
        .unwrap();
    table.roll(&mut rng, &mut ledger).unwrap();

    // При пойнте линейные ставки закрыты, come/don't come открыты.
    let err = table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(10))
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidAction);
    table
        .place_bet(&mut ledger, CrapsBetKind::DontCome, dollars(5))
        .unwrap();

    assert_eq!(ledger.balance(), dollars(85));
}

#[test]
fn min_bet_and_empty_roll_rejected() {
    let mut table = table();
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = ScriptedRng::dice(&[]);

    let err = table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(1))
        .unwrap_err();
    assert!(matches!(err, EngineError::BetBelowMinimum(_, _)));

    let err = table.roll(&mut rng, &mut ledger).unwrap_err();
    assert_eq!(err, EngineError::InvalidAction, "бросок без ставок запрещён");
    assert_eq!(ledger.balance(), dollars(100));
}

#[test]
fn same_kind_flat_bets_merge() {
    let mut table = table();
    let mut ledger = Ledger::new(dollars(100));

    let id1 = table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(5))
        .unwrap();
    let id2 = table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(5))
        .unwrap();

    assert_eq!(id1, id2);
    assert_eq!(table.bets().len(), 1);
    assert_eq!(table.bets()[0].amount, dollars(10));
    assert_eq!(ledger.balance(), dollars(90));
}

//
// ---------- come-ставки ----------

#[test]
fn come_bet_travels_and_resolves_once() {
    let mut table = table();
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = ScriptedRng::dice(&[(2, 2), (2, 3), (2, 2), (4, 5), (2, 3)]);

    let pass_id = table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(10))
        .unwrap();
    table.roll(&mut rng, &mut ledger).unwrap(); // пойнт 4

    let come_id = table
        .place_bet(&mut ledger, CrapsBetKind::Come, dollars(10))
        .unwrap();
    assert_eq!(ledger.balance(), dollars(80));

    // 5: come-ставка уезжает на пойнт 5, pass не тронута.
    let outcome = table.roll(&mut rng, &mut ledger).unwrap();
    assert!(outcome.resolutions.is_empty());
    assert_eq!(outcome.travelled, vec![come_id]);

    // 4: пойнт стола выбит — pass выигрывает и снимается, come остаётся.
    let outcome = table.roll(&mut rng, &mut ledger).unwrap();
    assert_eq!(outcome.resolutions.len(), 1);
    assert_eq!(outcome.resolutions[0].id, pass_id);
    assert_eq!(outcome.resolutions[0].payout, dollars(20));
    assert_eq!(outcome.phase_after, CrapsPhase::ComeOut);
    assert_eq!(table.bets().len(), 1, "разрешённая pass снята со стола");
    assert_eq!(ledger.balance(), dollars(100));

    // Come-out 9: "уехавшие" come-ставки не участвуют, пойнт 9 встаёт.
    let outcome = table.roll(&mut rng, &mut ledger).unwrap();
    assert!(outcome.resolutions.is_empty());
    assert_eq!(outcome.phase_after, CrapsPhase::Point(9));

    // 5: come-ставка выбивает свой пойнт.
    let outcome = table.roll(&mut rng, &mut ledger).unwrap();
    assert_eq!(outcome.resolutions.len(), 1);
    assert_eq!(outcome.resolutions[0].id, come_id);
    assert_eq!(outcome.resolutions[0].payout, dollars(20));
    assert!(table.bets().is_empty());
    assert_eq!(ledger.balance(), dollars(120));
}

#[test]
fn fresh_come_bet_wins_on_seven_while_riding_pass_loses() {
    let mut table = table();
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = ScriptedRng::dice(&[(2, 2), (3, 4)]);

    table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(10))
        .unwrap();
    table.roll(&mut rng, &mut ledger).unwrap(); // пойнт 4

    table
        .place_bet(&mut ledger, CrapsBetKind::Come, dollars(10))
        .unwrap();

    // 7: свежая come-ставка выигрывает свой "локальный come-out",
    // pass с пойнтом проигрывает seven-out.
    let outcome = table.roll(&mut rng, &mut ledger).unwrap();

    assert_eq!(outcome.resolutions.len(), 2);
    let come = outcome
        .resolutions
        .iter()
        .find(|r| r.kind == CrapsBetKind::Come)
        .unwrap();
    let pass = outcome
        .resolutions
        .iter()
        .find(|r| r.kind == CrapsBetKind::Pass)
        .unwrap();
    assert_eq!(come.outcome, BetOutcome::Win);
    assert_eq!(come.payout, dollars(20));
    assert_eq!(pass.outcome, BetOutcome::Lose);
    assert_eq!(outcome.phase_after, CrapsPhase::ComeOut);
    assert!(table.bets().is_empty());
    assert_eq!(ledger.balance(), dollars(100));
}

#[test]
fn dont_come_bar_twelve_pushes_during_point() {
    let mut table = table();
    let mut ledger = Ledger::new(dollars(100));
    let mut rng = ScriptedRng::dice(&[(2, 2), (6, 6)]);

    table
        .place_bet(&mut ledger, CrapsBetKind::Pass, dollars(10))
        .unwrap();
    table.roll(&mut rng, &mut ledger).unwrap(); // пойнт 4

    table
        .place_bet(&mut ledger, CrapsBetKind::DontCome, dollars(10))
        .unwrap();

    // 12: don't come пушует (bar-12), pass с пойнтом 4 не участвует.
    let outcome = table.roll(&mut rng, &mut ledger).unwrap();

    assert_eq!(outcome.resolutions.len(), 1);
    assert_eq!(outcome.resolutions[0].kind, CrapsBetKind::DontCome);
    assert_eq!(outcome.resolutions[0].outcome, BetOutcome::Push);
    assert_eq!(outcome.resolutions[0].payout, dollars(10));
    assert_eq!(outcome.phase_after, CrapsPhase::Point(4));
    assert_eq!(table.bets().len(), 1);
    assert_eq!(ledger.balance(), dollars(90));
}
