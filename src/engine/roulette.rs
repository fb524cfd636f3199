use serde::{Deserialize, Serialize};

use crate::domain::ledger::Ledger;
use crate::domain::{Amount, GameKind, RoundId};
use crate::engine::errors::EngineError;
use crate::engine::events::{BetOutcome, RoundEventKind, RoundLog};
use crate::engine::RandomSource;

/// Красные номера европейского колеса.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Цвет номера.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RouletteColor {
    Red,
    Black,
    Green,
}

pub fn color_of(number: u8) -> RouletteColor {
    if number == 0 {
        RouletteColor::Green
    } else if RED_NUMBERS.contains(&number) {
        RouletteColor::Red
    } else {
        RouletteColor::Black
    }
}

/// Вид ставки. Каждый вид покрывает фиксированное множество номеров и
/// платит фиксированный множитель (множитель включает возврат стейка).
/// Зеро покрывается только прямой ставкой `Straight(0)`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RouletteBetKind {
    /// Прямая ставка на один номер 0–36, платит 36×.
    Straight(u8),
    Red,
    Black,
    Odd,
    Even,
    /// 1–18.
    Low,
    /// 19–36.
    High,
    /// Дюжина 1..=3 (1–12 / 13–24 / 25–36), платит 3×.
    Dozen(u8),
}

impl RouletteBetKind {
    /// Корректно ли задана ставка (номер/дюжина в диапазоне).
    pub fn is_valid(&self) -> bool {
        match self {
            RouletteBetKind::Straight(n) => *n <= 36,
            RouletteBetKind::Dozen(d) => (1..=3).contains(d),
            _ => true,
        }
    }

    /// Покрывает ли ставка выпавший номер.
    pub fn covers(&self, number: u8) -> bool {
        match self {
            RouletteBetKind::Straight(n) => number == *n,
            RouletteBetKind::Red => color_of(number) == RouletteColor::Red,
            RouletteBetKind::Black => color_of(number) == RouletteColor::Black,
            RouletteBetKind::Odd => number != 0 && number % 2 == 1,
            RouletteBetKind::Even => number != 0 && number % 2 == 0,
            RouletteBetKind::Low => (1..=18).contains(&number),
            RouletteBetKind::High => (19..=36).contains(&number),
            RouletteBetKind::Dozen(d) => {
                number != 0 && (number - 1) / 12 + 1 == *d
            }
        }
    }

    /// Множитель выплаты (стейк входит в выплату).
    pub fn multiplier(&self) -> u64 {
        match self {
            RouletteBetKind::Straight(_) => 36,
            RouletteBetKind::Dozen(_) => 3,
            _ => 2,
        }
    }

    pub fn label(&self) -> String {
        match self {
            RouletteBetKind::Straight(n) => format!("{n}"),
            RouletteBetKind::Red => "Red".to_string(),
            RouletteBetKind::Black => "Black".to_string(),
            RouletteBetKind::Odd => "Odd".to_string(),
            RouletteBetKind::Even => "Even".to_string(),
            RouletteBetKind::Low => "1-18".to_string(),
            RouletteBetKind::High => "19-36".to_string(),
            RouletteBetKind::Dozen(d) => format!("dozen {d}"),
        }
    }
}

/// Конфиг рулетки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteConfig {
    pub min_bet: Amount,
}

impl Default for RouletteConfig {
    fn default() -> Self {
        Self {
            min_bet: Amount::from_dollars(1),
        }
    }
}

/// Ставка на столе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteBet {
    pub kind: RouletteBetKind,
    pub amount: Amount,
}

/// Итог одной ставки после спина.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteResolution {
    pub kind: RouletteBetKind,
    pub amount: Amount,
    pub outcome: BetOutcome,
    pub payout: Amount,
}

/// Итог спина: номер, цвет и судьба каждой ставки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RouletteOutcome {
    pub round_id: RoundId,
    pub number: u8,
    pub color: RouletteColor,
    pub resolutions: Vec<RouletteResolution>,
    pub total_payout: Amount,
}

/// Рулеточный стол: доска ставок + чистая оценка спина. Машины состояний
/// здесь нет — каждый спин разрешает и снимает все ставки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RouletteTable {
    pub config: RouletteConfig,
    pub bets: Vec<RouletteBet>,
    pub log: RoundLog,
}

impl RouletteTable {
    pub fn new(config: RouletteConfig) -> Self {
        Self {
            config,
            bets: Vec::new(),
            log: RoundLog::new(),
        }
    }

    /// Поставить. Повторная ставка того же вида доливается в существующую.
    pub fn place_bet(
        &mut self,
        ledger: &mut Ledger,
        kind: RouletteBetKind,
        amount: Amount,
    ) -> Result<(), EngineError> {
        if !kind.is_valid() {
            return Err(EngineError::InvalidAction);
        }
        if amount < self.config.min_bet {
            return Err(EngineError::BetBelowMinimum(amount, self.config.min_bet));
        }
        ledger.debit(amount)?;

        if let Some(bet) = self.bets.iter_mut().find(|b| b.kind == kind) {
            bet.amount += amount;
        } else {
            self.bets.push(RouletteBet { kind, amount });
        }
        self.log.push(RoundEventKind::BetPlaced {
            bet: kind.label(),
            amount,
        });
        Ok(())
    }

    /// Снять все ставки со стола с возвратом денег (до спина).
    pub fn clear_bets(&mut self, ledger: &mut Ledger) {
        for bet in self.bets.drain(..) {
            ledger.credit(bet.amount);
            self.log.push(RoundEventKind::BetRefunded {
                bet: bet.kind.label(),
                amount: bet.amount,
            });
        }
    }

    /// Спин: равномерный номер 0–36; каждая покрывающая ставка платит
    /// `amount × multiplier`, остальные сгорают. Доска очищается.
    pub fn spin<R: RandomSource>(
        &mut self,
        rng: &mut R,
        ledger: &mut Ledger,
        round_id: RoundId,
    ) -> Result<RouletteOutcome, EngineError> {
        if self.bets.is_empty() {
            return Err(EngineError::InvalidAction);
        }

        self.log.push(RoundEventKind::RoundStarted {
            game: GameKind::Roulette,
            round_id,
        });
        let number = rng.next_below(37) as u8;
        self.log.push(RoundEventKind::WheelSpun { number });

        let mut resolutions = Vec::with_capacity(self.bets.len());
        let mut total_payout = Amount::ZERO;

        for bet in self.bets.drain(..) {
            let (outcome, payout) = if bet.kind.covers(number) {
                (BetOutcome::Win, bet.amount.times(bet.kind.multiplier()))
            } else {
                (BetOutcome::Lose, Amount::ZERO)
            };
            total_payout += payout;
            resolutions.push(RouletteResolution {
                kind: bet.kind,
                amount: bet.amount,
                outcome,
                payout,
            });
        }

        if !total_payout.is_zero() {
            ledger.credit(total_payout);
        }
        for res in &resolutions {
            self.log.push(RoundEventKind::BetResolved {
                bet: res.kind.label(),
                outcome: res.outcome,
                payout: res.payout,
            });
        }
        self.log.push(RoundEventKind::RoundFinished { round_id });

        Ok(RouletteOutcome {
            round_id,
            number,
            color: color_of(number),
            resolutions,
            total_payout,
        })
    }

    /// Суммарный стейк на доске.
    pub fn total_staked(&self) -> Amount {
        self.bets
            .iter()
            .fold(Amount::ZERO, |acc, b| acc + b.amount)
    }
}
