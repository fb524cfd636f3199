use serde::{Deserialize, Serialize};

use crate::domain::dice::DiceRoll;
use crate::domain::ledger::Ledger;
use crate::domain::{Amount, BetId};
use crate::engine::errors::EngineError;
use crate::engine::events::{BetOutcome, RoundEventKind, RoundLog};
use crate::engine::RandomSource;

/// Конфиг крэпс-стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrapsConfig {
    pub min_bet: Amount,
    /// Лимит odds-ставки: кратность от линейной ставки.
    pub max_odds_multiple: u64,
}

impl Default for CrapsConfig {
    fn default() -> Self {
        Self {
            min_bet: Amount::from_dollars(5),
            max_odds_multiple: 3,
        }
    }
}

/// Фаза стола. Единственный в системе двунаправленный переход:
/// comeOut ↔ point.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CrapsPhase {
    ComeOut,
    Point(u8),
}

/// Вид ставки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CrapsBetKind {
    Pass,
    DontPass,
    Come,
    DontCome,
}

impl core::fmt::Display for CrapsBetKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            CrapsBetKind::Pass => "pass",
            CrapsBetKind::DontPass => "dontpass",
            CrapsBetKind::Come => "come",
            CrapsBetKind::DontCome => "dontcome",
        };
        write!(f, "{s}")
    }
}

/// Ставка на столе. Живёт от размещения (списание) до разрешения
/// (зачисление выплаты и удаление) — разрешается ровно один раз.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrapsBet {
    pub id: BetId,
    pub kind: CrapsBetKind,
    pub amount: Amount,
    /// Пойнт, к которому ставка "уехала" (come/don't-come), либо пойнт
    /// стола для линейных ставок.
    pub point: Option<u8>,
    /// Прикреплённая odds-ставка (оплачивается по true odds).
    pub odds: Amount,
}

impl CrapsBet {
    fn label(&self) -> String {
        match self.point {
            Some(p) => format!("{} {p}", self.kind),
            None => self.kind.to_string(),
        }
    }
}

/// Итог одной ставки в броске.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrapsResolution {
    pub id: BetId,
    pub kind: CrapsBetKind,
    pub point: Option<u8>,
    pub amount: Amount,
    pub odds: Amount,
    pub outcome: BetOutcome,
    pub payout: Amount,
}

/// Итог броска: все ставки решаются одним атомарным шагом по одной сумме.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RollOutcome {
    pub dice: DiceRoll,
    pub total: u8,
    pub resolutions: Vec<CrapsResolution>,
    /// Ставки, получившие пойнт этим броском.
    pub travelled: Vec<BetId>,
    pub phase_after: CrapsPhase,
    pub total_payout: Amount,
}

/// True odds за выигрыш pass/come с пойнтом: 4/10 → 2×, 5/9 → 3/2×,
/// 6/8 → 6/5×. Округление half-up до цента в момент зачисления.
pub fn true_odds_pass(point: u8, odds: Amount) -> Amount {
    match point {
        4 | 10 => odds.times(2),
        5 | 9 => odds.mul_ratio(3, 2),
        6 | 8 => odds.mul_ratio(6, 5),
        _ => Amount::ZERO,
    }
}

/// True odds за выигрыш don't-pass/don't-come: 4/10 → 1/2×, 5/9 → 2/3×,
/// 6/8 → 5/6×.
pub fn true_odds_dont(point: u8, odds: Amount) -> Amount {
    match point {
        4 | 10 => odds.mul_ratio(1, 2),
        5 | 9 => odds.mul_ratio(2, 3),
        6 | 8 => odds.mul_ratio(5, 6),
        _ => Amount::ZERO,
    }
}

fn is_point_number(total: u8) -> bool {
    matches!(total, 4 | 5 | 6 | 8 | 9 | 10)
}

/// Крэпс-стол: фаза comeOut/point и множество одновременных ставок.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CrapsTable {
    pub config: CrapsConfig,
    pub phase: CrapsPhase,
    pub bets: Vec<CrapsBet>,
    next_bet_id: BetId,
    pub log: RoundLog,
}

impl CrapsTable {
    pub fn new(config: CrapsConfig) -> Self {
        Self {
            config,
            phase: CrapsPhase::ComeOut,
            bets: Vec::new(),
            next_bet_id: 1,
            log: RoundLog::new(),
        }
    }

    /// Поставить линейную ставку. Pass/Don't Pass — только на comeOut,
    /// Come/Don't Come — только при установленном пойнте. Повторная
    /// ставка того же вида без пойнта доливается в существующую.
    pub fn place_bet(
        &mut self,
        ledger: &mut Ledger,
        kind: CrapsBetKind,
        amount: Amount,
    ) -> Result<BetId, EngineError> {
        if amount < self.config.min_bet {
            return Err(EngineError::BetBelowMinimum(amount, self.config.min_bet));
        }
        let allowed = match kind {
            CrapsBetKind::Pass | CrapsBetKind::DontPass => self.phase == CrapsPhase::ComeOut,
            CrapsBetKind::Come | CrapsBetKind::DontCome => {
                matches!(self.phase, CrapsPhase::Point(_))
            }
        };
        if !allowed {
            return Err(EngineError::InvalidAction);
        }
        ledger.debit(amount)?;

        if let Some(bet) = self
            .bets
            .iter_mut()
            .find(|b| b.kind == kind && b.point.is_none())
        {
            bet.amount += amount;
            let id = bet.id;
            self.log.push(RoundEventKind::BetPlaced {
                bet: kind.to_string(),
                amount,
            });
            return Ok(id);
        }

        let id = self.next_bet_id;
        self.next_bet_id += 1;
        self.bets.push(CrapsBet {
            id,
            kind,
            amount,
            point: None,
            odds: Amount::ZERO,
        });
        self.log.push(RoundEventKind::BetPlaced {
            bet: kind.to_string(),
            amount,
        });
        Ok(id)
    }

    /// Прикрепить odds к ставке с установленным пойнтом. Суммарные odds
    /// ограничены `max_odds_multiple` × линейная ставка; излишек стейка
    /// срезается до свободного лимита. Возвращает фактически поставленное.
    pub fn place_odds(
        &mut self,
        ledger: &mut Ledger,
        bet_id: BetId,
        amount: Amount,
    ) -> Result<Amount, EngineError> {
        let (max, current) = {
            let bet = self
                .bets
                .iter()
                .find(|b| b.id == bet_id)
                .ok_or(EngineError::UnknownBet(bet_id))?;
            if bet.point.is_none() {
                return Err(EngineError::InvalidAction);
            }
            (bet.amount.times(self.config.max_odds_multiple), bet.odds)
        };

        let headroom = max.saturating_sub(current);
        if headroom.is_zero() {
            return Err(EngineError::OddsLimitReached(bet_id));
        }
        let add = amount.min(headroom);
        if add.is_zero() {
            return Err(EngineError::InvalidAction);
        }
        ledger.debit(add)?;

        let mut label = String::new();
        for bet in &mut self.bets {
            if bet.id == bet_id {
                bet.odds += add;
                label = format!("odds {}", bet.label());
                break;
            }
        }
        self.log.push(RoundEventKind::BetPlaced { bet: label, amount: add });
        Ok(add)
    }

    /// Бросок: решает ВСЕ выставленные ставки по одной сумме, одним
    /// атомарным шагом, и только потом принимает новые ставки.
    pub fn roll<R: RandomSource>(
        &mut self,
        rng: &mut R,
        ledger: &mut Ledger,
    ) -> Result<RollOutcome, EngineError> {
        if self.bets.is_empty() {
            return Err(EngineError::InvalidAction);
        }

        let dice = DiceRoll::new(
            rng.next_below(6) as u8 + 1,
            rng.next_below(6) as u8 + 1,
        );
        let total = dice.total();
        self.log.push(RoundEventKind::DiceRolled { dice });

        let mut resolutions: Vec<CrapsResolution> = Vec::new();
        let mut travelled: Vec<BetId> = Vec::new();
        let mut point_established = false;
        let mut point_cleared = false;

        match self.phase {
            CrapsPhase::ComeOut => {
                for bet in &mut self.bets {
                    let decided = match bet.kind {
                        CrapsBetKind::Pass => match total {
                            7 | 11 => Some((BetOutcome::Win, bet.amount.times(2))),
                            2 | 3 | 12 => Some((BetOutcome::Lose, Amount::ZERO)),
                            p => {
                                bet.point = Some(p);
                                travelled.push(bet.id);
                                None
                            }
                        },
                        CrapsBetKind::DontPass => match total {
                            2 | 3 => Some((BetOutcome::Win, bet.amount.times(2))),
                            7 | 11 => Some((BetOutcome::Lose, Amount::ZERO)),
                            // Bar-12: don't pass пушует, ставка возвращается.
                            12 => Some((BetOutcome::Push, bet.amount)),
                            p => {
                                bet.point = Some(p);
                                travelled.push(bet.id);
                                None
                            }
                        },
                        // "Уехавшие" come-ставки ждут установки нового
                        // пойнта и в comeOut-бросках не участвуют.
                        CrapsBetKind::Come | CrapsBetKind::DontCome => None,
                    };
                    if let Some((outcome, payout)) = decided {
                        resolutions.push(resolution_of(bet, outcome, payout));
                    }
                }
                // Пойнт устанавливается самим броском, независимо от
                // набора ставок.
                if is_point_number(total) {
                    self.phase = CrapsPhase::Point(total);
                    point_established = true;
                }
            }

            CrapsPhase::Point(point) => {
                for bet in &mut self.bets {
                    let decided = match bet.kind {
                        CrapsBetKind::Pass => match bet.point {
                            Some(p) if total == p => Some((
                                BetOutcome::Win,
                                bet.amount.times(2) + bet.odds + true_odds_pass(p, bet.odds),
                            )),
                            Some(_) if total == 7 => Some((BetOutcome::Lose, Amount::ZERO)),
                            _ => None,
                        },
                        CrapsBetKind::DontPass => match bet.point {
                            Some(p) if total == 7 => Some((
                                BetOutcome::Win,
                                bet.amount.times(2) + bet.odds + true_odds_dont(p, bet.odds),
                            )),
                            Some(p) if total == p => Some((BetOutcome::Lose, Amount::ZERO)),
                            _ => None,
                        },
                        CrapsBetKind::Come => match bet.point {
                            None => match total {
                                7 | 11 => Some((BetOutcome::Win, bet.amount.times(2))),
                                2 | 3 | 12 => Some((BetOutcome::Lose, Amount::ZERO)),
                                p => {
                                    bet.point = Some(p);
                                    travelled.push(bet.id);
                                    None
                                }
                            },
                            Some(p) if total == p => Some((
                                BetOutcome::Win,
                                bet.amount.times(2) + bet.odds + true_odds_pass(p, bet.odds),
                            )),
                            Some(_) if total == 7 => Some((BetOutcome::Lose, Amount::ZERO)),
                            _ => None,
                        },
                        CrapsBetKind::DontCome => match bet.point {
                            None => match total {
                                2 | 3 => Some((BetOutcome::Win, bet.amount.times(2))),
                                7 | 11 => Some((BetOutcome::Lose, Amount::ZERO)),
                                12 => Some((BetOutcome::Push, bet.amount)),
                                p => {
                                    bet.point = Some(p);
                                    travelled.push(bet.id);
                                    None
                                }
                            },
                            Some(p) if total == 7 => Some((
                                BetOutcome::Win,
                                bet.amount.times(2) + bet.odds + true_odds_dont(p, bet.odds),
                            )),
                            Some(p) if total == p => Some((BetOutcome::Lose, Amount::ZERO)),
                            _ => None,
                        },
                    };
                    if let Some((outcome, payout)) = decided {
                        resolutions.push(resolution_of(bet, outcome, payout));
                    }
                }

                if total == 7 || total == point {
                    self.phase = CrapsPhase::ComeOut;
                    point_cleared = true;
                }
            }
        }

        // Снять разрешённые ставки со стола и зачислить выплаты — по
        // одному расчёту на ставку.
        let mut total_payout = Amount::ZERO;
        for res in &resolutions {
            total_payout += res.payout;
        }
        self.bets
            .retain(|b| !resolutions.iter().any(|r| r.id == b.id));
        if !total_payout.is_zero() {
            ledger.credit(total_payout);
        }

        for res in &resolutions {
            self.log.push(RoundEventKind::BetResolved {
                bet: format!("{} #{}", res.kind, res.id),
                outcome: res.outcome,
                payout: res.payout,
            });
        }
        if point_established {
            self.log.push(RoundEventKind::PointEstablished { point: total });
        }
        if point_cleared {
            self.log.push(RoundEventKind::PointCleared { total });
        }

        Ok(RollOutcome {
            dice,
            total,
            resolutions,
            travelled,
            phase_after: self.phase,
            total_payout,
        })
    }

    pub fn phase(&self) -> CrapsPhase {
        self.phase
    }

    /// Пойнт стола, если установлен.
    pub fn table_point(&self) -> Option<u8> {
        match self.phase {
            CrapsPhase::Point(p) => Some(p),
            CrapsPhase::ComeOut => None,
        }
    }

    pub fn bets(&self) -> &[CrapsBet] {
        &self.bets
    }
}

fn resolution_of(bet: &CrapsBet, outcome: BetOutcome, payout: Amount) -> CrapsResolution {
    CrapsResolution {
        id: bet.id,
        kind: bet.kind,
        point: bet.point,
        amount: bet.amount,
        odds: bet.odds,
        outcome,
        payout,
    }
}
