use serde::{Deserialize, Serialize};

use crate::domain::ledger::Ledger;
use crate::domain::{Amount, GameKind, RoundId};
use crate::engine::errors::EngineError;
use crate::engine::events::{RoundEventKind, RoundLog};
use crate::engine::RandomSource;

pub const REELS: usize = 5;
pub const ROWS: usize = 3;

/// Фиксированные пейлайны: для каждого барабана — индекс ряда.
pub const PAYLINES: [[usize; REELS]; 10] = [
    [1, 1, 1, 1, 1],
    [0, 0, 0, 0, 0],
    [2, 2, 2, 2, 2],
    [0, 1, 2, 1, 0],
    [2, 1, 0, 1, 2],
    [0, 0, 1, 2, 2],
    [2, 2, 1, 0, 0],
    [1, 0, 1, 0, 1],
    [1, 2, 1, 2, 1],
    [0, 1, 0, 1, 0],
];

/// Алфавит символов.
///
/// `Wild` замещает любой линейный символ (но не скаттер); `Scatter`
/// не участвует в линиях и считается по всему полю — даёт бесплатные
/// спины.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SlotSymbol {
    Cherry,
    Lemon,
    Orange,
    Bell,
    Star,
    Diamond,
    Seven,
    Wild,
    Scatter,
}

impl SlotSymbol {
    pub const ALL: [SlotSymbol; 9] = [
        SlotSymbol::Cherry,
        SlotSymbol::Lemon,
        SlotSymbol::Orange,
        SlotSymbol::Bell,
        SlotSymbol::Star,
        SlotSymbol::Diamond,
        SlotSymbol::Seven,
        SlotSymbol::Wild,
        SlotSymbol::Scatter,
    ];

    /// Вес символа во взвешенном распределении барабана.
    pub fn weight(self) -> u32 {
        match self {
            SlotSymbol::Cherry => 8,
            SlotSymbol::Lemon => 7,
            SlotSymbol::Orange => 6,
            SlotSymbol::Bell => 5,
            SlotSymbol::Star => 4,
            SlotSymbol::Diamond => 3,
            SlotSymbol::Seven => 2,
            SlotSymbol::Wild => 1,
            SlotSymbol::Scatter => 2,
        }
    }

    /// Суммарный вес алфавита.
    pub fn total_weight() -> u32 {
        Self::ALL.iter().map(|s| s.weight()).sum()
    }

    /// Линейный множитель за `count` совпадений слева (3/4/5).
    /// Скаттер по линиям не платит.
    pub fn line_multiplier(self, count: usize) -> u64 {
        let tier = match count {
            3 => 0,
            4 => 1,
            c if c >= 5 => 2,
            _ => return 0,
        };
        let table: [u64; 3] = match self {
            SlotSymbol::Cherry => [2, 5, 10],
            SlotSymbol::Lemon => [3, 8, 15],
            SlotSymbol::Orange => [4, 10, 20],
            SlotSymbol::Bell => [5, 15, 30],
            SlotSymbol::Star => [8, 20, 50],
            SlotSymbol::Diamond => [10, 30, 100],
            SlotSymbol::Seven => [15, 50, 200],
            SlotSymbol::Wild => [20, 75, 500],
            SlotSymbol::Scatter => [0, 0, 0],
        };
        table[tier]
    }
}

impl core::fmt::Display for SlotSymbol {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let glyph = match self {
            SlotSymbol::Cherry => "🍒",
            SlotSymbol::Lemon => "🍋",
            SlotSymbol::Orange => "🍊",
            SlotSymbol::Bell => "🔔",
            SlotSymbol::Star => "⭐",
            SlotSymbol::Diamond => "💎",
            SlotSymbol::Seven => "7",
            SlotSymbol::Wild => "🃏",
            SlotSymbol::Scatter => "🎰",
        };
        write!(f, "{glyph}")
    }
}

/// Поле 5×3: `cells[reel][row]`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotGrid {
    pub cells: [[SlotSymbol; ROWS]; REELS],
}

impl SlotGrid {
    pub fn symbol_at(&self, reel: usize, row: usize) -> SlotSymbol {
        self.cells[reel][row]
    }

    /// Скаттеры по всему полю, независимо от пейлайнов.
    pub fn count_scatters(&self) -> u8 {
        let mut count = 0;
        for reel in &self.cells {
            for &sym in reel {
                if sym == SlotSymbol::Scatter {
                    count += 1;
                }
            }
        }
        count
    }
}

/// Выигрыш по одной линии.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineWin {
    pub line: usize,
    pub symbol: SlotSymbol,
    pub count: usize,
    /// Зачисленная выплата (множитель фриспинов уже применён).
    pub payout: Amount,
}

/// Итог спина.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SlotsOutcome {
    pub round_id: RoundId,
    pub grid: SlotGrid,
    pub line_wins: Vec<LineWin>,
    pub scatter_count: u8,
    /// Начислено этим спином.
    pub free_spins_awarded: u32,
    /// Остаток бесплатных спинов после этого.
    pub free_spins_remaining: u32,
    /// Был ли сам спин бесплатным.
    pub free_spin: bool,
    pub multiplier: u64,
    pub bet: Amount,
    pub total_payout: Amount,
}

/// Конфиг автомата.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotsConfig {
    pub min_bet: Amount,
    /// Множитель линейных выплат во время бесплатных спинов.
    pub free_spin_multiplier: u64,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            min_bet: Amount::from_dollars(1),
            free_spin_multiplier: 2,
        }
    }
}

/// Количество бесплатных спинов за 3/4/5+ скаттеров.
fn scatter_award(scatters: u8) -> u32 {
    match scatters {
        0..=2 => 0,
        3 => 10,
        4 => 15,
        _ => 25,
    }
}

/// Слот-автомат. Единственное состояние между спинами — счётчик
/// бесплатных спинов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SlotMachine {
    pub config: SlotsConfig,
    pub free_spins: u32,
    pub log: RoundLog,
}

impl SlotMachine {
    pub fn new(config: SlotsConfig) -> Self {
        Self {
            config,
            free_spins: 0,
            log: RoundLog::new(),
        }
    }

    /// Спин: списывает ставку (кроме бесплатных спинов), крутит поле,
    /// оценивает пейлайны и скаттеры, зачисляет выигрыш.
    pub fn spin<R: RandomSource>(
        &mut self,
        rng: &mut R,
        ledger: &mut Ledger,
        round_id: RoundId,
        bet: Amount,
    ) -> Result<SlotsOutcome, EngineError> {
        if bet < self.config.min_bet {
            return Err(EngineError::BetBelowMinimum(bet, self.config.min_bet));
        }

        let free_spin = self.free_spins > 0;
        if free_spin {
            self.free_spins -= 1;
        } else {
            ledger.debit(bet)?;
        }

        self.log.clear();
        self.log.push(RoundEventKind::RoundStarted {
            game: GameKind::Slots,
            round_id,
        });
        if !free_spin {
            self.log.push(RoundEventKind::BetPlaced {
                bet: "spin".to_string(),
                amount: bet,
            });
        }

        let grid = draw_grid(rng);
        let scatter_count = grid.count_scatters();
        self.log.push(RoundEventKind::ReelsSpun {
            scatters: scatter_count,
        });

        let multiplier = if free_spin {
            self.config.free_spin_multiplier
        } else {
            1
        };
        let line_wins = evaluate_lines(&grid, bet, multiplier);

        let awarded = scatter_award(scatter_count);
        if awarded > 0 {
            self.free_spins += awarded;
            self.log
                .push(RoundEventKind::FreeSpinsAwarded { count: awarded });
        }

        let mut total_payout = Amount::ZERO;
        for win in &line_wins {
            total_payout += win.payout;
        }
        if !total_payout.is_zero() {
            ledger.credit(total_payout);
        }
        for win in &line_wins {
            self.log.push(RoundEventKind::BetResolved {
                bet: format!("line {}", win.line + 1),
                outcome: crate::engine::events::BetOutcome::Win,
                payout: win.payout,
            });
        }
        self.log.push(RoundEventKind::RoundFinished { round_id });

        Ok(SlotsOutcome {
            round_id,
            grid,
            line_wins,
            scatter_count,
            free_spins_awarded: awarded,
            free_spins_remaining: self.free_spins,
            free_spin,
            multiplier,
            bet,
            total_payout,
        })
    }

    pub fn free_spins(&self) -> u32 {
        self.free_spins
    }
}

/// Взвешенный выбор символа.
fn weighted_symbol<R: RandomSource>(rng: &mut R) -> SlotSymbol {
    let mut pick = rng.next_below(SlotSymbol::total_weight());
    for sym in SlotSymbol::ALL {
        let w = sym.weight();
        if pick < w {
            return sym;
        }
        pick -= w;
    }
    // Недостижимо: pick < total_weight по контракту RandomSource.
    SlotSymbol::Cherry
}

fn draw_grid<R: RandomSource>(rng: &mut R) -> SlotGrid {
    let mut cells = [[SlotSymbol::Cherry; ROWS]; REELS];
    for reel in cells.iter_mut() {
        for cell in reel.iter_mut() {
            *cell = weighted_symbol(rng);
        }
    }
    SlotGrid { cells }
}

/// Оценка пейлайнов: число совпадающих ведущих символов слева направо,
/// wild замещает любой символ; линия платит при count ≥ 3. Платящий
/// символ линии — первый не-wild (линия из одних wild платит как wild).
fn evaluate_lines(grid: &SlotGrid, bet: Amount, multiplier: u64) -> Vec<LineWin> {
    let mut wins = Vec::new();

    for (li, line) in PAYLINES.iter().enumerate() {
        let mut count = 0usize;
        let mut target: Option<SlotSymbol> = None;

        for (reel, &row) in line.iter().enumerate() {
            let sym = grid.symbol_at(reel, row);
            if sym == SlotSymbol::Scatter {
                break;
            }
            match target {
                None => {
                    if sym != SlotSymbol::Wild {
                        target = Some(sym);
                    }
                    count += 1;
                }
                Some(t) => {
                    if sym == t || sym == SlotSymbol::Wild {
                        count += 1;
                    } else {
                        break;
                    }
                }
            }
        }

        if count >= 3 {
            let symbol = target.unwrap_or(SlotSymbol::Wild);
            let line_mult = symbol.line_multiplier(count);
            if line_mult > 0 {
                wins.push(LineWin {
                    line: li,
                    symbol,
                    count,
                    payout: bet.times(line_mult).times(multiplier),
                });
            }
        }
    }

    wins
}
