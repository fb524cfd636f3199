use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::ledger::Ledger;
use crate::domain::shoe::Shoe;
use crate::domain::{Amount, GameKind, RoundId};
use crate::engine::errors::EngineError;
use crate::engine::events::{BetOutcome, RoundEventKind, RoundLog};
use crate::engine::RandomSource;
use crate::eval::baccarat as bac;

/// Конфиг баккара-стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaccaratConfig {
    pub num_decks: u8,
    pub min_bet: Amount,
    pub reshuffle_threshold: usize,
}

impl Default for BaccaratConfig {
    fn default() -> Self {
        Self {
            num_decks: 8,
            min_bet: Amount::from_dollars(5),
            reshuffle_threshold: 30,
        }
    }
}

/// Сторона ставки (и одновременно — возможный победитель раунда).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BetSide {
    Player,
    Banker,
    Tie,
}

impl core::fmt::Display for BetSide {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            BetSide::Player => "player",
            BetSide::Banker => "banker",
            BetSide::Tie => "tie",
        };
        write!(f, "{s}")
    }
}

/// Фаза раунда.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BaccaratPhase {
    Betting,
    Dealing,
    Resolved,
}

/// Итог раунда баккары.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BaccaratSummary {
    pub round_id: RoundId,
    pub player_cards: Vec<Card>,
    pub banker_cards: Vec<Card>,
    pub player_total: u8,
    pub banker_total: u8,
    pub winner: BetSide,
    /// Раунд закрыт натуралом (без третьих карт).
    pub natural: bool,
    pub bet_side: BetSide,
    pub bet_amount: Amount,
    pub outcome: BetOutcome,
    pub payout: Amount,
}

/// Баккара-стол. Раунд одношаговый: deal списывает ставку, раздаёт по
/// правилам третьей карты и сразу возвращает разрешённый итог.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BaccaratTable {
    pub config: BaccaratConfig,
    pub shoe: Shoe,
    pub phase: BaccaratPhase,
    pub log: RoundLog,
}

impl BaccaratTable {
    pub fn new(config: BaccaratConfig) -> Self {
        let shoe = Shoe::empty(config.num_decks);
        Self {
            config,
            shoe,
            phase: BaccaratPhase::Betting,
            log: RoundLog::new(),
        }
    }

    /// Разыграть раунд на ставку `amount` за сторону `side`.
    pub fn deal<R: RandomSource>(
        &mut self,
        rng: &mut R,
        ledger: &mut Ledger,
        round_id: RoundId,
        side: BetSide,
        amount: Amount,
    ) -> Result<BaccaratSummary, EngineError> {
        if self.phase != BaccaratPhase::Betting {
            return Err(EngineError::InvalidAction);
        }
        if amount < self.config.min_bet {
            return Err(EngineError::BetBelowMinimum(amount, self.config.min_bet));
        }
        ledger.debit(amount)?;

        self.phase = BaccaratPhase::Dealing;
        self.log.clear();
        self.log.push(RoundEventKind::RoundStarted {
            game: GameKind::Baccarat,
            round_id,
        });
        self.log.push(RoundEventKind::BetPlaced {
            bet: side.to_string(),
            amount,
        });

        if self.shoe.remaining() < self.config.reshuffle_threshold {
            self.replace_shoe(rng);
        }

        // Раздача с чередованием: игрок, банкир, игрок, банкир.
        let mut player_cards = vec![self.draw_card(rng, "player")];
        let mut banker_cards = vec![self.draw_card(rng, "banker")];
        player_cards.push(self.draw_card(rng, "player"));
        banker_cards.push(self.draw_card(rng, "banker"));

        let natural = bac::is_natural(&player_cards) || bac::is_natural(&banker_cards);

        if !natural {
            // Третья карта игрока: на тотале 0–5.
            let mut player_third: Option<u8> = None;
            if bac::player_draws_third(bac::hand_total(&player_cards)) {
                let card = self.draw_card(rng, "player");
                player_third = Some(bac::card_value(card.rank));
                player_cards.push(card);
            }

            // Третья карта банкира — по таблице.
            if bac::banker_draws_third(bac::hand_total(&banker_cards), player_third) {
                let card = self.draw_card(rng, "banker");
                banker_cards.push(card);
            }
        }

        let player_total = bac::hand_total(&player_cards);
        let banker_total = bac::hand_total(&banker_cards);
        let winner = if player_total > banker_total {
            BetSide::Player
        } else if banker_total > player_total {
            BetSide::Banker
        } else {
            BetSide::Tie
        };

        // Выплаты: player 1:1, banker 0.95:1 (комиссия 5%), tie 8:1;
        // ничья при ставке на сторону — пуш (возврат ставки).
        let (outcome, payout) = if winner == BetSide::Tie {
            if side == BetSide::Tie {
                (BetOutcome::Win, amount.times(9))
            } else {
                (BetOutcome::Push, amount)
            }
        } else if winner == side {
            match side {
                BetSide::Player => (BetOutcome::Win, amount.times(2)),
                BetSide::Banker => (BetOutcome::Win, amount.mul_ratio(39, 20)),
                // winner != Tie, так что сюда не попадаем.
                BetSide::Tie => (BetOutcome::Lose, Amount::ZERO),
            }
        } else {
            (BetOutcome::Lose, Amount::ZERO)
        };

        if !payout.is_zero() {
            ledger.credit(payout);
        }
        self.log.push(RoundEventKind::BetResolved {
            bet: side.to_string(),
            outcome,
            payout,
        });
        self.log.push(RoundEventKind::RoundFinished { round_id });
        self.phase = BaccaratPhase::Resolved;

        Ok(BaccaratSummary {
            round_id,
            player_cards,
            banker_cards,
            player_total,
            banker_total,
            winner,
            natural,
            bet_side: side,
            bet_amount: amount,
            outcome,
            payout,
        })
    }

    /// Подготовить стол к следующему раунду.
    pub fn new_round(&mut self) -> Result<(), EngineError> {
        match self.phase {
            BaccaratPhase::Betting => Ok(()),
            BaccaratPhase::Resolved => {
                self.phase = BaccaratPhase::Betting;
                Ok(())
            }
            BaccaratPhase::Dealing => Err(EngineError::InvalidAction),
        }
    }

    pub fn phase(&self) -> BaccaratPhase {
        self.phase
    }

    pub fn shoe_remaining(&self) -> usize {
        self.shoe.remaining()
    }

    fn draw_card<R: RandomSource>(&mut self, rng: &mut R, to: &str) -> Card {
        loop {
            if let Some(card) = self.shoe.draw(true) {
                self.log.push(RoundEventKind::CardDealt {
                    to: to.to_string(),
                    card,
                });
                return card;
            }
            self.replace_shoe(rng);
        }
    }

    fn replace_shoe<R: RandomSource>(&mut self, rng: &mut R) {
        let mut shoe = Shoe::new(self.config.num_decks);
        rng.shuffle(&mut shoe.cards);
        self.shoe = shoe;
        self.log.push(RoundEventKind::ShoeReplaced {
            num_decks: self.config.num_decks,
        });
    }
}
