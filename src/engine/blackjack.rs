use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};
use crate::domain::ledger::Ledger;
use crate::domain::shoe::Shoe;
use crate::domain::{Amount, GameKind, RoundId};
use crate::engine::errors::EngineError;
use crate::engine::events::{BetOutcome, RoundEventKind, RoundLog};
use crate::engine::{RandomSource, RoundStatus};
use crate::eval::blackjack::{self as bj, HandOutcome};
use crate::eval::counter::CardCounter;

/// Конфиг блэкджек-стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackConfig {
    pub num_decks: u8,
    pub min_bet: Amount,
    /// Максимум одновременных рук игрока (сплиты).
    pub max_hands: usize,
    /// Порог пересборки шуза, проверяется только между раундами.
    pub reshuffle_threshold: usize,
}

impl Default for BlackjackConfig {
    fn default() -> Self {
        Self {
            num_decks: 6,
            min_bet: Amount::from_dollars(5),
            max_hands: 4,
            reshuffle_threshold: 20,
        }
    }
}

/// Фаза раунда блэкджека.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlackjackPhase {
    Betting,
    Playing,
    DealerTurn,
    Resolved,
}

/// Тип действия игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlackjackActionKind {
    Hit,
    Stand,
    DoubleDown,
    Split,
}

/// Конкретное действие игрока над рукой.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackAction {
    /// Индекс руки в арене (см. `BlackjackTable::hands`).
    pub hand: usize,
    pub kind: BlackjackActionKind,
}

/// Одна рука игрока. Живёт в арене стола; индекс стабилен до конца раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackHand {
    pub cards: Vec<Card>,
    pub bet: Amount,
    pub doubled: bool,
    /// Рука получена сплитом: её 21 из двух карт — не натурал.
    pub split: bool,
    /// Рука — результат сплита тузов: ровно одна докупка, добор запрещён.
    pub from_split_aces: bool,
    pub done: bool,
    pub outcome: Option<HandOutcome>,
}

impl BlackjackHand {
    fn new(bet: Amount) -> Self {
        Self {
            cards: Vec::new(),
            bet,
            doubled: false,
            split: false,
            from_split_aces: false,
            done: false,
            outcome: None,
        }
    }
}

/// Итог одной руки: исход + зачисленная выплата.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandResolution {
    pub hand: usize,
    pub outcome: HandOutcome,
    pub payout: Amount,
}

/// Краткое описание завершённого раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BlackjackSummary {
    pub round_id: RoundId,
    pub dealer_cards: Vec<Card>,
    pub dealer_total: u8,
    pub resolutions: Vec<HandResolution>,
    pub total_payout: Amount,
}

/// Блэкджек-стол: шуз, арена рук, карты дилера, счётчик карт, лог раунда.
///
/// Машина состояний: betting → (deal) → playing → (hit/stand/double/split)*
/// → dealerTurn → resolved; натуралы на раздаче закрывают раунд сразу.
/// Руки никогда не переупорядочиваются: арена `hands` только растёт,
/// `order` хранит индексы в порядке стола, активна самая левая
/// незавершённая.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BlackjackTable {
    pub config: BlackjackConfig,
    pub shoe: Shoe,
    pub phase: BlackjackPhase,
    pub hands: Vec<BlackjackHand>,
    pub order: Vec<usize>,
    pub dealer_cards: Vec<Card>,
    pub counter: CardCounter,
    pub log: RoundLog,
    pub round_id: RoundId,
}

impl BlackjackTable {
    /// Новый стол. Шуз стартует пустым: первый deal пересоберёт и
    /// перемешает его обычным путём.
    pub fn new(config: BlackjackConfig) -> Self {
        let shoe = Shoe::empty(config.num_decks);
        Self {
            config,
            shoe,
            phase: BlackjackPhase::Betting,
            hands: Vec::new(),
            order: Vec::new(),
            dealer_cards: Vec::new(),
            counter: CardCounter::new(),
            log: RoundLog::new(),
            round_id: 0,
        }
    }

    // ------------------------------------------------------------------
    // Операции раунда
    // ------------------------------------------------------------------

    /// Раздача: списывает ставку, сдаёт 2+2 (вторая карта дилера закрыта).
    /// Натурал у любой стороны закрывает раунд без действий игрока.
    pub fn deal<R: RandomSource>(
        &mut self,
        rng: &mut R,
        ledger: &mut Ledger,
        round_id: RoundId,
        bet: Amount,
    ) -> Result<RoundStatus<BlackjackSummary>, EngineError> {
        if self.phase != BlackjackPhase::Betting {
            return Err(EngineError::InvalidAction);
        }
        if bet < self.config.min_bet {
            return Err(EngineError::BetBelowMinimum(bet, self.config.min_bet));
        }
        ledger.debit(bet)?;

        self.hands.clear();
        self.order.clear();
        self.dealer_cards.clear();
        self.log.clear();
        self.round_id = round_id;
        self.log.push(RoundEventKind::RoundStarted {
            game: GameKind::Blackjack,
            round_id,
        });

        // Пересборка шуза — строго между раундами.
        if self.shoe.remaining() < self.config.reshuffle_threshold {
            self.replace_shoe(rng);
        }

        self.hands.push(BlackjackHand::new(bet));
        self.order.push(0);
        self.log.push(RoundEventKind::BetPlaced {
            bet: hand_label(0),
            amount: bet,
        });

        // Две карты игроку, затем дилеру (вторая — закрытая "дырка").
        for _ in 0..2 {
            let card = self.draw_card(rng, true, &hand_label(0));
            self.hands[0].cards.push(card);
        }
        let up = self.draw_card(rng, true, "dealer");
        self.dealer_cards.push(up);
        let hole = self.draw_card(rng, false, "dealer");
        self.dealer_cards.push(hole);

        let player_bj = bj::is_blackjack(&self.hands[0].cards);
        let dealer_bj = bj::is_blackjack(&self.dealer_cards);

        if player_bj || dealer_bj {
            self.reveal_hole();
            let outcome = if player_bj && dealer_bj {
                HandOutcome::Push
            } else if player_bj {
                HandOutcome::Blackjack
            } else {
                HandOutcome::Lose
            };
            self.hands[0].done = true;
            self.hands[0].outcome = Some(outcome);
            return Ok(RoundStatus::Finished(self.resolve_round(ledger)));
        }

        self.phase = BlackjackPhase::Playing;
        Ok(RoundStatus::Ongoing)
    }

    /// Применить действие игрока к руке.
    pub fn apply_action<R: RandomSource>(
        &mut self,
        rng: &mut R,
        ledger: &mut Ledger,
        action: BlackjackAction,
    ) -> Result<RoundStatus<BlackjackSummary>, EngineError> {
        match action.kind {
            BlackjackActionKind::Hit => self.hit(rng, ledger, action.hand),
            BlackjackActionKind::Stand => self.stand(rng, ledger, action.hand),
            BlackjackActionKind::DoubleDown => self.double_down(rng, ledger, action.hand),
            BlackjackActionKind::Split => self.split(rng, ledger, action.hand),
        }
    }

    /// Добор одной карты в активную руку. На 21+ рука закрывается сама.
    pub fn hit<R: RandomSource>(
        &mut self,
        rng: &mut R,
        ledger: &mut Ledger,
        hand: usize,
    ) -> Result<RoundStatus<BlackjackSummary>, EngineError> {
        self.require_active(hand)?;

        let card = self.draw_card(rng, true, &hand_label(hand));
        self.hands[hand].cards.push(card);

        let total = bj::hand_total(&self.hands[hand].cards);
        if total.total >= 21 {
            self.hands[hand].done = true;
            if total.total > 21 {
                self.hands[hand].outcome = Some(HandOutcome::Bust);
            }
        }

        self.advance(rng, ledger)
    }

    /// Стоять: рука закрыта; когда незавершённых не осталось — ход дилера.
    pub fn stand<R: RandomSource>(
        &mut self,
        rng: &mut R,
        ledger: &mut Ledger,
        hand: usize,
    ) -> Result<RoundStatus<BlackjackSummary>, EngineError> {
        self.require_active(hand)?;
        self.hands[hand].done = true;
        self.advance(rng, ledger)
    }

    /// Удвоение: только на двух картах и при достатке средств.
    /// Списывает равную ставку, докупает ровно одну карту и закрывает руку.
    pub fn double_down<R: RandomSource>(
        &mut self,
        rng: &mut R,
        ledger: &mut Ledger,
        hand: usize,
    ) -> Result<RoundStatus<BlackjackSummary>, EngineError> {
        self.require_active(hand)?;
        if self.hands[hand].cards.len() != 2 {
            return Err(EngineError::InvalidAction);
        }
        ledger.debit(self.hands[hand].bet)?;

        let h = &mut self.hands[hand];
        h.bet = h.bet.times(2);
        h.doubled = true;
        self.log.push(RoundEventKind::DoubledDown { hand });

        let card = self.draw_card(rng, true, &hand_label(hand));
        self.hands[hand].cards.push(card);
        self.hands[hand].done = true;
        if bj::is_bust(&self.hands[hand].cards) {
            self.hands[hand].outcome = Some(HandOutcome::Bust);
        }

        self.advance(rng, ledger)
    }

    /// Сплит: две карты равной блэкджек-стоимости (10/J/Q/K взаимно
    /// сплитуются), не больше `max_hands` рук, равная доп.ставка.
    /// Сплит тузов: по одной докупке в каждую руку, обе сразу закрыты.
    pub fn split<R: RandomSource>(
        &mut self,
        rng: &mut R,
        ledger: &mut Ledger,
        hand: usize,
    ) -> Result<RoundStatus<BlackjackSummary>, EngineError> {
        self.require_active(hand)?;
        {
            let h = &self.hands[hand];
            if h.cards.len() != 2
                || bj::card_value(h.cards[0].rank) != bj::card_value(h.cards[1].rank)
                || self.hands.len() >= self.config.max_hands
            {
                return Err(EngineError::InvalidAction);
            }
        }
        let bet = self.hands[hand].bet;
        ledger.debit(bet)?;

        let second = self.hands[hand].cards.pop().ok_or(EngineError::Internal(
            "сплит: в руке меньше двух карт",
        ))?;
        let aces = second.rank == Rank::Ace;
        self.hands[hand].split = true;

        let new_hand = self.hands.len();
        let mut created = BlackjackHand::new(bet);
        created.cards.push(second);
        created.split = true;
        self.hands.push(created);

        let pos = self
            .order
            .iter()
            .position(|&i| i == hand)
            .ok_or(EngineError::Internal("сплит: рука вне порядка стола"))?;
        self.order.insert(pos + 1, new_hand);

        self.log.push(RoundEventKind::BetPlaced {
            bet: hand_label(new_hand),
            amount: bet,
        });
        self.log.push(RoundEventKind::HandSplit { hand, new_hand });

        // По одной карте в каждую из получившихся рук.
        let card = self.draw_card(rng, true, &hand_label(hand));
        self.hands[hand].cards.push(card);
        let card = self.draw_card(rng, true, &hand_label(new_hand));
        self.hands[new_hand].cards.push(card);

        if aces {
            for idx in [hand, new_hand] {
                self.hands[idx].from_split_aces = true;
                self.hands[idx].done = true;
            }
        }

        self.advance(rng, ledger)
    }

    /// Новый раунд: допустим только после разрешения предыдущего.
    pub fn new_round(&mut self) -> Result<(), EngineError> {
        match self.phase {
            BlackjackPhase::Betting => Ok(()),
            BlackjackPhase::Resolved => {
                self.phase = BlackjackPhase::Betting;
                self.hands.clear();
                self.order.clear();
                self.dealer_cards.clear();
                Ok(())
            }
            _ => Err(EngineError::InvalidAction),
        }
    }

    // ------------------------------------------------------------------
    // Запросы
    // ------------------------------------------------------------------

    pub fn phase(&self) -> BlackjackPhase {
        self.phase
    }

    /// Самая левая незавершённая рука.
    pub fn active_hand(&self) -> Option<usize> {
        self.order.iter().copied().find(|&i| !self.hands[i].done)
    }

    pub fn hands(&self) -> &[BlackjackHand] {
        &self.hands
    }

    pub fn dealer_cards(&self) -> &[Card] {
        &self.dealer_cards
    }

    pub fn shoe_remaining(&self) -> usize {
        self.shoe.remaining()
    }

    pub fn running_count(&self) -> i32 {
        self.counter.running_count()
    }

    pub fn true_count(&self) -> f32 {
        self.counter.true_count(self.shoe.remaining())
    }

    /// Доступен ли сплит руки (проверка ДО вызова, сама операция всё
    /// равно валидирует).
    pub fn can_split(&self, hand: usize, ledger: &Ledger) -> bool {
        self.active_hand() == Some(hand)
            && self.phase == BlackjackPhase::Playing
            && self.hands.len() < self.config.max_hands
            && self.hands[hand].cards.len() == 2
            && bj::card_value(self.hands[hand].cards[0].rank)
                == bj::card_value(self.hands[hand].cards[1].rank)
            && ledger.balance() >= self.hands[hand].bet
    }

    /// Доступно ли удвоение руки.
    pub fn can_double(&self, hand: usize, ledger: &Ledger) -> bool {
        self.active_hand() == Some(hand)
            && self.phase == BlackjackPhase::Playing
            && self.hands[hand].cards.len() == 2
            && ledger.balance() >= self.hands[hand].bet
    }

    // ------------------------------------------------------------------
    // Внутренности
    // ------------------------------------------------------------------

    fn require_active(&self, hand: usize) -> Result<(), EngineError> {
        if self.phase != BlackjackPhase::Playing {
            return Err(EngineError::InvalidAction);
        }
        if self.active_hand() != Some(hand) {
            return Err(EngineError::InvalidHand(hand));
        }
        Ok(())
    }

    /// Снять карту с шуза, учесть в счётчике, записать событие.
    /// Полное исчерпание посреди раздачи лечится аварийной пересборкой —
    /// наружу это не выходит.
    fn draw_card<R: RandomSource>(&mut self, rng: &mut R, face_up: bool, to: &str) -> Card {
        loop {
            if let Some(card) = self.shoe.draw(face_up) {
                self.counter.observe(&card);
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
        self.counter.reset();
        self.log.push(RoundEventKind::ShoeReplaced {
            num_decks: self.config.num_decks,
        });
    }

    fn reveal_hole(&mut self) {
        if let Some(card) = self.dealer_cards.get_mut(1) {
            if !card.face_up {
                card.reveal();
                let revealed = *card;
                self.counter.observe(&revealed);
                self.log
                    .push(RoundEventKind::HoleCardRevealed { card: revealed });
            }
        }
    }

    /// Передать ход следующей незавершённой руке либо дилеру.
    fn advance<R: RandomSource>(
        &mut self,
        rng: &mut R,
        ledger: &mut Ledger,
    ) -> Result<RoundStatus<BlackjackSummary>, EngineError> {
        if self.active_hand().is_some() {
            return Ok(RoundStatus::Ongoing);
        }

        self.phase = BlackjackPhase::DealerTurn;
        self.reveal_hole();

        // Если все руки перебрали — дилер не добирает вовсе.
        let all_bust = self.order.iter().all(|&i| {
            matches!(self.hands[i].outcome, Some(HandOutcome::Bust))
        });
        if !all_bust {
            while bj::dealer_must_draw(bj::hand_total(&self.dealer_cards)) {
                let card = self.draw_card(rng, true, "dealer");
                self.dealer_cards.push(card);
            }
        }

        Ok(RoundStatus::Finished(self.resolve_round(ledger)))
    }

    /// Разрешить все руки против дилера, зачислить выплаты — ровно по
    /// одному расчёту на руку.
    fn resolve_round(&mut self, ledger: &mut Ledger) -> BlackjackSummary {
        let order = self.order.clone();
        let mut resolutions = Vec::with_capacity(order.len());
        let mut total_payout = Amount::ZERO;

        for idx in order {
            let outcome = match self.hands[idx].outcome {
                Some(o) => o,
                None => {
                    let mut o = bj::determine_outcome(&self.hands[idx].cards, &self.dealer_cards);
                    // 21 из двух карт после сплита — не натурал.
                    if o == HandOutcome::Blackjack && self.hands[idx].split {
                        o = bj::outcome_by_totals(&self.hands[idx].cards, &self.dealer_cards);
                    }
                    o
                }
            };

            let bet = self.hands[idx].bet;
            let payout = match outcome {
                HandOutcome::Blackjack => bet.mul_ratio(5, 2),
                HandOutcome::Win => bet.times(2),
                HandOutcome::Push => bet,
                HandOutcome::Lose | HandOutcome::Bust => Amount::ZERO,
            };

            self.hands[idx].done = true;
            self.hands[idx].outcome = Some(outcome);
            if !payout.is_zero() {
                ledger.credit(payout);
            }
            total_payout += payout;

            self.log.push(RoundEventKind::BetResolved {
                bet: hand_label(idx),
                outcome: money_outcome(outcome),
                payout,
            });
            resolutions.push(HandResolution {
                hand: idx,
                outcome,
                payout,
            });
        }

        self.phase = BlackjackPhase::Resolved;
        self.log.push(RoundEventKind::RoundFinished {
            round_id: self.round_id,
        });

        BlackjackSummary {
            round_id: self.round_id,
            dealer_cards: self.dealer_cards.clone(),
            dealer_total: bj::hand_total(&self.dealer_cards).total,
            resolutions,
            total_payout,
        }
    }
}

fn hand_label(hand: usize) -> String {
    format!("hand {}", hand + 1)
}

fn money_outcome(outcome: HandOutcome) -> BetOutcome {
    match outcome {
        HandOutcome::Win | HandOutcome::Blackjack => BetOutcome::Win,
        HandOutcome::Push => BetOutcome::Push,
        HandOutcome::Lose | HandOutcome::Bust => BetOutcome::Lose,
    }
}
