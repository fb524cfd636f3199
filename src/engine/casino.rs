use serde::{Deserialize, Serialize};

use crate::api::commands::{
    BaccaratCommand, BlackjackCommand, Command, CrapsCommand, RouletteCommand, SlotsCommand,
};
use crate::api::dto::{
    build_baccarat_view, build_blackjack_view, build_craps_view, build_roulette_view,
    build_slots_view, CommandResponse,
};
use crate::domain::ledger::Ledger;
use crate::domain::{Amount, RoundId};
use crate::engine::baccarat::{BaccaratConfig, BaccaratTable};
use crate::engine::blackjack::{BlackjackConfig, BlackjackTable};
use crate::engine::craps::{CrapsConfig, CrapsTable};
use crate::engine::errors::EngineError;
use crate::engine::roulette::{RouletteConfig, RouletteTable};
use crate::engine::slots::{SlotMachine, SlotsConfig};
use crate::engine::{RandomSource, RoundStatus};

/// Ошибки уровня казино (над движками отдельных столов).
#[derive(Debug)]
pub enum CasinoError {
    /// Проброшенная ошибка из движка стола (EngineError).
    Engine(EngineError),
}

impl From<EngineError> for CasinoError {
    fn from(e: EngineError) -> Self {
        CasinoError::Engine(e)
    }
}

/// Казино: один леджер и по одному столу каждой игры.
///
/// Единственная точка, где сериализуемые команды превращаются в вызовы
/// движков. Леджер разделяется всеми столами, но мутируется только
/// через debit/credit внутри самих движков; `Casino` денег не трогает.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Casino {
    pub ledger: Ledger,
    pub blackjack: BlackjackTable,
    pub baccarat: BaccaratTable,
    pub craps: CrapsTable,
    pub roulette: RouletteTable,
    pub slots: SlotMachine,
    next_round_id: RoundId,
}

impl Casino {
    /// Казино с дефолтными конфигами столов и стартовым балансом.
    pub fn new(initial_balance: Amount) -> Self {
        Self {
            ledger: Ledger::new(initial_balance),
            blackjack: BlackjackTable::new(BlackjackConfig::default()),
            baccarat: BaccaratTable::new(BaccaratConfig::default()),
            craps: CrapsTable::new(CrapsConfig::default()),
            roulette: RouletteTable::new(RouletteConfig::default()),
            slots: SlotMachine::new(SlotsConfig::default()),
            next_round_id: 1,
        }
    }

    pub fn balance(&self) -> Amount {
        self.ledger.balance()
    }

    fn mint_round_id(&mut self) -> RoundId {
        let id = self.next_round_id;
        self.next_round_id += 1;
        id
    }

    /// Выполнить команду. Ошибка означает отказ: леджер и ход раунда
    /// не изменились (Deal мог лишь перезарядить уже разрешённый стол).
    pub fn dispatch<R: RandomSource>(
        &mut self,
        rng: &mut R,
        command: Command,
    ) -> Result<CommandResponse, CasinoError> {
        match command {
            Command::Blackjack(cmd) => self.dispatch_blackjack(rng, cmd),
            Command::Baccarat(cmd) => self.dispatch_baccarat(rng, cmd),
            Command::Craps(cmd) => self.dispatch_craps(rng, cmd),
            Command::Roulette(cmd) => self.dispatch_roulette(rng, cmd),
            Command::Slots(cmd) => self.dispatch_slots(rng, cmd),
        }
    }

    fn dispatch_blackjack<R: RandomSource>(
        &mut self,
        rng: &mut R,
        cmd: BlackjackCommand,
    ) -> Result<CommandResponse, CasinoError> {
        let status = match cmd {
            BlackjackCommand::Deal { bet } => {
                // Deal сам перезаряжает разрешённый стол: отдельной
                // команды "новый раунд" у фронта нет.
                self.blackjack.new_round()?;
                let round_id = self.mint_round_id();
                self.blackjack.deal(rng, &mut self.ledger, round_id, bet)?
            }
            BlackjackCommand::Action { action } => {
                self.blackjack.apply_action(rng, &mut self.ledger, action)?
            }
        };

        let view = build_blackjack_view(&self.blackjack, &self.ledger);
        Ok(match status {
            RoundStatus::Ongoing => CommandResponse::Blackjack(view),
            RoundStatus::Finished(summary) => CommandResponse::BlackjackFinished { view, summary },
        })
    }

    fn dispatch_baccarat<R: RandomSource>(
        &mut self,
        rng: &mut R,
        cmd: BaccaratCommand,
    ) -> Result<CommandResponse, CasinoError> {
        match cmd {
            BaccaratCommand::Deal { side, amount } => {
                self.baccarat.new_round()?;
                let round_id = self.mint_round_id();
                let summary = self
                    .baccarat
                    .deal(rng, &mut self.ledger, round_id, side, amount)?;
                let view = build_baccarat_view(&self.baccarat, &self.ledger);
                Ok(CommandResponse::Baccarat { view, summary })
            }
        }
    }

    fn dispatch_craps<R: RandomSource>(
        &mut self,
        rng: &mut R,
        cmd: CrapsCommand,
    ) -> Result<CommandResponse, CasinoError> {
        match cmd {
            CrapsCommand::PlaceBet { kind, amount } => {
                let bet_id = self.craps.place_bet(&mut self.ledger, kind, amount)?;
                let view = build_craps_view(&self.craps, &self.ledger);
                Ok(CommandResponse::CrapsBetPlaced { bet_id, view })
            }
            CrapsCommand::PlaceOdds { bet_id, amount } => {
                let staked = self.craps.place_odds(&mut self.ledger, bet_id, amount)?;
                let view = build_craps_view(&self.craps, &self.ledger);
                Ok(CommandResponse::CrapsOddsPlaced { staked, view })
            }
            CrapsCommand::Roll => {
                let outcome = self.craps.roll(rng, &mut self.ledger)?;
                let view = build_craps_view(&self.craps, &self.ledger);
                Ok(CommandResponse::CrapsRolled { outcome, view })
            }
        }
    }

    fn dispatch_roulette<R: RandomSource>(
        &mut self,
        rng: &mut R,
        cmd: RouletteCommand,
    ) -> Result<CommandResponse, CasinoError> {
        match cmd {
            RouletteCommand::PlaceBet { kind, amount } => {
                self.roulette.place_bet(&mut self.ledger, kind, amount)?;
                let view = build_roulette_view(&self.roulette, &self.ledger);
                Ok(CommandResponse::RouletteBoard(view))
            }
            RouletteCommand::ClearBets => {
                self.roulette.clear_bets(&mut self.ledger);
                let view = build_roulette_view(&self.roulette, &self.ledger);
                Ok(CommandResponse::RouletteBoard(view))
            }
            RouletteCommand::Spin => {
                let round_id = self.mint_round_id();
                let outcome = self.roulette.spin(rng, &mut self.ledger, round_id)?;
                let view = build_roulette_view(&self.roulette, &self.ledger);
                Ok(CommandResponse::RouletteSpun { outcome, view })
            }
        }
    }

    fn dispatch_slots<R: RandomSource>(
        &mut self,
        rng: &mut R,
        cmd: SlotsCommand,
    ) -> Result<CommandResponse, CasinoError> {
        match cmd {
            SlotsCommand::Spin { bet } => {
                let round_id = self.mint_round_id();
                let outcome = self.slots.spin(rng, &mut self.ledger, round_id, bet)?;
                let view = build_slots_view(&self.slots, &self.ledger);
                Ok(CommandResponse::SlotsSpun { outcome, view })
            }
        }
    }
}
