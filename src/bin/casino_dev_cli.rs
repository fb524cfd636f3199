// src/bin/casino_dev_cli.rs

use casino_engine::api::{
    BaccaratCommand, BlackjackCommand, Command, CommandResponse, CrapsCommand, RouletteCommand,
    SlotsCommand,
};
use casino_engine::domain::{Amount, Card};
use casino_engine::engine::{
    BetSide, BlackjackAction, BlackjackActionKind, Casino, CasinoError, CrapsBetKind,
    RouletteBetKind,
};
use casino_engine::infra::SystemRng;

fn main() {
    println!("casino_dev_cli: стартуем прогон всех пяти столов…");

    let mut rng = SystemRng::default();
    let mut casino = Casino::new(Amount::from_dollars(1_000));
    println!("[CLI] Стартовый баланс: {}", casino.balance());

    run_blackjack(&mut casino, &mut rng);
    run_baccarat(&mut casino, &mut rng);
    run_craps(&mut casino, &mut rng);
    run_roulette(&mut casino, &mut rng);
    run_slots(&mut casino, &mut rng);

    println!();
    println!("[CLI] Итоговый баланс: {}", casino.balance());
    println!("[CLI] Завершение работы dev-CLI.");
}

fn cards_str(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_error(context: &str, err: &CasinoError) {
    eprintln!("[CLI][{context}] ОШИБКА: {err:?}");
}

/// Один раунд блэкджека с наивной стратегией "добираем до 17".
fn run_blackjack(casino: &mut Casino, rng: &mut SystemRng) {
    println!();
    println!("================ BLACKJACK =================");

    let bet = Amount::from_dollars(25);
    println!("[CLI] Ставка {bet}, раздаём.");

    let mut resp = match casino.dispatch(rng, Command::Blackjack(BlackjackCommand::Deal { bet })) {
        Ok(r) => r,
        Err(e) => {
            print_error("blackjack deal", &e);
            return;
        }
    };

    loop {
        match resp {
            CommandResponse::Blackjack(view) => {
                let idx = match view.active_hand {
                    Some(i) => i,
                    None => break,
                };
                let hand = match view.hands.iter().find(|h| h.index == idx) {
                    Some(h) => h,
                    None => break,
                };
                println!(
                    "[CLI] Рука {}: {} (тотал {}{})",
                    idx + 1,
                    cards_str(&hand.cards),
                    hand.total,
                    if hand.soft { ", мягкий" } else { "" }
                );
                println!(
                    "[CLI] Дилер показывает: {} (видимый тотал {})",
                    cards_str(&view.dealer_cards),
                    view.dealer_visible_total
                );

                let kind = if hand.total < 17 {
                    BlackjackActionKind::Hit
                } else {
                    BlackjackActionKind::Stand
                };
                println!("[CLI] Действие: {kind:?}");

                resp = match casino.dispatch(
                    rng,
                    Command::Blackjack(BlackjackCommand::Action {
                        action: BlackjackAction { hand: idx, kind },
                    }),
                ) {
                    Ok(r) => r,
                    Err(e) => {
                        print_error("blackjack action", &e);
                        return;
                    }
                };
            }
            CommandResponse::BlackjackFinished { view, summary } => {
                println!(
                    "[CLI] Дилер вскрылся: {} (тотал {})",
                    cards_str(&view.dealer_cards),
                    summary.dealer_total
                );
                for res in &summary.resolutions {
                    println!(
                        "[CLI] Рука {}: {:?}, выплата {}",
                        res.hand + 1,
                        res.outcome,
                        res.payout
                    );
                }
                println!(
                    "[CLI] Счёт карт: running {}, true {:.1}",
                    view.running_count, view.true_count
                );
                println!("[CLI] Баланс после раунда: {}", view.balance);
                break;
            }
            _ => break,
        }
    }
}

fn run_baccarat(casino: &mut Casino, rng: &mut SystemRng) {
    println!();
    println!("================ BACCARAT ==================");

    let amount = Amount::from_dollars(50);
    println!("[CLI] Ставка {amount} на банкира, раздаём.");

    match casino.dispatch(
        rng,
        Command::Baccarat(BaccaratCommand::Deal {
            side: BetSide::Banker,
            amount,
        }),
    ) {
        Ok(CommandResponse::Baccarat { view, summary }) => {
            println!(
                "[CLI] Игрок:  {} (тотал {})",
                cards_str(&summary.player_cards),
                summary.player_total
            );
            println!(
                "[CLI] Банкир: {} (тотал {})",
                cards_str(&summary.banker_cards),
                summary.banker_total
            );
            println!(
                "[CLI] Победил {}{}; наша ставка: {:?}, выплата {}",
                summary.winner,
                if summary.natural { " (натурал)" } else { "" },
                summary.outcome,
                summary.payout
            );
            println!("[CLI] Баланс после раунда: {}", view.balance);
        }
        Ok(_) => {}
        Err(e) => print_error("baccarat deal", &e),
    }
}

/// Серия бросков до разрешения pass-линии; после установки пойнта
/// прикрепляем odds.
fn run_craps(casino: &mut Casino, rng: &mut SystemRng) {
    println!();
    println!("================ CRAPS =====================");

    let flat = Amount::from_dollars(10);
    let bet_id = match casino.dispatch(
        rng,
        Command::Craps(CrapsCommand::PlaceBet {
            kind: CrapsBetKind::Pass,
            amount: flat,
        }),
    ) {
        Ok(CommandResponse::CrapsBetPlaced { bet_id, .. }) => {
            println!("[CLI] Pass-линия {flat} (ставка #{bet_id}).");
            bet_id
        }
        Ok(_) => return,
        Err(e) => {
            print_error("craps place_bet", &e);
            return;
        }
    };

    let mut odds_placed = false;
    for _ in 0..50 {
        let (outcome, view) = match casino.dispatch(rng, Command::Craps(CrapsCommand::Roll)) {
            Ok(CommandResponse::CrapsRolled { outcome, view }) => (outcome, view),
            Ok(_) => return,
            Err(e) => {
                print_error("craps roll", &e);
                return;
            }
        };

        println!(
            "[CLI] Бросок {} | пойнт: {:?}",
            outcome.dice, outcome.phase_after
        );
        for res in &outcome.resolutions {
            println!(
                "[CLI]   {} #{}: {:?}, выплата {}",
                res.kind, res.id, res.outcome, res.payout
            );
        }

        if outcome.resolutions.iter().any(|r| r.id == bet_id) {
            println!("[CLI] Pass-линия разрешена, баланс: {}", view.balance);
            break;
        }

        if view.point.is_some() && !odds_placed {
            match casino.dispatch(
                rng,
                Command::Craps(CrapsCommand::PlaceOdds {
                    bet_id,
                    amount: Amount::from_dollars(20),
                }),
            ) {
                Ok(CommandResponse::CrapsOddsPlaced { staked, .. }) => {
                    println!("[CLI] Odds на pass: {staked}.");
                    odds_placed = true;
                }
                Ok(_) => {}
                Err(e) => print_error("craps place_odds", &e),
            }
        }
    }
}

fn run_roulette(casino: &mut Casino, rng: &mut SystemRng) {
    println!();
    println!("================ ROULETTE ==================");

    let bets = [
        (RouletteBetKind::Red, Amount::from_dollars(5)),
        (RouletteBetKind::Straight(17), Amount::from_dollars(1)),
        (RouletteBetKind::Dozen(2), Amount::from_dollars(2)),
    ];
    for (kind, amount) in bets {
        match casino.dispatch(rng, Command::Roulette(RouletteCommand::PlaceBet { kind, amount })) {
            Ok(_) => println!("[CLI] Ставка {amount} на {}.", kind.label()),
            Err(e) => print_error("roulette place_bet", &e),
        }
    }

    match casino.dispatch(rng, Command::Roulette(RouletteCommand::Spin)) {
        Ok(CommandResponse::RouletteSpun { outcome, view }) => {
            println!(
                "[CLI] Выпало {} ({:?}), суммарная выплата {}",
                outcome.number, outcome.color, outcome.total_payout
            );
            for res in &outcome.resolutions {
                println!(
                    "[CLI]   {}: {:?}, выплата {}",
                    res.kind.label(),
                    res.outcome,
                    res.payout
                );
            }
            println!("[CLI] Баланс после спина: {}", view.balance);
        }
        Ok(_) => {}
        Err(e) => print_error("roulette spin", &e),
    }
}

fn run_slots(casino: &mut Casino, rng: &mut SystemRng) {
    println!();
    println!("================ SLOTS =====================");

    let bet = Amount::from_dollars(1);
    let mut last_outcome = None;

    for spin in 1..=3 {
        match casino.dispatch(rng, Command::Slots(SlotsCommand::Spin { bet })) {
            Ok(CommandResponse::SlotsSpun { outcome, view }) => {
                println!(
                    "[CLI] Спин {spin}{}:",
                    if outcome.free_spin { " (бесплатный)" } else { "" }
                );
                for row in 0..3 {
                    let line: Vec<String> = (0..5)
                        .map(|reel| outcome.grid.symbol_at(reel, row).to_string())
                        .collect();
                    println!("[CLI]   {}", line.join(" "));
                }
                for win in &outcome.line_wins {
                    println!(
                        "[CLI]   линия {}: {} ×{} → {}",
                        win.line + 1,
                        win.symbol,
                        win.count,
                        win.payout
                    );
                }
                if outcome.free_spins_awarded > 0 {
                    println!(
                        "[CLI]   скаттеров {}, начислено {} фриспинов",
                        outcome.scatter_count, outcome.free_spins_awarded
                    );
                }
                println!(
                    "[CLI]   выплата {}, баланс {}",
                    outcome.total_payout, view.balance
                );
                last_outcome = Some(outcome);
            }
            Ok(_) => {}
            Err(e) => print_error("slots spin", &e),
        }
    }

    // Полный дамп последнего исхода — удобно смотреть структуру ответа.
    if let Some(outcome) = last_outcome {
        if let Ok(json) = serde_json::to_string_pretty(&outcome) {
            println!();
            println!("[CLI] JSON последнего спина:");
            println!("{json}");
        }
    }
}
