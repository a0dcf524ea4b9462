//! CLI blackjack example.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use twentyone::{Card, DealerStep, Hand, Phase, Rank, Suit, Table, TableOptions};

fn main() {
    println!("Blackjack CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut table = Table::new(TableOptions::default(), seed);

    loop {
        let chips = table.chips();
        if chips == 0 {
            println!("You are out of chips. Game over.");
            break;
        }

        let Some(bet) = prompt_amount(&format!("Bet amount (1-{chips}, 0 to quit): ")) else {
            break;
        };

        if bet == 0 {
            println!("Goodbye.");
            break;
        }

        if let Err(err) = table.place_bet(bet) {
            println!("Bet error: {err}");
            continue;
        }

        if let Err(err) = table.deal() {
            println!("Deal error: {err}");
            continue;
        }

        if table.insurance_offered() {
            println!("Dealer shows an Ace. Insurance offered.");
            let stake = match prompt_line("Take insurance? (y/n): ").as_str() {
                "y" | "yes" => twentyone::payout::max_insurance(bet),
                _ => 0,
            };
            match table.insure(stake) {
                Ok(0) => {}
                Ok(amount) => println!("Insurance bet placed: {amount}"),
                Err(err) => println!("Insurance error: {err}"),
            }
        }

        while matches!(table.phase(), Phase::PlayerTurn | Phase::Splitting) {
            print_table(&table);

            println!("{}", format_actions(&table));
            let action = prompt_line("Action: ");

            let result = match action.as_str() {
                "h" | "hit" => table.hit().map(|_| ()),
                "s" | "stand" => table.stand(),
                "d" | "double" => table.double_down().map(|_| ()),
                "p" | "split" => table.split(),
                "u" | "surrender" => table.surrender().map(|_| ()),
                "q" | "quit" => return,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            if let Err(err) = result {
                println!("Action error: {err}");
            }
        }

        while table.phase() == Phase::DealerTurn {
            match table.dealer_step() {
                Ok(DealerStep::Drew(card)) => println!("Dealer draws {}.", format_card(card)),
                Ok(DealerStep::Done) => {}
                Err(err) => {
                    println!("Dealer error: {err}");
                    break;
                }
            }
        }

        if table.phase() == Phase::GameOver {
            print_table_final(&table);
            println!("{}", table.message());
            if let Some(record) = table.history().latest() {
                println!("Round {}: payout {}", record.id, record.payout);
                if record.insurance_bet > 0 {
                    println!("Insurance bet: {}", record.insurance_bet);
                }
            }
            if let Err(err) = table.new_round() {
                println!("Round error: {err}");
            }
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_amount(prompt: &str) -> Option<u64> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<u64>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(table: &Table) {
    println!("\nShoe: {} cards remaining", table.shoe_remaining());

    println!("\nDealer: {}", format_dealer(table));

    if table.was_split() {
        for (index, hand) in table.split_hands().iter().enumerate() {
            let marker = if index == table.active_split() && !hand.stood {
                "*"
            } else {
                " "
            };
            println!(
                "{} Hand {}: {} | value {} | bet {}",
                marker,
                index,
                format_hand(&hand.hand),
                hand.hand.score(),
                hand.bet,
            );
        }
    } else {
        println!(
            "Player: {} | value {} | bet {}",
            format_hand(table.player_hand()),
            table.player_hand().score(),
            table.bet(),
        );
    }
    println!();
}

fn print_table_final(table: &Table) {
    println!(
        "\nDealer: {} (value {})",
        format_hand(table.dealer_hand()),
        table.dealer_hand().score()
    );

    if table.was_split() {
        for (index, hand) in table.split_hands().iter().enumerate() {
            println!(
                "Hand {}: {} | value {} | bet {} | {:?}",
                index,
                format_hand(&hand.hand),
                hand.hand.score(),
                hand.bet,
                hand.result,
            );
        }
    } else {
        println!(
            "Player: {} | value {}",
            format_hand(table.player_hand()),
            table.player_hand().score(),
        );
    }
}

fn format_actions(table: &Table) -> String {
    let mut parts = vec!["hit (h)".to_string(), "stand (s)".to_string()];
    if table.can_double() {
        parts.push("double (d)".to_string());
    }
    if table.can_split() {
        parts.push("split (p)".to_string());
    }
    if table.can_surrender() {
        parts.push("surrender (u)".to_string());
    }
    parts.push("quit (q)".to_string());
    format!("Actions: {}", parts.join(", "))
}

fn format_dealer(table: &Table) -> String {
    let dealer = table.dealer_hand();
    if table.dealer_revealed() {
        format!("{} (value {})", format_hand(dealer), dealer.score())
    } else {
        match dealer.upcard() {
            Some(card) => format!("{} ?? (showing {})", format_card(card), card.rank.value()),
            None => "--".to_string(),
        }
    }
}

fn format_hand(hand: &Hand) -> String {
    hand.cards()
        .iter()
        .map(|card| format_card(*card))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: Card) -> String {
    let suit = match card.suit {
        Suit::Hearts => '♥',
        Suit::Diamonds => '♦',
        Suit::Clubs => '♣',
        Suit::Spades => '♠',
    };
    let rank = match card.rank {
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "10",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
    };
    format!("{rank}{suit}")
}
