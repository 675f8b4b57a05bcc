use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use log::debug;

#[derive(Debug)]
struct Card {
    id: u32,
    winning_numbers: Vec<u32>,
    have_numbers: Vec<u32>,
}

impl Card {
    /// Duplicates among the held numbers each count separately, so the
    /// held side stays a Vec rather than a set.
    fn match_count(&self) -> usize {
        self.have_numbers
            .iter()
            .filter(|number| self.winning_numbers.contains(number))
            .count()
    }
}

fn parse_numbers(numbers_str: &str) -> Vec<u32> {
    numbers_str
        .split_whitespace()
        .filter_map(|token| token.parse().ok())
        .collect()
}

fn parse_card(line: &str) -> anyhow::Result<Card> {
    let (card_str, numbers_str) = line
        .split_once(':')
        .with_context(|| format!("no ':' in card line {line:?}"))?;
    let id = card_str
        .split_whitespace()
        .last()
        .with_context(|| format!("no card number in {card_str:?}"))?
        .parse::<u32>()
        .with_context(|| format!("bad card number in {card_str:?}"))?;
    let (winning_str, have_str) = numbers_str
        .split_once('|')
        .with_context(|| format!("no '|' in card line {line:?}"))?;
    Ok(Card {
        id,
        winning_numbers: parse_numbers(winning_str),
        have_numbers: parse_numbers(have_str),
    })
}

fn parse_cards(contents: &str) -> anyhow::Result<Vec<Card>> {
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_card)
        .collect()
}

fn total_points(cards: &[Card]) -> u64 {
    cards
        .iter()
        .map(|card| match card.match_count() {
            0 => 0,
            matches => 1 << (matches - 1),
        })
        .sum()
}

/// Every card starts as a single copy; a card with m matches awards one
/// extra copy of each of the next m cards per copy of itself. One forward
/// pass suffices since copies only ever propagate to later cards.
fn total_card_count(cards: &[Card]) -> u64 {
    let mut copy_counts: HashMap<u32, u64> = HashMap::new();
    for card in cards {
        let copies = *copy_counts.entry(card.id).or_insert(1);
        let matches = card.match_count() as u32;
        for won_id in card.id + 1..=card.id + matches {
            *copy_counts.entry(won_id).or_insert(1) += copies;
        }
    }
    // Entries past the last physical card are never processed above but
    // still count toward the total.
    copy_counts.values().sum()
}

pub fn run(input: &Path) -> anyhow::Result<()> {
    let contents = fs::read_to_string(input)
        .with_context(|| format!("unable to read {}", input.display()))?;
    let cards = parse_cards(&contents)?;
    debug!("parsed {} scratchcards", cards.len());

    println!("Total points of scratchcards: {}", total_points(&cards));
    println!(
        "Total number of scratchcards won: {}",
        total_card_count(&cards)
    );
    Ok(())
}
