//! List command: print every entry as a card.

use anyhow::Result;
use tarock_core::{format_card_with_position, Config};

use super::open_tournament;

pub fn run(config: Config) -> Result<()> {
    let tournament = open_tournament(config);
    let entries = tournament.store().entries();

    if entries.is_empty() {
        eprintln!("No entries stored yet.");
        return Ok(());
    }

    let cards: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| format_card_with_position(entry, idx, entries.len()))
        .collect();
    println!("{}", cards.join("\n\n"));

    Ok(())
}
