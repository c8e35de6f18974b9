//! Submit command: record one table result.

use anyhow::{anyhow, Result};
use tarock_core::{format_card_with_position, Config, EntryForm, SeatInput};

use super::open_tournament_for_write;

pub fn run(config: Config, table: &str, round: u32, seats: Vec<SeatInput>) -> Result<()> {
    let seats: [SeatInput; 4] = seats
        .try_into()
        .map_err(|v: Vec<SeatInput>| anyhow!("expected 4 seats, got {}", v.len()))?;
    let form = EntryForm {
        table: table.to_string(),
        round,
        seats,
    };

    let mut tournament = open_tournament_for_write(config)?;
    let outcome = tournament.submit(&form)?;

    let store = tournament.store();
    if let Some(entry) = store.current() {
        println!("{}", format_card_with_position(entry, outcome.value, store.len()));
    }
    if let Some(e) = outcome.save_error {
        eprintln!(
            "Failed to write {}: {}",
            tournament.config().entries_path.display(),
            e
        );
    }

    Ok(())
}
