//! Rank command: compute standings and write the ranking file.

use anyhow::Result;
use tarock_core::{format_ranking_console, format_ranking_json, Config};

use super::open_tournament;

pub fn run(config: Config, json: bool) -> Result<()> {
    let tournament = open_tournament(config);
    let outcome = tournament.rank()?;

    if json {
        println!("{}", format_ranking_json(&outcome.value)?);
    } else {
        println!("{}", format_ranking_console(&outcome.value));
    }

    let path = tournament.config().ranking_path.display();
    match outcome.save_error {
        None => eprintln!("Ranking generated – see {}.", path),
        Some(e) => eprintln!("Could not write {}: {}", path, e),
    }

    Ok(())
}
