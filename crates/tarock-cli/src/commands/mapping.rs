//! Mapping command: show or edit player names.

use anyhow::Result;
use tarock_core::Config;

use super::open_tournament;
use crate::cli::MappingAction;

pub fn run(config: Config, action: Option<MappingAction>) -> Result<()> {
    let mut tournament = open_tournament(config);

    match action.unwrap_or(MappingAction::Show) {
        MappingAction::Show => {
            let mapping = tournament.mapping();
            if mapping.is_empty() {
                eprintln!("No player names mapped.");
            }
            for (number, name) in mapping.iter() {
                println!("{:>5}  {}", number, name);
            }
            return Ok(());
        }
        MappingAction::Set { number, name } => {
            let name = name.join(" ");
            if name.trim().is_empty() {
                anyhow::bail!("Player name must not be empty.");
            }
            if !tournament.mapping_mut().set(number, name.trim()) {
                anyhow::bail!("Player number must be between 0 and 9999.");
            }
        }
        MappingAction::Remove { number } => {
            if tournament.mapping_mut().remove(number).is_none() {
                eprintln!("Player number {} is not mapped.", number);
                return Ok(());
            }
        }
    }

    let count = tournament.save_mapping()?;
    eprintln!(
        "Mapping saved – {} pairs written to {}",
        count,
        tournament.config().mapping_path.display()
    );
    Ok(())
}
