//! CLI command implementations.
//!
//! Every command opens the tournament from disk, performs one action and
//! reports a short status line. `session` keeps the tournament open and
//! reads actions from stdin instead.

pub mod list;
pub mod mapping;
pub mod rank;
pub mod session;
pub mod submit;

use anyhow::{bail, Result};
use tarock_core::{Config, LoadWarning, Tournament};
use tracing::debug;

/// Open the tournament, printing any startup read problems as warnings
pub(crate) fn open_tournament(config: Config) -> Tournament {
    let (tournament, warnings) = Tournament::open(config);
    report(&tournament, &warnings);
    tournament
}

/// Open the tournament for a one-shot command that rewrites the entries file.
///
/// Fails instead of starting empty when the entries file exists but could not
/// be read, so the unreadable file is left as it is.
pub(crate) fn open_tournament_for_write(config: Config) -> Result<Tournament> {
    let (tournament, warnings) = Tournament::open(config);
    report(&tournament, &warnings);

    let entries_path = &tournament.config().entries_path;
    if warnings.iter().any(|w| &w.path == entries_path) {
        bail!(
            "Refusing to overwrite {} after it failed to load",
            entries_path.display()
        );
    }
    Ok(tournament)
}

fn report(tournament: &Tournament, warnings: &[LoadWarning]) {
    for warning in warnings {
        eprintln!("{}", warning);
    }
    debug!(
        "Opened tournament: {} entries, {} mapped players",
        tournament.store().len(),
        tournament.mapping().len()
    );
}
