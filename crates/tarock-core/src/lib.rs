pub mod config;
pub mod entry;
pub mod error;
pub mod export;
pub mod ranking;
pub mod storage;
pub mod tournament;

pub use config::Config;
pub use entry::{Entry, EntryForm, Person, SeatInput};
pub use error::{Boundary, Error, Result, ValidationError};
pub use export::{format_card, format_card_with_position, format_ranking_console};
pub use ranking::{format_ranking, format_ranking_json, rank, RankRow};
pub use storage::{EntryStore, Mapping};
pub use tournament::{LoadWarning, Persisted, Tournament};
