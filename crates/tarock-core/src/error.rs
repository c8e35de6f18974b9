use strum::{Display, IntoStaticStr};
use thiserror::Error;

/// Which end of the entry list a navigation request ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum Boundary {
    #[strum(serialize = "first")]
    First,
    #[strum(serialize = "last")]
    Last,
}

/// Rejected form input. The store is never touched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Table number must be a positive integer.")]
    Table(String),

    #[error("Round must be a positive integer.")]
    Round(u32),

    #[error("All four player number fields must be filled (seat {seat} is empty).")]
    EmptyName { seat: usize },

    #[error("Points for seat {seat} must be between -100 and 100, got {points}.")]
    PointsOutOfRange { seat: usize, points: i32 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No entry selected to change.")]
    NoSelection,

    #[error("No entries stored yet.")]
    EmptyStore,

    #[error("Already at the {0} entry.")]
    AtBoundary(Boundary),

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
