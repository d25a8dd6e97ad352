//! Error types for parking-lot

use thiserror::Error;

use crate::Lot;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Rejected parking operations. A rejected operation leaves the lot pool
/// and the ledger untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParkingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No parked car with plate number \"{0}\"")]
    NotFound(String),

    #[error("A car with plate number \"{0}\" is already parked")]
    DuplicatePlate(String),

    #[error("Lot {0} is not available")]
    LotUnavailable(Lot),

    #[error("Cannot resize to {requested} spaces: lots {occupied:?} are occupied")]
    LotsOccupied { requested: u32, occupied: Vec<Lot> },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Parking(#[from] ParkingError),

    #[error("Command error: {0}")]
    Command(String),
}

pub type Result<T> = std::result::Result<T, Error>;
