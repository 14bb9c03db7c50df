use std::path::PathBuf;
use thiserror::Error;

/// Configuration faults. None of these are transient; they are reported once and surfaced.
#[derive(Debug, Error)]
pub enum LotteryError {
    #[error("weight table has no participants")]
    EmptyTable,

    #[error("{participants} participants but {weights} weights")]
    LengthMismatch { participants: usize, weights: usize },

    #[error("participant {0} appears more than once")]
    DuplicateParticipant(String),

    #[error("participant {participant} has invalid weight {weight}")]
    InvalidWeight { participant: String, weight: f64 },

    #[error("weights sum to zero, nothing to scale into the pool")]
    ZeroWeightTotal,

    #[error("weights sum to {actual}, expected {expected}")]
    WeightTotalMismatch { expected: f64, actual: f64 },

    #[error("pool size must be greater than zero")]
    ZeroPoolSize,

    #[error("rounded slot counts fill {actual} of {expected} pool slots")]
    PoolSizeMismatch { expected: usize, actual: usize },

    /// Not produced by `Pool::build`, which never yields an empty pool.
    #[error("pool has no slots to draw from")]
    EmptyPool,

    #[error("pool was built for a different weight table")]
    PoolTableMismatch,

    #[error("cannot draw {top_picks} distinct winners from {eligible} participants with tickets")]
    TooManyWinners { top_picks: usize, eligible: usize },

    #[error("unknown participant {0}")]
    UnknownParticipant(String),

    #[error("failed to read settings file {}: {source}", .path.display())]
    ReadSettings {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    ParseSettings(#[from] serde_json::Error),
}
