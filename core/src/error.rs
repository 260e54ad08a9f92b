use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("date is missing")]
    MissingDate,
    #[error("tip amount is missing")]
    MissingTipAmount,
    #[error("tip amount must be a non-negative number")]
    InvalidTipAmount,
    #[error("revenue must be a non-negative number")]
    InvalidRevenue,
    #[error("staff count must be a positive number")]
    InvalidStaffCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// A record that cannot take part in statistics. Raised by the enricher
    /// instead of letting a NaN or a silent zero reach the totals.
    #[error("invalid shift record {id}: {reason}")]
    InvalidRecord { id: Uuid, reason: InvalidReason },
}
