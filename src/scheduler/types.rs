use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid time range: end must be after start")]
    InvalidTimeRange,
    #[error("invalid handover interval: must be a positive, representable duration")]
    InvalidInterval,
    #[error("rotation has no participants")]
    EmptyRotation,
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
