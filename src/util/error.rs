use thiserror::Error;

/// Errors that are fatal to the current flight. A stale or failed attitude
/// read must never drive motor output, so none of these are retried
/// mid-flight: the sequencer zeroes the motors and stops.
#[derive(Debug, Error)]
pub enum FlightError {
    #[error("hardware fault: {0}")]
    HardwareFault(String),
}

impl FlightError {
    pub fn bus<E: core::fmt::Debug>(context: &str, err: E) -> Self {
        FlightError::HardwareFault(format!("{context}: {err:?}"))
    }
}
