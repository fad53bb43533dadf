use thiserror::Error;

/// Errors raised while obtaining a performance score from a calculator.
///
/// None of these reach the end user: the service answers every one of them
/// with the degraded calculation.
#[derive(Debug, Error)]
pub enum CalculationError {
    #[error("Calculation service unreachable: {reason}")]
    Transport { reason: String },

    #[error("Calculation service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed calculation response: {reason}")]
    MalformedResponse { reason: String },

    #[error("Calculation response violates invariants: {reason}")]
    InvalidResponse { reason: String },

    #[error("Invalid calculation request: {reason}")]
    InvalidRequest { reason: String },
}

impl CalculationError {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CalculationError::Transport { .. } => "transport",
            CalculationError::Status { .. } => "status",
            CalculationError::MalformedResponse { .. } => "malformed",
            CalculationError::InvalidResponse { .. } => "invalid",
            CalculationError::InvalidRequest { .. } => "request",
        }
    }
}
