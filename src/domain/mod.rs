// Goal and objective records
pub mod goals;

// Strategic performance scoring
pub mod performance;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
