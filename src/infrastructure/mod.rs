pub mod core;
pub mod local_calculator;
pub mod observability;
pub mod remote_calculator;

pub use local_calculator::LocalPerformanceCalculator;
pub use remote_calculator::RemotePerformanceCalculator;
