// Goal and objective records supplied by the goal source
pub mod lenient;
pub mod priority;
pub mod types;

pub use priority::Priority;
pub use types::{Goal, Objective};
