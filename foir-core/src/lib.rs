pub mod actions;
pub mod calculations;
pub mod capabilities;
pub mod models;
pub mod state;

pub use calculations::{FoirCalculator, FoirError};
pub use models::*;
pub use state::InputState;
