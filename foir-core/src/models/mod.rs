mod breakdown;
mod category;
mod emi_entry;
mod foir_result;
mod input_snapshot;

pub use breakdown::Breakdown;
pub use category::{FoirCategory, GOOD_LOWER_BOUND, GOOD_UPPER_BOUND, GUIDELINES, Tone};
pub use emi_entry::{EmiEntry, EmiId};
pub use foir_result::FoirResult;
pub use input_snapshot::InputSnapshot;
