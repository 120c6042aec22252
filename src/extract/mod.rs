mod planner;
mod types;

pub use planner::plan_slices;
pub use types::{PlanOptions, SliceEntry, SliceMode, SlicePlan};
