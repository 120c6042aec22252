pub mod batch;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod extract;
pub mod output;
pub mod sheet;

pub use batch::{BatchEntry, BatchOptions, SheetOutcome, SheetReport, run_batch};
pub use error::SashimiError;
pub use extract::{PlanOptions, SliceEntry, SliceMode, SlicePlan, plan_slices};
pub use sheet::{PixelGrid, SheetImage, load_sheet};
