//! Saddle-stitch booklet imposition
//!
//! Reorders the pages of a PDF so that printing the output double-sided,
//! folding the stack in half and stapling the fold yields a booklet in
//! reading order. [`plan`] works out which page lands in which slot,
//! [`SheetLayouter`] places the slots on each sheet while tracking creep,
//! and [`make_booklet`] drives both against a lopdf document.

pub mod impose;
pub mod layout;
pub mod plan;

mod constants;
mod options;
mod stats;
mod types;

pub use impose::{load_document, make_booklet, save_document};
pub use layout::{FaceLayout, Placement, Rect, SheetLayout, SheetLayouter, SheetSide};
pub use options::*;
pub use plan::{plan, sheet_count};
pub use stats::calculate_statistics;
pub use types::*;
