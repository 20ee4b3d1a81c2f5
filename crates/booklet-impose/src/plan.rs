//! Imposition planning
//!
//! A saddle-stitched booklet nests folded sheets inside one another: the
//! outermost sheet carries the first and last pages and every further
//! sheet steps one pair inward. Each physical sheet holds four page
//! slots, front left/right then back left/right.

use crate::constants::PAGES_PER_SHEET;

/// Compute the slot order for a saddle-stitched booklet.
///
/// Returns one entry per slot in drawing order: sheet 0 front-left,
/// front-right, back-left, back-right, then sheet 1, and so on. `Some(n)`
/// is the 1-based source page for that slot; `None` is a blank added to
/// pad the page count to a multiple of four.
///
/// Sheet `k` of `total` padded pages carries the pages
/// `(total - 2k, 2k + 1, 2k + 2, total - 2k - 1)`, so folding the printed
/// stack in half yields reading order.
pub fn plan(page_count: u32) -> Vec<Option<u32>> {
    let blanks = (PAGES_PER_SHEET - page_count % PAGES_PER_SHEET) % PAGES_PER_SHEET;
    let total = page_count + blanks;

    let mut slots = Vec::with_capacity(total as usize);
    for k in 0..total / PAGES_PER_SHEET {
        slots.push(real_or_blank(total - 2 * k, page_count));
        slots.push(real_or_blank(2 * k + 1, page_count));
        slots.push(real_or_blank(2 * k + 2, page_count));
        slots.push(real_or_blank(total - 2 * k - 1, page_count));
    }
    slots
}

/// Number of physical sheets needed for `page_count` pages.
pub fn sheet_count(page_count: u32) -> u32 {
    (page_count + PAGES_PER_SHEET - 1) / PAGES_PER_SHEET
}

/// Pages past the real count are the padding blanks.
fn real_or_blank(page: u32, page_count: u32) -> Option<u32> {
    (page <= page_count).then_some(page)
}
