use crate::constants::{PAGES_PER_SHEET, SLOTS_PER_FACE};
use crate::plan::sheet_count;
use crate::types::BookletStatistics;
use lopdf::Document;

/// Calculate sheet statistics for a prospective booklet run.
///
/// Pure counting; nothing is rendered. A source with no pages is a valid
/// zero-sheet booklet, not an error.
pub fn calculate_statistics(source: &Document) -> BookletStatistics {
    let source_pages = source.get_pages().len();
    let sheets = sheet_count(source_pages as u32) as usize;
    let slots = sheets * PAGES_PER_SHEET as usize;

    BookletStatistics {
        source_pages,
        blank_slots: slots - source_pages,
        sheets,
        output_pages: slots / SLOTS_PER_FACE,
    }
}
