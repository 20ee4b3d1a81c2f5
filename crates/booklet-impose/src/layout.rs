//! Sheet geometry and the per-sheet layout walk
//!
//! The planner decides which page lands in which slot; this module
//! decides where each slot sits on the physical sheet. Every sheet is
//! split at the horizontal midpoint into a left and a right leaf, and
//! after each completed sheet both leaves drift inward by the creep
//! offset to compensate for paper thickness in the folded stack.

use crate::constants::PAGES_PER_SHEET;

// ============================================================================
// Geometry
// ============================================================================

/// A rectangular area in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width of the rectangle
    pub width: f32,
    /// Height of the rectangle
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// The left half of this rectangle, split at the horizontal midpoint.
    pub fn left_half(&self) -> Rect {
        Rect::new(self.x, self.y, self.width / 2.0, self.height)
    }

    /// The right half of this rectangle, split at the horizontal midpoint.
    pub fn right_half(&self) -> Rect {
        Rect::new(self.x + self.width / 2.0, self.y, self.width / 2.0, self.height)
    }
}

// ============================================================================
// Layout Types
// ============================================================================

/// Which physical side of a printed sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSide {
    /// Front of the sheet (printed first in duplex)
    Front,
    /// Back of the sheet (printed second in duplex)
    Back,
}

/// One draw instruction: render `page` into `target`.
///
/// `page` is a 1-based source page number; `None` marks a padding blank,
/// which draws nothing but still occupies its slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub target: Rect,
    pub page: Option<u32>,
}

/// Both placements for one face of a sheet, left leaf then right leaf.
///
/// Each face becomes one page of the output document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceLayout {
    pub side: SheetSide,
    pub placements: [Placement; 2],
}

/// All draw instructions for one physical sheet, front face then back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetLayout {
    /// Zero-based sheet number, outermost sheet first.
    pub index: usize,
    pub faces: [FaceLayout; 2],
}

// ============================================================================
// Layouter
// ============================================================================

/// Walks a slot sequence sheet by sheet, tracking creep.
///
/// The leaf rectangles start as the two halves of the sheet. After every
/// completed sheet the left leaf's origin moves right by the creep offset
/// and the right leaf's moves left by the same amount. The drift
/// accumulates over the whole run and is never reset, so a long run with
/// a generous creep will eventually walk the leaves into each other;
/// that is understood and left alone.
#[derive(Debug, Clone)]
pub struct SheetLayouter {
    slots: std::vec::IntoIter<Option<u32>>,
    left: Rect,
    right: Rect,
    creep_pt: f32,
    index: usize,
}

impl SheetLayouter {
    /// Create a layouter over `slots` (normally the planner's output) for
    /// a sheet with the given bounds.
    pub fn new(slots: Vec<Option<u32>>, sheet: Rect, creep_pt: f32) -> Self {
        Self {
            slots: slots.into_iter(),
            left: sheet.left_half(),
            right: sheet.right_half(),
            creep_pt,
            index: 0,
        }
    }

    /// Current left leaf rectangle, including all creep applied so far.
    pub fn left_leaf(&self) -> Rect {
        self.left
    }

    /// Current right leaf rectangle, including all creep applied so far.
    pub fn right_leaf(&self) -> Rect {
        self.right
    }

    /// Sheets yielded so far.
    pub fn sheets_completed(&self) -> usize {
        self.index
    }
}

impl Iterator for SheetLayouter {
    type Item = SheetLayout;

    fn next(&mut self) -> Option<SheetLayout> {
        let mut quad = [self.slots.next()?, None, None, None];
        // A ragged tail (not one the planner produced) pads with blanks.
        for slot in quad.iter_mut().skip(1) {
            *slot = self.slots.next().flatten();
        }

        let sheet = SheetLayout {
            index: self.index,
            faces: [
                FaceLayout {
                    side: SheetSide::Front,
                    placements: [
                        Placement { target: self.left, page: quad[0] },
                        Placement { target: self.right, page: quad[1] },
                    ],
                },
                FaceLayout {
                    side: SheetSide::Back,
                    placements: [
                        Placement { target: self.left, page: quad[2] },
                        Placement { target: self.right, page: quad[3] },
                    ],
                },
            ],
        };

        // Shift the leaves for the next sheet in the nest.
        self.left.x += self.creep_pt;
        self.right.x -= self.creep_pt;
        self.index += 1;

        Some(sheet)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let per_sheet = PAGES_PER_SHEET as usize;
        let remaining = (self.slots.len() + per_sheet - 1) / per_sheet;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SheetLayouter {}
