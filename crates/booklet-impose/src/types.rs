//! Core types for booklet imposition

use crate::layout::Rect;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug)]
pub enum BookletError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, BookletError>;

// ============================================================================
// Sheet Sizes
// ============================================================================

/// Physical sheet the booklet is printed on.
///
/// The named sizes are landscape, since every sheet carries two upright
/// leaves side by side. A4 here is therefore 841.88 x 595.28 pt, twice an
/// A5 leaf, not the portrait A4 page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetSize {
    A4,
    A3,
    Letter,
    Tabloid,
    /// Arbitrary sheet dimensions in points.
    Custom { width_pt: f32, height_pt: f32 },
}

impl SheetSize {
    /// Sheet dimensions in points, width first.
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            SheetSize::A4 => (841.88, 595.28),
            SheetSize::A3 => (1190.55, 841.88),
            SheetSize::Letter => (792.0, 612.0),
            SheetSize::Tabloid => (1224.0, 792.0),
            SheetSize::Custom { width_pt, height_pt } => (width_pt, height_pt),
        }
    }

    /// The full sheet as a rectangle with its origin at (0, 0).
    pub fn bounds(self) -> Rect {
        let (width, height) = self.dimensions_pt();
        Rect::new(0.0, 0.0, width, height)
    }

    /// Width of one leaf (half the sheet) in points.
    pub fn leaf_width_pt(self) -> f32 {
        self.dimensions_pt().0 / 2.0
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Sheet arithmetic for a booklet run, computed before anything is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct BookletStatistics {
    /// Pages in the source document.
    pub source_pages: usize,
    /// Blank slots added to pad the count to a multiple of four.
    pub blank_slots: usize,
    /// Physical sheets the booklet needs.
    pub sheets: usize,
    /// Pages in the output document (two faces per sheet).
    pub output_pages: usize,
}
