//! Constants used throughout booklet imposition

// ============================================================================
// Sheet Geometry
// ============================================================================

/// Page slots on one physical sheet (front left/right, back left/right).
pub const PAGES_PER_SHEET: u32 = 4;

/// Page slots on one face of a sheet.
pub const SLOTS_PER_FACE: usize = 2;

// ============================================================================
// Defaults
// ============================================================================

/// Default creep compensation per sheet, in points.
pub const DEFAULT_CREEP_PT: f32 = 0.5;

/// Default suffix appended to the document title for the output file name.
pub const DEFAULT_SUFFIX: &str = " booklet.pdf";

/// Fallback page dimensions (US Letter portrait, in points) for source
/// pages that carry no media box.
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (612.0, 792.0);

// ============================================================================
// Drawing
// ============================================================================

/// Stroke width of the optional frame around each placed page, in points.
pub const OUTLINE_LINE_WIDTH: f32 = 2.0;
