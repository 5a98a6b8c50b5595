//! Shared constants for sheet rendering
//!
//! Unit conversions, colors and glyph metrics used by the layout and the
//! renderer.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Grid
// =============================================================================

/// Questions are always spread over this many columns
pub const COLUMNS: usize = 4;

// =============================================================================
// Colors (RGB, 0.0..=1.0)
// =============================================================================

/// Title color (dark blue, #00008B)
pub const TITLE_COLOR: (f32, f32, f32) = (0.0, 0.0, 0.545);

/// Bubble outline color
pub const BUBBLE_OUTLINE_COLOR: (f32, f32, f32) = (1.0, 0.0, 0.0);

/// Bubble interior
pub const BUBBLE_FILL_COLOR: (f32, f32, f32) = (1.0, 1.0, 1.0);

/// Labels and option letters
pub const TEXT_COLOR: (f32, f32, f32) = (0.0, 0.0, 0.0);

/// Bubble outline width (points)
pub const BUBBLE_OUTLINE_WIDTH: f32 = 1.0;

// =============================================================================
// Glyph Metrics
// =============================================================================

/// Approximate advance of a Helvetica glyph as a fraction of the font size.
/// Digits advance exactly this much; capitals are close to it.
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.556;

/// Same for Helvetica-Bold
pub const HELVETICA_BOLD_CHAR_WIDTH_RATIO: f32 = 0.611;

// =============================================================================
// Bezier Curve Constants
// =============================================================================

/// Control point factor for approximating circles with Bezier curves.
/// 4 * (sqrt(2) - 1) / 3 ≈ 0.552284749831
pub const BEZIER_CIRCLE_FACTOR: f32 = 0.552284749831;
