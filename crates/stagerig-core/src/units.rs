//! Stage units and fixed layout constants.
//!
//! All canvas coordinates are in pixels. Real-world dimensions (bar length,
//! stage plan) are expressed in meters and converted at a fixed ratio, so a
//! plot keeps its proportions regardless of the viewport it was drawn in.

/// Fixed meters-to-pixels ratio for the stage canvas.
pub const PIXELS_PER_METER: f64 = 60.0;

/// Real-world length of a hanging bar, in meters.
pub const BAR_LENGTH_M: f64 = 7.72;

/// Bar height on the canvas, in pixels.
pub const BAR_HEIGHT_PX: f64 = 10.0;

/// Discretization step for fixture attachment stations along a bar.
pub const SNAP_SPACING_PX: f64 = 30.0;

/// Square footprint of a fixture glyph on the canvas.
pub const ICON_SIZE_PX: f64 = 26.0;

/// Clearance between a fixture glyph and the bar edge when attached.
pub const SNAP_CLEARANCE_PX: f64 = 4.0;

/// How far past a bar's ends a drag still counts as "near" the bar.
pub const NEAR_END_TOLERANCE_PX: f64 = 40.0;

/// How far from a bar's centerline, perpendicular, a drag still counts
/// as "near" the bar.
pub const NEAR_SIDE_TOLERANCE_PX: f64 = 30.0;

/// Channels in one DMX universe.
pub const DMX_UNIVERSE_SIZE: u16 = 512;

/// Offset applied to pasted items so they do not cover the original.
pub const PASTE_OFFSET_PX: f64 = 20.0;

/// Background grid cell size for rendered exports.
pub const GRID_SIZE_PX: f64 = 50.0;

/// Height of one legend row in exported images.
pub const LEGEND_ROW_HEIGHT_PX: u32 = 30;

/// Legend rows per column before wrapping to the next column.
pub const LEGEND_ROWS_PER_COLUMN: usize = 18;

/// Converts meters to canvas pixels.
pub fn meters_to_px(m: f64) -> f64 {
    m * PIXELS_PER_METER
}

/// Converts canvas pixels to meters.
pub fn px_to_meters(px: f64) -> f64 {
    px / PIXELS_PER_METER
}

/// Bar length on the canvas, in pixels.
pub fn bar_length_px() -> f64 {
    meters_to_px(BAR_LENGTH_M)
}
