//! Bar-local coordinate frames and the attachment snap engine.
//!
//! A hanging bar defines its own rotated frame: local x runs along the
//! bar's length, local y perpendicular to it. Attachment offsets are
//! computed in that frame so they stay stable under the bar's rotation.
//!
//! Canvas y grows downward, so "above the bar" means negative local y.

use stagerig_core::units::{
    bar_length_px, BAR_HEIGHT_PX, ICON_SIZE_PX, NEAR_END_TOLERANCE_PX, NEAR_SIDE_TOLERANCE_PX,
    SNAP_CLEARANCE_PX, SNAP_SPACING_PX,
};
use stagerig_core::Point;

use crate::item::Item;

/// Which side of a bar a fixture hangs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
}

/// The rotated local frame of a bar.
#[derive(Debug, Clone, Copy)]
pub struct BarFrame {
    origin: Point,
    rotation_deg: f64,
}

impl BarFrame {
    /// Frame of the given bar item (its position and rotation).
    pub fn of(bar: &Item) -> Self {
        Self {
            origin: bar.position(),
            rotation_deg: bar.rotation,
        }
    }

    /// Converts a world point into the bar's local frame.
    ///
    /// Formula:
    /// ```text
    /// local = rotate(world - origin, -rotation)
    /// ```
    pub fn to_local(&self, world: Point) -> Point {
        world
            .translated(-self.origin.x, -self.origin.y)
            .rotated(-self.rotation_deg)
    }

    /// Converts a local point back to world coordinates.
    ///
    /// Exact inverse of [`to_local`](Self::to_local):
    /// ```text
    /// world = rotate(local, +rotation) + origin
    /// ```
    pub fn to_world(&self, local: Point) -> Point {
        local
            .rotated(self.rotation_deg)
            .translated(self.origin.x, self.origin.y)
    }
}

/// Result of snapping a point to a bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// World position of the attachment station.
    pub position: Point,
    /// Side of the bar the station lies on.
    pub side: Side,
    /// Station offset along the bar, in the bar's local frame.
    pub station_x: f64,
}

/// Snaps a world point to the nearest valid attachment station on a bar.
///
/// The point is taken into the bar's local frame, local x is quantized to
/// the snap spacing and clamped to the usable span (bar length minus the
/// icon footprint at each end), and local y is fixed to the attachment
/// distance on whichever side of the centerline the point fell. The result
/// always lies exactly on a discrete station, on the correct side, for any
/// bar rotation.
pub fn snap_to_bar(bar: &Item, world: Point) -> SnapResult {
    let frame = BarFrame::of(bar);
    let local = frame.to_local(world);

    let half_icon = ICON_SIZE_PX / 2.0;
    let half_span = bar_length_px() / 2.0 - half_icon;

    let station_x = (local.x / SNAP_SPACING_PX).round() * SNAP_SPACING_PX;
    let station_x = station_x.clamp(-half_span, half_span);

    let attach_distance = BAR_HEIGHT_PX / 2.0 + half_icon + SNAP_CLEARANCE_PX;
    let (side, local_y) = if local.y <= 0.0 {
        (Side::Above, -attach_distance)
    } else {
        (Side::Below, attach_distance)
    };

    SnapResult {
        position: frame.to_world(Point::new(station_x, local_y)),
        side,
        station_x,
    }
}

/// Loose proximity test deciding whether a drag should attempt snapping.
///
/// Wider than the snap calculation itself: the window extends a fixed
/// tolerance past the bar's ends and a fixed tolerance perpendicular to
/// it, both independent of the snap spacing.
pub fn is_near_bar(bar: &Item, world: Point) -> bool {
    let local = BarFrame::of(bar).to_local(world);
    let half_len = bar_length_px() / 2.0;
    local.x.abs() <= half_len + NEAR_END_TOLERANCE_PX
        && local.y.abs() <= NEAR_SIDE_TOLERANCE_PX
}

/// Spatial query: the first bar in draw order whose proximity window
/// contains the point. Replaces render-tree hit-testing for drops.
pub fn find_bar_near<'a, I>(items: I, world: Point) -> Option<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    items
        .into_iter()
        .find(|item| item.is_bar() && is_near_bar(item, world))
}
