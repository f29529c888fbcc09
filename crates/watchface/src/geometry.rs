//! Proportional layout of hands, ticks, indicator and complication bounds.
//!
//! All values derive from the surface size alone. Sizes are clamped to
//! `MIN_SURFACE_PX..=MAX_SURFACE_PX` first, so every ratio below divides a
//! positive number and every product fits in `i32`.

// Surface sizes are clamped before any arithmetic; the largest product is
// MAX_SURFACE_PX * 7, far below i32::MAX.
#![allow(clippy::arithmetic_side_effects)]

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::complication::ComplicationId;
use crate::component::Dimension;
use crate::face_debug;

/// Smallest surface edge the layout accepts.
pub const MIN_SURFACE_PX: i32 = 56;

/// Largest surface edge the layout accepts.
pub const MAX_SURFACE_PX: i32 = 16_384;

/// Surface size assumed until the host reports one.
pub const DEFAULT_SURFACE_PX: i32 = 280;

/// Hour hand stroke is `width / 56`.
const HOUR_STROKE_DIVISOR: i32 = 56;
/// Minute hand stroke is `width / 93`.
const MINUTE_STROKE_DIVISOR: i32 = 93;
/// Second hand and tick stroke is `width / 140`.
const FINE_STROKE_DIVISOR: i32 = 140;
/// Tick length and notification outer ring are `width / 28`.
const TICK_DIVISOR: i32 = 28;
/// Center gap and notification inner dot are `width / 70`.
const GAP_DIVISOR: i32 = 70;
/// Notification indicator sits `height / 7` above the bottom edge.
const NOTIFICATION_OFFSET_DIVISOR: i32 = 7;

/// Every pixel size the renderer needs for one surface size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceGeometry {
    /// Clamped surface width.
    pub width: i32,
    /// Clamped surface height.
    pub height: i32,
    /// Hour hand stroke and length.
    pub hour_hand: Dimension,
    /// Minute hand stroke and length.
    pub minute_hand: Dimension,
    /// Second hand stroke and length.
    pub second_hand: Dimension,
    /// Tick stroke and length.
    pub ticks: Dimension,
    /// Empty center radius; hands start this far from the center.
    pub center_gap: u32,
    /// Unread indicator ring radius.
    pub notification_outer_ring: u32,
    /// Unread indicator dot radius.
    pub notification_inner_circle: u32,
    /// Unread indicator distance from the bottom edge.
    pub notification_offset: u32,
    /// Left complication bounds.
    pub left_bounds: Rectangle,
    /// Right complication bounds.
    pub right_bounds: Rectangle,
    /// Background complication bounds (full surface).
    pub background_bounds: Rectangle,
}

fn stroke(width: i32, divisor: i32) -> u32 {
    (width / divisor).max(1).unsigned_abs()
}

impl FaceGeometry {
    /// Compute the layout for a `width` x `height` surface.
    ///
    /// Out-of-range sizes are clamped rather than rejected.
    pub fn calculate(width: i32, height: i32) -> Self {
        let w = width.clamp(MIN_SURFACE_PX, MAX_SURFACE_PX);
        let h = height.clamp(MIN_SURFACE_PX, MAX_SURFACE_PX);
        if w != width || h != height {
            face_debug!("surface {}x{} clamped to {}x{}", width, height, w, h);
        }

        let half = w / 2;
        let hour_len = half / 2;
        let minute_len = w * 3 / 8;
        let second_len = w * 7 / 16;

        let size = w / 4;
        let horizontal_offset = (half - size) / 2;
        let vertical_offset = half - size / 2;
        let square = Size::new(size.unsigned_abs(), size.unsigned_abs());

        Self {
            width: w,
            height: h,
            hour_hand: Dimension::new(stroke(w, HOUR_STROKE_DIVISOR), hour_len.unsigned_abs()),
            minute_hand: Dimension::new(
                stroke(w, MINUTE_STROKE_DIVISOR),
                minute_len.unsigned_abs(),
            ),
            second_hand: Dimension::new(
                stroke(w, FINE_STROKE_DIVISOR),
                second_len.unsigned_abs(),
            ),
            ticks: Dimension::new(
                stroke(w, FINE_STROKE_DIVISOR),
                (w / TICK_DIVISOR).unsigned_abs(),
            ),
            center_gap: (w / GAP_DIVISOR).unsigned_abs(),
            notification_outer_ring: (w / TICK_DIVISOR).unsigned_abs(),
            notification_inner_circle: (w / GAP_DIVISOR).unsigned_abs(),
            notification_offset: (h / NOTIFICATION_OFFSET_DIVISOR).unsigned_abs(),
            left_bounds: Rectangle::new(Point::new(horizontal_offset, vertical_offset), square),
            right_bounds: Rectangle::new(
                Point::new(half + horizontal_offset, vertical_offset),
                square,
            ),
            background_bounds: Rectangle::new(
                Point::zero(),
                Size::new(w.unsigned_abs(), h.unsigned_abs()),
            ),
        }
    }

    /// Surface center.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }

    /// Center of the unread notification indicator.
    pub fn notification_center(&self) -> Point {
        let offset = i32::try_from(self.notification_offset).unwrap_or(0);
        Point::new(self.width / 2, self.height - offset)
    }

    /// Bounds for a complication slot.
    pub fn complication_bounds(&self, id: ComplicationId) -> Rectangle {
        match id {
            ComplicationId::Background => self.background_bounds,
            ComplicationId::Left => self.left_bounds,
            ComplicationId::Right => self.right_bounds,
        }
    }
}

impl Default for FaceGeometry {
    fn default() -> Self {
        Self::calculate(DEFAULT_SURFACE_PX, DEFAULT_SURFACE_PX)
    }
}
