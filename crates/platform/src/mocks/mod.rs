//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use core::cell::Cell;
use std::collections::HashMap;
use std::string::String;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, PrimitiveStyle, Rectangle};

use crate::*;

/// Mock host that counts redraw requests.
#[derive(Debug, Default)]
pub struct RecordingHost {
    redraws: usize,
    failing: Option<HostError>,
}

impl RecordingHost {
    /// Create a host that accepts every request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of redraw requests accepted so far.
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    /// Make every following request fail with `error` (`None` to recover).
    pub fn set_failing(&mut self, error: Option<HostError>) {
        self.failing = error;
    }
}

impl WatchFaceHost for RecordingHost {
    fn request_redraw(&mut self) -> Result<(), HostError> {
        if let Some(error) = self.failing {
            return Err(error);
        }
        self.redraws = self.redraws.saturating_add(1);
        Ok(())
    }
}

/// Mock wall clock advanced by hand.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<u64>,
}

impl ManualClock {
    /// Create a clock reading `now_ms`.
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }

    /// Move forward by `delta_ms`.
    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(delta_ms));
    }
}

impl WallClock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

/// A stored preference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefValue {
    /// Integer (colors are stored as ints).
    Int(i32),
    /// Boolean flag.
    Bool(bool),
}

/// In-memory preference store.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, PrefValue>,
    unavailable: bool,
    reads: Cell<usize>,
}

impl MemoryPreferences {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an integer.
    pub fn put_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.into(), PrefValue::Int(value));
    }

    /// Store a boolean.
    pub fn put_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.into(), PrefValue::Bool(value));
    }

    /// Make every read fail with [`PreferenceError::Unavailable`].
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Number of reads served so far.
    pub fn read_count(&self) -> usize {
        self.reads.get()
    }

    fn lookup(&self, key: &str) -> Result<Option<PrefValue>, PreferenceError> {
        self.reads.set(self.reads.get().saturating_add(1));
        if self.unavailable {
            return Err(PreferenceError::Unavailable);
        }
        Ok(self.values.get(key).copied())
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_int(&self, key: &str) -> Result<Option<i32>, PreferenceError> {
        match self.lookup(key)? {
            None => Ok(None),
            Some(PrefValue::Int(v)) => Ok(Some(v)),
            Some(PrefValue::Bool(_)) => Err(PreferenceError::TypeMismatch),
        }
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>, PreferenceError> {
        match self.lookup(key)? {
            None => Ok(None),
            Some(PrefValue::Bool(v)) => Ok(Some(v)),
            Some(PrefValue::Int(_)) => Err(PreferenceError::TypeMismatch),
        }
    }
}

/// Mock complication renderable that records every call.
///
/// Draws a filled rectangle over its bounds in the active color (outline in
/// the ambient color when ambient) whenever its data has content. Ranged
/// values fill only their fraction of the width, from the left.
#[derive(Debug, Clone, Default)]
pub struct MockComplication {
    data: ComplicationData,
    bounds: Rectangle,
    ambient: bool,
    low_bit_ambient: bool,
    burn_in_protection: bool,
    colors: Option<ComplicationColors>,
    malformed: bool,
    taps: usize,
    draws: Cell<usize>,
}

impl MockComplication {
    /// Create an empty renderable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `draw` fail with [`RenderableError::Malformed`].
    pub fn set_malformed(&mut self, malformed: bool) {
        self.malformed = malformed;
    }

    /// Ambient flag last pushed by the watch face.
    pub fn ambient(&self) -> bool {
        self.ambient
    }

    /// Low-bit flag last pushed by the watch face.
    pub fn low_bit_ambient(&self) -> bool {
        self.low_bit_ambient
    }

    /// Burn-in flag last pushed by the watch face.
    pub fn burn_in_protection(&self) -> bool {
        self.burn_in_protection
    }

    /// Colors last pushed by the watch face.
    pub fn colors(&self) -> Option<ComplicationColors> {
        self.colors
    }

    /// Number of taps this renderable accepted.
    pub fn tap_count(&self) -> usize {
        self.taps
    }

    /// Number of successful draws.
    pub fn draw_count(&self) -> usize {
        self.draws.get()
    }
}

impl ComplicationRenderable for MockComplication {
    fn set_data(&mut self, data: ComplicationData) {
        self.data = data;
    }

    fn data(&self) -> &ComplicationData {
        &self.data
    }

    fn set_bounds(&mut self, bounds: Rectangle) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn set_in_ambient_mode(&mut self, ambient: bool) {
        self.ambient = ambient;
    }

    fn set_low_bit_ambient(&mut self, low_bit_ambient: bool) {
        self.low_bit_ambient = low_bit_ambient;
    }

    fn set_burn_in_protection(&mut self, burn_in_protection: bool) {
        self.burn_in_protection = burn_in_protection;
    }

    fn set_colors(&mut self, colors: ComplicationColors) {
        self.colors = Some(colors);
    }

    fn on_tap(&mut self, point: Point) -> bool {
        if self.data.kind().has_content() && self.bounds.contains(point) {
            self.taps = self.taps.saturating_add(1);
            true
        } else {
            false
        }
    }

    fn draw<D, C>(&self, target: &mut D, _now_ms: u64) -> Result<(), RenderableError>
    where
        D: DrawTarget<Color = C>,
        C: PixelColor + From<Rgb888>,
    {
        if self.malformed {
            return Err(RenderableError::Malformed);
        }
        if !self.data.kind().has_content() {
            return Ok(());
        }
        let colors = self.colors.unwrap_or(ComplicationColors::Foreground {
            active: Color::RED,
            ambient: Color::WHITE,
        });
        let color = C::from(colors.in_effect(self.ambient).to_rgb888());
        let style = if self.ambient {
            PrimitiveStyle::with_stroke(color, 1)
        } else {
            PrimitiveStyle::with_fill(color)
        };
        let area = match self.data.ranged_value() {
            Some(range) if !self.ambient => left_fraction(self.bounds, range.fraction()),
            _ => self.bounds,
        };
        area.into_styled(style)
            .draw(target)
            .map_err(|_| RenderableError::Target)?;
        self.draws.set(self.draws.get().saturating_add(1));
        Ok(())
    }
}

/// The left `fraction` of `bounds`.
// fraction is clamped to 0.0..=1.0, so the product fits the original width.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn left_fraction(bounds: Rectangle, fraction: f32) -> Rectangle {
    let width = (f64::from(bounds.size.width) * f64::from(fraction)).round() as u32;
    Rectangle::new(bounds.top_left, Size::new(width, bounds.size.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_host_counts() {
        let mut host = RecordingHost::new();
        host.request_redraw().unwrap();
        host.request_redraw().unwrap();
        assert_eq!(host.redraw_count(), 2);
    }

    #[test]
    fn test_recording_host_failure() {
        let mut host = RecordingHost::new();
        host.set_failing(Some(HostError::Rejected));
        assert_eq!(host.request_redraw(), Err(HostError::Rejected));
        assert_eq!(host.redraw_count(), 0);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(1_000);
        clock.advance(250);
        assert_eq!(clock.now_ms(), 1_250);
    }

    #[test]
    fn test_memory_preferences_type_mismatch() {
        let mut prefs = MemoryPreferences::new();
        prefs.put_bool("flag", true);
        assert_eq!(prefs.get_int("flag"), Err(PreferenceError::TypeMismatch));
        assert_eq!(prefs.get_bool("flag"), Ok(Some(true)));
        assert_eq!(prefs.get_bool("missing"), Ok(None));
    }

    #[test]
    fn test_mock_complication_tap_requires_content() {
        let mut c = MockComplication::new();
        c.set_bounds(Rectangle::new(Point::new(0, 0), Size::new(10, 10)));
        assert!(!c.on_tap(Point::new(5, 5)));
        c.set_data(ComplicationData::short_text("7"));
        assert!(c.on_tap(Point::new(5, 5)));
        assert!(!c.on_tap(Point::new(50, 5)));
        assert_eq!(c.tap_count(), 1);
    }

    #[test]
    fn test_mock_complication_draws_ranged_fraction() {
        let mut c = MockComplication::new();
        c.set_bounds(Rectangle::new(Point::new(0, 0), Size::new(100, 10)));
        c.set_data(ComplicationData::ranged(RangedValue {
            value: 25.0,
            min: 0.0,
            max: 100.0,
        }));
        let mut display = embedded_graphics::mock_display::MockDisplay::<Rgb888>::new();
        display.set_allow_out_of_bounds_drawing(true);
        c.draw(&mut display, 0).unwrap();
        let filled = display.affected_area();
        assert_eq!(filled.size.width, 25);
    }
}
