//! Watch Face Testing Utilities
//!
//! Headless RGB framebuffer for asserting on rendered watch face frames.
//!
//! # Quick start
//!
//! ```no_run
//! use watchface_testing::TestSurface;
//! use embedded_graphics::{pixelcolor::Rgb888, prelude::*, primitives::{PrimitiveStyle, Rectangle}};
//!
//! let mut t = TestSurface::new(280, 280);
//!
//! Rectangle::new(Point::new(10, 10), Size::new(40, 20))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb888::RED))
//!     .draw(&mut t)
//!     .unwrap();
//!
//! t.assert_pixel(20, 15, Rgb888::RED).unwrap();
//! ```
//!
//! # Golden screenshot testing
//!
//! ```no_run
//! # use watchface_testing::TestSurface;
//! # let t = TestSurface::new(100, 100);
//! // First run: set UPDATE_GOLDEN=1 to create/update the reference file.
//! t.assert_matches_golden("tests/golden/face.png", 0).unwrap();
//! ```

#![warn(clippy::all)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![allow(clippy::module_name_repetitions)]
// Desktop-only test helper: failures are reported as `Err(String)` and
// coordinates are bounds-checked before indexing.
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]

use std::convert::Infallible;
use std::path::Path;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

// ─────────────────────────────────────────────────────────────────────────────
// TestSurface
// ─────────────────────────────────────────────────────────────────────────────

/// Headless RGB draw target for frame tests.
///
/// Implements [`DrawTarget`] with `Rgb888` pixels, so the renderer can draw
/// into it exactly as it would into a real display. Starts filled with a
/// sentinel magenta so undrawn pixels are easy to spot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSurface {
    width: u32,
    height: u32,
    pixels: Vec<Rgb888>,
    draw_calls: usize,
}

/// Fill color of a fresh surface.
pub const UNDRAWN: Rgb888 = Rgb888::new(0xFF, 0x00, 0xFF);

impl TestSurface {
    /// Create a surface of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        let len = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            width,
            height,
            pixels: vec![UNDRAWN; len],
            draw_calls: 0,
        }
    }

    /// Surface width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of `draw_iter` batches received. Useful to check that nothing
    /// was drawn at all.
    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            usize::try_from(u64::from(y) * u64::from(self.width) + u64::from(x)).ok()
        } else {
            None
        }
    }

    // ── Framebuffer access ───────────────────────────────────────────────────

    /// Color at `(x, y)`, or `None` if out of bounds.
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<Rgb888> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Color at an `embedded-graphics` point.
    pub fn pixel_at_point(&self, p: Point) -> Option<Rgb888> {
        let x = u32::try_from(p.x).ok()?;
        let y = u32::try_from(p.y).ok()?;
        self.pixel_at(x, y)
    }

    // ── Pixel assertions ─────────────────────────────────────────────────────

    /// Assert that pixel `(x, y)` has the expected color.
    pub fn assert_pixel(&self, x: u32, y: u32, expected: Rgb888) -> Result<(), String> {
        let actual = self
            .pixel_at(x, y)
            .ok_or_else(|| format!("Pixel ({x}, {y}) is out of bounds"))?;
        if actual == expected {
            Ok(())
        } else {
            Err(format!(
                "assert_pixel({x}, {y}): expected {expected:?}, got {actual:?}"
            ))
        }
    }

    /// Assert that every pixel inside `rect` has the given color.
    pub fn assert_region_uniform(&self, rect: Rectangle, color: Rgb888) -> Result<(), String> {
        for p in rect.points() {
            let actual = self
                .pixel_at_point(p)
                .ok_or_else(|| format!("assert_region_uniform: {p:?} out of bounds"))?;
            if actual != color {
                return Err(format!(
                    "assert_region_uniform failed in {rect:?}: {p:?} is {actual:?}, expected {color:?}"
                ));
            }
        }
        Ok(())
    }

    /// Assert that `rect` contains at least one pixel with the given color.
    pub fn assert_region_contains(&self, rect: Rectangle, color: Rgb888) -> Result<(), String> {
        if self.pixel_count_of_color(rect, color) > 0 {
            Ok(())
        } else {
            Err(format!(
                "assert_region_contains: no pixel {color:?} found in {rect:?}"
            ))
        }
    }

    /// Assert that `rect` contains no pixel with the given color.
    pub fn assert_region_lacks(&self, rect: Rectangle, color: Rgb888) -> Result<(), String> {
        match self.pixel_count_of_color(rect, color) {
            0 => Ok(()),
            n => Err(format!(
                "assert_region_lacks: {n} pixels {color:?} found in {rect:?}"
            )),
        }
    }

    /// Count pixels in `rect` that equal `color`.
    pub fn pixel_count_of_color(&self, rect: Rectangle, color: Rgb888) -> usize {
        self.pixel_count_where(rect, |c| c == color)
    }

    /// Count pixels in `rect` matching `pred`.
    pub fn pixel_count_where(&self, rect: Rectangle, pred: impl Fn(Rgb888) -> bool) -> usize {
        rect.points()
            .filter_map(|p| self.pixel_at_point(p))
            .filter(|c| pred(*c))
            .count()
    }

    /// Whole-surface rectangle.
    pub fn full(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(self.width, self.height))
    }

    // ── Screenshot utilities ─────────────────────────────────────────────────

    fn to_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let c = self.pixel_at(x, y).unwrap_or(UNDRAWN);
            image::Rgb([c.r(), c.g(), c.b()])
        })
    }

    /// Save the framebuffer as a PNG.
    pub fn screenshot(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        self.to_image().save(path)?;
        Ok(())
    }

    /// Save the framebuffer as the golden reference PNG, creating parent
    /// directories.
    pub fn save_golden(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let p = path.as_ref();
        if let Some(parent) = p.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.screenshot(p)
    }

    /// Assert the framebuffer matches a golden PNG.
    ///
    /// `threshold` is the maximum per-channel difference still considered
    /// equal. Set `UPDATE_GOLDEN=1` to rewrite the golden file instead.
    pub fn assert_matches_golden(
        &self,
        golden_path: impl AsRef<Path>,
        threshold: u8,
    ) -> Result<(), String> {
        let golden_path = golden_path.as_ref();

        if std::env::var("UPDATE_GOLDEN").is_ok() {
            return self.save_golden(golden_path).map_err(|e| {
                format!(
                    "Failed to save golden '{p}': {e}",
                    p = golden_path.display()
                )
            });
        }

        let golden = image::open(golden_path)
            .map_err(|e| {
                format!(
                    "Failed to open golden '{}': {e}\nRun with UPDATE_GOLDEN=1 to create it.",
                    golden_path.display()
                )
            })?
            .to_rgb8();
        let current = self.to_image();

        if current.dimensions() != golden.dimensions() {
            let (cw, ch) = current.dimensions();
            let (gw, gh) = golden.dimensions();
            return Err(format!(
                "Dimension mismatch: surface is {cw}×{ch}, golden is {gw}×{gh}"
            ));
        }

        let diff_pixels = current
            .pixels()
            .zip(golden.pixels())
            .filter(|(cp, gp)| {
                cp.0.iter()
                    .zip(gp.0.iter())
                    .any(|(&a, &b)| a.abs_diff(b) > threshold)
            })
            .count();

        if diff_pixels > 0 {
            Err(format!(
                "{diff_pixels} pixels differ from golden '{}' (threshold={threshold})",
                golden_path.display()
            ))
        } else {
            Ok(())
        }
    }
}

impl OriginDimensions for TestSurface {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for TestSurface {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.draw_calls += 1;
        for Pixel(p, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(p.x), u32::try_from(p.y)) else {
                continue;
            };
            if let Some(i) = self.index(x, y) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn pixel_at_default_is_undrawn() {
        let t = TestSurface::new(50, 50);
        assert_eq!(t.pixel_at(0, 0), Some(UNDRAWN));
        assert_eq!(t.pixel_at(49, 49), Some(UNDRAWN));
        assert_eq!(t.draw_calls(), 0);
    }

    #[test]
    fn pixel_at_out_of_bounds_is_none() {
        let t = TestSurface::new(50, 50);
        assert_eq!(t.pixel_at(50, 0), None);
        assert_eq!(t.pixel_at_point(Point::new(-1, 3)), None);
    }

    #[test]
    fn draw_rect_then_assert_region() {
        let mut t = TestSurface::new(60, 60);
        let rect = Rectangle::new(Point::new(5, 5), Size::new(10, 10));
        rect.into_styled(PrimitiveStyle::with_fill(Rgb888::GREEN))
            .draw(&mut t)
            .unwrap();
        t.assert_region_uniform(rect, Rgb888::GREEN).unwrap();
        assert_eq!(t.pixel_count_of_color(t.full(), Rgb888::GREEN), 100);
        t.assert_region_lacks(
            Rectangle::new(Point::new(30, 30), Size::new(10, 10)),
            Rgb888::GREEN,
        )
        .unwrap();
    }

    #[test]
    fn off_surface_pixels_are_clipped() {
        let mut t = TestSurface::new(10, 10);
        Rectangle::new(Point::new(-5, -5), Size::new(8, 8))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::BLUE))
            .draw(&mut t)
            .unwrap();
        assert_eq!(t.pixel_count_of_color(t.full(), Rgb888::BLUE), 9);
    }

    #[test]
    fn assert_pixel_mismatch_is_err() {
        let t = TestSurface::new(4, 4);
        assert!(t.assert_pixel(1, 1, Rgb888::BLACK).is_err());
        assert!(t.assert_pixel(9, 9, UNDRAWN).is_err());
    }

    #[test]
    fn screenshot_round_trips_through_golden() {
        let mut t = TestSurface::new(8, 8);
        Rectangle::new(Point::zero(), Size::new(4, 8))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::WHITE))
            .draw(&mut t)
            .unwrap();
        let mut path = std::env::temp_dir();
        path.push(format!("watchface_testing_{}.png", std::process::id()));
        t.save_golden(&path).unwrap();
        t.assert_matches_golden(&path, 0).unwrap();
        let _ = std::fs::remove_file(&path);
    }
}
