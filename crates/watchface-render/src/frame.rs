//! Frame pipeline.
//!
//! Draw order, back to front:
//!
//! 1. background fill (effective background color)
//! 2. complications, ascending id
//! 3. unread indicator: ring always, dot only when not ambient
//! 4. hour ticks
//! 5. hour and minute hands, second hand only when not ambient
//! 6. center pivot circle
//!
//! `embedded-graphics` has no alpha or blur, so [`Paint::alpha`] is applied
//! by blending over the background color and the shadow layer becomes a
//! slightly wider stroke drawn first.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle};
use platform::{Color, ComplicationRenderable};
use watchface::{face_warn, Component, Paint, PaintStyle, WatchFaceState, WatchTime};

/// Extra stroke width of the shadow layer on each side.
const SHADOW_SPREAD: u32 = 1;

/// Number of hour ticks on the dial.
const TICK_COUNT: u8 = 12;

/// What happened to complications during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameReport {
    /// Renderables that drew successfully.
    pub complications_drawn: u8,
    /// Renderables that failed and were skipped.
    pub complications_skipped: u8,
}

fn pixel<C: From<Rgb888>>(color: Color) -> C {
    C::from(color.to_rgb888())
}

/// Stroke color of `paint` composited over `background`.
fn stroke_color(paint: &Paint, background: Color) -> Color {
    paint.color.blend_over(background, paint.alpha)
}

fn primitive_style<C>(paint: &Paint, background: Color) -> PrimitiveStyle<C>
where
    C: PixelColor + From<Rgb888>,
{
    let color = pixel(stroke_color(paint, background));
    match paint.style {
        PaintStyle::Stroke => PrimitiveStyle::with_stroke(color, paint.stroke_width),
        PaintStyle::Fill => PrimitiveStyle::with_fill(color),
    }
}

fn shadow_style<C>(paint: &Paint, background: Color) -> Option<PrimitiveStyle<C>>
where
    C: PixelColor + From<Rgb888>,
{
    let shadow = paint.shadow?;
    if shadow.radius == 0 {
        return None;
    }
    let color = shadow.color.blend_over(background, paint.alpha);
    let width = paint
        .stroke_width
        .saturating_add(SHADOW_SPREAD.saturating_mul(2));
    Some(PrimitiveStyle::with_stroke(pixel(color), width))
}

/// Point at `radius` from `center` along a clockwise angle from 12 o'clock.
// Radii are surface-sized and the result is rounded back onto the pixel grid.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn polar(center: Point, degrees: f32, radius: u32) -> Point {
    let theta = degrees.to_radians();
    let r = radius as f32;
    let dx = libm::roundf(libm::sinf(theta) * r) as i32;
    let dy = libm::roundf(-libm::cosf(theta) * r) as i32;
    Point::new(center.x.saturating_add(dx), center.y.saturating_add(dy))
}

fn draw_radial<D, C>(
    target: &mut D,
    paint: &Paint,
    background: Color,
    center: Point,
    degrees: f32,
    from: u32,
    to: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor + From<Rgb888>,
{
    let line = Line::new(polar(center, degrees, from), polar(center, degrees, to));
    if let Some(style) = shadow_style(paint, background) {
        line.into_styled(style).draw(target)?;
    }
    line.into_styled(primitive_style(paint, background))
        .draw(target)
}

fn draw_hand<D, C>(
    target: &mut D,
    hand: &Component,
    background: Color,
    center: Point,
    gap: u32,
    degrees: f32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor + From<Rgb888>,
{
    draw_radial(
        target,
        hand.paint(),
        background,
        center,
        degrees,
        gap,
        hand.dimension().height,
    )
}

fn circle(center: Point, radius: u32) -> Circle {
    Circle::with_center(center, radius.saturating_mul(2))
}

/// Draw one frame of `state` at `time` into `target`.
///
/// Complication renderables that fail are logged and skipped; the rest of
/// the frame still draws. Draw-target errors abort the frame.
pub fn render_frame<R, D, C>(
    state: &WatchFaceState<R>,
    target: &mut D,
    time: &WatchTime,
    now_ms: u64,
) -> Result<FrameReport, D::Error>
where
    R: ComplicationRenderable,
    D: DrawTarget<Color = C>,
    C: PixelColor + From<Rgb888>,
{
    let mut report = FrameReport::default();
    let background = state.background().effective_color();
    let geometry = state.geometry();
    let ambient = state.is_ambient();
    let center = geometry.center();

    target.clear(pixel(background))?;

    for slot in state.complications().draw_order() {
        match slot.renderable().draw(target, now_ms) {
            Ok(()) => {
                report.complications_drawn = report.complications_drawn.saturating_add(1);
            }
            Err(error) => {
                face_warn!(
                    "skipping {} complication: {}",
                    slot.id().as_str(),
                    error.as_str()
                );
                report.complications_skipped = report.complications_skipped.saturating_add(1);
            }
        }
    }

    if state.shows_unread_indicator() {
        let spot = geometry.notification_center();
        let ring = state.notification_circle().paint();
        circle(spot, geometry.notification_outer_ring)
            .into_styled(primitive_style(ring, background))
            .draw(target)?;
        if !ambient {
            let dot = state.second_hand().paint().filled();
            circle(spot, geometry.notification_inner_circle)
                .into_styled(primitive_style(&dot, background))
                .draw(target)?;
        }
    }

    let ticks = state.ticks();
    let outer = u32::try_from(center.x).unwrap_or(0);
    let inner = outer.saturating_sub(ticks.dimension().height);
    for hour in 0..TICK_COUNT {
        let degrees = f32::from(hour) * 30.0;
        draw_radial(target, ticks.paint(), background, center, degrees, inner, outer)?;
    }

    let angles = time.angles();
    let gap = state.center_gap_radius();
    draw_hand(target, state.hour_hand(), background, center, gap, angles.hours)?;
    draw_hand(target, state.minute_hand(), background, center, gap, angles.minutes)?;
    if !ambient {
        draw_hand(target, state.second_hand(), background, center, gap, angles.seconds)?;
    }

    circle(center, gap)
        .into_styled(primitive_style(ticks.paint(), background))
        .draw(target)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_cardinal_points() {
        let c = Point::new(100, 100);
        assert_eq!(polar(c, 0.0, 50), Point::new(100, 50));
        assert_eq!(polar(c, 90.0, 50), Point::new(150, 100));
        assert_eq!(polar(c, 180.0, 50), Point::new(100, 150));
        assert_eq!(polar(c, 270.0, 50), Point::new(50, 100));
    }

    #[test]
    fn test_muted_stroke_is_dimmed() {
        let paint = Paint {
            color: Color::WHITE,
            alpha: 80,
            stroke_width: 2,
            anti_alias: true,
            style: PaintStyle::Stroke,
            shadow: None,
        };
        assert_eq!(stroke_color(&paint, Color::BLACK), Color::rgb(80, 80, 80));
    }

    #[test]
    fn test_ambient_paint_has_no_shadow_layer() {
        let paint = Paint {
            color: Color::WHITE,
            alpha: 255,
            stroke_width: 2,
            anti_alias: false,
            style: PaintStyle::Stroke,
            shadow: None,
        };
        assert!(shadow_style::<Rgb888>(&paint, Color::BLACK).is_none());
    }
}
