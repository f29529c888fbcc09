//! Drawable watch face components (hands, ticks, notification indicator).
//!
//! A [`Component`] owns its [`ColorStyle`], its dimension and its power-mode
//! flags, and keeps a cached [`Paint`] describing how the renderer should
//! stroke it. The paint is re-derived by every setter, so the frame
//! pipeline only ever reads.

use platform::Color;

use crate::color_style::{ColorStyle, Styled};
use crate::config::ALPHA_FULLY_OPAQUE;

/// Component size in pixels: `width` is the stroke, `height` the length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dimension {
    /// Stroke width.
    pub width: u32,
    /// Length from the center gap to the tip.
    pub height: u32,
}

impl Dimension {
    /// Create a dimension.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Whether a shape is stroked or filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PaintStyle {
    /// Outline only.
    Stroke,
    /// Solid fill.
    Fill,
}

/// Shadow layer drawn beneath a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Shadow {
    /// Blur radius in pixels.
    pub radius: u8,
    /// Shadow color.
    pub color: Color,
}

/// Renderer-agnostic description of how to draw a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Paint {
    /// Stroke color.
    pub color: Color,
    /// Opacity, `255` = opaque.
    pub alpha: u8,
    /// Stroke width in pixels.
    pub stroke_width: u32,
    /// Smooth edges.
    pub anti_alias: bool,
    /// Stroke or fill.
    pub style: PaintStyle,
    /// Shadow layer, active mode only.
    pub shadow: Option<Shadow>,
}

impl Paint {
    /// Derive the paint for the given component state.
    pub fn derive(
        style: &ColorStyle,
        dimension: Dimension,
        ambient: bool,
        muted: bool,
        mute_alpha: u8,
        shadow_radius: u8,
    ) -> Self {
        if ambient {
            Self {
                color: style.ambient(),
                alpha: ALPHA_FULLY_OPAQUE,
                stroke_width: dimension.width,
                anti_alias: false,
                style: PaintStyle::Stroke,
                shadow: None,
            }
        } else {
            Self {
                color: style.active(),
                alpha: if muted { mute_alpha } else { ALPHA_FULLY_OPAQUE },
                stroke_width: dimension.width,
                anti_alias: true,
                style: PaintStyle::Stroke,
                shadow: Some(Shadow {
                    radius: shadow_radius,
                    color: style.shadow(),
                }),
            }
        }
    }

    /// Same paint as a solid fill without a shadow.
    pub fn filled(self) -> Self {
        Self {
            style: PaintStyle::Fill,
            shadow: None,
            ..self
        }
    }
}

/// A hand, the tick ring or the notification indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    style: ColorStyle,
    dimension: Dimension,
    mute_alpha: u8,
    shadow_radius: u8,
    ambient: bool,
    muted: bool,
    paint: Paint,
}

impl Component {
    /// Create an active, unmuted component.
    pub fn new(style: ColorStyle, dimension: Dimension, mute_alpha: u8, shadow_radius: u8) -> Self {
        let paint = Paint::derive(&style, dimension, false, false, mute_alpha, shadow_radius);
        Self {
            style,
            dimension,
            mute_alpha,
            shadow_radius,
            ambient: false,
            muted: false,
            paint,
        }
    }

    /// Paint for the current state.
    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    /// Stroke width and length.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Alpha applied while muted in active mode.
    pub fn mute_alpha(&self) -> u8 {
        self.mute_alpha
    }

    /// Ambient flag.
    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    /// Mute flag.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Resize.
    pub fn set_dimension(&mut self, dimension: Dimension) {
        self.dimension = dimension;
        self.refresh();
    }

    /// Enter or leave ambient mode.
    pub fn set_ambient(&mut self, ambient: bool) {
        self.ambient = ambient;
        self.refresh();
    }

    /// Enter or leave mute mode.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.paint = Paint::derive(
            &self.style,
            self.dimension,
            self.ambient,
            self.muted,
            self.mute_alpha,
            self.shadow_radius,
        );
    }
}

impl Styled for Component {
    fn color_style(&self) -> &ColorStyle {
        &self.style
    }

    fn restyle<F: FnOnce(&mut ColorStyle)>(&mut self, change: F) {
        change(&mut self.style);
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand() -> Component {
        Component::new(
            ColorStyle::new(Color::RED, Color::WHITE, Color::BLACK),
            Dimension::new(3, 100),
            80,
            6,
        )
    }

    #[test]
    fn test_active_paint() {
        let c = hand();
        let p = c.paint();
        assert_eq!(p.color, Color::RED);
        assert_eq!(p.alpha, 255);
        assert!(p.anti_alias);
        assert_eq!(p.stroke_width, 3);
        assert_eq!(
            p.shadow,
            Some(Shadow {
                radius: 6,
                color: Color::BLACK
            })
        );
    }

    #[test]
    fn test_ambient_paint_drops_shadow_and_aa() {
        let mut c = hand();
        c.set_ambient(true);
        let p = c.paint();
        assert_eq!(p.color, Color::WHITE);
        assert!(!p.anti_alias);
        assert!(p.shadow.is_none());
    }

    #[test]
    fn test_filled_keeps_color_and_alpha() {
        let mut c = hand();
        c.set_muted(true);
        let dot = c.paint().filled();
        assert_eq!(dot.style, PaintStyle::Fill);
        assert_eq!(dot.color, Color::RED);
        assert_eq!(dot.alpha, 80);
        assert!(dot.shadow.is_none());
    }

    #[test]
    fn test_mute_alpha_only_in_active() {
        let mut c = hand();
        c.set_muted(true);
        assert_eq!(c.paint().alpha, 80);
        c.set_ambient(true);
        assert_eq!(c.paint().alpha, 255);
    }

    #[test]
    fn test_color_setter_recomputes_paint() {
        let mut c = hand();
        c.set_active_color(Color::GRAY);
        assert_eq!(c.paint().color, Color::GRAY);
        c.set_ambient(true);
        c.set_ambient_color(Color::BLACK);
        assert_eq!(c.paint().color, Color::BLACK);
    }

    #[test]
    fn test_shadow_setter_recomputes_paint() {
        let mut c = hand();
        c.set_shadow_color(Color::WHITE);
        assert_eq!(c.paint().shadow.map(|s| s.color), Some(Color::WHITE));
    }

    #[test]
    fn test_dimension_changes_stroke() {
        let mut c = hand();
        c.set_dimension(Dimension::new(7, 70));
        assert_eq!(c.paint().stroke_width, 7);
    }
}
