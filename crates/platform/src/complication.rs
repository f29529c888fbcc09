//! Complication renderable abstraction
//!
//! A complication is a small data-driven element (icon, text, ranged value,
//! image) supplied by an external data source. The watch face never
//! interprets the data itself: it forwards it to an opaque renderable, tells
//! the renderable about power-mode changes, and asks it to draw and hit-test.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use thiserror_no_std::Error;

use crate::color::Color;

/// Kind of payload carried by a [`ComplicationData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComplicationType {
    /// The data source has nothing to show.
    NoData,
    /// The slot is configured as empty.
    Empty,
    /// No data source is configured for the slot.
    NotConfigured,
    /// The watch face lacks permission to read the data source.
    NoPermission,
    /// Short text (a few characters), optionally with an icon.
    ShortText,
    /// Longer text line.
    LongText,
    /// A value within a range, e.g. battery level.
    RangedValue,
    /// A single icon.
    Icon,
    /// A small image.
    SmallImage,
    /// A full-surface image, used by the background slot.
    LargeImage,
}

impl ComplicationType {
    /// Stable name for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoData => "no-data",
            Self::Empty => "empty",
            Self::NotConfigured => "not-configured",
            Self::NoPermission => "no-permission",
            Self::ShortText => "short-text",
            Self::LongText => "long-text",
            Self::RangedValue => "ranged-value",
            Self::Icon => "icon",
            Self::SmallImage => "small-image",
            Self::LargeImage => "large-image",
        }
    }

    /// Whether the type carries something to render.
    pub const fn has_content(self) -> bool {
        !matches!(
            self,
            Self::NoData | Self::Empty | Self::NotConfigured | Self::NoPermission
        )
    }
}

/// A value inside a range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangedValue {
    /// Current value.
    pub value: f32,
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl RangedValue {
    /// Fraction of the range covered by `value`, clamped to `0.0..=1.0`.
    ///
    /// Returns `0.0` for an empty or inverted range.
    pub fn fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 || !span.is_finite() {
            return 0.0;
        }
        ((self.value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Data for one complication, as delivered by the data source.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplicationData {
    kind: ComplicationType,
    text: heapless::String<24>,
    ranged: Option<RangedValue>,
}

impl ComplicationData {
    /// Data of the given kind with no payload.
    pub fn new(kind: ComplicationType) -> Self {
        Self {
            kind,
            text: heapless::String::new(),
            ranged: None,
        }
    }

    /// "Nothing to show" data.
    pub fn no_data() -> Self {
        Self::new(ComplicationType::NoData)
    }

    /// Short text data. Text beyond 24 bytes is truncated at a char boundary.
    pub fn short_text(text: &str) -> Self {
        let mut data = Self::new(ComplicationType::ShortText);
        for ch in text.chars() {
            if data.text.push(ch).is_err() {
                break;
            }
        }
        data
    }

    /// Ranged value data.
    pub fn ranged(value: RangedValue) -> Self {
        let mut data = Self::new(ComplicationType::RangedValue);
        data.ranged = Some(value);
        data
    }

    /// Payload kind.
    pub fn kind(&self) -> ComplicationType {
        self.kind
    }

    /// Text payload (empty when the kind carries none).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Ranged payload, if any.
    pub fn ranged_value(&self) -> Option<RangedValue> {
        self.ranged
    }

    /// True when this data is a populated full-surface image.
    pub fn is_large_image(&self) -> bool {
        self.kind == ComplicationType::LargeImage
    }
}

impl Default for ComplicationData {
    fn default() -> Self {
        Self::no_data()
    }
}

/// Colors the watch face pushes into a renderable.
///
/// Renderables switch between active and ambient colors on their own once
/// told about ambient mode; these values only change when the user picks a
/// new highlight color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComplicationColors {
    /// Border and ranged-value colors of a foreground slot.
    Foreground {
        /// Color in active mode.
        active: Color,
        /// Color in ambient mode.
        ambient: Color,
    },
    /// Fill a full-surface slot shows while its image loads.
    Background {
        /// Loading fill.
        fill: Color,
    },
}

impl ComplicationColors {
    /// Color in effect for the given ambient flag.
    pub const fn in_effect(self, ambient: bool) -> Color {
        match self {
            Self::Foreground { active, ambient: dim } => {
                if ambient {
                    dim
                } else {
                    active
                }
            }
            Self::Background { fill } => fill,
        }
    }
}

/// Failures a renderable may report while drawing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderableError {
    /// The renderable's data or configuration cannot be drawn.
    #[error("complication renderable is malformed")]
    Malformed,
    /// The underlying draw target rejected a primitive.
    #[error("draw target error while rendering complication")]
    Target,
}

impl RenderableError {
    /// Stable name for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::Target => "draw-target",
        }
    }
}

/// Opaque drawable handle for a single complication slot.
///
/// Implementations own their data, colors and power-mode flags. The watch
/// face calls the setters when host callbacks arrive and calls [`draw`] once
/// per frame.
///
/// [`draw`]: ComplicationRenderable::draw
pub trait ComplicationRenderable {
    /// Replace the data shown by this renderable.
    fn set_data(&mut self, data: ComplicationData);

    /// Current data.
    fn data(&self) -> &ComplicationData;

    /// Move/resize the renderable.
    fn set_bounds(&mut self, bounds: Rectangle);

    /// Current bounds.
    fn bounds(&self) -> Rectangle;

    /// Enter or leave ambient mode.
    fn set_in_ambient_mode(&mut self, ambient: bool);

    /// Display supports only a reduced bit depth in ambient mode.
    fn set_low_bit_ambient(&mut self, low_bit_ambient: bool);

    /// Display needs burn-in protection in ambient mode.
    fn set_burn_in_protection(&mut self, burn_in_protection: bool);

    /// Apply border/ranged-value colors.
    fn set_colors(&mut self, colors: ComplicationColors);

    /// Hit-test a tap. Returns `true` if the renderable handled it.
    fn on_tap(&mut self, point: Point) -> bool;

    /// Draw into `target` within the current bounds.
    fn draw<D, C>(&self, target: &mut D, now_ms: u64) -> Result<(), RenderableError>
    where
        D: DrawTarget<Color = C>,
        C: PixelColor + From<Rgb888>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_has_no_content() {
        assert!(!ComplicationData::no_data().kind().has_content());
        assert!(ComplicationData::short_text("12").kind().has_content());
    }

    #[test]
    fn test_short_text_truncates() {
        let data = ComplicationData::short_text("abcdefghijklmnopqrstuvwxyz0123");
        assert_eq!(data.text().len(), 24);
    }

    #[test]
    fn test_large_image_detection() {
        assert!(ComplicationData::new(ComplicationType::LargeImage).is_large_image());
        assert!(!ComplicationData::new(ComplicationType::SmallImage).is_large_image());
    }

    #[test]
    fn test_colors_in_effect() {
        let fg = ComplicationColors::Foreground {
            active: Color::RED,
            ambient: Color::WHITE,
        };
        assert_eq!(fg.in_effect(false), Color::RED);
        assert_eq!(fg.in_effect(true), Color::WHITE);
        let bg = ComplicationColors::Background { fill: Color::BLACK };
        assert_eq!(bg.in_effect(true), Color::BLACK);
    }

    #[test]
    fn test_ranged_fraction_clamps() {
        let v = RangedValue {
            value: 150.0,
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(v.fraction(), 1.0);
        let empty = RangedValue {
            value: 1.0,
            min: 5.0,
            max: 5.0,
        };
        assert_eq!(empty.fraction(), 0.0);
    }
}
