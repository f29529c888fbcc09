//! Packed ARGB color values.
//!
//! Colors are opaque 32-bit `0xAARRGGBB` values, the same packing the
//! preference store persists. Conversion to `embedded-graphics` colors drops
//! the alpha channel; blending is explicit via [`Color::blend_over`].

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// A packed `0xAARRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Color(u32);

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Opaque red.
    pub const RED: Self = Self(0xFFFF_0000);
    /// Opaque mid gray.
    pub const GRAY: Self = Self(0xFF88_8888);

    /// Wrap a packed `0xAARRGGBB` value.
    pub const fn from_argb_u32(argb: u32) -> Self {
        Self(argb)
    }

    /// Build from individual channels.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Build an opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(0xFF, r, g, b)
    }

    /// Interpret a signed integer the way preference stores persist colors.
    #[allow(clippy::cast_sign_loss)] // bit-for-bit reinterpretation is the intent
    pub const fn from_i32(value: i32) -> Self {
        Self(value as u32)
    }

    /// Signed integer form, for writing back to a preference store.
    #[allow(clippy::cast_possible_wrap)]
    pub const fn to_i32(self) -> i32 {
        self.0 as i32
    }

    /// Raw packed value.
    pub const fn argb(self) -> u32 {
        self.0
    }

    /// Alpha channel.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Composite this color at `alpha` over an opaque `background`.
    ///
    /// The result is always opaque. `alpha == 255` returns `self` made opaque,
    /// `alpha == 0` returns the background.
    pub fn blend_over(self, background: Self, alpha: u8) -> Self {
        let mix = |fg: u8, bg: u8| -> u8 {
            let a = u16::from(alpha);
            let inv = 255u16.saturating_sub(a);
            let v = u16::from(fg)
                .saturating_mul(a)
                .saturating_add(u16::from(bg).saturating_mul(inv))
                / 255;
            // v <= 255 by construction (weighted mean of two u8 values)
            u8::try_from(v).unwrap_or(u8::MAX)
        };
        Self::rgb(
            mix(self.red(), background.red()),
            mix(self.green(), background.green()),
            mix(self.blue(), background.blue()),
        )
    }

    /// Opaque `embedded-graphics` color (alpha dropped).
    pub fn to_rgb888(self) -> Rgb888 {
        Rgb888::new(self.red(), self.green(), self.blue())
    }
}

impl From<Color> for Rgb888 {
    fn from(color: Color) -> Self {
        color.to_rgb888()
    }
}

impl From<Rgb888> for Color {
    fn from(color: Rgb888) -> Self {
        Self::rgb(color.r(), color.g(), color.b())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_round_trip_through_packing() {
        let c = Color::from_argb(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c.argb(), 0x1234_5678);
        assert_eq!(c.alpha(), 0x12);
        assert_eq!(c.red(), 0x34);
        assert_eq!(c.green(), 0x56);
        assert_eq!(c.blue(), 0x78);
    }

    #[test]
    fn test_preference_int_reinterpretation() {
        // Opaque colors persist as negative ints.
        assert_eq!(Color::from_i32(-16_777_216), Color::BLACK);
        assert_eq!(Color::RED.to_i32(), -65_536);
    }

    #[test]
    fn test_blend_full_alpha_is_foreground() {
        assert_eq!(Color::RED.blend_over(Color::BLACK, 255), Color::RED);
    }

    #[test]
    fn test_blend_zero_alpha_is_background() {
        assert_eq!(Color::RED.blend_over(Color::BLACK, 0), Color::BLACK);
    }

    #[test]
    fn test_blend_partial_alpha_dims() {
        let dimmed = Color::WHITE.blend_over(Color::BLACK, 80);
        assert_eq!(dimmed, Color::rgb(80, 80, 80));
    }

    #[test]
    fn test_to_rgb888_drops_alpha() {
        let c = Color::from_argb(0x40, 0xFF, 0, 0);
        assert_eq!(c.to_rgb888(), Rgb888::RED);
    }

    proptest::proptest! {
        #[test]
        fn test_int_form_is_lossless(argb in proptest::prelude::any::<u32>()) {
            let color = Color::from_argb_u32(argb);
            proptest::prop_assert_eq!(Color::from_i32(color.to_i32()), color);
        }

        #[test]
        fn test_blend_stays_between_channels(
            fg in proptest::prelude::any::<u32>(),
            bg in proptest::prelude::any::<u32>(),
            alpha in proptest::prelude::any::<u8>(),
        ) {
            let fg = Color::from_argb_u32(fg);
            let bg = Color::from_argb_u32(bg);
            let out = fg.blend_over(bg, alpha);
            proptest::prop_assert_eq!(out.alpha(), 0xFF);
            for (o, f, b) in [
                (out.red(), fg.red(), bg.red()),
                (out.green(), fg.green(), bg.green()),
                (out.blue(), fg.blue(), bg.blue()),
            ] {
                proptest::prop_assert!(o >= f.min(b) && o <= f.max(b));
            }
        }
    }
}
