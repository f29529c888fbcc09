//! Three-color style shared by every visual element.

use platform::Color;

/// Active, ambient and shadow colors for one visual element.
///
/// Exactly one of `active`/`ambient` is in effect at any instant, selected by
/// the owner's ambient flag. The shadow color is only used in active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorStyle {
    active: Color,
    ambient: Color,
    shadow: Color,
}

impl ColorStyle {
    /// Create a style.
    pub const fn new(active: Color, ambient: Color, shadow: Color) -> Self {
        Self {
            active,
            ambient,
            shadow,
        }
    }

    /// Color used in active (interactive) mode.
    pub const fn active(&self) -> Color {
        self.active
    }

    /// Color used in ambient mode.
    pub const fn ambient(&self) -> Color {
        self.ambient
    }

    /// Shadow color drawn beneath edges in active mode.
    pub const fn shadow(&self) -> Color {
        self.shadow
    }

    /// The color in effect for the given ambient flag.
    pub const fn in_effect(&self, ambient: bool) -> Color {
        if ambient {
            self.ambient
        } else {
            self.active
        }
    }

    pub(crate) fn set_active(&mut self, color: Color) {
        self.active = color;
    }

    pub(crate) fn set_ambient(&mut self, color: Color) {
        self.ambient = color;
    }

    pub(crate) fn set_shadow(&mut self, color: Color) {
        self.shadow = color;
    }
}

/// An element that owns a [`ColorStyle`] and derives state from it.
///
/// Setters go through [`Styled::restyle`], which applies the change and then
/// recomputes everything derived from the style before returning.
pub trait Styled {
    /// The current style.
    fn color_style(&self) -> &ColorStyle;

    /// Mutate the style and recompute dependents.
    fn restyle<F: FnOnce(&mut ColorStyle)>(&mut self, change: F);

    /// Set the active color.
    fn set_active_color(&mut self, color: Color) {
        self.restyle(|style| style.set_active(color));
    }

    /// Set the ambient color.
    fn set_ambient_color(&mut self, color: Color) {
        self.restyle(|style| style.set_ambient(color));
    }

    /// Set the shadow color.
    fn set_shadow_color(&mut self, color: Color) {
        self.restyle(|style| style.set_shadow(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_effect_follows_ambient_flag() {
        let style = ColorStyle::new(Color::RED, Color::WHITE, Color::BLACK);
        assert_eq!(style.in_effect(false), Color::RED);
        assert_eq!(style.in_effect(true), Color::WHITE);
    }

    #[test]
    fn test_crate_setters_touch_one_channel() {
        let mut style = ColorStyle::new(Color::RED, Color::WHITE, Color::BLACK);
        style.set_active(Color::GRAY);
        assert_eq!(style.active(), Color::GRAY);
        assert_eq!(style.ambient(), Color::WHITE);
        assert_eq!(style.shadow(), Color::BLACK);
    }
}
