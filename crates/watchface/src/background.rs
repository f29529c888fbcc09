//! Watch face background color resolution.

use platform::Color;

use crate::color_style::{ColorStyle, Styled};

/// Effective background color for the given flags.
///
/// The ambient color wins whenever the device is ambient, the display needs
/// burn-in protection at low bit depth, or a background image is showing.
pub fn resolve_background(
    style: &ColorStyle,
    ambient: bool,
    low_bit_ambient: bool,
    burn_in_protection: bool,
    complication_active: bool,
) -> Color {
    if ambient || (low_bit_ambient && burn_in_protection) || complication_active {
        style.ambient()
    } else {
        style.active()
    }
}

/// Background fill state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Background {
    style: ColorStyle,
    ambient: bool,
    low_bit_ambient: bool,
    burn_in_protection: bool,
    complication_active: bool,
    effective: Color,
}

impl Background {
    /// Create with every flag cleared.
    pub fn new(style: ColorStyle) -> Self {
        Self {
            effective: style.active(),
            style,
            ambient: false,
            low_bit_ambient: false,
            burn_in_protection: false,
            complication_active: false,
        }
    }

    /// Color to fill the surface with.
    pub fn effective_color(&self) -> Color {
        self.effective
    }

    /// Ambient flag.
    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    /// Low-bit ambient flag.
    pub fn low_bit_ambient(&self) -> bool {
        self.low_bit_ambient
    }

    /// Burn-in protection flag.
    pub fn burn_in_protection(&self) -> bool {
        self.burn_in_protection
    }

    /// Whether a background image complication is showing.
    pub fn complication_active(&self) -> bool {
        self.complication_active
    }

    /// Set the ambient flag.
    pub fn set_ambient(&mut self, ambient: bool) {
        self.ambient = ambient;
        self.refresh();
    }

    /// Set the display capability flags.
    pub fn set_low_bit_and_burn_in(&mut self, low_bit_ambient: bool, burn_in_protection: bool) {
        self.low_bit_ambient = low_bit_ambient;
        self.burn_in_protection = burn_in_protection;
        self.refresh();
    }

    /// Mark whether a background image complication is showing.
    pub fn set_complication_active(&mut self, active: bool) {
        self.complication_active = active;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.effective = resolve_background(
            &self.style,
            self.ambient,
            self.low_bit_ambient,
            self.burn_in_protection,
            self.complication_active,
        );
    }
}

impl Styled for Background {
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

    fn background() -> Background {
        Background::new(ColorStyle::new(Color::GRAY, Color::BLACK, Color::BLACK))
    }

    #[test]
    fn test_active_color_by_default() {
        assert_eq!(background().effective_color(), Color::GRAY);
    }

    #[test]
    fn test_low_bit_needs_burn_in_too() {
        let mut bg = background();
        bg.set_low_bit_and_burn_in(true, false);
        assert_eq!(bg.effective_color(), Color::GRAY);
        bg.set_low_bit_and_burn_in(true, true);
        assert_eq!(bg.effective_color(), Color::BLACK);
    }

    #[test]
    fn test_complication_forces_ambient_color() {
        let mut bg = background();
        bg.set_complication_active(true);
        assert_eq!(bg.effective_color(), Color::BLACK);
        bg.set_complication_active(false);
        assert_eq!(bg.effective_color(), Color::GRAY);
    }

    #[test]
    fn test_active_color_change_applies_immediately() {
        let mut bg = background();
        bg.set_active_color(Color::RED);
        assert_eq!(bg.effective_color(), Color::RED);
        bg.set_ambient(true);
        assert_eq!(bg.effective_color(), Color::BLACK);
    }
}
