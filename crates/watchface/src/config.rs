//! Construction-time configuration.
//!
//! Everything the watch face would otherwise pull from global constants:
//! complication declaration order, default colors per element, mute alpha
//! levels and the preference keys. `Default` yields the stock analog face.

use platform::Color;

use crate::color_style::ColorStyle;
use crate::complication::{ComplicationId, COMPLICATION_COUNT};
use crate::face_warn;
use crate::preferences::PreferenceKeys;

/// Fully opaque alpha.
pub const ALPHA_FULLY_OPAQUE: u8 = 255;

/// Mute alpha for the hour and minute hands.
pub const ALPHA_DIM_DEFAULT: u8 = 100;

/// Mute alpha for the second hand, ticks and notification indicator.
pub const ALPHA_EXTRA_DIM: u8 = 80;

/// Shadow blur radius in pixels for active-mode paints.
pub const SHADOW_RADIUS: u8 = 6;

/// Construction-time watch face configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchFaceConfig {
    /// Complication declaration order. Later entries are on top for taps.
    pub complication_order: [ComplicationId; COMPLICATION_COUNT],
    /// Hour hand colors.
    pub hour_hand: ColorStyle,
    /// Minute hand colors.
    pub minute_hand: ColorStyle,
    /// Second hand colors. The active color tracks the highlight.
    pub second_hand: ColorStyle,
    /// Hour tick colors.
    pub ticks: ColorStyle,
    /// Unread notification indicator colors.
    pub notification_circle: ColorStyle,
    /// Background colors. The active color tracks the background preference.
    pub background: ColorStyle,
    /// Border and ranged-value colors for non-background complications.
    pub complications: ColorStyle,
    /// Fill the background complication shows while its image loads.
    pub background_complication_fill: Color,
    /// Highlight color when no preference is stored.
    pub default_highlight: Color,
    /// Background color when no preference is stored.
    pub default_background: Color,
    /// Unread indicator preference when none is stored.
    pub default_unread_notifications: bool,
    /// Mute alpha for hour and minute hands.
    pub hand_mute_alpha: u8,
    /// Mute alpha for second hand, ticks and notification indicator.
    pub extra_dim_mute_alpha: u8,
    /// Shadow radius for active paints.
    pub shadow_radius: u8,
    /// Preference store keys.
    pub preference_keys: PreferenceKeys,
}

impl Default for WatchFaceConfig {
    fn default() -> Self {
        let hands = ColorStyle::new(Color::WHITE, Color::WHITE, Color::BLACK);
        Self {
            complication_order: ComplicationId::ALL,
            hour_hand: hands,
            minute_hand: hands,
            second_hand: ColorStyle::new(Color::RED, Color::WHITE, Color::BLACK),
            ticks: hands,
            notification_circle: hands,
            background: ColorStyle::new(Color::BLACK, Color::BLACK, Color::BLACK),
            complications: ColorStyle::new(Color::RED, Color::WHITE, Color::BLACK),
            background_complication_fill: Color::BLACK,
            default_highlight: Color::RED,
            default_background: Color::BLACK,
            default_unread_notifications: true,
            hand_mute_alpha: ALPHA_DIM_DEFAULT,
            extra_dim_mute_alpha: ALPHA_EXTRA_DIM,
            shadow_radius: SHADOW_RADIUS,
            preference_keys: PreferenceKeys::default(),
        }
    }
}

impl WatchFaceConfig {
    /// Use a custom complication declaration order.
    #[must_use]
    pub fn with_complication_order(mut self, order: [ComplicationId; COMPLICATION_COUNT]) -> Self {
        self.complication_order = order;
        self
    }

    /// The declaration order if it names every slot exactly once, otherwise
    /// the default order.
    pub fn validated_order(&self) -> [ComplicationId; COMPLICATION_COUNT] {
        let order = self.complication_order;
        let complete = ComplicationId::ALL
            .iter()
            .all(|id| order.iter().filter(|o| *o == id).count() == 1);
        if complete {
            order
        } else {
            face_warn!("complication order has duplicates, using default order");
            ComplicationId::ALL
        }
    }
}
