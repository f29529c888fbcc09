//! Aggregate watch face state and its mutators.
//!
//! [`WatchFaceState`] owns every component, the background and the
//! complication slot table. Host callbacks map onto its mutators one to one;
//! each mutator pushes the change into every dependent before returning.

use platform::{
    ComplicationColors, ComplicationData, ComplicationRenderable, PreferenceStore, TapEvent,
    TapType,
};

use crate::background::Background;
use crate::color_style::{ColorStyle, Styled};
use crate::complication::{ComplicationId, ComplicationSlots};
use crate::component::Component;
use crate::config::WatchFaceConfig;
use crate::geometry::FaceGeometry;
use crate::{face_debug, face_info};
use crate::preferences::StylePreferences;
use platform::Color;

/// Visual state of the analog face.
#[derive(Debug, Clone)]
pub struct WatchFaceState<R> {
    config: WatchFaceConfig,
    geometry: FaceGeometry,
    hour_hand: Component,
    minute_hand: Component,
    second_hand: Component,
    ticks: Component,
    notification_circle: Component,
    background: Background,
    complication_style: ColorStyle,
    complications: ComplicationSlots<R>,
    unread_notification_pref: bool,
    unread_notification_count: u32,
    ambient: bool,
    muted: bool,
}

impl<R: ComplicationRenderable> WatchFaceState<R> {
    /// Build the face, creating one renderable per slot with `factory`.
    ///
    /// Dimensions start at the default surface size until the host reports
    /// the real one.
    pub fn new<F>(config: WatchFaceConfig, factory: F) -> Self
    where
        F: FnMut(ComplicationId) -> R,
    {
        let geometry = FaceGeometry::default();
        let radius = config.shadow_radius;
        let hand_alpha = config.hand_mute_alpha;
        let dim_alpha = config.extra_dim_mute_alpha;
        let complications = ComplicationSlots::new(config.validated_order(), factory);
        let mut state = Self {
            hour_hand: Component::new(config.hour_hand, geometry.hour_hand, hand_alpha, radius),
            minute_hand: Component::new(
                config.minute_hand,
                geometry.minute_hand,
                hand_alpha,
                radius,
            ),
            second_hand: Component::new(
                config.second_hand,
                geometry.second_hand,
                dim_alpha,
                radius,
            ),
            ticks: Component::new(config.ticks, geometry.ticks, dim_alpha, radius),
            notification_circle: Component::new(
                config.notification_circle,
                geometry.ticks,
                dim_alpha,
                radius,
            ),
            background: Background::new(config.background),
            complication_style: config.complications,
            complications,
            unread_notification_pref: config.default_unread_notifications,
            unread_notification_count: 0,
            ambient: false,
            muted: false,
            geometry,
            config,
        };
        state.apply_geometry();
        state.push_complication_colors();
        state
    }

    /// Construction-time configuration.
    pub fn config(&self) -> &WatchFaceConfig {
        &self.config
    }

    /// Current layout.
    pub fn geometry(&self) -> &FaceGeometry {
        &self.geometry
    }

    /// Hour hand.
    pub fn hour_hand(&self) -> &Component {
        &self.hour_hand
    }

    /// Minute hand.
    pub fn minute_hand(&self) -> &Component {
        &self.minute_hand
    }

    /// Second hand.
    pub fn second_hand(&self) -> &Component {
        &self.second_hand
    }

    /// Hour ticks.
    pub fn ticks(&self) -> &Component {
        &self.ticks
    }

    /// Unread notification indicator.
    pub fn notification_circle(&self) -> &Component {
        &self.notification_circle
    }

    /// Background.
    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Colors pushed into foreground complications.
    pub fn complication_style(&self) -> &ColorStyle {
        &self.complication_style
    }

    /// Slot table.
    pub fn complications(&self) -> &ComplicationSlots<R> {
        &self.complications
    }

    /// Radius of the empty center; hands start this far out.
    pub fn center_gap_radius(&self) -> u32 {
        self.geometry.center_gap
    }

    /// Whether the unread indicator is enabled.
    pub fn unread_notification_pref(&self) -> bool {
        self.unread_notification_pref
    }

    /// Last reported unread count.
    pub fn unread_notification_count(&self) -> u32 {
        self.unread_notification_count
    }

    /// Whether the unread indicator should be drawn this frame.
    pub fn shows_unread_indicator(&self) -> bool {
        self.unread_notification_pref && self.unread_notification_count > 0
    }

    /// Ambient flag.
    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    /// Mute flag.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Set the second hand's and complications' active color.
    ///
    /// Ambient colors are untouched.
    pub fn set_highlight_color(&mut self, color: Color) {
        self.second_hand.set_active_color(color);
        self.complication_style = ColorStyle::new(
            color,
            self.complication_style.ambient(),
            self.complication_style.shadow(),
        );
        self.push_complication_colors();
    }

    /// Set the background's active color.
    pub fn set_background_color(&mut self, color: Color) {
        self.background.set_active_color(color);
    }

    /// Enter or leave ambient mode everywhere.
    pub fn set_ambient_mode(&mut self, ambient: bool) {
        self.ambient = ambient;
        for component in self.components_mut() {
            component.set_ambient(ambient);
        }
        self.background.set_ambient(ambient);
        for slot in self.complications.iter_mut() {
            slot.renderable_mut().set_in_ambient_mode(ambient);
        }
    }

    /// Mute or unmute the hands, ticks and indicator.
    ///
    /// Background and complications ignore mute.
    pub fn set_mute_mode(&mut self, muted: bool) {
        self.muted = muted;
        for component in self.components_mut() {
            component.set_muted(muted);
        }
    }

    /// Apply display capability flags.
    pub fn set_low_bit_and_burn_in(&mut self, low_bit_ambient: bool, burn_in_protection: bool) {
        self.background
            .set_low_bit_and_burn_in(low_bit_ambient, burn_in_protection);
        for slot in self.complications.iter_mut() {
            let renderable = slot.renderable_mut();
            renderable.set_low_bit_ambient(low_bit_ambient);
            renderable.set_burn_in_protection(burn_in_protection);
        }
    }

    /// Forward new data to the slot with host id `raw_id`.
    ///
    /// Returns `false` for an unknown id, which is otherwise ignored.
    pub fn update_complication(&mut self, raw_id: u32, data: ComplicationData) -> bool {
        let Some(id) = ComplicationId::from_raw(raw_id) else {
            face_debug!("ignoring data for unknown complication {}", raw_id);
            return false;
        };
        let kind = data.kind();
        if !id.supports(kind) {
            face_debug!("{} slot got unsupported {}", id.as_str(), kind.as_str());
        }
        if id == ComplicationId::Background {
            self.background
                .set_complication_active(data.is_large_image());
        }
        if let Some(slot) = self.complications.get_mut(id) {
            slot.renderable_mut().set_data(data);
        }
        true
    }

    /// Recompute every size and complication bound for a new surface.
    pub fn calculate_dimensions(&mut self, width: i32, height: i32) {
        self.geometry = FaceGeometry::calculate(width, height);
        self.apply_geometry();
    }

    /// Route a tap to the topmost complication that claims it.
    ///
    /// Only [`TapType::Tap`] events are dispatched.
    pub fn check_tap(&mut self, event: TapEvent) -> Option<ComplicationId> {
        if event.kind != TapType::Tap {
            return None;
        }
        self.complications.hit_test(event.point())
    }

    /// Read style preferences and apply them.
    pub fn load_color_preferences<P: PreferenceStore>(&mut self, store: &P) {
        let prefs = StylePreferences::load(store, &self.config);
        self.apply_preferences(prefs);
    }

    /// Apply already-resolved preferences.
    pub fn apply_preferences(&mut self, prefs: StylePreferences) {
        self.set_background_color(prefs.background);
        self.set_highlight_color(prefs.highlight);
        self.unread_notification_pref = prefs.unread_notifications;
        face_info!(
            "preferences applied: background {} highlight {} unread {}",
            prefs.background.argb(),
            prefs.highlight.argb(),
            prefs.unread_notifications
        );
    }

    /// Record a new unread count.
    ///
    /// Returns `true` when the indicator just appeared: the preference is on
    /// and the count went from zero to positive.
    pub fn set_unread_notification_count(&mut self, count: u32) -> bool {
        let appeared =
            self.unread_notification_pref && self.unread_notification_count == 0 && count > 0;
        self.unread_notification_count = count;
        appeared
    }

    fn components_mut(&mut self) -> [&mut Component; 5] {
        [
            &mut self.hour_hand,
            &mut self.minute_hand,
            &mut self.second_hand,
            &mut self.ticks,
            &mut self.notification_circle,
        ]
    }

    fn apply_geometry(&mut self) {
        let g = self.geometry;
        self.hour_hand.set_dimension(g.hour_hand);
        self.minute_hand.set_dimension(g.minute_hand);
        self.second_hand.set_dimension(g.second_hand);
        self.ticks.set_dimension(g.ticks);
        self.notification_circle.set_dimension(g.ticks);
        for slot in self.complications.iter_mut() {
            let bounds = g.complication_bounds(slot.id());
            slot.set_bounds(bounds);
        }
    }

    fn push_complication_colors(&mut self) {
        let foreground = ComplicationColors::Foreground {
            active: self.complication_style.active(),
            ambient: self.complication_style.ambient(),
        };
        let background = ComplicationColors::Background {
            fill: self.config.background_complication_fill,
        };
        for slot in self.complications.iter_mut() {
            let colors = if slot.id() == ComplicationId::Background {
                background
            } else {
                foreground
            };
            slot.renderable_mut().set_colors(colors);
        }
    }
}
