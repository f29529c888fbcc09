//! User style preferences read from the external store.
//!
//! Reads happen only when the face becomes visible. Any failure (store
//! unavailable, wrong value type, missing key) resolves to the configured
//! default for that key; nothing is surfaced to the caller.

use platform::{Color, PreferenceError, PreferenceStore};

use crate::config::WatchFaceConfig;
use crate::face_warn;

/// The three fixed preference keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PreferenceKeys {
    /// Background color (`i32` ARGB).
    pub background_color: &'static str,
    /// Highlight color for the second hand and complications (`i32` ARGB).
    pub highlight_color: &'static str,
    /// Whether to show the unread notification indicator (`bool`).
    pub unread_notifications: &'static str,
}

impl Default for PreferenceKeys {
    fn default() -> Self {
        Self {
            background_color: "saved_background_color",
            highlight_color: "saved_markers_color",
            unread_notifications: "saved_unread_notifications",
        }
    }
}

/// Resolved style preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StylePreferences {
    /// Background active color.
    pub background: Color,
    /// Highlight color.
    pub highlight: Color,
    /// Unread notification indicator enabled.
    pub unread_notifications: bool,
}

impl StylePreferences {
    /// Configured defaults, used when nothing is stored.
    pub fn defaults(config: &WatchFaceConfig) -> Self {
        Self {
            background: config.default_background,
            highlight: config.default_highlight,
            unread_notifications: config.default_unread_notifications,
        }
    }

    /// Read all three preferences, falling back per key.
    pub fn load<P: PreferenceStore>(store: &P, config: &WatchFaceConfig) -> Self {
        let keys = &config.preference_keys;
        let defaults = Self::defaults(config);
        Self {
            background: or_default(
                store.get_int(keys.background_color),
                keys.background_color,
            )
            .map_or(defaults.background, Color::from_i32),
            highlight: or_default(store.get_int(keys.highlight_color), keys.highlight_color)
                .map_or(defaults.highlight, Color::from_i32),
            unread_notifications: or_default(
                store.get_bool(keys.unread_notifications),
                keys.unread_notifications,
            )
            .unwrap_or(defaults.unread_notifications),
        }
    }
}

fn or_default<T>(read: Result<Option<T>, PreferenceError>, key: &'static str) -> Option<T> {
    match read {
        Ok(value) => value,
        Err(error) => {
            face_warn!("preference {} unreadable ({}), using default", key, error.as_str());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::mocks::MemoryPreferences;

    #[test]
    fn test_empty_store_yields_defaults() {
        let config = WatchFaceConfig::default();
        let prefs = StylePreferences::load(&MemoryPreferences::new(), &config);
        assert_eq!(prefs, StylePreferences::defaults(&config));
        assert_eq!(prefs.background, Color::BLACK);
        assert_eq!(prefs.highlight, Color::RED);
        assert!(prefs.unread_notifications);
    }

    #[test]
    fn test_stored_values_win() {
        let mut store = MemoryPreferences::new();
        store.put_int("saved_background_color", Color::GRAY.to_i32());
        store.put_int("saved_markers_color", Color::WHITE.to_i32());
        store.put_bool("saved_unread_notifications", false);
        let prefs = StylePreferences::load(&store, &WatchFaceConfig::default());
        assert_eq!(prefs.background, Color::GRAY);
        assert_eq!(prefs.highlight, Color::WHITE);
        assert!(!prefs.unread_notifications);
    }

    #[test]
    fn test_malformed_value_falls_back_per_key() {
        let mut store = MemoryPreferences::new();
        store.put_bool("saved_markers_color", true);
        store.put_int("saved_background_color", Color::GRAY.to_i32());
        let prefs = StylePreferences::load(&store, &WatchFaceConfig::default());
        assert_eq!(prefs.highlight, Color::RED);
        assert_eq!(prefs.background, Color::GRAY);
    }

    #[test]
    fn test_unavailable_store_yields_defaults() {
        let mut store = MemoryPreferences::new();
        store.put_bool("saved_unread_notifications", false);
        store.set_unavailable(true);
        let config = WatchFaceConfig::default();
        assert_eq!(
            StylePreferences::load(&store, &config),
            StylePreferences::defaults(&config)
        );
    }
}
