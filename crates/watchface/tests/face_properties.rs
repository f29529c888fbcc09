//! Property-based tests for the watch face model.
//! Verifies invariants hold for ALL flag combinations and surface sizes.

#![allow(clippy::unwrap_used)]
#![allow(clippy::arithmetic_side_effects)]

use platform::mocks::MockComplication;
use platform::{Color, ComplicationData, ComplicationType};
use watchface::background::resolve_background;
use watchface::{
    millis_until_next_second, ColorStyle, FaceGeometry, Styled, WatchFaceConfig, WatchFaceState,
    WatchTime,
};

fn face() -> WatchFaceState<MockComplication> {
    WatchFaceState::new(WatchFaceConfig::default(), |_| MockComplication::new())
}

fn observable(state: &WatchFaceState<MockComplication>) -> String {
    let renderables: Vec<_> = state
        .complications()
        .iter()
        .map(|slot| {
            let r = slot.renderable();
            (r.ambient(), r.low_bit_ambient(), r.burn_in_protection(), r.colors())
        })
        .collect();
    format!(
        "{:?} {:?} {:?} {:?} {:?} {:?} {:?}",
        state.hour_hand(),
        state.minute_hand(),
        state.second_hand(),
        state.ticks(),
        state.notification_circle(),
        state.background(),
        renderables
    )
}

proptest::proptest! {
    /// Ambient always wins, whatever the other flags say.
    #[test]
    fn ambient_background_is_ambient_color(low_bit: bool, burn_in: bool, active: bool, a: u32, b: u32) {
        let style = ColorStyle::new(Color::from_argb_u32(a), Color::from_argb_u32(b), Color::BLACK);
        assert_eq!(resolve_background(&style, true, low_bit, burn_in, active), style.ambient());
    }

    /// Low bit plus burn-in forces the ambient color outside ambient mode.
    #[test]
    fn low_bit_burn_in_background_is_ambient_color(a: u32, b: u32) {
        let style = ColorStyle::new(Color::from_argb_u32(a), Color::from_argb_u32(b), Color::BLACK);
        assert_eq!(resolve_background(&style, false, true, true, false), style.ambient());
    }

    /// The stateful background agrees with the pure resolver after any flag sequence.
    #[test]
    fn state_background_matches_resolver(ambient: bool, low_bit: bool, burn_in: bool, large_image: bool) {
        let mut state = face();
        state.set_ambient_mode(ambient);
        state.set_low_bit_and_burn_in(low_bit, burn_in);
        let kind = if large_image { ComplicationType::LargeImage } else { ComplicationType::NoData };
        state.update_complication(0, ComplicationData::new(kind));
        let bg = state.background();
        let expected = resolve_background(bg.color_style(), ambient, low_bit, burn_in, large_image);
        assert_eq!(bg.effective_color(), expected);
    }

    /// Setting the same ambient flag twice is indistinguishable from once.
    #[test]
    fn set_ambient_mode_is_idempotent(ambient: bool, muted: bool) {
        let mut once = face();
        once.set_mute_mode(muted);
        once.set_ambient_mode(ambient);
        let mut twice = face();
        twice.set_mute_mode(muted);
        twice.set_ambient_mode(ambient);
        twice.set_ambient_mode(ambient);
        assert_eq!(observable(&once), observable(&twice));
    }

    /// Layout is a pure function of the surface size.
    #[test]
    fn geometry_is_deterministic(w in -100i32..5_000, h in -100i32..5_000) {
        let a = FaceGeometry::calculate(w, h);
        let b = FaceGeometry::calculate(w, h);
        assert_eq!(a, b);
        assert!(a.width >= 56 && a.height >= 56);
        assert!(a.hour_hand.width >= 1 && a.minute_hand.width >= 1 && a.second_hand.width >= 1);
        assert!(a.hour_hand.height <= a.minute_hand.height);
        assert!(a.minute_hand.height <= a.second_hand.height);
    }

    /// Hand lengths follow the half-width ratios.
    #[test]
    fn hand_lengths_follow_ratios(w in 56i32..5_000) {
        let g = FaceGeometry::calculate(w, w);
        let half = f64::from(w) / 2.0;
        assert_eq!(i64::from(g.hour_hand.height), (half * 0.5).floor() as i64);
        assert_eq!(i64::from(g.minute_hand.height), (half * 0.75).floor() as i64);
        assert_eq!(i64::from(g.hour_hand.width), i64::from((w / 56).max(1)));
    }

    /// The next-boundary wait is always within one second and lands on a boundary.
    #[test]
    fn next_second_boundary_in_range(now in 0u64..=u64::MAX / 2) {
        let wait = millis_until_next_second(now);
        assert!((1..=1_000).contains(&wait));
        assert_eq!((now + wait) % 1_000, 0);
    }

    /// Hand angles stay on the dial.
    #[test]
    fn hand_angles_stay_on_dial(ms: u64, offset in -840i32..=840) {
        let angles = WatchTime::from_epoch_ms(ms, offset).angles();
        assert!((0.0..360.0).contains(&angles.hours));
        assert!((0.0..360.0).contains(&angles.minutes));
        assert!((0.0..360.0).contains(&angles.seconds));
    }
}
