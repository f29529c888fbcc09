//! Analog watch face in a desktop window.
//!
//! Run with:
//!   RUST_LOG=debug cargo run -p firmware --example watchface_simulator --features simulator
//!
//! Keys:
//!   a  toggle ambient        m  toggle mute (interruption filter)
//!   v  toggle visibility     n  add an unread notification
//!   c  clear notifications   b  toggle background image
//!   click                    tap a complication

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use firmware::WatchFaceService;
use platform::mocks::{MemoryPreferences, MockComplication};
use platform::{
    ComplicationData, ComplicationType, HostError, InterruptionFilter, RangedValue, TapType,
    WallClock, WatchFaceHost,
};
use tracing_subscriber::EnvFilter;
use watchface::{ComplicationId, WatchFaceConfig, WatchFaceState};
use watchface_render::Renderer;

const SIZE: u32 = 320;
const SIZE_PX: i32 = 320;
/// Event-poll cadence while the second hand is idle.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Host that remembers whether a frame was requested.
#[derive(Default)]
struct WindowHost {
    dirty: bool,
}

impl WatchFaceHost for WindowHost {
    fn request_redraw(&mut self) -> Result<(), HostError> {
        self.dirty = true;
        Ok(())
    }
}

/// Wall clock from the operating system.
struct SystemClock;

impl WallClock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut prefs = MemoryPreferences::new();
    prefs.put_int("saved_markers_color", platform::Color::rgb(0, 200, 255).to_i32());

    let state = WatchFaceState::new(WatchFaceConfig::default(), |_| MockComplication::new());
    let mut face = WatchFaceService::new(
        Renderer::new(state),
        WindowHost::default(),
        prefs,
        SystemClock,
    );
    face.on_surface_changed(SIZE_PX, SIZE_PX);
    face.on_properties_changed(false, false);
    face.on_complication_data_update(
        ComplicationId::Left.raw(),
        ComplicationData::short_text("12"),
    );
    face.on_complication_data_update(
        ComplicationId::Right.raw(),
        ComplicationData::ranged(RangedValue {
            value: 72.0,
            min: 0.0,
            max: 100.0,
        }),
    );
    face.on_visibility_changed(true);

    let mut display = SimulatorDisplay::<Rgb888>::new(Size::new(SIZE, SIZE));
    let settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Analog watch face", &settings);

    let mut visible = true;
    let mut ambient = false;
    let mut muted = false;
    let mut unread = 0_u32;
    let mut background_image = false;

    loop {
        face.on_animation_wake();
        if face.host().dirty {
            face.host_mut().dirty = false;
            let report = face.draw_now(&mut display)?;
            tracing::debug!(
                drawn = report.complications_drawn,
                skipped = report.complications_skipped,
                "frame"
            );
        }
        window.update(&display);

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => {
                    face.on_destroy();
                    return Ok(());
                }
                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::A {
                        ambient = !ambient;
                        face.on_ambient_changed(ambient);
                    } else if keycode == Keycode::V {
                        visible = !visible;
                        face.on_visibility_changed(visible);
                    } else if keycode == Keycode::M {
                        muted = !muted;
                        let filter = if muted {
                            InterruptionFilter::None
                        } else {
                            InterruptionFilter::All
                        };
                        face.on_interruption_filter_changed(filter);
                    } else if keycode == Keycode::N {
                        unread = unread.saturating_add(1);
                        face.on_unread_count_changed(unread);
                        face.on_time_tick();
                    } else if keycode == Keycode::C {
                        unread = 0;
                        face.on_unread_count_changed(unread);
                        face.on_time_tick();
                    } else if keycode == Keycode::B {
                        background_image = !background_image;
                        let kind = if background_image {
                            ComplicationType::LargeImage
                        } else {
                            ComplicationType::Empty
                        };
                        face.on_complication_data_update(
                            ComplicationId::Background.raw(),
                            ComplicationData::new(kind),
                        );
                    }
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    let now = face.clock().now_ms();
                    match face.on_tap(TapType::Tap, point.x, point.y, now) {
                        Some(id) => tracing::info!(slot = id.as_str(), "complication tapped"),
                        None => tracing::info!(x = point.x, y = point.y, "tap missed"),
                    }
                }
                _ => {}
            }
        }

        let sleep = face
            .next_wake_delay_ms()
            .map_or(IDLE_POLL, |ms| Duration::from_millis(ms).min(IDLE_POLL));
        std::thread::sleep(sleep);
    }
}
