//! Host callback surface.
//!
//! [`WatchFaceService`] is the one object a host runtime talks to. Every
//! callback maps onto the renderer and the watch face model, and decides
//! whether the host should schedule a frame. Callbacks are synchronous and
//! must not be re-entered; [`crate::FaceRuntime`] enforces that on Embassy.
//!
//! | Callback                           | Effect                                    |
//! |------------------------------------|-------------------------------------------|
//! | `on_surface_changed`               | recompute geometry                        |
//! | `on_visibility_changed`            | mode transition, redraw when now visible  |
//! | `on_ambient_changed`               | mode transition, ambient paints           |
//! | `on_properties_changed`            | low-bit / burn-in flags                   |
//! | `on_interruption_filter_changed`   | mute, redraw when the mute state flips    |
//! | `on_complication_data_update`      | slot data, redraw                         |
//! | `on_tap`                           | route to complication                     |
//! | `on_draw`                          | one frame                                 |
//! | `on_unread_count_changed`          | redraw on 0 -> positive                   |
//! | `on_time_tick`                     | redraw (once a minute in ambient)         |
//! | `on_time_zone_changed`             | new UTC offset, redraw                    |
//! | `on_destroy`                       | stop everything                           |

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use platform::{
    ComplicationData, ComplicationRenderable, InterruptionFilter, PreferenceStore, TapEvent,
    TapType, WallClock, WatchFaceHost,
};
use watchface::{face_debug, face_info, face_warn, ComplicationId};
use watchface_render::{FrameReport, RenderMode, Renderer, TickOutcome, Transition};

/// Watch face bound to a host, a preference store and a wall clock.
pub struct WatchFaceService<R, H, P, C> {
    renderer: Renderer<R>,
    host: H,
    prefs: P,
    clock: C,
    destroyed: bool,
}

impl<R, H, P, C> WatchFaceService<R, H, P, C>
where
    R: ComplicationRenderable,
    H: WatchFaceHost,
    P: PreferenceStore,
    C: WallClock,
{
    /// Wrap a renderer. The face starts hidden.
    pub fn new(renderer: Renderer<R>, host: H, prefs: P, clock: C) -> Self {
        Self {
            renderer,
            host,
            prefs,
            clock,
            destroyed: false,
        }
    }

    /// The renderer.
    pub fn renderer(&self) -> &Renderer<R> {
        &self.renderer
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host, for tests and simulators that drain its requests.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The wall clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Whether `on_destroy` ran.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn request_redraw(&mut self, reason: &'static str) {
        if self.destroyed {
            return;
        }
        if let Err(error) = self.host.request_redraw() {
            face_warn!("redraw for {} not delivered ({})", reason, error.as_str());
        }
    }

    fn after_transition(&mut self, t: Transition) {
        if t.needs_redraw() {
            self.request_redraw(t.to.as_str());
        }
    }

    /// Surface created or resized.
    pub fn on_surface_changed(&mut self, width: i32, height: i32) {
        self.renderer.state_mut().calculate_dimensions(width, height);
    }

    /// Surface shown or hidden.
    pub fn on_visibility_changed(&mut self, visible: bool) -> Transition {
        let now = self.clock.now_ms();
        let t = self.renderer.set_visible(visible, &self.prefs, now);
        self.after_transition(t);
        t
    }

    /// Host entered or left ambient mode.
    pub fn on_ambient_changed(&mut self, ambient: bool) -> Transition {
        let now = self.clock.now_ms();
        let t = self.renderer.set_ambient(ambient, &self.prefs, now);
        self.after_transition(t);
        t
    }

    /// Display properties reported once by the host.
    pub fn on_properties_changed(&mut self, low_bit_ambient: bool, burn_in_protection: bool) {
        face_debug!(
            "properties: low-bit {} burn-in {}",
            low_bit_ambient,
            burn_in_protection
        );
        self.renderer
            .state_mut()
            .set_low_bit_and_burn_in(low_bit_ambient, burn_in_protection);
    }

    /// Do-not-disturb level changed. Returns whether the mute state flipped.
    pub fn on_interruption_filter_changed(&mut self, filter: InterruptionFilter) -> bool {
        let muted = filter.mutes();
        if self.renderer.state().is_muted() == muted {
            return false;
        }
        face_info!("interruption filter {}, muted {}", filter.as_str(), muted);
        self.renderer.state_mut().set_mute_mode(muted);
        self.request_redraw("mute");
        true
    }

    /// New data for a complication. Unknown ids are ignored.
    pub fn on_complication_data_update(&mut self, raw_id: u32, data: ComplicationData) -> bool {
        let applied = self.renderer.state_mut().update_complication(raw_id, data);
        if applied {
            self.request_redraw("complication");
        }
        applied
    }

    /// Touch input. Only completed taps are routed.
    pub fn on_tap(
        &mut self,
        kind: TapType,
        x: i32,
        y: i32,
        event_time_ms: u64,
    ) -> Option<ComplicationId> {
        self.renderer.check_tap(TapEvent {
            kind,
            x,
            y,
            event_time_ms,
        })
    }

    /// Draw one frame for wall-clock `now_ms`.
    pub fn on_draw<D, T>(&self, target: &mut D, now_ms: u64) -> Result<FrameReport, D::Error>
    where
        D: DrawTarget<Color = T>,
        T: PixelColor + From<Rgb888>,
    {
        self.renderer.render(target, now_ms)
    }

    /// Draw one frame at the clock's current time.
    pub fn draw_now<D, T>(&self, target: &mut D) -> Result<FrameReport, D::Error>
    where
        D: DrawTarget<Color = T>,
        T: PixelColor + From<Rgb888>,
    {
        self.on_draw(target, self.clock.now_ms())
    }

    /// Unread notification count changed.
    pub fn on_unread_count_changed(&mut self, count: u32) -> bool {
        let redraw = self.renderer.set_unread_count(count);
        if redraw {
            self.request_redraw("unread");
        }
        redraw
    }

    /// The host's periodic time tick (once a minute in ambient mode).
    pub fn on_time_tick(&mut self) {
        self.request_redraw("time-tick");
    }

    /// The device's time zone changed.
    pub fn on_time_zone_changed(&mut self, utc_offset_minutes: i32) {
        self.renderer.set_utc_offset_minutes(utc_offset_minutes);
        self.request_redraw("time-zone");
    }

    /// The engine is going away. Nothing fires afterwards.
    pub fn on_destroy(&mut self) {
        self.renderer.tear_down();
        self.destroyed = true;
        face_info!("watch face destroyed");
    }

    /// Animation wake-up: fire the second-hand tick if one is due.
    pub fn on_animation_wake(&mut self) -> TickOutcome {
        if self.destroyed {
            return TickOutcome::Idle;
        }
        let now = self.clock.now_ms();
        self.renderer.on_tick(now, &mut self.host)
    }

    /// Milliseconds until the next animation wake-up, `None` when idle.
    pub fn next_wake_delay_ms(&self) -> Option<u64> {
        if self.destroyed || self.renderer.mode() != RenderMode::VisibleActive {
            return None;
        }
        self.renderer.scheduler().delay_ms(self.clock.now_ms())
    }
}
