//! Renderer: visibility/ambient state machine around the watch face state.
//!
//! ```text
//!                 set_visible(true), !ambient
//!   Hidden ─────────────────────────────────► VisibleActive ◄──┐
//!     ▲  │          set_visible(true), ambient      │    set_ambient(false)
//!     │  └────────────────────────────► VisibleAmbient ◄───────┘
//!     │                                     set_ambient(true)
//!     └──────────── set_visible(false) from either visible state
//! ```
//!
//! Becoming visible (from `Hidden`, ambient or not) and entering
//! `VisibleActive` load style preferences. Entering `VisibleActive` starts the
//! second hand; leaving it stops the second hand before anything else changes.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use platform::{ComplicationRenderable, PreferenceStore, TapEvent, WatchFaceHost};
use watchface::{face_debug, face_info, face_warn, ComplicationId, WatchFaceState, WatchTime};

use crate::frame::{render_frame, FrameReport};
use crate::scheduler::{SecondHandScheduler, Tick};

/// Display mode of the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderMode {
    /// Surface not visible; nothing animates.
    Hidden,
    /// Visible and interactive; the second hand ticks.
    VisibleActive,
    /// Visible in low-power mode; no second hand.
    VisibleAmbient,
}

impl RenderMode {
    /// Mode for the given flags.
    pub const fn from_flags(visible: bool, ambient: bool) -> Self {
        match (visible, ambient) {
            (false, _) => Self::Hidden,
            (true, false) => Self::VisibleActive,
            (true, true) => Self::VisibleAmbient,
        }
    }

    /// Stable name for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::VisibleActive => "visible-active",
            Self::VisibleAmbient => "visible-ambient",
        }
    }

    /// Whether anything is on screen.
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Result of a mode change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// Mode before the request.
    pub from: RenderMode,
    /// Mode after the request.
    pub to: RenderMode,
}

impl Transition {
    /// Whether the mode actually changed.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    /// Whether the host should draw a fresh frame: the surface just appeared.
    ///
    /// Switching between active and ambient while visible is not a redraw
    /// trigger; the host draws on its own ambient/time-tick cadence.
    pub fn needs_redraw(&self) -> bool {
        self.from == RenderMode::Hidden && self.to.is_visible()
    }
}

/// Outcome of a scheduler wake-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Not running, or woke before the deadline.
    Idle,
    /// A redraw was requested.
    Redrawn(Tick),
    /// The host rejected the redraw; the scheduler was stopped.
    Faulted,
}

/// Mode state machine, second-hand scheduler and frame entry point.
#[derive(Debug, Clone)]
pub struct Renderer<R> {
    state: WatchFaceState<R>,
    scheduler: SecondHandScheduler,
    visible: bool,
    ambient: bool,
    utc_offset_minutes: i32,
}

impl<R: ComplicationRenderable> Renderer<R> {
    /// Wrap a watch face; starts `Hidden`.
    pub fn new(state: WatchFaceState<R>) -> Self {
        Self {
            ambient: state.is_ambient(),
            state,
            scheduler: SecondHandScheduler::new(),
            visible: false,
            utc_offset_minutes: 0,
        }
    }

    /// Watch face state.
    pub fn state(&self) -> &WatchFaceState<R> {
        &self.state
    }

    /// Mutable watch face state for callbacks the renderer does not own.
    pub fn state_mut(&mut self) -> &mut WatchFaceState<R> {
        &mut self.state
    }

    /// Current mode.
    pub fn mode(&self) -> RenderMode {
        RenderMode::from_flags(self.visible, self.ambient)
    }

    /// The second-hand scheduler.
    pub fn scheduler(&self) -> &SecondHandScheduler {
        &self.scheduler
    }

    /// Offset from UTC applied to wall-clock time when drawing.
    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    /// Change the local time zone.
    pub fn set_utc_offset_minutes(&mut self, offset: i32) {
        self.utc_offset_minutes = offset;
    }

    /// Local dial time for a wall-clock instant.
    pub fn watch_time(&self, now_ms: u64) -> WatchTime {
        WatchTime::from_epoch_ms(now_ms, self.utc_offset_minutes)
    }

    /// Surface shown or hidden.
    ///
    /// `prefs` is read whenever the surface becomes visible.
    pub fn set_visible<P: PreferenceStore>(
        &mut self,
        visible: bool,
        prefs: &P,
        now_ms: u64,
    ) -> Transition {
        let from = self.mode();
        let to = RenderMode::from_flags(visible, self.ambient);
        self.leave(from, to);
        self.visible = visible;
        self.enter(from, to, prefs, now_ms);
        Transition { from, to }
    }

    /// Ambient mode entered or left.
    ///
    /// While hidden only the flag is recorded (plus the model's ambient
    /// paints), so the next `set_visible(true)` lands in the right mode.
    pub fn set_ambient<P: PreferenceStore>(
        &mut self,
        ambient: bool,
        prefs: &P,
        now_ms: u64,
    ) -> Transition {
        let from = self.mode();
        let to = RenderMode::from_flags(self.visible, ambient);
        self.leave(from, to);
        self.ambient = ambient;
        self.state.set_ambient_mode(ambient);
        self.enter(from, to, prefs, now_ms);
        Transition { from, to }
    }

    fn leave(&mut self, from: RenderMode, to: RenderMode) {
        if from == RenderMode::VisibleActive && to != RenderMode::VisibleActive {
            self.scheduler.stop();
        }
    }

    fn enter<P: PreferenceStore>(
        &mut self,
        from: RenderMode,
        to: RenderMode,
        prefs: &P,
        now_ms: u64,
    ) {
        if from == to {
            return;
        }
        face_info!("mode {} -> {}", from.as_str(), to.as_str());
        if from == RenderMode::Hidden || to == RenderMode::VisibleActive {
            self.state.load_color_preferences(prefs);
        }
        if to == RenderMode::VisibleActive {
            self.scheduler.start(now_ms);
        }
    }

    /// Scheduler wake-up: request a redraw if a tick is due.
    ///
    /// A host failure stops the scheduler; it restarts on the next entry
    /// into `VisibleActive`.
    pub fn on_tick<H: WatchFaceHost>(&mut self, now_ms: u64, host: &mut H) -> TickOutcome {
        if self.mode() != RenderMode::VisibleActive {
            // Stale wake-up from before a mode change.
            self.scheduler.stop();
            return TickOutcome::Idle;
        }
        let Some(tick) = self.scheduler.poll(now_ms) else {
            return TickOutcome::Idle;
        };
        match host.request_redraw() {
            Ok(()) => TickOutcome::Redrawn(tick),
            Err(error) => {
                face_warn!("redraw request failed ({}), stopping second hand", error.as_str());
                self.scheduler.stop();
                TickOutcome::Faulted
            }
        }
    }

    /// Draw one frame for wall-clock `now_ms`.
    pub fn render<D, C>(&self, target: &mut D, now_ms: u64) -> Result<FrameReport, D::Error>
    where
        D: DrawTarget<Color = C>,
        C: PixelColor + From<Rgb888>,
    {
        let time = self.watch_time(now_ms);
        render_frame(&self.state, target, &time, now_ms)
    }

    /// Route a tap to a complication.
    pub fn check_tap(&mut self, event: TapEvent) -> Option<ComplicationId> {
        let hit = self.state.check_tap(event);
        if let Some(id) = hit {
            face_debug!("tap routed to {}", id.as_str());
        }
        hit
    }

    /// Record a new unread count; `true` when the host should redraw.
    pub fn set_unread_count(&mut self, count: u32) -> bool {
        self.state.set_unread_notification_count(count)
    }

    /// Stop all animation before the surface goes away.
    pub fn tear_down(&mut self) {
        self.scheduler.stop();
        self.visible = false;
    }
}
