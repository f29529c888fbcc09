//! Embassy driver for the second hand.
//!
//! [`FaceRuntime`] owns the [`WatchFaceService`] behind a `RefCell` and runs
//! the per-second wake-up loop on Embassy timers. Host callbacks go through
//! [`FaceRuntime::with_service`], which signals the loop so it re-reads the
//! schedule after every state change.
//!
//! Everything runs on one executor thread. The `RefCell` borrow is never held
//! across an `.await`, so a callback and a wake-up can never overlap; a borrow
//! conflict is logged and dropped instead of panicking.
//!
//! ```text
//!   ┌────────────── loop ───────────────┐
//!   │ borrow service                    │
//!   │   on_animation_wake()             │
//!   │   next_wake_delay_ms()            │
//!   │ release                           │
//!   │ Some(d) → select(Timer(d), wake)  │
//!   │ None    → wake                    │
//!   └───────────────────────────────────┘
//! ```

use core::cell::RefCell;

use embassy_futures::select::select;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Timer;
use platform::{ComplicationRenderable, PreferenceStore, WallClock, WatchFaceHost};
use watchface::{face_debug, face_warn};

use crate::service::WatchFaceService;

/// Back-off before retrying when the service is already borrowed.
pub const BUSY_RETRY_MS: u64 = 10;

enum Step {
    Sleep(u64),
    Park,
    Busy,
    Exit,
}

/// Single-executor owner of a [`WatchFaceService`].
pub struct FaceRuntime<R, H, P, C> {
    service: RefCell<WatchFaceService<R, H, P, C>>,
    wake: Signal<NoopRawMutex, ()>,
}

impl<R, H, P, C> FaceRuntime<R, H, P, C>
where
    R: ComplicationRenderable,
    H: WatchFaceHost,
    P: PreferenceStore,
    C: WallClock,
{
    /// Take ownership of the service.
    pub fn new(service: WatchFaceService<R, H, P, C>) -> Self {
        Self {
            service: RefCell::new(service),
            wake: Signal::new(),
        }
    }

    /// Run a host callback against the service and wake the second-hand loop.
    ///
    /// Returns `None` if the service is busy (re-entrant call).
    pub fn with_service<T>(
        &self,
        callback: impl FnOnce(&mut WatchFaceService<R, H, P, C>) -> T,
    ) -> Option<T> {
        let result = match self.service.try_borrow_mut() {
            Ok(mut service) => callback(&mut service),
            Err(_) => {
                face_warn!("service busy, host callback dropped");
                return None;
            }
        };
        self.wake.signal(());
        Some(result)
    }

    /// Read-only access, e.g. for drawing a frame.
    pub fn inspect<T>(&self, read: impl FnOnce(&WatchFaceService<R, H, P, C>) -> T) -> Option<T> {
        match self.service.try_borrow() {
            Ok(service) => Some(read(&service)),
            Err(_) => {
                face_warn!("service busy, read dropped");
                None
            }
        }
    }

    /// Give the service back once the loop has finished.
    pub fn into_inner(self) -> WatchFaceService<R, H, P, C> {
        self.service.into_inner()
    }

    fn step(&self) -> Step {
        let Ok(mut service) = self.service.try_borrow_mut() else {
            return Step::Busy;
        };
        if service.is_destroyed() {
            return Step::Exit;
        }
        service.on_animation_wake();
        match service.next_wake_delay_ms() {
            Some(delay) => Step::Sleep(delay),
            None => Step::Park,
        }
    }

    /// Drive the second hand until the service is destroyed.
    pub async fn run_second_hand(&self) {
        face_debug!("second-hand loop running");
        loop {
            match self.step() {
                Step::Sleep(delay) => {
                    select(Timer::after_millis(delay), self.wake.wait()).await;
                }
                Step::Park => self.wake.wait().await,
                Step::Busy => Timer::after_millis(BUSY_RETRY_MS).await,
                Step::Exit => break,
            }
        }
        face_debug!("second-hand loop finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::mocks::{ManualClock, MemoryPreferences, MockComplication, RecordingHost};
    use watchface::{WatchFaceConfig, WatchFaceState};
    use watchface_render::Renderer;

    fn runtime(
        clock: ManualClock,
    ) -> FaceRuntime<MockComplication, RecordingHost, MemoryPreferences, ManualClock> {
        let state = WatchFaceState::new(WatchFaceConfig::default(), |_| MockComplication::new());
        FaceRuntime::new(WatchFaceService::new(
            Renderer::new(state),
            RecordingHost::new(),
            MemoryPreferences::new(),
            clock,
        ))
    }

    #[test]
    fn test_reentrant_callback_is_dropped() {
        let rt = runtime(ManualClock::new(0));
        let inner = rt.with_service(|_| rt.with_service(|s| s.on_time_tick()));
        assert_eq!(inner, Some(None));
        assert_eq!(rt.inspect(|s| s.host().redraw_count()), Some(0));
    }

    #[test]
    fn test_step_parks_while_hidden() {
        let rt = runtime(ManualClock::new(0));
        assert!(matches!(rt.step(), Step::Park));
        rt.with_service(|s| s.on_visibility_changed(true));
        assert!(matches!(rt.step(), Step::Sleep(1_000)));
        rt.with_service(|s| s.on_destroy());
        assert!(matches!(rt.step(), Step::Exit));
    }

    #[test]
    fn test_step_busy_while_borrowed() {
        let rt = runtime(ManualClock::new(0));
        let busy = rt.inspect(|_| matches!(rt.step(), Step::Busy));
        assert_eq!(busy, Some(true));
    }
}
