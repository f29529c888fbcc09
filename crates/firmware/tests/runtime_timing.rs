//! Real-time runs of the second-hand loop on the embassy-time std driver.
//!
//! Run: cargo test -p firmware --test runtime_timing

#![allow(clippy::unwrap_used)]
#![allow(clippy::arithmetic_side_effects)]

use embassy_futures::join::join;
use embassy_time::Timer;
use firmware::{FaceRuntime, WatchFaceService};
use platform::mocks::{MemoryPreferences, MockComplication, RecordingHost};
use platform::{EmbassyClock, HostError, WallClock};
use watchface::{WatchFaceConfig, WatchFaceState};
use watchface_render::Renderer;

type Runtime = FaceRuntime<MockComplication, RecordingHost, MemoryPreferences, EmbassyClock>;

fn runtime() -> Runtime {
    let state = WatchFaceState::new(WatchFaceConfig::default(), |_| MockComplication::new());
    FaceRuntime::new(WatchFaceService::new(
        Renderer::new(state),
        RecordingHost::new(),
        MemoryPreferences::new(),
        EmbassyClock::new(0),
    ))
}

fn redraws(rt: &Runtime) -> usize {
    rt.inspect(|s| s.host().redraw_count()).unwrap()
}

#[tokio::test]
async fn ticks_every_second_then_goes_quiet_in_ambient() {
    let rt = runtime();
    rt.with_service(|s| s.on_visibility_changed(true)).unwrap();

    let script = async {
        Timer::after_millis(2_100).await;
        let active = redraws(&rt);
        rt.with_service(|s| s.on_ambient_changed(true)).unwrap();
        let entered_ambient = redraws(&rt);
        Timer::after_millis(2_500).await;
        let quiet = redraws(&rt);
        rt.with_service(|s| s.on_destroy()).unwrap();
        (active, entered_ambient, quiet)
    };

    let ((), (active, entered_ambient, quiet)) = join(rt.run_second_hand(), script).await;

    // One redraw for becoming visible, then two or three ticks in 2.1 s.
    // Entering ambient while visible draws nothing new.
    assert!((3..=4).contains(&active), "active redraws: {active}");
    assert_eq!(entered_ambient, active);
    assert_eq!(quiet, entered_ambient);
}

#[tokio::test]
async fn first_tick_lands_on_a_second_boundary() {
    let rt = runtime();
    rt.with_service(|s| s.on_visibility_changed(true)).unwrap();
    let due = rt
        .inspect(|s| s.renderer().scheduler().next_wake_ms())
        .unwrap()
        .unwrap();
    assert_eq!(due % 1_000, 0);

    let script = async {
        while redraws(&rt) < 2 {
            Timer::after_millis(5).await;
        }
        let fired_at = rt.inspect(|s| s.clock().now_ms()).unwrap();
        rt.with_service(|s| s.on_destroy()).unwrap();
        fired_at
    };

    let ((), fired_at) = join(rt.run_second_hand(), script).await;
    assert!(fired_at >= due);
    assert!(fired_at < due + 1_000);
}

#[tokio::test]
async fn host_fault_parks_the_loop() {
    let rt = runtime();
    rt.with_service(|s| {
        s.host_mut().set_failing(Some(HostError::SurfaceUnavailable));
        s.on_visibility_changed(true);
    })
    .unwrap();

    let script = async {
        Timer::after_millis(1_200).await;
        let running = rt
            .inspect(|s| s.renderer().scheduler().is_running())
            .unwrap();
        rt.with_service(|s| s.on_destroy()).unwrap();
        running
    };

    let ((), running) = join(rt.run_second_hand(), script).await;
    assert!(!running);
    assert_eq!(rt.into_inner().host().redraw_count(), 0);
}
