#![forbid(unsafe_code)]

use cadence::testing::{ManualClock, RecordingRenderer, RecordingTimer, TimerCall};
use cadence::{DrawMode, EnvironmentSnapshot, Error, InterruptionFilter, WatchFaceEngine};
use config::Config;
use pretty_assertions::assert_eq;
use std::time::Duration;
use timeline::{ContentUpdate, SlotId, TimelineItem, Timestamp};

type Engine = WatchFaceEngine<&'static str, ManualClock, RecordingTimer, RecordingRenderer>;

fn ts(millis: i64) -> Timestamp {
    Timestamp::from_millis(millis)
}

fn engine_with(config: &Config, now: i64) -> (Engine, ManualClock, RecordingTimer) {
    let clock = ManualClock::new(ts(now));
    let timer = RecordingTimer::new();
    let engine =
        WatchFaceEngine::new(config, clock.clone(), timer.clone(), RecordingRenderer::new())
            .unwrap();
    (engine, clock, timer)
}

fn minute_config() -> Config {
    let mut config = Config::new();
    config.scheduler.interactive_update_interval = Duration::from_secs(60);
    config
}

fn ambient() -> EnvironmentSnapshot {
    EnvironmentSnapshot {
        is_ambient: true,
        ..Default::default()
    }
}

#[test]
fn becoming_visible_draws_and_arms_next_boundary() {
    let (mut engine, _clock, timer) = engine_with(&Config::new(), 10_250);
    engine.set_visible(true).unwrap();

    assert_eq!(engine.renderer().frames, vec![(DrawMode::Interactive, ts(10_250))]);
    let (_, delay) = timer.pending().unwrap();
    assert_eq!(delay, Duration::from_millis(750));
    assert!(engine.scheduler().state().is_frame_callback_pending());
}

#[test]
fn invisible_engine_does_not_draw() {
    let (mut engine, _clock, timer) = engine_with(&Config::new(), 0);
    engine.configure_slot(SlotId(1), "a").unwrap();
    engine.set_environment(ambient()).unwrap();
    engine.set_environment(EnvironmentSnapshot::default()).unwrap();

    assert!(engine.renderer().frames.is_empty());
    assert!(timer.calls().is_empty());
}

#[test]
fn timer_firing_draws_and_rearms() {
    let (mut engine, clock, timer) = engine_with(&Config::new(), 0);
    engine.set_visible(true).unwrap();

    let (token, delay) = timer.fire().unwrap();
    clock.advance(delay);
    assert!(engine.on_frame_callback(token).unwrap());
    assert_eq!(engine.renderer().frames.len(), 2);
    assert_eq!(timer.pending().map(|(_, d)| d), Some(Duration::from_millis(1000)));

    // The same token delivered twice is stale.
    assert!(!engine.on_frame_callback(token).unwrap());
    assert_eq!(engine.renderer().frames.len(), 2);
}

#[test]
fn entering_ambient_cancels_schedule_and_draws_once() {
    let (mut engine, _clock, timer) = engine_with(&Config::new(), 0);
    engine.set_visible(true).unwrap();
    let (pending, _) = timer.pending().unwrap();
    timer.clear();

    engine.set_environment(ambient()).unwrap();

    assert_eq!(engine.mode(), DrawMode::Ambient);
    assert_eq!(timer.calls(), vec![TimerCall::Cancel(pending)]);
    assert_eq!(timer.pending(), None);
    assert_eq!(engine.renderer().frames.last().map(|f| f.0), Some(DrawMode::Ambient));
    assert_eq!(engine.renderer().frames.len(), 2);
}

#[test]
fn ambient_tick_draws_exactly_once_without_follow_up() {
    let (mut engine, clock, timer) = engine_with(&Config::new(), 0);
    engine.set_visible(true).unwrap();
    engine.set_environment(ambient()).unwrap();
    timer.clear();

    clock.advance(Duration::from_secs(60));
    engine.ambient_tick().unwrap();

    assert_eq!(engine.renderer().frames.len(), 3);
    assert_eq!(engine.scheduler().stats().frames, 3);
    assert!(timer.calls().is_empty());
    assert!(!engine.scheduler().state().is_frame_callback_pending());
}

#[test]
fn ambient_tick_outside_ambient_is_ignored() {
    let (mut engine, _clock, _timer) = engine_with(&Config::new(), 0);
    engine.set_visible(true).unwrap();
    engine.ambient_tick().unwrap();
    assert_eq!(engine.renderer().frames.len(), 1);
}

#[test]
fn leaving_ambient_requests_immediate_frame() {
    let (mut engine, _clock, timer) = engine_with(&Config::new(), 0);
    engine.set_visible(true).unwrap();
    engine.set_environment(ambient()).unwrap();
    engine.set_environment(EnvironmentSnapshot::default()).unwrap();

    assert_eq!(engine.mode(), DrawMode::Interactive);
    assert_eq!(timer.pending().map(|(_, d)| d), Some(Duration::ZERO));
}

#[test]
fn ambient_ignored_when_not_allowed() {
    let mut config = Config::new();
    config.scheduler.allow_ambient = false;
    let (mut engine, _clock, _timer) = engine_with(&config, 0);
    engine
        .set_environment(EnvironmentSnapshot {
            is_ambient: true,
            interruption_filter: InterruptionFilter::Priority,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(engine.mode(), DrawMode::Mute);
}

#[test]
fn low_battery_uses_slow_interval() {
    let (mut engine, _clock, timer) = engine_with(&Config::new(), 5_000);
    engine
        .set_environment(EnvironmentSnapshot {
            is_battery_low_and_not_charging: true,
            ..Default::default()
        })
        .unwrap();
    engine.set_visible(true).unwrap();

    assert_eq!(engine.mode(), DrawMode::LowBatteryInteractive);
    assert_eq!(timer.pending().map(|(_, d)| d), Some(Duration::from_millis(55_000)));
}

#[test]
fn low_battery_still_wakes_for_content() {
    let (mut engine, _clock, timer) = engine_with(&Config::new(), 0);
    engine.configure_slot(SlotId(1), "a").unwrap();
    engine
        .apply_content([(
            SlotId(1),
            ContentUpdate::TimelineOnly(vec![TimelineItem::new("b", ts(7_000), None)]),
        )])
        .unwrap();
    engine
        .set_environment(EnvironmentSnapshot {
            is_battery_low_and_not_charging: true,
            ..Default::default()
        })
        .unwrap();
    engine.set_visible(true).unwrap();

    assert_eq!(timer.pending().map(|(_, d)| d), Some(Duration::from_millis(7_000)));
}

#[test]
fn content_change_shortens_wait() {
    let (mut engine, _clock, timer) = engine_with(&minute_config(), 62_000);
    engine.configure_slot(SlotId(1), "a").unwrap();
    engine
        .apply_content([(
            SlotId(1),
            ContentUpdate::TimelineOnly(vec![TimelineItem::new("b", ts(112_001), None)]),
        )])
        .unwrap();
    engine.set_visible(true).unwrap();

    assert_eq!(timer.pending().map(|(_, d)| d), Some(Duration::from_millis(50_001)));
}

#[test]
fn content_update_while_visible_requests_frame() {
    let (mut engine, _clock, timer) = engine_with(&minute_config(), 62_000);
    engine.configure_slot(SlotId(1), "a").unwrap();
    engine.set_visible(true).unwrap();
    assert_eq!(timer.pending().map(|(_, d)| d), Some(Duration::from_millis(58_000)));

    let result = engine.apply_content([
        (
            SlotId(1),
            ContentUpdate::Full {
                base: "b",
                timeline: vec![],
            },
        ),
        (SlotId(2), ContentUpdate::TimelineOnly(vec![])),
    ]);

    assert!(matches!(
        result,
        Err(Error::Timeline(timeline::Error::UnknownSlot(SlotId(2))))
    ));
    assert_eq!(timer.pending().map(|(_, d)| d), Some(Duration::ZERO));
    assert_eq!(*engine.slots().get(SlotId(1)).unwrap().active(ts(62_000)), "b");
}

#[test]
fn slow_draw_renders_again_immediately() {
    let clock = ManualClock::new(ts(0));
    let timer = RecordingTimer::new();
    let renderer = RecordingRenderer::with_cost(clock.clone(), Duration::from_millis(1_500));
    let mut engine: Engine =
        WatchFaceEngine::new(&Config::new(), clock.clone(), timer.clone(), renderer).unwrap();

    engine.set_visible(true).unwrap();

    assert_eq!(timer.pending().map(|(_, d)| d), Some(Duration::ZERO));
    assert_eq!(engine.scheduler().stats().immediate, 1);
    assert_eq!(engine.scheduler().state().next_draw, ts(1_500));
}

#[test]
fn callback_after_destroy_is_noop() {
    let (mut engine, _clock, timer) = engine_with(&Config::new(), 0);
    engine.set_visible(true).unwrap();
    let (token, _) = timer.pending().unwrap();

    engine.destroy();

    assert_eq!(timer.pending(), None);
    assert!(!engine.on_frame_callback(token).unwrap());
    assert_eq!(engine.renderer().frames.len(), 1);
    assert!(engine.scheduler().is_destroyed());
}

#[test]
fn going_invisible_cancels_pending_frame() {
    let (mut engine, _clock, timer) = engine_with(&Config::new(), 0);
    engine.set_visible(true).unwrap();
    engine.set_visible(false).unwrap();
    assert_eq!(timer.pending(), None);
    assert!(!engine.scheduler().state().is_frame_callback_pending());
}

#[test]
fn timer_failure_is_surfaced_and_next_trigger_rearms() {
    let (mut engine, _clock, timer) = engine_with(&Config::new(), 0);
    timer.fail_next();

    let err = engine.set_visible(true).unwrap_err();
    assert!(matches!(err, Error::Timer(_)));
    assert!(!engine.scheduler().state().is_frame_callback_pending());

    engine
        .set_environment(EnvironmentSnapshot {
            interruption_filter: InterruptionFilter::None,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(engine.mode(), DrawMode::Mute);
    assert!(engine.scheduler().state().is_frame_callback_pending());
}

#[test]
fn at_most_one_registration_outstanding() {
    let (mut engine, _clock, timer) = engine_with(&Config::new(), 0);
    engine.set_visible(true).unwrap();
    engine.configure_slot(SlotId(1), "a").unwrap();
    engine.configure_slot(SlotId(2), "b").unwrap();

    let mut outstanding = 0i32;
    for call in timer.calls() {
        match call {
            TimerCall::Schedule(..) => outstanding += 1,
            TimerCall::Cancel(_) => outstanding -= 1,
        }
        assert!(outstanding <= 1);
    }
    assert_eq!(outstanding, 1);
}

#[test]
fn mock_time_warps_content_not_schedule() {
    let mut config = Config::new();
    config.mock_time.enabled = true;
    config.mock_time.speed = 60.0;
    let (mut engine, clock, timer) = engine_with(&config, 0);
    engine.set_visible(true).unwrap();

    let (token, delay) = timer.fire().unwrap();
    assert_eq!(delay, Duration::from_millis(1000));
    clock.advance(delay);
    engine.on_frame_callback(token).unwrap();

    assert_eq!(engine.renderer().frames[1], (DrawMode::Interactive, ts(60_000)));
    assert_eq!(timer.pending().map(|(_, d)| d), Some(Duration::from_millis(1000)));
}

#[test]
fn empty_wrap_range_is_rejected_at_construction() {
    let mut config = Config::new();
    config.mock_time.enabled = true;
    config.mock_time.min_time = Some(10);
    config.mock_time.max_time = Some(10);

    let result: Result<Engine, _> = WatchFaceEngine::new(
        &config,
        ManualClock::new(ts(0)),
        RecordingTimer::new(),
        RecordingRenderer::new(),
    );

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn early_timer_delivery_does_not_draw_twice_per_interval() {
    let (mut engine, clock, timer) = engine_with(&minute_config(), 62_000);
    engine.set_visible(true).unwrap();
    let (token, delay) = timer.fire().unwrap();
    assert_eq!(delay, Duration::from_millis(58_000));

    clock.set(ts(119_995));
    assert!(engine.on_frame_callback(token).unwrap());

    assert_eq!(timer.pending().map(|(_, d)| d), Some(Duration::from_millis(60_005)));
    assert_eq!(engine.renderer().frames.len(), 2);
}

#[test]
fn lock_change_redraws_without_mode_change() {
    let (mut engine, _clock, timer) = engine_with(&minute_config(), 62_000);
    engine.set_visible(true).unwrap();
    timer.clear();

    engine
        .set_environment(EnvironmentSnapshot {
            is_locked: true,
            ..Default::default()
        })
        .unwrap();

    assert_eq!(engine.mode(), DrawMode::Interactive);
    assert_eq!(timer.pending().map(|(_, d)| d), Some(Duration::ZERO));
}

#[test]
fn lock_change_while_ambient_draws_once() {
    let (mut engine, _clock, timer) = engine_with(&Config::new(), 0);
    engine.set_visible(true).unwrap();
    engine.set_environment(ambient()).unwrap();
    assert_eq!(engine.renderer().frames.len(), 2);

    engine
        .set_environment(EnvironmentSnapshot {
            is_locked: true,
            ..ambient()
        })
        .unwrap();

    assert_eq!(engine.renderer().frames.len(), 3);
    assert_eq!(timer.pending(), None);
}
