//! Runtime tests under tokio's paused clock.
//!
//! `TokioClock` follows virtual time, so sleeping in the test advances both
//! the runtime's tick interval and the engine's notion of "now".

use std::time::Duration;

use pomodoro_core::{Event, Intent, TimerEngine, TimerHandle, TimerMode, TokioClock};

fn spawn() -> (TimerHandle, tokio::task::JoinHandle<TimerEngine<TokioClock>>) {
    TimerHandle::spawn(TimerEngine::new(TokioClock::new()))
}

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn counts_down_once_per_second() {
    let (handle, _task) = spawn();
    let view = handle.start_pause().await.unwrap();
    assert!(view.display.is_running);
    assert_eq!(view.display.clock_text(), "25:00");

    sleep_ms(10_500).await;
    let view = handle.view();
    assert_eq!(view.display.remaining_secs(), 1490);
    assert!(view.display.is_running);
}

#[tokio::test(start_paused = true)]
async fn expiry_switches_phase_and_stops_ticking() {
    let (handle, _task) = spawn();
    handle.set_length(TimerMode::Work, 1).await.unwrap();
    let mut events = handle.events();
    handle.start_pause().await.unwrap();

    sleep_ms(60_500).await;
    let view = handle.view();
    assert_eq!(view.display.mode, TimerMode::ShortBreak);
    assert!(!view.display.is_running);
    assert_eq!(view.display.remaining_secs(), 300);
    assert_eq!(view.summary.sessions_completed, 1);
    assert!(view.notification.visible);

    // Nothing keeps counting while stopped.
    sleep_ms(30_000).await;
    assert_eq!(handle.view().display.remaining_secs(), 300);

    let mut switches = 0;
    while let Ok(event) = events.try_recv() {
        if matches!(event, Event::PhaseCompleted { .. }) {
            switches += 1;
        }
    }
    assert_eq!(switches, 1);
}

#[tokio::test(start_paused = true)]
async fn notification_auto_dismisses_after_five_seconds() {
    let (handle, _task) = spawn();
    let view = handle.skip().await.unwrap();
    assert!(view.notification.visible);

    sleep_ms(4_900).await;
    assert!(handle.view().notification.visible);
    sleep_ms(200).await;
    assert!(!handle.view().notification.visible);
}

#[tokio::test(start_paused = true)]
async fn explicit_dismiss_hides_banner() {
    let (handle, _task) = spawn();
    handle.skip().await.unwrap();
    let view = handle.dismiss_notification().await.unwrap();
    assert!(!view.notification.visible);
}

#[tokio::test(start_paused = true)]
async fn skip_during_run_is_not_undone_by_ticks() {
    let (handle, _task) = spawn();
    handle.start_pause().await.unwrap();
    sleep_ms(3_200).await;

    let view = handle.skip().await.unwrap();
    assert_eq!(view.display.mode, TimerMode::ShortBreak);
    assert!(!view.display.is_running);
    assert_eq!(view.display.remaining_secs(), 300);

    sleep_ms(5_000).await;
    let view = handle.view();
    assert_eq!(view.display.remaining_secs(), 300);
    assert_eq!(view.display.mode, TimerMode::ShortBreak);
}

#[tokio::test(start_paused = true)]
async fn pause_freezes_and_resume_continues() {
    let (handle, _task) = spawn();
    handle.start_pause().await.unwrap();
    sleep_ms(20_000).await;
    let paused = handle.start_pause().await.unwrap();
    assert!(!paused.display.is_running);
    assert_eq!(paused.display.remaining_secs(), 1480);

    sleep_ms(60_000).await;
    assert_eq!(handle.view().display.remaining_secs(), 1480);

    handle.start_pause().await.unwrap();
    sleep_ms(5_500).await;
    assert_eq!(handle.view().display.remaining_secs(), 1475);
}

#[tokio::test(start_paused = true)]
async fn clear_all_from_running_state() {
    let (handle, _task) = spawn();
    handle.set_length(TimerMode::ShortBreak, 12).await.unwrap();
    handle.skip().await.unwrap();
    handle.start_pause().await.unwrap();
    sleep_ms(2_000).await;

    let view = handle.clear_all().await.unwrap();
    assert_eq!(view.display.mode, TimerMode::Work);
    assert_eq!(view.display.remaining_secs(), 1500);
    assert!(!view.display.is_running);
    assert_eq!(view.summary.sessions_completed, 0);
    assert_eq!(view.lengths.short_break_minutes(), 5);
    assert!(!view.notification.visible);

    sleep_ms(3_000).await;
    assert_eq!(handle.view().display.remaining_secs(), 1500);
}

#[tokio::test(start_paused = true)]
async fn visible_signal_reconciles_between_ticks() {
    let (handle, _task) = spawn();
    handle.send(Intent::StartPause).await.unwrap();
    handle.set_visibility(false).await.unwrap();

    // Last interval tick landed at 2.0 s; the next is not due until 3.0 s.
    sleep_ms(2_600).await;
    assert_eq!(handle.view().display.remaining_secs(), 1498);

    let view = handle.set_visibility(true).await.unwrap();
    assert_eq!(view.display.remaining_secs(), 1497);
    assert!(view.display.is_running);
}

#[tokio::test(start_paused = true)]
async fn snapshot_and_shutdown() {
    let (handle, task) = spawn();
    match handle.snapshot().await.unwrap() {
        Event::StateSnapshot { remaining_secs, .. } => assert_eq!(remaining_secs, 1500),
        other => panic!("Expected StateSnapshot, got {other:?}"),
    }

    handle.skip().await.unwrap();
    handle.shutdown().await.unwrap();
    let engine = task.await.unwrap();
    assert_eq!(engine.mode(), TimerMode::ShortBreak);
    assert!(handle.reset().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn dropping_every_handle_stops_the_task() {
    let (handle, task) = spawn();
    handle.start_pause().await.unwrap();
    drop(handle);
    let engine = task.await.unwrap();
    assert!(engine.is_running());
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_updates() {
    let (handle, _task) = spawn();
    let mut rx = handle.subscribe();
    rx.borrow_and_update();
    handle.start_pause().await.unwrap();
    rx.changed().await.unwrap();
    assert!(rx.borrow().display.is_running);
}
