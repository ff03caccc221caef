mod common;

use std::time::Duration;

use chrono::NaiveDate;
use common::{english_config, squat_result, ScriptedAnalyzer};
use fitquest_lib::{
    capture::StillFrameDevice,
    catalog,
    workout::{StreakStore, WorkoutStatus},
    AppConfig, ChannelSink, CoachEvent, SessionController, SessionStatus, WorkoutController,
};
use tokio::{sync::mpsc::UnboundedReceiver, time::sleep};

type Controller = WorkoutController<StillFrameDevice, ScriptedAnalyzer, ChannelSink>;

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
}

fn workout(config: AppConfig) -> (Controller, StillFrameDevice, UnboundedReceiver<CoachEvent>) {
    let device = StillFrameDevice::solid(32, 24);
    let (sink, events) = ChannelSink::new();
    let trainer = SessionController::builder()
        .device(device.clone())
        .analyzer(ScriptedAnalyzer::always(squat_result()))
        .sink(sink)
        .config(config)
        .build()
        .unwrap();
    let controller =
        WorkoutController::new(trainer, StreakStore::in_memory(fixed_today())).with_clock(fixed_today);
    (controller, device, events)
}

fn drain(events: &mut UnboundedReceiver<CoachEvent>) -> Vec<CoachEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

#[tokio::test(start_paused = true)]
async fn start_shows_full_countdown_and_rejects_a_second_start() {
    let (controller, device, _events) = workout(english_config());

    let snapshot = controller
        .start_workout(catalog::find("squats").unwrap())
        .await
        .unwrap();
    assert_eq!(snapshot.status, WorkoutStatus::Running);
    assert_eq!(snapshot.display, "00:30");
    assert_eq!(snapshot.activity_name.as_deref(), Some("Squats"));
    assert_eq!(device.live_streams(), 1);

    assert!(controller
        .start_workout(catalog::find("plank").unwrap())
        .await
        .is_err());
    assert_eq!(
        controller.get_snapshot().await.activity_id.as_deref(),
        Some("squats")
    );
}

#[tokio::test(start_paused = true)]
async fn countdown_ticks_every_second() {
    let (controller, _device, mut events) = workout(english_config());
    controller
        .start_workout(catalog::find("plank").unwrap())
        .await
        .unwrap();

    sleep(Duration::from_millis(2_500)).await;

    let snapshot = controller.get_snapshot().await;
    assert_eq!(snapshot.remaining_secs, 28);
    assert_eq!(snapshot.display, "00:28");

    let displays: Vec<String> = drain(&mut events)
        .into_iter()
        .filter_map(|event| match event {
            CoachEvent::WorkoutState(s) => Some(s.display),
            _ => None,
        })
        .collect();
    assert_eq!(displays, vec!["00:30", "00:29", "00:28"]);
}

#[tokio::test(start_paused = true)]
async fn expired_countdown_rotates_to_the_next_exercise() {
    let config = AppConfig {
        exercise_secs: 3,
        ..english_config()
    };
    let (controller, device, _events) = workout(config);
    controller
        .start_workout(catalog::find("squats").unwrap())
        .await
        .unwrap();

    sleep(Duration::from_millis(3_500)).await;

    let snapshot = controller.get_snapshot().await;
    assert_eq!(snapshot.activity_id.as_deref(), Some("push-ups"));
    assert_eq!(snapshot.display, "00:03");
    assert_eq!(snapshot.exercises_completed, 1);

    let trainer = controller.trainer().snapshot().await;
    assert_eq!(trainer.activity_id.as_deref(), Some("push-ups"));
    assert_eq!(trainer.status, SessionStatus::Running);
    assert_eq!(device.live_streams(), 1);
    assert_eq!(device.opened_total(), 2);
}

#[tokio::test(start_paused = true)]
async fn pause_freezes_countdown_and_trainer() {
    let (controller, _device, _events) = workout(english_config());
    controller
        .start_workout(catalog::find("lunges").unwrap())
        .await
        .unwrap();
    sleep(Duration::from_millis(1_500)).await;

    let paused = controller.pause_workout().await.unwrap();
    assert_eq!(paused.status, WorkoutStatus::Paused);
    assert_eq!(paused.remaining_secs, 29);
    // Pausing twice is harmless.
    assert_eq!(controller.pause_workout().await.unwrap(), paused);

    sleep(Duration::from_secs(60)).await;
    assert_eq!(controller.get_snapshot().await.remaining_secs, 29);
    assert_eq!(
        controller.trainer().snapshot().await.status,
        SessionStatus::Paused
    );

    let resumed = controller.resume_workout().await.unwrap();
    assert_eq!(resumed.status, WorkoutStatus::Running);
    assert_eq!(
        controller.trainer().snapshot().await.status,
        SessionStatus::Running
    );
    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(controller.get_snapshot().await.remaining_secs, 28);
}

#[tokio::test(start_paused = true)]
async fn next_exercise_wraps_around_the_catalog() {
    let (controller, _device, _events) = workout(english_config());
    assert!(controller.next_exercise().await.is_err());

    controller
        .start_workout(catalog::find("lunges").unwrap())
        .await
        .unwrap();
    sleep(Duration::from_millis(5_500)).await;

    let snapshot = controller.next_exercise().await.unwrap();
    assert_eq!(snapshot.activity_id.as_deref(), Some("jumping-jacks"));
    assert_eq!(snapshot.remaining_secs, 30);
    assert_eq!(
        controller.trainer().snapshot().await.activity_id.as_deref(),
        Some("jumping-jacks")
    );
}

#[tokio::test(start_paused = true)]
async fn stop_records_streak_once_per_day() {
    let (controller, device, mut events) = workout(english_config());
    assert!(controller.stop_workout().await.is_err());

    controller.start_random_workout().await.unwrap();
    let activity_id = controller.get_snapshot().await.activity_id.unwrap();
    assert!(catalog::find(&activity_id).is_some());

    let first = controller.stop_workout().await.unwrap();
    assert_eq!(first.streak, 1);
    assert!(first.celebrate);
    assert_eq!(first.last_workout_date, Some(fixed_today()));
    assert_eq!(device.live_streams(), 0);
    assert_eq!(controller.get_snapshot().await.status, WorkoutStatus::Idle);
    assert_eq!(
        controller.trainer().snapshot().await.status,
        SessionStatus::Idle
    );
    assert!(drain(&mut events).contains(&CoachEvent::StreakUpdated(first.clone())));

    controller
        .start_workout(catalog::find("plank").unwrap())
        .await
        .unwrap();
    let second = controller.stop_workout().await.unwrap();
    assert_eq!(second.streak, 1);
    assert!(!second.celebrate);
    assert_eq!(controller.streak().streak, 1);
}

#[tokio::test(start_paused = true)]
async fn setup_wires_config_and_streak_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        exercise_secs: 10,
        ..english_config()
    };
    config.save(dir.path().join(fitquest_lib::CONFIG_FILE)).unwrap();

    let (sink, _events) = ChannelSink::new();
    let controller = fitquest_lib::setup(
        dir.path(),
        StillFrameDevice::solid(16, 16),
        ScriptedAnalyzer::always(squat_result()),
        sink,
    )
    .unwrap();

    let snapshot = controller
        .start_workout(catalog::find("burpees").unwrap())
        .await
        .unwrap();
    assert_eq!(snapshot.display, "00:10");

    controller.stop_workout().await.unwrap();
    assert!(dir.path().join(fitquest_lib::STREAK_FILE).exists());
}

#[tokio::test(start_paused = true)]
async fn stop_on_a_rotation_boundary_leaves_the_camera_closed() {
    for offset_ms in [0, 1, 999, 1_000, 1_001] {
        let config = AppConfig {
            exercise_secs: 1,
            ..english_config()
        };
        let (controller, device, _events) = workout(config);
        controller
            .start_workout(catalog::find("squats").unwrap())
            .await
            .unwrap();

        sleep(Duration::from_millis(1_000 + offset_ms)).await;
        controller.stop_workout().await.unwrap();
        sleep(Duration::from_secs(10)).await;

        assert_eq!(device.live_streams(), 0, "offset {offset_ms}ms");
        let trainer = controller.trainer().snapshot().await;
        assert_eq!(trainer.status, SessionStatus::Idle, "offset {offset_ms}ms");
        assert!(!trainer.cycle_pending, "offset {offset_ms}ms");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stop_racing_rotation_on_worker_threads_leaves_the_camera_closed() {
    for _ in 0..3 {
        let config = AppConfig {
            exercise_secs: 1,
            ..english_config()
        };
        let (controller, device, _events) = workout(config);
        controller
            .start_workout(catalog::find("plank").unwrap())
            .await
            .unwrap();

        sleep(Duration::from_millis(1_000)).await;
        controller.stop_workout().await.unwrap();
        sleep(Duration::from_millis(200)).await;

        assert_eq!(device.live_streams(), 0);
        assert_eq!(
            controller.trainer().snapshot().await.status,
            SessionStatus::Idle
        );
    }
}
