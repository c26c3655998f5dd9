//! End-to-end session runs driven through the public API.

use std::sync::atomic::Ordering;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rep_coach::camera::StubCamera;
use rep_coach::coaching::TimedSpeech;
use rep_coach::fixtures::{synthetic, FixtureFile};
use rep_coach::presentation::SessionView;
use rep_coach::session::SessionDeps;
use rep_coach::{AppConfig, EventBus, ExerciseKind, SessionEvent, SessionOptions, TrainerSession};

fn start(bus: &EventBus, exercise: ExerciseKind, words_per_minute: u32) -> TrainerSession {
    TrainerSession::start(
        AppConfig::default(),
        SessionOptions {
            exercise,
            voice_enabled: true,
            analysis_enabled: false,
        },
        SessionDeps {
            speech: Box::new(TimedSpeech::new(words_per_minute)),
            client: None,
            rng: StdRng::seed_from_u64(42),
            events: bus.clone(),
        },
        Box::new(StubCamera::new()),
        0,
    )
    .expect("stub camera always starts")
}

fn collect(rx: &mut tokio::sync::broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn reference_squat_sequence_counts_once() {
    let fixture = FixtureFile::parse(
        r#"{"exercise": "squat", "metrics": [
            {"timestamp_ms": 0, "metric": 175},
            {"timestamp_ms": 1100, "metric": 75},
            {"timestamp_ms": 2300, "metric": 175}
        ]}"#,
    )
    .unwrap();
    let bus = EventBus::new(256);
    let mut session = start(&bus, fixture.exercise, 0);

    for frame in fixture.to_frames() {
        session.process_frame(frame);
    }
    assert_eq!(session.rep_state().rep_count, 1);
}

#[test]
fn third_sample_inside_debounce_counts_nothing() {
    let fixture = FixtureFile::parse(
        r#"{"exercise": "squat", "metrics": [
            {"timestamp_ms": 0, "metric": 175},
            {"timestamp_ms": 1100, "metric": 75},
            {"timestamp_ms": 900, "metric": 175}
        ]}"#,
    )
    .unwrap();
    let bus = EventBus::new(256);
    let mut rx = bus.subscribe();
    let mut session = start(&bus, fixture.exercise, 0);

    // Feed in file order, not sorted, to keep the late sample late
    for sample in &fixture.metrics {
        let metric = sample.metric.unwrap();
        session.process_frame(synthetic::frame_for_metric(
            fixture.exercise,
            metric,
            sample.timestamp_ms,
        ));
    }

    assert_eq!(session.rep_state().rep_count, 0);
    assert!(!collect(&mut rx)
        .iter()
        .any(|event| matches!(event, SessionEvent::RepCompleted { .. })));
}

#[test]
fn slow_voice_drops_overlapping_requests() {
    let bus = EventBus::new(4096);
    let mut rx = bus.subscribe();
    // 60 wpm: the welcome line alone takes over ten seconds
    let mut session = start(&bus, ExerciseKind::Squat, 60);
    let thresholds = AppConfig::default().exercises.get(ExerciseKind::Squat);

    for frame in synthetic::rep_sequence(ExerciseKind::Squat, thresholds, 2, 0, 33) {
        session.process_frame(frame);
    }

    let events = collect(&mut rx);
    assert!(events
        .iter()
        .any(|event| matches!(event, SessionEvent::SpeechDropped { .. })));
    assert_eq!(session.rep_state().rep_count, 2);
}

#[test]
fn view_tracks_a_whole_session() {
    let bus = EventBus::new(8192);
    let mut rx = bus.subscribe();
    let camera = StubCamera::new();
    let active = camera.active_flag();
    let mut session = TrainerSession::start(
        AppConfig::default(),
        SessionOptions {
            exercise: ExerciseKind::Pushup,
            voice_enabled: true,
            analysis_enabled: false,
        },
        SessionDeps {
            speech: Box::new(TimedSpeech::instant()),
            client: None,
            rng: StdRng::seed_from_u64(5),
            events: bus.clone(),
        },
        Box::new(camera),
        0,
    )
    .unwrap();
    let thresholds = AppConfig::default().exercises.get(ExerciseKind::Pushup);
    let frames = synthetic::rep_sequence(ExerciseKind::Pushup, thresholds, 3, 0, 33);
    let end = frames.last().unwrap().timestamp_ms;

    let mut view = SessionView::new();
    for frame in frames {
        session.process_frame(frame);
        for event in collect(&mut rx) {
            view.apply(&event);
        }
    }
    assert_eq!(view.rep_counter, "3");
    assert_eq!(view.metric_display, "165°");
    assert_eq!(view.camera_status.message, "AI COACH READY - BEGIN WORKOUT!");

    session.reset(end + 10);
    for event in collect(&mut rx) {
        view.apply(&event);
    }
    assert_eq!(view.rep_counter, "0");
    assert_eq!(view.metric_display, "--");

    let report = session.stop(end + 20);
    for event in collect(&mut rx) {
        view.apply(&event);
    }
    assert_eq!(report.total_reps, 0);
    assert!(!active.load(Ordering::SeqCst));
    assert_eq!(view.camera_status.message, "WORKOUT COMPLETE");
    assert_eq!(view.tracking_status.message, "Great session! Ready for next workout");
    assert_eq!(view.feedback.message, "Completed 0 reps! Excellent work!");
}
