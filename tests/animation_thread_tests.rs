//! Animation Thread Tests
//!
//! Tests for:
//! - Frames produced off-thread follow the playback clock
//! - Shutdown returns the animator; drop does not hang

use cubism::animation::Timeline;
use cubism::app::AnimationThread;
use cubism::renderer::RendererSettings;
use cubism::scene::{ModelLayout, SceneAnimator};
use cubism::utils::ManualClock;

fn animator() -> SceneAnimator {
    let timeline = Timeline::from_json_str(
        r#"{ "segments": [
            { "channel": "m", "id": 0, "t0": 0, "t1": 10, "c0": "0", "c1": "1" },
            { "channel": "cp", "t0": 0, "t1": 10, "c0": "0,0,5", "c1": "10,0,5" }
        ] }"#,
    )
    .unwrap();
    let settings = RendererSettings {
        layouts: vec![ModelLayout::RandomScatter { cube_size: 2 }],
        ..Default::default()
    };
    SceneAnimator::from_settings(timeline, &settings)
}

#[test]
fn worker_frames_follow_the_clock() -> anyhow::Result<()> {
    let clock = ManualClock::new(2.0);
    let thread = AnimationThread::spawn(animator(), clock.clone())?;

    let frame = thread.wait_frame()?;
    assert!((frame.time - 2.0).abs() < f32::EPSILON);
    assert_eq!(frame.models.len(), 8);

    clock.set(5.0);
    // Frames computed before the clock moved may still be in flight.
    let mut frame = thread.wait_frame()?;
    for _ in 0..10 {
        if (frame.time - 5.0).abs() < f32::EPSILON {
            break;
        }
        frame = thread.wait_frame()?;
    }
    assert!((frame.time - 5.0).abs() < f32::EPSILON);
    assert!((frame.timeline.model_progress - 0.5).abs() < 1e-5);
    assert!((frame.timeline.camera_position.x - 5.0).abs() < 1e-5);

    let animator = thread.shutdown().expect("worker returns the animator");
    assert_eq!(animator.object_sets().len(), 1);
    Ok(())
}

#[test]
fn latest_frame_eventually_delivers() -> anyhow::Result<()> {
    let thread = AnimationThread::spawn(animator(), ManualClock::new(1.0))?;

    let mut received = None;
    for _ in 0..1000 {
        if let Some(frame) = thread.latest_frame()? {
            received = Some(frame);
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(1));
    }

    let frame = received.expect("worker produced a frame");
    assert!((frame.time - 1.0).abs() < f32::EPSILON);
    Ok(())
}

#[test]
fn dropping_a_blocked_worker_returns() {
    let thread = AnimationThread::spawn(animator(), ManualClock::new(0.0)).unwrap();
    // Give the worker time to fill the slot and block on the next send.
    std::thread::sleep(std::time::Duration::from_millis(20));
    drop(thread);
}
