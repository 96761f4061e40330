//! Animation System Tests
//!
//! Tests for:
//! - Control segment blending (hold, linear, quadratic Bézier)
//! - Hermite (smoothstep) remapping
//! - Channel lookup: first match wins, misses keep the previous output
//! - Timeline evaluation of all five channels
//! - Timeline document loading and validation

use glam::{Vec3, Vec4};

use cubism::animation::{Channel, ChannelKind, ControlSegment, InterpolationMode, Timeline, TimelineState};
use cubism::errors::CubismError;

// ============================================================================
// Helpers
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn slice_approx(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| approx(*x, *y))
}

fn linear(start: f32, end: f32, c0: &[f32], c1: &[f32]) -> ControlSegment {
    ControlSegment::new(0, InterpolationMode::Linear, start, end, c0).with_control1(c1)
}

// ============================================================================
// Segment Blending
// ============================================================================

#[test]
fn linear_segment_blends_at_midpoint() {
    let seg = linear(0.0, 2.0, &[0.0, 0.0, 0.0], &[2.0, 4.0, 6.0]);
    let mut out = [0.0; 3];
    seg.sample_into(1.0, &mut out);
    assert!(slice_approx(&out, &[1.0, 2.0, 3.0]));
}

#[test]
fn linear_and_hermite_agree_at_midpoint() {
    let lin = linear(0.0, 1.0, &[0.0], &[10.0]);
    let mut herm = lin.clone();
    herm.interpolation = InterpolationMode::Hermite;

    let (mut a, mut b) = ([0.0; 1], [0.0; 1]);
    lin.sample_into(0.5, &mut a);
    herm.sample_into(0.5, &mut b);
    assert!(approx(a[0], 5.0));
    assert!(approx(b[0], 5.0));
}

#[test]
fn symmetric_bezier_peaks_at_half_the_middle_point() {
    let seg = linear(0.0, 1.0, &[0.0], &[10.0]).with_control2(&[0.0]);
    let mut out = [0.0; 1];
    seg.sample_into(0.5, &mut out);
    assert!(approx(out[0], 5.0));
}

#[test]
fn linear_segment_hits_endpoints() {
    let seg = linear(1.0, 3.0, &[10.0], &[20.0]);
    let mut out = [0.0; 1];
    seg.sample_into(1.0, &mut out);
    assert!(approx(out[0], 10.0));
    seg.sample_into(3.0, &mut out);
    assert!(approx(out[0], 20.0));
}

#[test]
fn hermite_segment_uses_smoothstep() {
    let seg = ControlSegment::new(0, InterpolationMode::Hermite, 0.0, 1.0, &[0.0]).with_control1(&[1.0]);
    let mut out = [0.0; 1];

    seg.sample_into(0.25, &mut out);
    // 3·0.25² − 2·0.25³
    assert!(approx(out[0], 0.156_25), "got {}", out[0]);

    seg.sample_into(0.5, &mut out);
    assert!(approx(out[0], 0.5));
}

#[test]
fn three_point_segment_follows_quadratic_bezier() {
    let seg = linear(0.0, 1.0, &[0.0, 0.0], &[1.0, 2.0]).with_control2(&[0.0, 4.0]);
    assert_eq!(seg.control_point_count(), 3);

    let mut out = [0.0; 2];
    seg.sample_into(0.5, &mut out);
    // 0.25·p0 + 0.5·p1 + 0.25·p2
    assert!(slice_approx(&out, &[0.5, 2.0]));

    seg.sample_into(1.0, &mut out);
    assert!(slice_approx(&out, &[0.0, 4.0]));
}

#[test]
fn single_point_and_constant_segments_hold_control0() {
    let single = ControlSegment::new(0, InterpolationMode::Linear, 0.0, 4.0, &[7.0, 8.0]);
    let constant = ControlSegment::new(0, InterpolationMode::Constant, 0.0, 4.0, &[1.0, 2.0])
        .with_control1(&[100.0, 200.0]);

    let mut out = [0.0; 2];
    single.sample_into(3.0, &mut out);
    assert!(slice_approx(&out, &[7.0, 8.0]));

    constant.sample_into(3.0, &mut out);
    assert!(slice_approx(&out, &[1.0, 2.0]));
}

#[test]
fn zero_length_window_yields_control0() {
    let seg = linear(2.0, 2.0, &[5.0], &[9.0]);
    assert!(seg.contains(2.0));
    assert!(approx(seg.normalized_t(2.0), 0.0));

    let mut out = [0.0; 1];
    seg.sample_into(2.0, &mut out);
    assert!(approx(out[0], 5.0));
}

#[test]
fn interpolation_tag_parsing_defaults_to_linear() {
    assert_eq!(InterpolationMode::from_tag(Some("hermite")), InterpolationMode::Hermite);
    assert_eq!(InterpolationMode::from_tag(Some("constant")), InterpolationMode::Constant);
    assert_eq!(InterpolationMode::from_tag(Some("bogus")), InterpolationMode::Linear);
    assert_eq!(InterpolationMode::from_tag(None), InterpolationMode::Linear);
}

// ============================================================================
// Channel Lookup
// ============================================================================

#[test]
fn first_authored_segment_wins_on_overlap() {
    let mut channel = Channel::new(1);
    channel.push(ControlSegment::new(1, InterpolationMode::Linear, 0.0, 2.0, &[1.0]));
    channel.push(ControlSegment::new(2, InterpolationMode::Linear, 1.0, 3.0, &[2.0]));

    assert_eq!(channel.evaluate(1.5), Some(1));
    assert!(approx(channel.output()[0], 1.0));

    assert_eq!(channel.evaluate(2.5), Some(2));
    assert!(approx(channel.output()[0], 2.0));
}

#[test]
fn window_bounds_are_inclusive() {
    let mut channel = Channel::new(1);
    channel.push(linear(1.0, 2.0, &[0.0], &[1.0]));

    assert_eq!(channel.evaluate(1.0), Some(0));
    assert_eq!(channel.evaluate(2.0), Some(0));
    assert!(approx(channel.output()[0], 1.0));
}

#[test]
fn miss_keeps_previous_output() {
    let mut channel = Channel::new(3);
    channel.push(linear(0.0, 1.0, &[0.0, 0.0, 0.0], &[3.0, 3.0, 3.0]));

    assert!(channel.evaluate(0.5).is_some());
    let before: Vec<f32> = channel.output().to_vec();

    assert_eq!(channel.evaluate(5.0), None);
    assert_eq!(channel.output(), before.as_slice());
}

#[test]
fn empty_channel_reports_initial_value() {
    let mut channel = Channel::new(2).with_initial(&[4.0, 2.0]);
    assert!(channel.is_empty());
    assert_eq!(channel.evaluate(0.0), None);
    assert!(slice_approx(channel.output(), &[4.0, 2.0]));
    assert!(approx(channel.end_time(), 0.0));
}

// ============================================================================
// Timeline
// ============================================================================

fn sample_timeline() -> Timeline {
    let mut timeline = Timeline::new();
    timeline.push(ChannelKind::Model, linear(0.0, 4.0, &[0.0], &[1.0]));
    let mut second = linear(4.0, 8.0, &[0.0], &[1.0]);
    second.id = 1;
    timeline.push(ChannelKind::Model, second);
    timeline.push(
        ChannelKind::CameraPosition,
        linear(0.0, 8.0, &[0.0, 0.0, 5.0], &[8.0, 0.0, 5.0]),
    );
    timeline.push(
        ChannelKind::LightPosition,
        ControlSegment::new(0, InterpolationMode::Constant, 0.0, 8.0, &[3.0, 3.0, 3.0]),
    );
    timeline.push(
        ChannelKind::ForegroundColor,
        linear(0.0, 2.0, &[0.0, 0.0, 0.0, 1.0], &[0.0, 0.0, 0.0, 0.0]),
    );
    timeline
}

#[test]
fn timeline_evaluates_every_channel() {
    let mut timeline = sample_timeline();
    let mut state = TimelineState::default();

    timeline.interpolate(2.0, &mut state);
    assert_eq!(state.model_id, 0);
    assert!(approx(state.model_progress, 0.5));
    assert_eq!(state.camera_position, Vec3::new(2.0, 0.0, 5.0));
    assert_eq!(state.camera_look_at, Vec3::ZERO);
    assert_eq!(state.light_position, Vec3::splat(3.0));
    assert_eq!(state.foreground_color, Vec4::ZERO);
}

#[test]
fn timeline_switches_model_and_supports_seeking_back() {
    let mut timeline = sample_timeline();
    let mut state = TimelineState::default();

    timeline.interpolate(6.0, &mut state);
    assert_eq!(state.model_id, 1);
    assert!(approx(state.model_progress, 0.5));

    timeline.interpolate(1.0, &mut state);
    assert_eq!(state.model_id, 0);
    assert!(approx(state.model_progress, 0.25));
    assert!(approx(state.foreground_color.w, 0.5));
}

#[test]
fn timeline_past_the_end_holds_last_values() {
    let mut timeline = sample_timeline();
    let mut state = TimelineState::default();

    timeline.interpolate(8.0, &mut state);
    let at_end = state;
    timeline.interpolate(20.0, &mut state);
    assert_eq!(state, at_end);
    assert!(approx(timeline.end_time(), 8.0));
}

// ============================================================================
// Timeline Documents
// ============================================================================

const DOCUMENT: &str = r#"{
    "segments": [
        { "channel": "m",  "id": 2, "t0": 0.0, "t1": 10.0, "c0": "0", "c1": "1" },
        { "channel": "cp", "i": "hermite", "t0": 0.0, "t1": 10.0,
          "c0": " 0, 0, 5 ", "c1": "4,2,5", "c2": [6.0, 4.0, 2.0] },
        { "channel": "la", "t0": 0.0, "t1": 10.0, "c0": "0,0,0" },
        { "channel": "lp", "i": "constant", "t0": 0.0, "t1": 10.0, "c0": "1,2,3", "c1": "9,9,9" },
        { "channel": "fg", "t0": 0.0, "t1": 10.0, "c0": "1,1,1,1", "c1": "", "c2": "" }
    ]
}"#;

#[test]
fn document_populates_channels_in_order() {
    let timeline = Timeline::from_json_str(DOCUMENT).unwrap();

    let cp = timeline.channel(ChannelKind::CameraPosition).segments();
    assert_eq!(cp.len(), 1);
    assert_eq!(cp[0].interpolation, InterpolationMode::Hermite);
    assert_eq!(cp[0].control0.as_slice(), &[0.0, 0.0, 5.0]);
    assert_eq!(cp[0].control2.as_slice(), &[6.0, 4.0, 2.0]);
    assert_eq!(cp[0].control_point_count(), 3);

    let fg = timeline.channel(ChannelKind::ForegroundColor).segments();
    assert_eq!(fg[0].control_point_count(), 1);
    assert_eq!(fg[0].interpolation, InterpolationMode::Linear);

    assert!(approx(timeline.end_time(), 10.0));
}

#[test]
fn document_drives_timeline_state() {
    let mut timeline = Timeline::from_json_str(DOCUMENT).unwrap();
    let mut state = TimelineState::default();

    timeline.interpolate(5.0, &mut state);
    assert_eq!(state.model_id, 2);
    assert!(approx(state.model_progress, 0.5));
    assert_eq!(state.light_position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(state.foreground_color, Vec4::ONE);
}

#[test]
fn unknown_channel_is_an_error() {
    let err = Timeline::from_json_str(r#"{ "segments": [{ "channel": "zz", "t0": 0, "t1": 1 }] }"#)
        .unwrap_err();
    assert!(matches!(err, CubismError::UnknownChannel(tag) if tag == "zz"));
}

#[test]
fn reversed_window_is_an_error() {
    let err = Timeline::from_json_str(r#"{ "segments": [{ "channel": "cp", "t0": 3, "t1": 1 }] }"#)
        .unwrap_err();
    assert!(matches!(err, CubismError::InvalidTimeRange { segment: 0, .. }));
}

#[test]
fn malformed_number_names_segment_and_field() {
    let err = Timeline::from_json_str(
        r#"{ "segments": [
            { "channel": "cp", "t0": 0, "t1": 1, "c0": "1,2,3" },
            { "channel": "la", "t0": 0, "t1": 1, "c1": "1,two,3" }
        ] }"#,
    )
    .unwrap_err();

    match err {
        CubismError::MalformedNumber { segment, field, value } => {
            assert_eq!(segment, 1);
            assert_eq!(field, "c1");
            assert_eq!(value, "1,two,3");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn invalid_json_is_an_error() {
    assert!(matches!(
        Timeline::from_json_str("{ not json"),
        Err(CubismError::JsonError(_))
    ));
}

#[test]
fn empty_document_is_an_empty_timeline() {
    let timeline = Timeline::from_json_str("{}").unwrap();
    assert!(ChannelKind::ALL.iter().all(|k| timeline.channel(*k).is_empty()));
    assert!(approx(timeline.end_time(), 0.0));
}
