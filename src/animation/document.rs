//! Timeline document loader.
//!
//! ```json
//! {
//!   "segments": [
//!     { "channel": "m",  "id": 1, "t0": 0.0, "t1": 8.0, "c0": "0", "c1": "1" },
//!     { "channel": "cp", "i": "hermite", "t0": 0.0, "t1": 8.0,
//!       "c0": "0, 0, 5", "c1": "4, 2, 5", "c2": [6.0, 4.0, 2.0] }
//!   ]
//! }
//! ```
//!
//! Control lists are either comma-separated text (the legacy markup form) or
//! plain JSON arrays. Missing numeric fields default to zero, missing control
//! lists to empty.

use serde::Deserialize;

use crate::animation::segment::{ControlSegment, ControlVector, InterpolationMode};
use crate::animation::timeline::{ChannelKind, Timeline};
use crate::errors::{CubismError, Result};

#[derive(Debug, Deserialize)]
struct TimelineDocument {
    #[serde(default)]
    segments: Vec<SegmentRecord>,
}

#[derive(Debug, Deserialize)]
struct SegmentRecord {
    channel: String,
    #[serde(default)]
    id: i32,
    #[serde(default)]
    i: Option<String>,
    #[serde(default)]
    t0: f32,
    #[serde(default)]
    t1: f32,
    #[serde(default)]
    c0: Option<ControlField>,
    #[serde(default)]
    c1: Option<ControlField>,
    #[serde(default)]
    c2: Option<ControlField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ControlField {
    Text(String),
    Values(Vec<f32>),
}

pub(crate) fn parse_timeline(json: &str) -> Result<Timeline> {
    let document: TimelineDocument = serde_json::from_str(json)?;
    let mut timeline = Timeline::new();

    for (index, record) in document.segments.into_iter().enumerate() {
        let kind = ChannelKind::from_tag(record.channel.trim())
            .ok_or_else(|| CubismError::UnknownChannel(record.channel.clone()))?;
        let segment = build_segment(index, record)?;
        timeline.push(kind, segment);
    }

    log::debug!(
        "Loaded timeline: {} segments, ends at {:.2}s",
        ChannelKind::ALL
            .iter()
            .map(|kind| timeline.channel(*kind).segments().len())
            .sum::<usize>(),
        timeline.end_time()
    );

    Ok(timeline)
}

fn build_segment(index: usize, record: SegmentRecord) -> Result<ControlSegment> {
    if !record.t0.is_finite() || !record.t1.is_finite() || record.t0 > record.t1 {
        return Err(CubismError::InvalidTimeRange {
            segment: index,
            start: record.t0,
            end: record.t1,
        });
    }

    Ok(ControlSegment {
        id: record.id,
        interpolation: InterpolationMode::from_tag(record.i.as_deref()),
        time_start: record.t0,
        time_end: record.t1,
        control0: parse_control(index, "c0", record.c0)?,
        control1: parse_control(index, "c1", record.c1)?,
        control2: parse_control(index, "c2", record.c2)?,
    })
}

fn parse_control(
    index: usize,
    field: &'static str,
    value: Option<ControlField>,
) -> Result<ControlVector> {
    match value {
        None => Ok(ControlVector::new()),
        Some(ControlField::Values(values)) => Ok(ControlVector::from_vec(values)),
        Some(ControlField::Text(text)) => parse_float_list(&text).ok_or_else(|| {
            CubismError::MalformedNumber {
                segment: index,
                field,
                value: text,
            }
        }),
    }
}

/// Parses `"1.0, 2, -3.5"`. Blank text is an empty list.
fn parse_float_list(text: &str) -> Option<ControlVector> {
    if text.trim().is_empty() {
        return Some(ControlVector::new());
    }
    text.split(',')
        .map(|item| item.trim().parse::<f32>().ok())
        .collect()
}
