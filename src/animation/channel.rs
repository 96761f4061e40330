use crate::animation::segment::{ControlSegment, ControlVector};

/// An independently evaluated animation stream.
///
/// Segments are kept in authoring order and scanned linearly; the first
/// window containing the query time wins. When no window matches, the
/// previous output is left untouched.
#[derive(Debug, Clone, Default)]
pub struct Channel {
    segments: Vec<ControlSegment>,
    output: ControlVector,
}

impl Channel {
    /// Empty channel whose output has `dimension` components, all zero.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            segments: Vec::new(),
            output: ControlVector::from_elem(0.0, dimension),
        }
    }

    /// Overrides the value reported before any segment matched.
    #[must_use]
    pub fn with_initial(mut self, output: &[f32]) -> Self {
        self.output = ControlVector::from_slice(output);
        self
    }

    pub fn push(&mut self, segment: ControlSegment) {
        self.segments.push(segment);
    }

    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[ControlSegment] {
        &self.segments
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.output.len()
    }

    #[inline]
    #[must_use]
    pub fn output(&self) -> &[f32] {
        &self.output
    }

    /// First authored segment whose window contains `time`.
    #[must_use]
    pub fn find_segment(&self, time: f32) -> Option<&ControlSegment> {
        self.segments.iter().find(|segment| segment.contains(time))
    }

    /// Updates the output for `time`.
    ///
    /// Returns the id of the matched segment, or `None` (output unchanged)
    /// when no window covers `time`. Discrete channels use the id directly.
    pub fn evaluate(&mut self, time: f32) -> Option<i32> {
        let segment = self.segments.iter().find(|segment| segment.contains(time))?;
        segment.sample_into(time, &mut self.output);
        Some(segment.id)
    }

    /// Latest end time over all segments, `0` for an empty channel.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.segments
            .iter()
            .map(|segment| segment.time_end)
            .fold(0.0_f32, f32::max)
    }
}
