//! Blend kernels shared by timeline channels and per-object curves.
//!
//! All kernels write into a caller-provided slice and only touch the common
//! prefix of the inputs and the output, so mismatched vector lengths are
//! tolerated silently.

/// Hermite ease-in / ease-out remap `t²(3 − 2t)`.
#[inline]
#[must_use]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Copies `p0` into `out`.
pub fn hold_into(out: &mut [f32], p0: &[f32]) {
    let len = out.len().min(p0.len());
    out[..len].copy_from_slice(&p0[..len]);
}

/// Linear blend `p0 + (p1 − p0)·t`.
pub fn lerp_into(out: &mut [f32], p0: &[f32], p1: &[f32], t: f32) {
    for ((o, a), b) in out.iter_mut().zip(p0).zip(p1) {
        *o = a + (b - a) * t;
    }
}

/// Quadratic Bézier blend with weights `(1−t)²`, `2(1−t)t`, `t²`.
pub fn bezier2_into(out: &mut [f32], p0: &[f32], p1: &[f32], p2: &[f32], t: f32) {
    let w0 = (1.0 - t) * (1.0 - t);
    let w1 = 2.0 * (1.0 - t) * t;
    let w2 = t * t;

    for (((o, a), b), c) in out.iter_mut().zip(p0).zip(p1).zip(p2) {
        *o = w0 * a + w1 * b + w2 * c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothstep_fixed_points() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(0.5), 0.5);
        assert_eq!(smoothstep(1.0), 1.0);
    }

    #[test]
    fn lerp_uses_shortest_length() {
        let mut out = [9.0_f32; 3];
        lerp_into(&mut out, &[0.0, 0.0], &[10.0, 20.0, 30.0], 0.5);
        assert_eq!(out, [5.0, 10.0, 9.0]);
    }

    #[test]
    fn bezier_endpoints() {
        let mut out = [0.0_f32; 1];
        bezier2_into(&mut out, &[1.0], &[7.0], &[3.0], 0.0);
        assert_eq!(out[0], 1.0);
        bezier2_into(&mut out, &[1.0], &[7.0], &[3.0], 1.0);
        assert_eq!(out[0], 3.0);
    }
}
