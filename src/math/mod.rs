//! Matrix construction helpers.
//!
//! Thin, allocation-free builders on top of [`glam::Mat4`]. Matrices follow
//! glam's column-vector convention, so a model matrix reads
//! `translate × (rotate × scale)` and `to_column_array` yields the
//! GL-compatible column-major layout.

pub mod matrix;

pub use matrix::{
    extrude, frustum, identity, look_at, multiply, perspective, rotate, scale, to_column_array,
    translate, uniform_scale,
};
