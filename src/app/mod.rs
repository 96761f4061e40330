//! Application-side helpers.
//!
//! [`AnimationThread`] moves per-frame animation work off the render thread.

pub mod animation_thread;

pub use animation_thread::AnimationThread;
