//! Optional worker thread for the animation side of a frame.
//!
//! The worker owns the [`SceneAnimator`] and a [`PlaybackClock`]. It ticks,
//! then hands a copy of the [`FrameState`] over a one-slot channel. While the
//! slot is full the worker blocks, so it is never more than one frame ahead
//! of the render side.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use flume::{Receiver, TryRecvError};

use crate::errors::{CubismError, Result};
use crate::scene::{FrameState, SceneAnimator};
use crate::utils::PlaybackClock;

pub struct AnimationThread {
    receiver: Option<Receiver<FrameState>>,
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<SceneAnimator>>,
}

impl AnimationThread {
    pub fn spawn<C>(mut animator: SceneAnimator, mut clock: C) -> Result<Self>
    where
        C: PlaybackClock + 'static,
    {
        let (sender, receiver) = flume::bounded(1);
        let cancel = Arc::new(AtomicBool::new(false));
        let worker_cancel = Arc::clone(&cancel);

        let handle = thread::Builder::new()
            .name("cubism-animation".to_string())
            .spawn(move || {
                log::debug!("Animation thread started");
                while !worker_cancel.load(Ordering::Acquire) {
                    let time = clock.current_time();
                    let frame = animator.tick(time).clone();
                    if sender.send(frame).is_err() {
                        break;
                    }
                }
                log::debug!("Animation thread stopped");
                animator
            })?;

        Ok(Self {
            receiver: Some(receiver),
            cancel,
            handle: Some(handle),
        })
    }

    /// Blocks until the worker delivers the next frame.
    pub fn wait_frame(&self) -> Result<FrameState> {
        self.receiver
            .as_ref()
            .ok_or(CubismError::AnimationThreadDisconnected)?
            .recv()
            .map_err(|_| CubismError::AnimationThreadDisconnected)
    }

    /// The pending frame, if the worker has finished one.
    pub fn latest_frame(&self) -> Result<Option<FrameState>> {
        let Some(receiver) = self.receiver.as_ref() else {
            return Err(CubismError::AnimationThreadDisconnected);
        };
        match receiver.try_recv() {
            Ok(frame) => Ok(Some(frame)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(CubismError::AnimationThreadDisconnected),
        }
    }

    /// Stops the worker and returns the animator it owned.
    ///
    /// `None` if the worker panicked.
    pub fn shutdown(mut self) -> Option<SceneAnimator> {
        self.stop()
    }

    fn stop(&mut self) -> Option<SceneAnimator> {
        self.cancel.store(true, Ordering::Release);
        // Dropping the receiver wakes a worker blocked on a full slot.
        self.receiver = None;
        let handle = self.handle.take()?;
        match handle.join() {
            Ok(animator) => Some(animator),
            Err(_) => {
                log::error!("Animation thread panicked");
                None
            }
        }
    }
}

impl Drop for AnimationThread {
    fn drop(&mut self) {
        self.stop();
    }
}
