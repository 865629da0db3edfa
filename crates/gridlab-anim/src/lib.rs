//! Incremental playback of a computed path: [`AnimationSession`],
//! [`Animator`], [`AnimationHandle`].
//!
//! [`AnimationSession`] is the state machine: it reveals one position per
//! [`step`](AnimationSession::step) and carries a shared live flag.
//! [`Animator`] drives a session on a worker thread, sleeping a fixed
//! interval between reveals, and allows at most one session at a time.
//! Cancellation is cooperative and observed only at step boundaries, so a
//! reveal that has already been delivered is never retracted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use gridlab_core::Position;

/// Delay between successive reveals unless overridden with
/// [`Animator::with_interval`].
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_micros(100);

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// Outcome of a single [`AnimationSession::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The next position along the path, now part of the revealed prefix.
    Reveal(Position),
    /// The live flag was cleared with positions still remaining.
    Cancelled,
    /// The whole path has been revealed; the live flag is now cleared.
    Done,
}

// ---------------------------------------------------------------------------
// AnimationSession
// ---------------------------------------------------------------------------

/// Replays a path one position at a time.
///
/// The session owns the path and a cursor into it, plus a shared live flag.
/// Exhaustion is checked before cancellation, so a flag cleared after the
/// final reveal still reports [`Step::Done`], and `step` keeps returning
/// `Done` once the path is spent.
#[derive(Debug)]
pub struct AnimationSession {
    path: Vec<Position>,
    cursor: usize,
    live: Arc<AtomicBool>,
}

impl AnimationSession {
    /// Create a live session over `path`.
    pub fn new(path: Vec<Position>) -> Self {
        Self::with_flag(path, Arc::new(AtomicBool::new(true)))
    }

    /// Create a session sharing an externally owned live flag.
    /// The flag must already be set.
    fn with_flag(path: Vec<Position>, live: Arc<AtomicBool>) -> Self {
        Self {
            path,
            cursor: 0,
            live,
        }
    }

    /// Advance by one step.
    ///
    /// Returns [`Step::Reveal`] with the position under the cursor,
    /// [`Step::Done`] when the path is exhausted (clearing the live flag),
    /// or [`Step::Cancelled`] when the flag was cleared mid-path.
    pub fn step(&mut self) -> Step {
        if self.cursor == self.path.len() {
            self.live.store(false, Ordering::Relaxed);
            return Step::Done;
        }
        if !self.live.load(Ordering::Relaxed) {
            return Step::Cancelled;
        }
        let pos = self.path[self.cursor];
        self.cursor += 1;
        Step::Reveal(pos)
    }

    /// The positions revealed so far, in path order.
    pub fn revealed(&self) -> &[Position] {
        &self.path[..self.cursor]
    }

    /// Whether the session is still live.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Relaxed)
    }

    /// Request cancellation. The next [`step`](Self::step) with positions
    /// remaining returns [`Step::Cancelled`].
    #[inline]
    pub fn cancel(&self) {
        self.live.store(false, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Animator
// ---------------------------------------------------------------------------

/// Thread-backed scheduler for [`AnimationSession`]s.
///
/// At most one session runs at a time; an [`animate`](Self::animate) call
/// while a session is live is dropped, not queued. The same atomic doubles
/// as the busy marker and the session's cancellation flag.
#[derive(Debug)]
pub struct Animator {
    animating: Arc<AtomicBool>,
    interval: Duration,
}

impl Animator {
    /// Create an animator using [`DEFAULT_STEP_INTERVAL`].
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_STEP_INTERVAL)
    }

    /// Create an animator with a custom per-step delay.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            animating: Arc::new(AtomicBool::new(false)),
            interval,
        }
    }

    /// Whether a session is currently live.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animating.load(Ordering::Relaxed)
    }

    /// Begin revealing `path`, invoking `on_step` for each position.
    ///
    /// Returns `None` without starting anything if a session is already
    /// live. Otherwise spawns a worker that steps the session, calls
    /// `on_step` with each revealed position, and sleeps the configured
    /// interval between reveals until the session completes or is
    /// cancelled through the returned [`AnimationHandle`].
    pub fn animate<F>(&self, path: Vec<Position>, mut on_step: F) -> Option<AnimationHandle>
    where
        F: FnMut(Position) + Send + 'static,
    {
        if self.animating.swap(true, Ordering::Relaxed) {
            log::debug!("Animation already in progress, dropping request");
            return None;
        }
        let mut session = AnimationSession::with_flag(path, self.animating.clone());
        let interval = self.interval;
        let worker = thread::spawn(move || loop {
            match session.step() {
                Step::Reveal(pos) => {
                    on_step(pos);
                    thread::sleep(interval);
                }
                Step::Cancelled | Step::Done => break,
            }
        });
        Some(AnimationHandle {
            live: self.animating.clone(),
            worker,
        })
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// AnimationHandle
// ---------------------------------------------------------------------------

/// Handle to a running animation worker.
#[derive(Debug)]
pub struct AnimationHandle {
    live: Arc<AtomicBool>,
    worker: JoinHandle<()>,
}

impl AnimationHandle {
    /// Request cancellation. The worker stops at its next step boundary;
    /// positions already revealed stay revealed.
    #[inline]
    pub fn cancel(&self) {
        self.live.store(false, Ordering::Relaxed);
    }

    /// Whether the session is still live.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.live.load(Ordering::Relaxed)
    }

    /// Wait for the worker to observe completion or cancellation.
    pub fn join(self) {
        if self.worker.join().is_err() {
            log::warn!("Animation worker panicked");
        }
    }
}
