use crate::constants::{EFFECT_DEBOUNCE_MS, EFFECT_SMOOTHING, ROTATION_PER_SCROLL_PX};
use std::time::Duration;

/// Fires once after a quiet period with no `arm` calls.
///
/// Re-arming moves the deadline, which is equivalent to cancelling the pending
/// callback and scheduling a fresh one.
#[derive(Clone, Debug)]
pub struct Debounce {
    window: Duration,
    deadline: Option<Duration>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn arm(&mut self, now: Duration) {
        self.deadline = Some(now + self.window);
    }

    /// Returns `true` exactly once when `now` reaches the deadline.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Maps page scroll to the model rotation and the noise effect intensity.
///
/// The controller keeps its own virtual clock that only advances through
/// [`ScrollEffect::tick`], so tests drive it with plain durations.
///
/// Scroll events land between frames, after the last tick. The quiet period is
/// therefore armed at the end of the next tick, never before the event itself.
#[derive(Clone, Debug)]
pub struct ScrollEffect {
    scroll_offset_px: f32,
    current: f32,
    target: f32,
    clock: Duration,
    debounce: Debounce,
    rearm: bool,
}

impl Default for ScrollEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollEffect {
    pub fn new() -> Self {
        Self {
            scroll_offset_px: 0.0,
            current: 0.0,
            target: 0.0,
            clock: Duration::ZERO,
            debounce: Debounce::new(Duration::from_millis(EFFECT_DEBOUNCE_MS)),
            rearm: false,
        }
    }

    /// A scroll event: full effect now, decay after the quiet period.
    pub fn on_scroll(&mut self) {
        self.target = 1.0;
        self.rearm = true;
    }

    pub fn set_scroll_offset(&mut self, px: f32) {
        self.scroll_offset_px = px;
    }

    /// One frame: arm or expire the debounce, then one smoothing step toward target.
    pub fn tick(&mut self, dt: Duration) {
        self.clock += dt;
        if std::mem::take(&mut self.rearm) {
            self.debounce.arm(self.clock);
        }
        if self.debounce.poll(self.clock) {
            self.target = 0.0;
        }
        self.current += (self.target - self.current) * EFFECT_SMOOTHING;
    }

    #[inline]
    pub fn current_intensity(&self) -> f32 {
        self.current.clamp(0.0, 1.0)
    }

    #[inline]
    pub fn target_intensity(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn current_rotation(&self) -> f32 {
        rotation_for_offset(self.scroll_offset_px)
    }

    #[inline]
    pub fn decay_pending(&self) -> bool {
        self.rearm || self.debounce.is_pending()
    }
}

/// Direct, lag-free mapping from scroll offset (CSS px) to Y rotation (radians).
#[inline]
pub fn rotation_for_offset(px: f32) -> f32 {
    px * ROTATION_PER_SCROLL_PX
}
