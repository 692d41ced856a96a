use smallvec::SmallVec;
use std::time::Duration;

/// One scheduled transition: starts `delay` after the sequence starts and
/// runs for `duration`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedStep<E> {
    pub delay: Duration,
    pub duration: Duration,
    pub effect: E,
}

impl<E> TimedStep<E> {
    pub fn new(delay_sec: f32, duration_sec: f32, effect: E) -> Self {
        Self {
            delay: Duration::from_secs_f32(delay_sec.max(0.0)),
            duration: Duration::from_secs_f32(duration_sec.max(0.0)),
            effect,
        }
    }

    #[inline]
    pub fn end(&self) -> Duration {
        self.delay + self.duration
    }

    /// Linear progress in [0, 1] at `elapsed`, or `None` before the step begins.
    pub fn progress_at(&self, elapsed: Duration) -> Option<f32> {
        if elapsed < self.delay {
            return None;
        }
        if self.duration.is_zero() {
            return Some(1.0);
        }
        let t = (elapsed - self.delay).as_secs_f32() / self.duration.as_secs_f32();
        Some(t.clamp(0.0, 1.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceState {
    Idle,
    Animating,
    Settled,
}

/// Progress of one step for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepFrame<E> {
    pub effect: E,
    pub progress: f32,
}

pub type StepFrames<E> = SmallVec<[StepFrame<E>; 4]>;

/// Runs an ordered list of timed steps once.
///
/// The sequencer never reads a wall clock; callers feed it frame deltas.
#[derive(Clone, Debug)]
pub struct Sequencer<E> {
    steps: Vec<TimedStep<E>>,
    finished: Vec<bool>,
    elapsed: Option<Duration>,
}

impl<E: Copy> Sequencer<E> {
    pub fn new(steps: Vec<TimedStep<E>>) -> Self {
        let finished = vec![false; steps.len()];
        Self {
            steps,
            finished,
            elapsed: None,
        }
    }

    pub fn steps(&self) -> &[TimedStep<E>] {
        &self.steps
    }

    /// Starts the sequence. One-shot: returns `false` if it already started.
    pub fn start(&mut self) -> bool {
        if self.elapsed.is_some() {
            return false;
        }
        self.elapsed = Some(Duration::ZERO);
        true
    }

    pub fn state(&self) -> SequenceState {
        match self.elapsed {
            None => SequenceState::Idle,
            Some(_) if self.finished.iter().all(|f| *f) => SequenceState::Settled,
            Some(_) => SequenceState::Animating,
        }
    }

    pub fn total_duration(&self) -> Duration {
        self.steps
            .iter()
            .map(TimedStep::end)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// Moves the clock forward and reports every running step.
    ///
    /// A step reports progress 1.0 exactly once and is silent afterwards.
    pub fn advance(&mut self, dt: Duration) -> StepFrames<E> {
        let mut frames = StepFrames::new();
        let Some(elapsed) = self.elapsed.as_mut() else {
            return frames;
        };
        *elapsed += dt;
        let now = *elapsed;
        for (step, finished) in self.steps.iter().zip(self.finished.iter_mut()) {
            if *finished {
                continue;
            }
            if let Some(progress) = step.progress_at(now) {
                if progress >= 1.0 {
                    *finished = true;
                }
                frames.push(StepFrame {
                    effect: step.effect,
                    progress,
                });
            }
        }
        frames
    }
}
