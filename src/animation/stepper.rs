use crate::{
    animation::clock::{FrameClock, StepStatus},
    foundation::core::FrameIndex,
    foundation::error::{FramestepError, FramestepResult},
};

/// One of the two boundaries of a displayed sub-range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    /// Bottom edge (`low`).
    Low,
    /// Top edge (`high`), the edge a plain progress bar fills with.
    #[default]
    High,
}

/// How a target request is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TargetMode {
    /// Write the value immediately instead of animating toward it.
    pub instant: bool,
    /// Edge the request edits.
    pub edge: Edge,
}

impl TargetMode {
    /// Animate `edge` toward the target.
    pub fn animated(edge: Edge) -> Self {
        Self {
            instant: false,
            edge,
        }
    }

    /// Write `edge` in place.
    pub fn instant(edge: Edge) -> Self {
        Self {
            instant: true,
            edge,
        }
    }
}

/// Closed scalar range `[low, high]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValueRange {
    /// Lower end.
    pub low: f64,
    /// Upper end.
    pub high: f64,
}

impl ValueRange {
    /// Build a range without validation.
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// `high - low`.
    pub fn span(self) -> f64 {
        self.high - self.low
    }

    fn edge(self, edge: Edge) -> f64 {
        match edge {
            Edge::Low => self.low,
            Edge::High => self.high,
        }
    }
}

/// Result of a `set_target`/`modify_target` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetOutcome {
    /// The request matched what is already committed or pending.
    Unchanged,
    /// The edge was written in place.
    Committed,
    /// A new goal is pending; the stepper needs per-frame stepping.
    Animating,
}

/// Construction options for [`ValueStepper`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StepperOpts {
    /// Hard clamp for both edges.
    pub bounds: ValueRange,
    /// Initially displayed range; the full bounds when absent.
    pub initial: Option<ValueRange>,
    /// Seconds one animated move takes, regardless of distance.
    pub time_to_use_secs: f64,
}

impl Default for StepperOpts {
    fn default() -> Self {
        Self {
            bounds: ValueRange::new(0.0, 100.0),
            initial: None,
            time_to_use_secs: 3.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EdgeMotion {
    from: f64,
    goal: f64,
    start: FrameIndex,
}

impl EdgeMotion {
    /// Position at `now` and whether the goal has been reached.
    fn sample(self, now: FrameIndex, duration_frames: f64) -> (f64, bool) {
        let elapsed = now.delta_from(self.start).max(0) as f64;
        if duration_frames <= 0.0 || elapsed >= duration_frames {
            return (self.goal, true);
        }
        let t = elapsed / duration_frames;
        (self.from + (self.goal - self.from) * t, false)
    }
}

/// Drives the two edges of a bounded range toward goals, one linear move per edge.
///
/// Each edge is tracked independently: retargeting one edge never disturbs the other
/// edge's committed value. Both edges stay inside `bounds` with `low <= high` at every
/// observable point, including between frames of a move.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueStepper {
    bounds: ValueRange,
    current: ValueRange,
    low_motion: Option<EdgeMotion>,
    high_motion: Option<EdgeMotion>,
    time_to_use_secs: f64,
}

impl ValueStepper {
    /// Create a stepper; bounds must be finite and ordered.
    pub fn new(opts: StepperOpts) -> FramestepResult<Self> {
        let bounds = opts.bounds;
        if !bounds.low.is_finite() || !bounds.high.is_finite() {
            return Err(FramestepError::validation("stepper bounds must be finite"));
        }
        if bounds.low > bounds.high {
            return Err(FramestepError::validation(
                "stepper bounds must satisfy min <= max",
            ));
        }
        if !opts.time_to_use_secs.is_finite() || opts.time_to_use_secs < 0.0 {
            return Err(FramestepError::validation(
                "time_to_use_secs must be finite and >= 0",
            ));
        }

        let initial = opts.initial.unwrap_or(bounds);
        if !initial.low.is_finite() || !initial.high.is_finite() {
            return Err(FramestepError::validation(
                "initial stepper range must be finite",
            ));
        }
        let high = initial.high.clamp(bounds.low, bounds.high);
        let low = initial.low.clamp(bounds.low, high);

        Ok(Self {
            bounds,
            current: ValueRange::new(low, high),
            low_motion: None,
            high_motion: None,
            time_to_use_secs: opts.time_to_use_secs,
        })
    }

    /// Hard clamp range.
    pub fn bounds(&self) -> ValueRange {
        self.bounds
    }

    /// Live displayed range.
    pub fn current(&self) -> ValueRange {
        self.current
    }

    /// Displayed top edge.
    pub fn value(&self) -> f64 {
        self.current.high
    }

    /// `true` while either edge has a pending goal.
    pub fn is_moving(&self) -> bool {
        self.low_motion.is_some() || self.high_motion.is_some()
    }

    /// Range the stepper is heading to (pending goals, else committed values) and whether
    /// any edge is still in flight.
    pub fn target_range(&self) -> (ValueRange, bool) {
        (
            ValueRange::new(
                self.pending(Edge::Low).unwrap_or(self.current.low),
                self.pending(Edge::High).unwrap_or(self.current.high),
            ),
            self.is_moving(),
        )
    }

    /// Seconds one animated move takes.
    pub fn time_to_use_secs(&self) -> f64 {
        self.time_to_use_secs
    }

    /// Request `value` for `mode.edge`.
    ///
    /// The value is clamped into `bounds` and against the other edge. Re-targeting while a
    /// move is in flight starts the new move from wherever the edge currently is.
    pub fn set_target(
        &mut self,
        clock: &FrameClock,
        value: f64,
        mode: TargetMode,
    ) -> FramestepResult<TargetOutcome> {
        if !value.is_finite() {
            return Err(FramestepError::validation(format!(
                "stepper target must be finite, got {value}"
            )));
        }

        let edge = mode.edge;
        let target = self.clamp_for(edge, value);
        let committed = self.current.edge(edge);
        let pending = self.pending(edge);

        if mode.instant {
            if pending.is_none() && committed == target {
                return Ok(TargetOutcome::Unchanged);
            }
            *self.motion_mut(edge) = None;
            self.write_edge(edge, target);
            return Ok(TargetOutcome::Committed);
        }

        match pending {
            Some(goal) if goal == target => return Ok(TargetOutcome::Unchanged),
            None if committed == target => return Ok(TargetOutcome::Unchanged),
            _ => {}
        }

        *self.motion_mut(edge) = Some(EdgeMotion {
            from: committed,
            goal: target,
            start: clock.get(),
        });
        Ok(TargetOutcome::Animating)
    }

    /// Request `pending_or_committed + delta` for `mode.edge`.
    ///
    /// Reads the pending goal when one exists so rapid repeated calls compose.
    pub fn modify_target(
        &mut self,
        clock: &FrameClock,
        delta: f64,
        mode: TargetMode,
    ) -> FramestepResult<TargetOutcome> {
        if !delta.is_finite() {
            return Err(FramestepError::validation(format!(
                "stepper delta must be finite, got {delta}"
            )));
        }
        let base = self
            .pending(mode.edge)
            .unwrap_or(self.current.edge(mode.edge));
        self.set_target(clock, base + delta, mode)
    }

    /// [`Self::set_target`] with `percentage` of `bounds.high`.
    pub fn set_percentage(
        &mut self,
        clock: &FrameClock,
        percentage: f64,
        mode: TargetMode,
    ) -> FramestepResult<TargetOutcome> {
        self.set_target(clock, percentage / 100.0 * self.bounds.high, mode)
    }

    /// [`Self::modify_target`] with `percentage` of `bounds.high`.
    pub fn modify_percentage(
        &mut self,
        clock: &FrameClock,
        percentage: f64,
        mode: TargetMode,
    ) -> FramestepResult<TargetOutcome> {
        self.modify_target(clock, percentage / 100.0 * self.bounds.high, mode)
    }

    /// Drop pending goals, leaving both edges where they are.
    pub fn cancel(&mut self) {
        self.low_motion = None;
        self.high_motion = None;
    }

    /// Advance every in-flight edge to its position at `clock.get()`.
    pub fn step(&mut self, clock: &FrameClock) -> StepStatus {
        let now = clock.get();
        let duration_frames = clock.secs_to_frames(self.time_to_use_secs);

        let moved_high = self.high_motion.is_some();
        let moved_low = self.low_motion.is_some();

        if let Some(motion) = self.high_motion {
            let (v, landed) = motion.sample(now, duration_frames);
            self.current.high = v;
            if landed {
                self.high_motion = None;
            }
        }
        if let Some(motion) = self.low_motion {
            let (v, landed) = motion.sample(now, duration_frames);
            self.current.low = v;
            if landed {
                self.low_motion = None;
            }
        }

        if self.current.low > self.current.high {
            if moved_high && !moved_low {
                self.current.high = self.current.low;
            } else {
                self.current.low = self.current.high;
            }
        }

        if self.is_moving() {
            StepStatus::Running
        } else {
            StepStatus::Done
        }
    }

    /// Map the displayed range onto a track of `track_len` pixels as `(offset, length)`.
    pub fn fill_span(&self, track_len: f64) -> (f64, f64) {
        let span = self.bounds.span();
        if span <= 0.0 {
            return (0.0, 0.0);
        }
        let offset = track_len * (self.current.low - self.bounds.low) / span;
        let len = track_len * self.current.span() / span;
        (offset, len)
    }

    fn pending(&self, edge: Edge) -> Option<f64> {
        match edge {
            Edge::Low => self.low_motion.map(|m| m.goal),
            Edge::High => self.high_motion.map(|m| m.goal),
        }
    }

    fn motion_mut(&mut self, edge: Edge) -> &mut Option<EdgeMotion> {
        match edge {
            Edge::Low => &mut self.low_motion,
            Edge::High => &mut self.high_motion,
        }
    }

    fn write_edge(&mut self, edge: Edge, value: f64) {
        match edge {
            Edge::Low => self.current.low = value,
            Edge::High => self.current.high = value,
        }
    }

    // Low may not rise above the top edge (committed or pending, whichever is lower);
    // high may not sink below the bottom edge.
    fn clamp_for(&self, edge: Edge, value: f64) -> f64 {
        let v = value.clamp(self.bounds.low, self.bounds.high);
        match edge {
            Edge::Low => {
                let ceiling = self
                    .pending(Edge::High)
                    .map_or(self.current.high, |g| g.min(self.current.high));
                v.min(ceiling)
            }
            Edge::High => {
                let floor = self
                    .pending(Edge::Low)
                    .map_or(self.current.low, |g| g.max(self.current.low));
                v.max(floor)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/stepper.rs"]
mod tests;
