use std::collections::BTreeSet;

use crate::{
    animation::clock::{FrameClock, StepStatus},
    animation::sequencer::ActionSequencer,
    animation::stepper::{TargetMode, TargetOutcome, ValueStepper},
    animation::transition::{TransitionParams, TransitionStepper},
    foundation::core::{Fps, FrameIndex},
    foundation::error::{FramestepError, FramestepResult},
    render::surface::Surface,
};

/// Handle to a [`ValueStepper`] owned by a [`Scheduler`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct StepperId(usize);

/// Handle to an [`ActionSequencer`] owned by a [`Scheduler`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SequenceId(usize);

/// Handle to a [`TransitionStepper`] owned by a [`Scheduler`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TransitionId(usize);

/// Any registered animation.
///
/// Ordering is the advance order: steppers, then sequencers, then transitions, each by
/// ascending id.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum AnimId {
    /// A value stepper.
    Stepper(StepperId),
    /// An action sequencer.
    Sequence(SequenceId),
    /// A size transition.
    Transition(TransitionId),
}

impl From<StepperId> for AnimId {
    fn from(id: StepperId) -> Self {
        Self::Stepper(id)
    }
}

impl From<SequenceId> for AnimId {
    fn from(id: SequenceId) -> Self {
        Self::Sequence(id)
    }
}

impl From<TransitionId> for AnimId {
    fn from(id: TransitionId) -> Self {
        Self::Transition(id)
    }
}

/// What one [`Scheduler::advance_all`] call did.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct AdvanceReport {
    /// Frame the animations were advanced to.
    pub frame: FrameIndex,
    /// Every animation advanced, in advance order.
    pub advanced: Vec<AnimId>,
    /// Animations that finished this frame and left the active set.
    pub completed: Vec<AnimId>,
}

/// Construction options for [`Scheduler`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SchedulerOpts {
    /// Clock rate.
    pub fps: Fps,
}

/// Owns the frame clock and every registered animation, and advances the active ones once
/// per frame.
///
/// Animations join the active set when started or retargeted and leave it when they report
/// [`StepStatus::Done`] or are stopped.
#[derive(Debug, Default)]
pub struct Scheduler {
    clock: FrameClock,
    steppers: Vec<ValueStepper>,
    sequences: Vec<ActionSequencer>,
    transitions: Vec<TransitionStepper>,
    active: BTreeSet<AnimId>,
}

impl Scheduler {
    /// Empty scheduler with its clock at frame 0.
    pub fn new(opts: SchedulerOpts) -> Self {
        Self {
            clock: FrameClock::new(opts.fps),
            ..Self::default()
        }
    }

    /// The shared clock.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Mutable clock, for [`FrameClock::reset_to`] in tests and debugging.
    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    /// Advance the clock by `increment` frames.
    pub fn tick(&mut self, increment: u64) -> FrameIndex {
        self.clock.tick(increment)
    }

    /// One host frame: `tick(1)` followed by [`Self::advance_all`].
    pub fn frame(&mut self) -> AdvanceReport {
        self.tick(1);
        self.advance_all()
    }

    /// Take ownership of `stepper`.
    pub fn add_stepper(&mut self, stepper: ValueStepper) -> StepperId {
        let id = StepperId(self.steppers.len());
        self.steppers.push(stepper);
        id
    }

    /// Take ownership of `sequence`. It stays idle until [`Self::start_sequence`].
    pub fn add_sequence(&mut self, sequence: ActionSequencer) -> SequenceId {
        let id = SequenceId(self.sequences.len());
        self.sequences.push(sequence);
        id
    }

    /// Take ownership of `transition`. It stays idle until [`Self::start_transition`].
    pub fn add_transition(&mut self, transition: TransitionStepper) -> TransitionId {
        let id = TransitionId(self.transitions.len());
        self.transitions.push(transition);
        id
    }

    /// Stepper behind `id`.
    pub fn stepper(&self, id: StepperId) -> FramestepResult<&ValueStepper> {
        self.steppers.get(id.0).ok_or_else(|| unknown("stepper", id.0))
    }

    /// Mutable stepper behind `id`.
    ///
    /// Retargets made through this reference bypass the active set; prefer
    /// [`Self::set_target`].
    pub fn stepper_mut(&mut self, id: StepperId) -> FramestepResult<&mut ValueStepper> {
        lookup(&mut self.steppers, "stepper", id.0)
    }

    /// Sequencer behind `id`.
    pub fn sequence(&self, id: SequenceId) -> FramestepResult<&ActionSequencer> {
        self.sequences.get(id.0).ok_or_else(|| unknown("sequence", id.0))
    }

    /// Mutable sequencer behind `id`.
    pub fn sequence_mut(&mut self, id: SequenceId) -> FramestepResult<&mut ActionSequencer> {
        lookup(&mut self.sequences, "sequence", id.0)
    }

    /// Transition behind `id`.
    pub fn transition(&self, id: TransitionId) -> FramestepResult<&TransitionStepper> {
        self.transitions
            .get(id.0)
            .ok_or_else(|| unknown("transition", id.0))
    }

    /// Mutable transition behind `id`.
    pub fn transition_mut(&mut self, id: TransitionId) -> FramestepResult<&mut TransitionStepper> {
        lookup(&mut self.transitions, "transition", id.0)
    }

    /// [`ValueStepper::set_target`], registering the stepper while it moves.
    pub fn set_target(
        &mut self,
        id: StepperId,
        value: f64,
        mode: TargetMode,
    ) -> FramestepResult<TargetOutcome> {
        let stepper = lookup(&mut self.steppers, "stepper", id.0)?;
        let outcome = stepper.set_target(&self.clock, value, mode)?;
        let moving = stepper.is_moving();
        self.sync(id.into(), moving);
        Ok(outcome)
    }

    /// [`ValueStepper::modify_target`], registering the stepper while it moves.
    pub fn modify_target(
        &mut self,
        id: StepperId,
        delta: f64,
        mode: TargetMode,
    ) -> FramestepResult<TargetOutcome> {
        let stepper = lookup(&mut self.steppers, "stepper", id.0)?;
        let outcome = stepper.modify_target(&self.clock, delta, mode)?;
        let moving = stepper.is_moving();
        self.sync(id.into(), moving);
        Ok(outcome)
    }

    /// [`ValueStepper::set_percentage`], registering the stepper while it moves.
    pub fn set_percentage(
        &mut self,
        id: StepperId,
        percentage: f64,
        mode: TargetMode,
    ) -> FramestepResult<TargetOutcome> {
        let stepper = lookup(&mut self.steppers, "stepper", id.0)?;
        let outcome = stepper.set_percentage(&self.clock, percentage, mode)?;
        let moving = stepper.is_moving();
        self.sync(id.into(), moving);
        Ok(outcome)
    }

    /// [`ValueStepper::modify_percentage`], registering the stepper while it moves.
    pub fn modify_percentage(
        &mut self,
        id: StepperId,
        percentage: f64,
        mode: TargetMode,
    ) -> FramestepResult<TargetOutcome> {
        let stepper = lookup(&mut self.steppers, "stepper", id.0)?;
        let outcome = stepper.modify_percentage(&self.clock, percentage, mode)?;
        let moving = stepper.is_moving();
        self.sync(id.into(), moving);
        Ok(outcome)
    }

    /// Freeze a stepper where it is and drop it from the active set.
    pub fn stop_stepper(&mut self, id: StepperId) -> FramestepResult<()> {
        lookup(&mut self.steppers, "stepper", id.0)?.cancel();
        self.sync(id.into(), false);
        Ok(())
    }

    /// Put a sequencer in the active set. Returns `false` if it was already there.
    pub fn start_sequence(&mut self, id: SequenceId) -> FramestepResult<bool> {
        self.sequence(id)?;
        Ok(self.sync(id.into(), true))
    }

    /// Pause a sequencer in place. Returns `false` if it was not running.
    pub fn stop_sequence(&mut self, id: SequenceId) -> FramestepResult<bool> {
        self.sequence(id)?;
        Ok(self.sync(id.into(), false))
    }

    /// Stop a sequencer, rewind it and restore its targets. It stays idle until started again.
    pub fn reset_sequence(&mut self, id: SequenceId) -> FramestepResult<()> {
        lookup(&mut self.sequences, "sequence", id.0)?.reset();
        self.sync(id.into(), false);
        tracing::debug!(sequence = id.0, "sequence reset");
        Ok(())
    }

    /// [`TransitionStepper::start`] and register it. Returns `false` if it was already running.
    pub fn start_transition(
        &mut self,
        id: TransitionId,
        params: TransitionParams,
    ) -> FramestepResult<bool> {
        let transition = lookup(&mut self.transitions, "transition", id.0)?;
        if !transition.start(&self.clock, params) {
            return Ok(false);
        }
        self.sync(id.into(), true);
        Ok(true)
    }

    /// [`TransitionStepper::stop`] and drop it from the active set.
    pub fn stop_transition(&mut self, id: TransitionId) -> FramestepResult<()> {
        lookup(&mut self.transitions, "transition", id.0)?.stop();
        self.sync(id.into(), false);
        Ok(())
    }

    /// Draw a sequencer's active target.
    pub fn render_sequence(&self, id: SequenceId, surface: &mut dyn Surface) -> FramestepResult<()> {
        self.sequence(id)?.render(surface)
    }

    /// Draw a transition if it is running.
    pub fn render_transition(
        &self,
        id: TransitionId,
        surface: &mut dyn Surface,
    ) -> FramestepResult<()> {
        self.transition(id)?.render(surface)
    }

    /// Whether `id` will be advanced on the next [`Self::advance_all`].
    pub fn is_active(&self, id: impl Into<AnimId>) -> bool {
        self.active.contains(&id.into())
    }

    /// Number of animations in the active set.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Advance every active animation once to the current frame.
    ///
    /// Works over a snapshot of the active set; an entry removed before its turn is skipped.
    #[tracing::instrument(level = "trace", skip(self), fields(frame = self.clock.get().0))]
    pub fn advance_all(&mut self) -> AdvanceReport {
        let frame = self.clock.get();
        let mut report = AdvanceReport {
            frame,
            ..AdvanceReport::default()
        };
        if self.active.is_empty() {
            return report;
        }

        let snapshot: Vec<AnimId> = self.active.iter().copied().collect();
        for id in snapshot {
            if !self.active.contains(&id) {
                continue;
            }
            // Ids are minted by `add_*` and the arenas never shrink.
            let status = match id {
                AnimId::Stepper(s) => self.steppers[s.0].step(&self.clock),
                AnimId::Sequence(s) => self.sequences[s.0].advance(&self.clock),
                AnimId::Transition(t) => self.transitions[t.0].advance(&self.clock),
            };

            report.advanced.push(id);
            if status == StepStatus::Done {
                self.active.remove(&id);
                tracing::debug!(?id, frame = frame.0, "animation completed");
                report.completed.push(id);
            }
        }
        report
    }

    // Returns whether membership changed.
    fn sync(&mut self, id: AnimId, active: bool) -> bool {
        let changed = if active {
            self.active.insert(id)
        } else {
            self.active.remove(&id)
        };
        if changed {
            tracing::debug!(?id, active, "active set updated");
        }
        changed
    }
}

fn lookup<'a, T>(items: &'a mut [T], what: &str, index: usize) -> FramestepResult<&'a mut T> {
    items.get_mut(index).ok_or_else(|| unknown(what, index))
}

fn unknown(what: &str, index: usize) -> FramestepError {
    FramestepError::validation(format!("unknown {what} id {index}"))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
