use crate::{
    animation::action::{Action, ActionKind, Axes},
    animation::clock::{FrameClock, StepStatus},
    foundation::core::{FrameIndex, Geometry},
    foundation::error::{FramestepError, FramestepResult},
    render::shape::Shape,
    render::surface::Surface,
};

/// Absolute end state of the running action, resolved on its first frame.
#[derive(Clone, Copy, Debug, PartialEq)]
enum ActionGoal {
    Size(Axes),
    Origin(Axes),
    Radius(f64),
    Hold,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct RunningAction {
    start: FrameIndex,
    goal: ActionGoal,
}

/// Plays an ordered list of actions against a pool of shapes, one action at a time.
///
/// Each action owns a window of `frames` frames starting on the frame it first executes.
/// Every frame moves the active target by `(goal - current) / remaining`, so the target
/// lands on the goal on the last frame of the window. Relative actions resolve their goal
/// from the target's geometry when the window opens.
pub struct ActionSequencer {
    actions: Vec<Action>,
    targets: Vec<Box<dyn Shape>>,
    initial: Vec<Geometry>,
    trace: bool,
    active_action: usize,
    active_target: usize,
    running: Option<RunningAction>,
}

impl std::fmt::Debug for ActionSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionSequencer")
            .field("actions", &self.actions)
            .field("targets", &self.targets.len())
            .field("trace", &self.trace)
            .field("active_action", &self.active_action)
            .field("active_target", &self.active_target)
            .finish_non_exhaustive()
    }
}

impl ActionSequencer {
    /// Build a sequence; validates retarget indices and parameters up front.
    ///
    /// With `trace` set, a retarget copies the previous target's width and height (never
    /// its position) onto the new target.
    pub fn new(
        actions: Vec<Action>,
        targets: Vec<Box<dyn Shape>>,
        trace: bool,
    ) -> FramestepResult<Self> {
        if targets.is_empty() && !actions.is_empty() {
            return Err(FramestepError::validation(
                "action sequence needs at least one target",
            ));
        }
        for (i, action) in actions.iter().enumerate() {
            action.kind.validate(targets.len()).map_err(|e| {
                FramestepError::validation(format!("action {i}: {e}"))
            })?;
        }
        let initial = targets.iter().map(|t| t.geometry()).collect();

        Ok(Self {
            actions,
            targets,
            initial,
            trace,
            active_action: 0,
            active_target: 0,
            running: None,
        })
    }

    /// The action list.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Index of the action that runs next (or is running); `actions().len()` when finished.
    pub fn active_action(&self) -> usize {
        self.active_action
    }

    /// Index of the shape actions currently apply to.
    pub fn active_target(&self) -> usize {
        self.active_target
    }

    /// `true` once every action has run.
    pub fn is_terminal(&self) -> bool {
        self.active_action >= self.actions.len()
    }

    /// Whether retargets copy size onto the new target.
    pub fn trace(&self) -> bool {
        self.trace
    }

    /// Number of shapes in the pool.
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Shape at `index`.
    pub fn target(&self, index: usize) -> Option<&dyn Shape> {
        self.targets.get(index).map(|t| t.as_ref())
    }

    /// Mutable shape at `index`.
    pub fn target_mut(&mut self, index: usize) -> Option<&mut (dyn Shape + 'static)> {
        self.targets.get_mut(index).map(|t| t.as_mut())
    }

    /// Restore every target to its geometry at construction and rewind to the first action.
    pub fn reset(&mut self) {
        for (target, geometry) in self.targets.iter_mut().zip(&self.initial) {
            target.set_geometry(*geometry);
        }
        self.active_action = 0;
        self.active_target = 0;
        self.running = None;
    }

    /// Run one frame of the sequence.
    pub fn advance(&mut self, clock: &FrameClock) -> StepStatus {
        let now = clock.get();
        loop {
            let Some(action) = self.actions.get(self.active_action).copied() else {
                return StepStatus::Done;
            };

            let running = match self.running {
                Some(running) => running,
                None => {
                    let running = self.begin(action.kind, now);
                    self.running = Some(running);
                    running
                }
            };

            let end = running.start.0.saturating_add(action.frames);
            let remaining = i128::from(end) - i128::from(now.0);
            self.apply(running.goal, remaining.max(1) as f64);

            if remaining > 1 {
                return StepStatus::Running;
            }

            self.running = None;
            self.active_action += 1;
            tracing::trace!(
                action = self.active_action - 1,
                frame = now.0,
                "sequence action finished"
            );

            if self.is_terminal() {
                return StepStatus::Done;
            }
            if action.frames > 0 {
                return StepStatus::Running;
            }
        }
    }

    /// Draw the active target.
    pub fn render(&self, surface: &mut dyn Surface) -> FramestepResult<()> {
        match self.targets.get(self.active_target) {
            Some(target) => target.render(surface),
            None => Ok(()),
        }
    }

    fn begin(&mut self, kind: ActionKind, now: FrameIndex) -> RunningAction {
        let g = self.active_geometry();
        let goal = match kind {
            ActionKind::Scale(by) => ActionGoal::Size(by.offset_from(g.size.width, g.size.height)),
            ActionKind::ScaleTo(to) => ActionGoal::Size(to),
            ActionKind::Move(by) => ActionGoal::Origin(by.offset_from(g.origin.x, g.origin.y)),
            ActionKind::MoveTo(to) => ActionGoal::Origin(to),
            ActionKind::Radius(by) => ActionGoal::Radius(g.corner_radius + by),
            ActionKind::RadiusTo(to) => ActionGoal::Radius(to),
            ActionKind::Retarget { index } => {
                self.retarget(index);
                ActionGoal::Hold
            }
        };
        RunningAction { start: now, goal }
    }

    fn retarget(&mut self, index: usize) {
        if index >= self.targets.len() {
            return;
        }
        let previous = self.active_geometry();
        self.active_target = index;
        if self.trace {
            let target = &mut self.targets[index];
            let mut g = target.geometry();
            g.size = previous.size;
            target.set_geometry(g);
        }
    }

    fn apply(&mut self, goal: ActionGoal, remaining: f64) {
        let Some(target) = self.targets.get_mut(self.active_target) else {
            return;
        };
        let mut g = target.geometry();
        match goal {
            ActionGoal::Size(axes) => {
                if let Some(w) = axes.x() {
                    g.size.width = approach(g.size.width, w, remaining);
                }
                if let Some(h) = axes.y() {
                    g.size.height = approach(g.size.height, h, remaining);
                }
            }
            ActionGoal::Origin(axes) => {
                if let Some(x) = axes.x() {
                    g.origin.x = approach(g.origin.x, x, remaining);
                }
                if let Some(y) = axes.y() {
                    g.origin.y = approach(g.origin.y, y, remaining);
                }
            }
            ActionGoal::Radius(r) => g.corner_radius = approach(g.corner_radius, r, remaining),
            ActionGoal::Hold => return,
        }
        target.set_geometry(g);
    }

    fn active_geometry(&self) -> Geometry {
        self.targets
            .get(self.active_target)
            .map(|t| t.geometry())
            .unwrap_or_default()
    }
}

// Land exactly on the last frame instead of trusting float division.
fn approach(current: f64, goal: f64, remaining: f64) -> f64 {
    if remaining <= 1.0 {
        goal
    } else {
        current + (goal - current) / remaining
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sequencer.rs"]
mod tests;
