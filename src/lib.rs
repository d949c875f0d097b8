//! framestep is a frame-driven interpolation engine for widgets painted on a host's 2D surface.
//!
//! Time is measured in rendered frames, never wall-clock time. The host ticks a
//! [`FrameClock`] once per frame and asks the [`Scheduler`] to advance every active
//! animation; widgets then draw themselves through a [`Surface`].
//!
//! # Animations
//!
//! - [`ValueStepper`]: moves the two edges of a bounded range (a progress bar's fill)
//!   toward goals over a fixed duration.
//! - [`ActionSequencer`]: plays typed [`Action`]s (scale, move, corner radius, retarget)
//!   against a pool of [`Shape`]s, one action at a time.
//! - [`TransitionStepper`]: grows a box from a base size to a full region and fires a
//!   completion callback once.
//!
//! # Design constraints
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: animations advance in a fixed order; nothing reads the wall clock.
//! - **No rasterization**: drawing is delegated to the host's [`Surface`] implementation.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod render;

pub use crate::animation::action::{Action, ActionKind, Axes, parse_actions};
pub use crate::animation::clock::{FrameClock, StepStatus};
pub use crate::animation::scheduler::{
    AdvanceReport, AnimId, Scheduler, SchedulerOpts, SequenceId, StepperId, TransitionId,
};
pub use crate::animation::script::SequenceScript;
pub use crate::animation::sequencer::ActionSequencer;
pub use crate::animation::stepper::{
    Edge, StepperOpts, TargetMode, TargetOutcome, ValueRange, ValueStepper,
};
pub use crate::animation::transition::{
    CompletionFn, Fill, TransitionOpts, TransitionParams, TransitionPhase, TransitionStepper,
};
pub use crate::foundation::core::{
    Fps, FrameIndex, Geometry, Point, Rect, Rgba8Premul, RoundedRect, Size,
};
pub use crate::foundation::error::{FramestepError, FramestepResult};
pub use crate::render::shape::{Block, Shape};
pub use crate::render::surface::{DrawCmd, ImageKey, RecordingSurface, Surface};
