use crate::{
    animation::clock::{FrameClock, StepStatus},
    foundation::core::{FrameIndex, Rect, Rgba8Premul, RoundedRect, Size},
    foundation::error::{FramestepError, FramestepResult},
    render::surface::{ImageKey, Surface},
};

/// Parameter bag handed to the completion callback.
pub type TransitionParams = serde_json::Map<String, serde_json::Value>;

/// Callback fired once when a transition reaches full size.
pub type CompletionFn = Box<dyn FnMut(&TransitionParams)>;

/// What a running transition paints.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    /// Flat color.
    Color(Rgba8Premul),
    /// Host image stretched over the current box.
    Image(ImageKey),
}

/// Construction options for [`TransitionStepper`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionOpts {
    /// Region the box grows over; its size is the final size.
    pub region: Rect,
    /// Size the box starts from.
    #[serde(default)]
    pub base_size: Size,
    /// Seconds from start to full size.
    pub duration_secs: f64,
    /// Paint for the box.
    pub fill: Fill,
}

impl Default for TransitionOpts {
    fn default() -> Self {
        Self {
            region: Rect::ZERO,
            base_size: Size::ZERO,
            duration_secs: 1.0,
            fill: Fill::Color(Rgba8Premul::opaque(0, 0, 0)),
        }
    }
}

/// Lifecycle of a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Never started or stopped.
    Idle,
    /// Growing.
    Running,
    /// Reached full size; callback fired.
    Done,
}

/// Grows a box anchored at the region's top-left corner from `base_size` to the region size.
pub struct TransitionStepper {
    region: Rect,
    base_size: Size,
    current_size: Size,
    duration_secs: f64,
    fill: Fill,
    start_frame: FrameIndex,
    phase: TransitionPhase,
    on_complete: Option<CompletionFn>,
    params: TransitionParams,
}

impl std::fmt::Debug for TransitionStepper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionStepper")
            .field("region", &self.region)
            .field("current_size", &self.current_size)
            .field("phase", &self.phase)
            .field("has_callback", &self.on_complete.is_some())
            .finish_non_exhaustive()
    }
}

impl TransitionStepper {
    /// Validate `opts` and build an idle transition.
    pub fn new(opts: TransitionOpts) -> FramestepResult<Self> {
        let TransitionOpts {
            region,
            base_size,
            duration_secs,
            fill,
        } = opts;

        if !region.is_finite() || !base_size.is_finite() {
            return Err(FramestepError::validation(
                "transition region and base size must be finite",
            ));
        }
        if region.width() < 0.0 || region.height() < 0.0 {
            return Err(FramestepError::validation(
                "transition region must have x0 <= x1 and y0 <= y1",
            ));
        }
        let span = region.size();
        if base_size.width < 0.0
            || base_size.height < 0.0
            || base_size.width > span.width
            || base_size.height > span.height
        {
            return Err(FramestepError::validation(
                "transition base size must fit inside the region",
            ));
        }
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            return Err(FramestepError::validation(
                "transition duration must be finite and >= 0",
            ));
        }

        Ok(Self {
            region,
            base_size,
            current_size: base_size,
            duration_secs,
            fill,
            start_frame: FrameIndex(0),
            phase: TransitionPhase::Idle,
            on_complete: None,
            params: TransitionParams::new(),
        })
    }

    /// Attach the completion callback.
    pub fn with_completion(mut self, f: impl FnMut(&TransitionParams) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Current box size.
    pub fn current_size(&self) -> Size {
        self.current_size
    }

    /// Final box size.
    pub fn target_size(&self) -> Size {
        self.region.size()
    }

    /// Region the box grows over.
    pub fn region(&self) -> Rect {
        self.region
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Parameters the callback will receive.
    pub fn params(&self) -> &TransitionParams {
        &self.params
    }

    /// Start growing from `base_size`, merging `params` into the callback's parameters.
    ///
    /// Returns `false` (and changes nothing) when already running.
    pub fn start(&mut self, clock: &FrameClock, params: TransitionParams) -> bool {
        if self.phase == TransitionPhase::Running {
            return false;
        }
        self.params.extend(params);
        self.current_size = self.base_size;
        self.start_frame = clock.get();
        self.phase = TransitionPhase::Running;
        true
    }

    /// Abandon a running transition without firing the callback.
    pub fn stop(&mut self) {
        if self.phase == TransitionPhase::Running {
            self.phase = TransitionPhase::Idle;
        }
    }

    /// Grow to the size for `clock.get()`; fires the callback on the frame it completes.
    pub fn advance(&mut self, clock: &FrameClock) -> StepStatus {
        if self.phase != TransitionPhase::Running {
            return StepStatus::Done;
        }

        let span = self.region.size();
        let total = clock.secs_to_frames(self.duration_secs);
        let elapsed = clock.get_delta(self.start_frame).max(0) as f64;
        let fraction = if total <= 0.0 { 1.0 } else { elapsed / total };

        self.current_size = Size::new(
            grow(self.base_size.width, span.width, fraction),
            grow(self.base_size.height, span.height, fraction),
        );

        if self.current_size != span {
            return StepStatus::Running;
        }

        self.phase = TransitionPhase::Done;
        if let Some(on_complete) = self.on_complete.as_mut() {
            on_complete(&self.params);
        }
        StepStatus::Done
    }

    /// Paint the box while running; idle and finished transitions draw nothing.
    pub fn render(&self, surface: &mut dyn Surface) -> FramestepResult<()> {
        if self.phase != TransitionPhase::Running {
            return Ok(());
        }
        let dest = Rect::from_origin_size(self.region.origin(), self.current_size);
        match &self.fill {
            Fill::Color(color) => surface.fill(RoundedRect::from_rect(dest, 0.0), *color),
            Fill::Image(image) => surface.draw_image(image, dest),
        }
    }
}

// Whole-pixel growth, never below `base`; exactly `span` once the fraction reaches 1.
fn grow(base: f64, span: f64, fraction: f64) -> f64 {
    if fraction >= 1.0 {
        return span;
    }
    (span * fraction).floor().clamp(base, span)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/transition.rs"]
mod tests;
