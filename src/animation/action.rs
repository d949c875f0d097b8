use crate::foundation::error::{FramestepError, FramestepResult};

/// One or both axes of a two-parameter action.
///
/// `x` is width for scale actions and horizontal position for move actions; `y` is
/// height or vertical position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Axes {
    /// Horizontal only.
    X(f64),
    /// Vertical only.
    Y(f64),
    /// Both axes.
    Both(f64, f64),
}

impl Axes {
    /// Build from optional components; `None` when neither is given.
    pub fn from_options(x: Option<f64>, y: Option<f64>) -> Option<Self> {
        match (x, y) {
            (Some(x), Some(y)) => Some(Self::Both(x, y)),
            (Some(x), None) => Some(Self::X(x)),
            (None, Some(y)) => Some(Self::Y(y)),
            (None, None) => None,
        }
    }

    /// Horizontal component, if present.
    pub fn x(self) -> Option<f64> {
        match self {
            Self::X(x) | Self::Both(x, _) => Some(x),
            Self::Y(_) => None,
        }
    }

    /// Vertical component, if present.
    pub fn y(self) -> Option<f64> {
        match self {
            Self::Y(y) | Self::Both(_, y) => Some(y),
            Self::X(_) => None,
        }
    }

    /// Component-wise `self + base` on the present axes.
    pub(crate) fn offset_from(self, base_x: f64, base_y: f64) -> Self {
        match self {
            Self::X(x) => Self::X(base_x + x),
            Self::Y(y) => Self::Y(base_y + y),
            Self::Both(x, y) => Self::Both(base_x + x, base_y + y),
        }
    }

    fn is_finite(self) -> bool {
        self.x().is_none_or(f64::is_finite) && self.y().is_none_or(f64::is_finite)
    }
}

/// What an action does to the active target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActionKind {
    /// Grow width/height by a delta.
    Scale(Axes),
    /// Resize width/height to absolute values.
    ScaleTo(Axes),
    /// Move by a delta.
    Move(Axes),
    /// Move to absolute coordinates.
    MoveTo(Axes),
    /// Change the corner radius by a delta.
    Radius(f64),
    /// Set the corner radius to an absolute value.
    RadiusTo(f64),
    /// Switch the active target to `index` in the target pool.
    Retarget {
        /// Index into the sequencer's target pool.
        index: usize,
    },
}

impl ActionKind {
    pub(crate) fn validate(self, target_count: usize) -> FramestepResult<()> {
        let finite = match self {
            Self::Scale(a) | Self::ScaleTo(a) | Self::Move(a) | Self::MoveTo(a) => a.is_finite(),
            Self::Radius(r) | Self::RadiusTo(r) => r.is_finite(),
            Self::Retarget { index } => {
                if index >= target_count {
                    return Err(FramestepError::validation(format!(
                        "retarget index {index} is out of range for {target_count} targets"
                    )));
                }
                true
            }
        };
        if !finite {
            return Err(FramestepError::validation(format!(
                "action parameters must be finite: {self:?}"
            )));
        }
        Ok(())
    }

    fn tag(self) -> ActionTag {
        match self {
            Self::Scale(_) => ActionTag::Scale,
            Self::ScaleTo(_) => ActionTag::ScaleTo,
            Self::Move(_) => ActionTag::Move,
            Self::MoveTo(_) => ActionTag::MoveTo,
            Self::Radius(_) => ActionTag::Radius,
            Self::RadiusTo(_) => ActionTag::RadiusTo,
            Self::Retarget { .. } => ActionTag::Retarget,
        }
    }
}

/// An action plus the number of frames it occupies.
///
/// A zero-frame action completes in the frame it starts and does not hold the sequence.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "ActionDef", into = "ActionDef")]
pub struct Action {
    /// What to do.
    pub kind: ActionKind,
    /// Frames the action spans.
    pub frames: u64,
}

impl Action {
    /// `kind` over `frames` frames.
    pub fn new(kind: ActionKind, frames: u64) -> Self {
        Self { kind, frames }
    }

    /// Zero-frame action.
    pub fn instant(kind: ActionKind) -> Self {
        Self { kind, frames: 0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
enum ActionTag {
    Scale,
    ScaleTo,
    Move,
    MoveTo,
    Radius,
    RadiusTo,
    Retarget,
}

// Flat JSON form: `{ "kind": "move_to", "frames": 10, "x": 100 }`.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ActionDef {
    kind: Option<ActionTag>,
    #[serde(default)]
    frames: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
}

impl TryFrom<ActionDef> for Action {
    type Error = FramestepError;

    fn try_from(def: ActionDef) -> Result<Self, Self::Error> {
        let tag = def
            .kind
            .ok_or_else(|| FramestepError::validation("action is missing 'kind'"))?;

        let size = || {
            Axes::from_options(def.width, def.height).ok_or_else(|| {
                FramestepError::validation(format!(
                    "width and/or height must be given for {tag:?}"
                ))
            })
        };
        let position = || {
            Axes::from_options(def.x, def.y).ok_or_else(|| {
                FramestepError::validation(format!("x and/or y must be given for {tag:?}"))
            })
        };
        let radius = || {
            def.radius.ok_or_else(|| {
                FramestepError::validation(format!("radius must be given for {tag:?}"))
            })
        };

        let kind = match tag {
            ActionTag::Scale => ActionKind::Scale(size()?),
            ActionTag::ScaleTo => ActionKind::ScaleTo(size()?),
            ActionTag::Move => ActionKind::Move(position()?),
            ActionTag::MoveTo => ActionKind::MoveTo(position()?),
            ActionTag::Radius => ActionKind::Radius(radius()?),
            ActionTag::RadiusTo => ActionKind::RadiusTo(radius()?),
            ActionTag::Retarget => ActionKind::Retarget {
                index: def.index.ok_or_else(|| {
                    FramestepError::validation("index must be given for Retarget")
                })?,
            },
        };

        // Negative durations behave like zero: the action is instantaneous.
        let frames = u64::try_from(def.frames).unwrap_or(0);
        Ok(Self { kind, frames })
    }
}

impl From<Action> for ActionDef {
    fn from(action: Action) -> Self {
        let mut def = ActionDef {
            kind: Some(action.kind.tag()),
            frames: i64::try_from(action.frames).unwrap_or(i64::MAX),
            ..ActionDef::default()
        };
        match action.kind {
            ActionKind::Scale(a) | ActionKind::ScaleTo(a) => {
                def.width = a.x();
                def.height = a.y();
            }
            ActionKind::Move(a) | ActionKind::MoveTo(a) => {
                def.x = a.x();
                def.y = a.y();
            }
            ActionKind::Radius(r) | ActionKind::RadiusTo(r) => def.radius = Some(r),
            ActionKind::Retarget { index } => def.index = Some(index),
        }
        def
    }
}

/// Parse a JSON array of actions.
pub fn parse_actions(json: &str) -> FramestepResult<Vec<Action>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/action.rs"]
mod tests;
