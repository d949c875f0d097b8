use crate::{
    animation::action::Action,
    animation::sequencer::ActionSequencer,
    foundation::core::Fps,
    foundation::error::{FramestepError, FramestepResult},
    render::shape::{Block, Shape},
};

/// JSON description of one action sequence and the blocks it animates.
///
/// ```json
/// {
///   "fps": { "num": 30, "den": 1 },
///   "targets": [{ "geometry": { "origin": { "x": 0, "y": 0 },
///                               "size": { "width": 10, "height": 10 } },
///                 "color": { "r": 255, "g": 0, "b": 0, "a": 255 } }],
///   "actions": [{ "kind": "move_to", "frames": 10, "x": 100 }]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceScript {
    /// Clock rate the script is authored for.
    #[serde(default)]
    pub fps: Fps,
    /// Copy size across retargets.
    #[serde(default = "default_trace")]
    pub trace: bool,
    /// Shapes, addressed by index from `retarget` actions.
    pub targets: Vec<Block>,
    /// Actions in execution order.
    #[serde(default)]
    pub actions: Vec<Action>,
}

fn default_trace() -> bool {
    true
}

impl SequenceScript {
    /// Parse and validate a script.
    pub fn from_json_str(json: &str) -> FramestepResult<Self> {
        let script: Self = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    /// Check the rate and target geometry.
    pub fn validate(&self) -> FramestepResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        for (i, target) in self.targets.iter().enumerate() {
            if !target.geometry.is_finite() {
                return Err(FramestepError::validation(format!(
                    "target {i}: geometry must be finite"
                )));
            }
        }
        Ok(())
    }

    /// Build a sequencer over fresh copies of the script's blocks.
    pub fn build(&self) -> FramestepResult<ActionSequencer> {
        self.validate()?;
        let targets = self
            .targets
            .iter()
            .map(|b| Box::new(*b) as Box<dyn Shape>)
            .collect();
        ActionSequencer::new(self.actions.clone(), targets, self.trace)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/script.rs"]
mod tests;
