use crate::foundation::core::{Rect, Rgba8Premul, RoundedRect};
use crate::foundation::error::FramestepResult;

/// Key of an image owned by the host's asset layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ImageKey(pub String);

impl ImageKey {
    /// Build a key from any string-like value.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

/// Drawing capability the engine renders through.
///
/// The engine never rasterizes; hosts implement this on top of their 2D backend.
pub trait Surface {
    /// Fill `shape` with a flat color.
    fn fill(&mut self, shape: RoundedRect, color: Rgba8Premul) -> FramestepResult<()>;

    /// Draw `image` scaled into `dest`.
    fn draw_image(&mut self, image: &ImageKey, dest: Rect) -> FramestepResult<()>;
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// [`Surface::fill`].
    Fill {
        /// Filled shape.
        shape: RoundedRect,
        /// Fill color.
        color: Rgba8Premul,
    },
    /// [`Surface::draw_image`].
    Image {
        /// Drawn image.
        image: ImageKey,
        /// Destination rectangle.
        dest: Rect,
    },
}

/// Surface that records draw calls instead of drawing them.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    cmds: Vec<DrawCmd>,
}

impl RecordingSurface {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far, in order.
    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    /// Drain the recorded calls.
    pub fn take(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.cmds)
    }
}

impl Surface for RecordingSurface {
    fn fill(&mut self, shape: RoundedRect, color: Rgba8Premul) -> FramestepResult<()> {
        self.cmds.push(DrawCmd::Fill { shape, color });
        Ok(())
    }

    fn draw_image(&mut self, image: &ImageKey, dest: Rect) -> FramestepResult<()> {
        self.cmds.push(DrawCmd::Image {
            image: image.clone(),
            dest,
        });
        Ok(())
    }
}
