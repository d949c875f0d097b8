use crate::foundation::core::{Geometry, Rgba8Premul};
use crate::foundation::error::FramestepResult;
use crate::render::surface::Surface;

/// A widget-layer object an action sequence can animate.
///
/// Sequencers only read and write [`Geometry`]; drawing stays with the implementor.
pub trait Shape {
    /// Current geometry.
    fn geometry(&self) -> Geometry;

    /// Replace the geometry.
    fn set_geometry(&mut self, geometry: Geometry);

    /// Draw the shape.
    fn render(&self, surface: &mut dyn Surface) -> FramestepResult<()>;
}

/// Flat-colored rounded rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Block {
    /// Position, size and corner radius.
    pub geometry: Geometry,
    /// Fill color.
    pub color: Rgba8Premul,
}

impl Block {
    /// Block with `geometry` filled with `color`.
    pub fn new(geometry: Geometry, color: Rgba8Premul) -> Self {
        Self { geometry, color }
    }
}

impl Shape for Block {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    fn render(&self, surface: &mut dyn Surface) -> FramestepResult<()> {
        surface.fill(self.geometry.rounded_rect(), self.color)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/shape.rs"]
mod tests;
