use crate::foundation::error::{FramestepError, FramestepResult};

pub use kurbo::{Point, Rect, RoundedRect, Size};

/// Absolute 0-based frame index on the host's frame clock.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Signed distance `self - earlier` in frames.
    pub fn delta_from(self, earlier: FrameIndex) -> i64 {
        let d = i128::from(self.0) - i128::from(earlier.0);
        d.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }
}

/// Ticks per second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated rate; both parts must be non-zero.
    pub fn new(num: u32, den: u32) -> FramestepResult<Self> {
        if den == 0 {
            return Err(FramestepError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(FramestepError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Rate as floating-point frames per second.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of `secs` seconds expressed in (possibly fractional) frames.
    pub fn secs_to_frames(self, secs: f64) -> f64 {
        (secs * self.as_f64()).max(0.0)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Opaque color from straight RGB.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Mutable geometry of an animated object: position, size and corner radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Geometry {
    /// Top-left corner.
    pub origin: Point,
    /// Width and height.
    pub size: Size,
    /// Uniform corner radius.
    #[serde(default)]
    pub corner_radius: f64,
}

impl Geometry {
    /// Geometry with zero corner radius.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
            corner_radius: 0.0,
        }
    }

    /// Replace the corner radius.
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Axis-aligned bounds.
    pub fn rect(self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Bounds with the corner radius applied (negative radii draw square).
    pub fn rounded_rect(self) -> RoundedRect {
        RoundedRect::from_rect(self.rect(), self.corner_radius.max(0.0))
    }

    /// `true` when every component is finite.
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite() && self.corner_radius.is_finite()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
