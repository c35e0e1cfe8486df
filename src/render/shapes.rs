//! Shape types for the SVG surface
//!
//! Each shape knows its bounding box and how to write itself as an SVG
//! element. [`Primitive`] dispatches over them with `enum_dispatch`.

use std::fmt::{self, Write};

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::types::ColorName;

/// Common behavior for all shapes
#[enum_dispatch]
pub trait Shape {
    /// Stroke color
    fn color(&self) -> ColorName;

    /// Smallest axis-aligned box containing the outline
    fn bounds(&self) -> BoundingBox;

    /// Append this shape as one SVG element (no indentation, no newline)
    fn write_svg(&self, out: &mut String, stroke_width: f64) -> fmt::Result;
}

/// Anything the SVG surface can hold
#[enum_dispatch(Shape)]
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(LineShape),
    Circle(CircleShape),
    Rect(RectShape),
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl BoundingBox {
    /// Box spanning two corners given in any order
    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn union(self, other: BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow by `pad` on every side
    pub fn padded(self, pad: f64) -> BoundingBox {
        BoundingBox {
            min: self.min - DVec2::splat(pad),
            max: self.max + DVec2::splat(pad),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.min.cmple(other.min).all() && other.max.cmple(self.max).all()
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

// ============================================================================
// Shape Types
// ============================================================================

/// A straight line segment
#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub from: DVec2,
    pub to: DVec2,
    pub color: ColorName,
}

impl Shape for LineShape {
    fn color(&self) -> ColorName {
        self.color
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::from_corners(self.from, self.to)
    }

    fn write_svg(&self, out: &mut String, stroke_width: f64) -> fmt::Result {
        write!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" />"#,
            self.from.x,
            self.from.y,
            self.to.x,
            self.to.y,
            self.color.hex(),
            stroke_width
        )
    }
}

/// A circle outline
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub center: DVec2,
    pub radius: f64,
    pub color: ColorName,
}

impl Shape for CircleShape {
    fn color(&self) -> ColorName {
        self.color
    }

    fn bounds(&self) -> BoundingBox {
        let r = DVec2::splat(self.radius);
        BoundingBox::from_corners(self.center - r, self.center + r)
    }

    fn write_svg(&self, out: &mut String, stroke_width: f64) -> fmt::Result {
        write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}" />"#,
            self.center.x,
            self.center.y,
            self.radius,
            self.color.hex(),
            stroke_width
        )
    }
}

/// A rectangle outline, `origin` is the top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub origin: DVec2,
    pub size: DVec2,
    pub color: ColorName,
}

impl Shape for RectShape {
    fn color(&self) -> ColorName {
        self.color
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::from_corners(self.origin, self.origin + self.size)
    }

    fn write_svg(&self, out: &mut String, stroke_width: f64) -> fmt::Result {
        write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}" />"#,
            self.origin.x,
            self.origin.y,
            self.size.x,
            self.size.y,
            self.color.hex(),
            stroke_width
        )
    }
}
