//! SVG surface: collects primitives and writes them as an SVG document

use std::fmt::Write;

use glam::{DVec2, dvec2};

use crate::errors::RenderError;
use crate::log::warn;
use crate::surface::Surface;
use crate::types::ColorName;

use super::defaults;
use super::shapes::{BoundingBox, CircleShape, LineShape, Primitive, RectShape, Shape};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Output settings for [`SvgSurface`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    /// Visible canvas size in user units
    pub width: f64,
    pub height: f64,
    pub stroke_width: f64,
    /// Size the view box to the drawing instead of the canvas
    pub fit: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: defaults::CANVAS_WIDTH,
            height: defaults::CANVAS_HEIGHT,
            stroke_width: defaults::STROKE_WIDTH,
            fit: false,
        }
    }
}

impl SvgOptions {
    /// The canvas as a box anchored at the origin
    pub fn canvas(&self) -> BoundingBox {
        BoundingBox::from_corners(DVec2::ZERO, dvec2(self.width, self.height))
    }

    fn validate(&self) -> Result<(), RenderError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if positive(self.width) && positive(self.height) && positive(self.stroke_width) {
            Ok(())
        } else {
            Err(RenderError::InvalidCanvas {
                width: self.width,
                height: self.height,
                stroke_width: self.stroke_width,
            })
        }
    }
}

/// A [`Surface`] that renders to SVG.
///
/// Only primitives drawn since the last `clear` are kept.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    options: SvgOptions,
    shapes: Vec<Primitive>,
}

impl SvgSurface {
    pub fn new(options: SvgOptions) -> Self {
        Self {
            options,
            shapes: Vec::new(),
        }
    }

    pub fn options(&self) -> &SvgOptions {
        &self.options
    }

    pub fn shapes(&self) -> &[Primitive] {
        &self.shapes
    }

    /// Bounding box of everything currently drawn
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.shapes
            .iter()
            .map(Shape::bounds)
            .reduce(BoundingBox::union)
    }

    /// The region the document shows
    fn view_box(&self) -> Result<BoundingBox, RenderError> {
        if !self.options.fit {
            return Ok(self.options.canvas());
        }
        match self.bounds() {
            Some(bounds) if !bounds.is_finite() => Err(RenderError::InvalidBounds),
            Some(bounds) => Ok(bounds.padded(defaults::FIT_PADDING)),
            None => Ok(self.options.canvas()),
        }
    }

    /// Render the current drawing as a complete SVG document
    pub fn to_svg(&self) -> Result<String, RenderError> {
        self.options.validate()?;
        let view = self.view_box()?;

        let mut out = String::new();
        writeln!(
            out,
            r#"<svg xmlns="{}" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            SVG_NS,
            view.width(),
            view.height(),
            view.min.x,
            view.min.y,
            view.width(),
            view.height()
        )?;
        for shape in &self.shapes {
            out.push_str("  ");
            shape.write_svg(&mut out, self.options.stroke_width)?;
            out.push('\n');
        }
        out.push_str("</svg>\n");
        Ok(out)
    }

    fn push(&mut self, shape: Primitive) {
        let bounds = shape.bounds();
        if !self.options.canvas().contains(&bounds) {
            warn!(
                min_x = bounds.min.x,
                min_y = bounds.min.y,
                max_x = bounds.max.x,
                max_y = bounds.max.y,
                "shape extends outside the visible canvas"
            );
        }
        self.shapes.push(shape);
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn draw_line(&mut self, from: DVec2, to: DVec2, color: ColorName) {
        self.push(LineShape { from, to, color }.into());
    }

    fn draw_circle_outline(&mut self, center: DVec2, radius: f64, color: ColorName) {
        self.push(
            CircleShape {
                center,
                radius,
                color,
            }
            .into(),
        );
    }

    fn draw_rectangle_outline(&mut self, origin: DVec2, width: f64, height: f64, color: ColorName) {
        self.push(
            RectShape {
                origin,
                size: dvec2(width, height),
                color,
            }
            .into(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document() {
        let svg = SvgSurface::default().to_svg().unwrap();
        insta::assert_snapshot!(svg, @r#"
        <svg xmlns="http://www.w3.org/2000/svg" width="800" height="600" viewBox="0 0 800 600">
        </svg>
        "#);
    }

    #[test]
    fn clear_drops_shapes() {
        let mut surface = SvgSurface::default();
        surface.draw_line(dvec2(0.0, 0.0), dvec2(5.0, 5.0), ColorName::Red);
        surface.clear();
        surface.clear();
        assert!(surface.shapes().is_empty());
        assert_eq!(surface.bounds(), None);
    }

    #[test]
    fn fit_wraps_the_drawing() {
        let mut surface = SvgSurface::new(SvgOptions {
            fit: true,
            ..SvgOptions::default()
        });
        surface.draw_circle_outline(dvec2(0.0, 0.0), 20.0, ColorName::Green);
        surface.draw_line(dvec2(0.0, 0.0), dvec2(50.0, 10.0), ColorName::Black);

        let svg = surface.to_svg().unwrap();
        insta::assert_snapshot!(svg, @r##"
        <svg xmlns="http://www.w3.org/2000/svg" width="90" height="60" viewBox="-30 -30 90 60">
          <circle cx="0" cy="0" r="20" fill="none" stroke="#00FF00" stroke-width="2" />
          <line x1="0" y1="0" x2="50" y2="10" stroke="#000000" stroke-width="2" />
        </svg>
        "##);
    }

    #[test]
    fn fit_without_shapes_uses_the_canvas() {
        let surface = SvgSurface::new(SvgOptions {
            fit: true,
            width: 100.0,
            height: 50.0,
            ..SvgOptions::default()
        });
        assert!(surface.to_svg().unwrap().contains(r#"viewBox="0 0 100 50""#));
    }

    #[test]
    fn rejects_bad_canvas() {
        let surface = SvgSurface::new(SvgOptions {
            width: 0.0,
            ..SvgOptions::default()
        });
        assert!(matches!(
            surface.to_svg(),
            Err(RenderError::InvalidCanvas { .. })
        ));
    }

    #[test]
    fn rejects_infinite_bounds() {
        let mut surface = SvgSurface::new(SvgOptions {
            fit: true,
            ..SvgOptions::default()
        });
        surface.draw_circle_outline(dvec2(f64::MAX, 0.0), f64::MAX, ColorName::Red);
        assert_eq!(surface.to_svg(), Err(RenderError::InvalidBounds));
    }

    #[test]
    fn shapes_outside_the_canvas_are_kept() {
        let mut surface = SvgSurface::default();
        surface.draw_rectangle_outline(dvec2(-100.0, -100.0), 10.0, 10.0, ColorName::Pink);
        assert_eq!(surface.shapes().len(), 1);
        assert!(surface.to_svg().unwrap().contains(r#"<rect x="-100" y="-100""#));
    }
}
