//! The drawing-surface contract the executor renders onto.

use std::fmt;

use glam::DVec2;

use crate::types::ColorName;

/// Something primitives can be painted on.
///
/// Calls arrive strictly in command order, one at a time. Coordinates are in
/// the surface's own space and may lie outside whatever is visible.
pub trait Surface {
    /// Erase everything drawn so far
    fn clear(&mut self);

    fn draw_line(&mut self, from: DVec2, to: DVec2, color: ColorName);

    fn draw_circle_outline(&mut self, center: DVec2, radius: f64, color: ColorName);

    /// `origin` is the top-left corner
    fn draw_rectangle_outline(&mut self, origin: DVec2, width: f64, height: f64, color: ColorName);
}

/// One surface call as a value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceCall {
    Clear,
    Line {
        from: DVec2,
        to: DVec2,
        color: ColorName,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: ColorName,
    },
    Rectangle {
        origin: DVec2,
        width: f64,
        height: f64,
        color: ColorName,
    },
}

impl SurfaceCall {
    /// Replay this call onto a surface
    pub fn apply<S: Surface + ?Sized>(&self, surface: &mut S) {
        match *self {
            SurfaceCall::Clear => surface.clear(),
            SurfaceCall::Line { from, to, color } => surface.draw_line(from, to, color),
            SurfaceCall::Circle {
                center,
                radius,
                color,
            } => surface.draw_circle_outline(center, radius, color),
            SurfaceCall::Rectangle {
                origin,
                width,
                height,
                color,
            } => surface.draw_rectangle_outline(origin, width, height, color),
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, SurfaceCall::Clear)
    }
}

/// One line per call, e.g. `line 0 0 -> 10 10 black`
impl fmt::Display for SurfaceCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceCall::Clear => write!(f, "clear"),
            SurfaceCall::Line { from, to, color } => write!(
                f,
                "line {} {} -> {} {} {}",
                from.x, from.y, to.x, to.y, color
            ),
            SurfaceCall::Circle {
                center,
                radius,
                color,
            } => write!(f, "circle {} {} r{} {}", center.x, center.y, radius, color),
            SurfaceCall::Rectangle {
                origin,
                width,
                height,
                color,
            } => write!(
                f,
                "rectangle {} {} {}x{} {}",
                origin.x, origin.y, width, height, color
            ),
        }
    }
}

/// A surface that only remembers what it was asked to do
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Vec<SurfaceCall>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received, clears included
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Primitives still visible: everything after the last clear
    pub fn drawn(&self) -> &[SurfaceCall] {
        let start = self
            .calls
            .iter()
            .rposition(SurfaceCall::is_clear)
            .map_or(0, |i| i + 1);
        &self.calls[start..]
    }

    pub fn into_calls(self) -> Vec<SurfaceCall> {
        self.calls
    }
}

impl Surface for Recorder {
    fn clear(&mut self) {
        self.calls.push(SurfaceCall::Clear);
    }

    fn draw_line(&mut self, from: DVec2, to: DVec2, color: ColorName) {
        self.calls.push(SurfaceCall::Line { from, to, color });
    }

    fn draw_circle_outline(&mut self, center: DVec2, radius: f64, color: ColorName) {
        self.calls.push(SurfaceCall::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_rectangle_outline(&mut self, origin: DVec2, width: f64, height: f64, color: ColorName) {
        self.calls.push(SurfaceCall::Rectangle {
            origin,
            width,
            height,
            color,
        });
    }
}
