//! Default canvas and execution settings

use glam::DVec2;

/// Where the pen starts when no origin is configured
pub const ORIGIN: DVec2 = DVec2::ZERO;
pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 600.0;
pub const STROKE_WIDTH: f64 = 2.0;
/// Space around the drawing when the SVG view box is fitted to its content
pub const FIT_PADDING: f64 = 10.0;
