//! Drawing state - the pen and color tracked while executing one program

use glam::DVec2;

use crate::types::ColorName;

use super::defaults;

/// Pen and color state of a single run.
///
/// A fresh state is created for every call to [`execute`](super::execute);
/// nothing carries over between scripts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingState {
    /// Color used by every drawing command
    pub color: ColorName,
    /// Current pen position
    pub pen: DVec2,
    /// Whether `move` leaves a line behind
    pub pen_down: bool,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self::new(defaults::ORIGIN)
    }
}

impl DrawingState {
    /// Black, pen down, pen at `origin`
    pub fn new(origin: DVec2) -> Self {
        Self {
            color: ColorName::default(),
            pen: origin,
            pen_down: true,
        }
    }
}
