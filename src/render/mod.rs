//! Execution of parsed programs against a drawing surface
//!
//! This module is organized into submodules:
//! - `defaults`: Default canvas and execution settings
//! - `context`: DrawingState, the pen and color of one run
//! - `shapes`: Shape types held by the SVG surface
//! - `svg`: The SVG surface

pub mod context;
pub mod defaults;
pub mod shapes;
pub mod svg;

use std::fmt;

use glam::{DVec2, dvec2};

pub use context::DrawingState;
pub use svg::{SvgOptions, SvgSurface};

use crate::ast::{Command, Program, Statement};
use crate::errors::{ErrorReport, ExecutionError};
use crate::log::debug;
use crate::surface::{Surface, SurfaceCall};
use crate::types::{ColorName, Number};

/// Execution settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Initial pen position
    pub origin: DVec2,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            origin: defaults::ORIGIN,
        }
    }
}

/// What one successfully executed command did, as shown in the output log
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    DrewLine { from: DVec2, to: DVec2 },
    DrewCircle { center: DVec2, radius: f64 },
    DrewRectangle { origin: DVec2, size: DVec2 },
    ColorSet(ColorName),
    Cleared,
    /// `drew` is true when the pen was down and left a line
    PenMoved { to: DVec2, drew: bool },
    PenLifted,
    PenLowered,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::DrewLine { from, to } => write!(
                f,
                "drew line from ({}, {}) to ({}, {})",
                from.x, from.y, to.x, to.y
            ),
            Outcome::DrewCircle { center, radius } => write!(
                f,
                "drew circle at ({}, {}) with radius {}",
                center.x, center.y, radius
            ),
            Outcome::DrewRectangle { origin, size } => write!(
                f,
                "drew rectangle at ({}, {}) with size {}x{}",
                origin.x, origin.y, size.x, size.y
            ),
            Outcome::ColorSet(color) => write!(f, "color set to {}", color),
            Outcome::Cleared => write!(f, "canvas cleared"),
            Outcome::PenMoved { to, .. } => write!(f, "pen moved to ({}, {})", to.x, to.y),
            Outcome::PenLifted => write!(f, "pen lifted"),
            Outcome::PenLowered => write!(f, "pen lowered"),
        }
    }
}

/// Result of executing a program.
///
/// On failure, `calls` and `outcomes` hold what happened before the failing
/// command; those calls have already reached the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionReport {
    /// Surface calls in the order they were issued
    pub calls: Vec<SurfaceCall>,
    /// One entry per command that completed
    pub outcomes: Vec<Outcome>,
    /// Pen and color after the last completed command
    pub state: DrawingState,
    pub failure: Option<ExecutionError>,
}

impl ExecutionReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn failure(&self) -> Option<&ExecutionError> {
        self.failure.as_ref()
    }

    pub fn error_report(&self) -> Option<ErrorReport> {
        self.failure.as_ref().map(ErrorReport::from)
    }

    /// Turn a failed run into an `Err`
    pub fn into_result(self) -> Result<Self, ExecutionError> {
        match self.failure {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }

    /// Numbered output-log lines: `[1] color set to red`, ...
    ///
    /// A failed run ends with the failing command's error.
    pub fn log_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .outcomes
            .iter()
            .enumerate()
            .map(|(i, outcome)| format!("[{}] {}", i + 1, outcome))
            .collect();
        if let Some(error) = &self.failure {
            lines.push(format!("[{}] error: {}", error.index() + 1, error));
        }
        lines
    }
}

/// Execute a program on a fresh drawing state.
///
/// Commands run strictly in order; the first failing command stops the run.
pub fn execute<S: Surface + ?Sized>(
    program: &Program,
    surface: &mut S,
    options: &Options,
) -> ExecutionReport {
    let mut executor = Executor {
        state: DrawingState::new(options.origin),
        calls: Vec::new(),
        surface,
    };
    let mut outcomes = Vec::with_capacity(program.len());
    let mut failure = None;

    for (index, statement) in program.statements.iter().enumerate() {
        debug!(
            index,
            line = statement.line,
            command = statement.command.name(),
            "executing command"
        );
        match executor.run(index, statement) {
            Ok(outcome) => outcomes.push(outcome),
            Err(error) => {
                debug!(index, %error, "execution stopped");
                failure = Some(error);
                break;
            }
        }
    }

    ExecutionReport {
        calls: executor.calls,
        outcomes,
        state: executor.state,
        failure,
    }
}

struct Executor<'s, S: ?Sized> {
    state: DrawingState,
    calls: Vec<SurfaceCall>,
    surface: &'s mut S,
}

impl<S: Surface + ?Sized> Executor<'_, S> {
    fn run(&mut self, index: usize, statement: &Statement) -> Result<Outcome, ExecutionError> {
        match statement.command {
            Command::SetColor { color } => {
                self.state.color = color;
                Ok(Outcome::ColorSet(color))
            }
            Command::Clear => {
                self.commit(SurfaceCall::Clear);
                Ok(Outcome::Cleared)
            }
            Command::Move { x, y } => {
                let to = point(x, y);
                let drew = self.state.pen_down;
                if drew {
                    self.commit(SurfaceCall::Line {
                        from: self.state.pen,
                        to,
                        color: self.state.color,
                    });
                }
                self.state.pen = to;
                Ok(Outcome::PenMoved { to, drew })
            }
            Command::PenUp => {
                self.state.pen_down = false;
                Ok(Outcome::PenLifted)
            }
            Command::PenDown => {
                self.state.pen_down = true;
                Ok(Outcome::PenLowered)
            }
            Command::DrawLine { x1, y1, x2, y2 } => {
                let (from, to) = (point(x1, y1), point(x2, y2));
                self.commit(SurfaceCall::Line {
                    from,
                    to,
                    color: self.state.color,
                });
                Ok(Outcome::DrewLine { from, to })
            }
            Command::DrawCircle { x, y, radius } => {
                if !radius.is_positive() {
                    return Err(ExecutionError::NonPositiveRadius {
                        radius,
                        index,
                        line: statement.line,
                        column: statement.column,
                        span: statement.span,
                    });
                }
                let center = point(x, y);
                let radius = radius.as_f64();
                self.commit(SurfaceCall::Circle {
                    center,
                    radius,
                    color: self.state.color,
                });
                Ok(Outcome::DrewCircle { center, radius })
            }
            Command::DrawRectangle {
                x,
                y,
                width,
                height,
            } => {
                if !width.is_positive() || !height.is_positive() {
                    return Err(ExecutionError::NonPositiveSize {
                        width,
                        height,
                        index,
                        line: statement.line,
                        column: statement.column,
                        span: statement.span,
                    });
                }
                let origin = point(x, y);
                let size = point(width, height);
                self.commit(SurfaceCall::Rectangle {
                    origin,
                    width: size.x,
                    height: size.y,
                    color: self.state.color,
                });
                Ok(Outcome::DrewRectangle { origin, size })
            }
        }
    }

    /// Send a call to the surface and remember it
    fn commit(&mut self, call: SurfaceCall) {
        call.apply(&mut *self.surface);
        self.calls.push(call);
    }
}

fn point(x: Number, y: Number) -> DVec2 {
    dvec2(x.as_f64(), y.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use crate::surface::Recorder;
    use crate::token::tokenize;

    fn run(source: &str) -> (ExecutionReport, Recorder) {
        let program = parse(&tokenize(source).unwrap()).unwrap();
        let mut recorder = Recorder::new();
        let report = execute(&program, &mut recorder, &Options::default());
        (report, recorder)
    }

    #[test]
    fn initial_state() {
        let state = DrawingState::default();
        assert_eq!(state.color, ColorName::Black);
        assert_eq!(state.pen, DVec2::ZERO);
        assert!(state.pen_down);
    }

    #[test]
    fn lines_use_the_current_color() {
        let (report, recorder) = run("draw line 0 0 10 10\nset color red\ndraw line 1 2 3 4");
        assert!(report.is_success());
        assert_eq!(
            recorder.calls(),
            [
                SurfaceCall::Line {
                    from: dvec2(0.0, 0.0),
                    to: dvec2(10.0, 10.0),
                    color: ColorName::Black,
                },
                SurfaceCall::Line {
                    from: dvec2(1.0, 2.0),
                    to: dvec2(3.0, 4.0),
                    color: ColorName::Red,
                },
            ]
        );
        assert_eq!(report.calls, recorder.calls());
    }

    #[test]
    fn draw_line_does_not_move_the_pen() {
        let (report, _) = run("draw line 5 5 50 50");
        assert_eq!(report.state.pen, DVec2::ZERO);
    }

    #[test]
    fn pen_up_move_draws_nothing() {
        let (report, recorder) = run("pen up\nmove 50 50\npen down\nmove 100 100");
        assert_eq!(
            recorder.calls(),
            [SurfaceCall::Line {
                from: dvec2(50.0, 50.0),
                to: dvec2(100.0, 100.0),
                color: ColorName::Black,
            }]
        );
        assert_eq!(report.state.pen, dvec2(100.0, 100.0));
        assert_eq!(
            report.outcomes[1],
            Outcome::PenMoved {
                to: dvec2(50.0, 50.0),
                drew: false
            }
        );
    }

    #[test]
    fn move_starts_from_the_configured_origin() {
        let program = parse(&tokenize("move 10 0").unwrap()).unwrap();
        let mut recorder = Recorder::new();
        let options = Options {
            origin: dvec2(400.0, 300.0),
        };
        execute(&program, &mut recorder, &options);
        assert_eq!(
            recorder.calls(),
            [SurfaceCall::Line {
                from: dvec2(400.0, 300.0),
                to: dvec2(10.0, 0.0),
                color: ColorName::Black,
            }]
        );
    }

    #[test]
    fn clear_keeps_pen_and_color() {
        let (report, recorder) = run("set color blue\nmove 5 5\nclear\nclear");
        assert_eq!(report.state.color, ColorName::Blue);
        assert_eq!(report.state.pen, dvec2(5.0, 5.0));
        assert!(recorder.drawn().is_empty());
        assert_eq!(recorder.calls().len(), 3);
    }

    #[test]
    fn zero_radius_fails_without_drawing() {
        let (report, recorder) = run("draw line 0 0 1 1\ndraw circle 10 10 0\ndraw line 2 2 3 3");
        let error = report.failure().unwrap();
        assert_eq!(error.index(), 1);
        assert_eq!(error.line(), 2);
        assert_eq!(error.to_string(), "circle radius must be positive, got 0");
        // Only the first line reached the surface, and it stays drawn
        assert_eq!(recorder.calls().len(), 1);
        assert_eq!(report.outcomes.len(), 1);
    }

    #[test]
    fn negative_height_fails() {
        let (report, recorder) = run("draw rectangle 10 10 5 -3");
        assert!(matches!(
            report.failure(),
            Some(ExecutionError::NonPositiveSize { index: 0, line: 1, column: 1, .. })
        ));
        assert!(recorder.calls().is_empty());
        assert_eq!(
            report.failure().unwrap().to_string(),
            "rectangle size must be positive, got 5x-3"
        );
    }

    #[test]
    fn decimal_sizes() {
        let (report, recorder) = run("draw circle 1 1 0.5\ndraw rectangle 0 0 0.1 0.2");
        assert!(report.is_success());
        assert_eq!(recorder.calls().len(), 2);
    }

    #[test]
    fn log_lines_number_each_command() {
        let (report, _) = run("set color red\ndraw circle 400 300 50\ndraw rectangle 0 0 0 1");
        assert_eq!(
            report.log_lines(),
            [
                "[1] color set to red",
                "[2] drew circle at (400, 300) with radius 50",
                "[3] error: rectangle size must be positive, got 0x1",
            ]
        );
    }

    #[test]
    fn into_result() {
        let (report, _) = run("clear");
        assert!(report.into_result().is_ok());

        let (report, _) = run("draw circle 0 0 -1");
        let report_line = report.error_report().unwrap();
        assert_eq!(report_line.stage, crate::errors::Stage::Execute);
        assert!(report.into_result().is_err());
    }

    #[test]
    fn each_run_starts_fresh() {
        let program = parse(&tokenize("set color red\nmove 3 3").unwrap()).unwrap();
        let mut recorder = Recorder::new();
        let first = execute(&program, &mut recorder, &Options::default());
        let second = execute(&program, &mut recorder, &Options::default());
        assert_eq!(first, second);
    }
}
