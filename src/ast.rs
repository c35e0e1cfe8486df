//! AST types for pendraw scripts

use miette::SourceSpan;

use crate::types::{ColorName, Number};

/// A complete parsed script
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// The commands alone, in source order
    pub fn commands(&self) -> impl Iterator<Item = &Command> + '_ {
        self.statements.iter().map(|s| &s.command)
    }
}

/// One command plus where it came from.
///
/// `line`/`column` point at the command's leading keyword; `span` covers
/// the whole command.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub command: Command,
    pub line: usize,
    pub column: usize,
    pub span: SourceSpan,
}

/// A single drawing instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `draw line x1 y1 x2 y2`
    DrawLine {
        x1: Number,
        y1: Number,
        x2: Number,
        y2: Number,
    },
    /// `draw circle x y radius`
    DrawCircle { x: Number, y: Number, radius: Number },
    /// `draw rectangle x y width height`, `(x, y)` is the top-left corner
    DrawRectangle {
        x: Number,
        y: Number,
        width: Number,
        height: Number,
    },
    /// `set color name`
    SetColor { color: ColorName },
    Clear,
    /// `move x y`, draws from the pen position when the pen is down
    Move { x: Number, y: Number },
    PenUp,
    PenDown,
}

impl Command {
    /// The words that introduce this command, for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::DrawLine { .. } => "draw line",
            Command::DrawCircle { .. } => "draw circle",
            Command::DrawRectangle { .. } => "draw rectangle",
            Command::SetColor { .. } => "set color",
            Command::Clear => "clear",
            Command::Move { .. } => "move",
            Command::PenUp => "pen up",
            Command::PenDown => "pen down",
        }
    }
}
