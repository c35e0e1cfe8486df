//! Error types with rich diagnostics using miette
//!
//! Each pipeline stage has its own error enum. All of them carry a line and
//! column for the structured [`ErrorReport`], and a source span so a caller
//! can render them with [`SourceContext::report`].

use std::fmt;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::Number;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Wrap an error into a report that renders with the source snippet
    pub fn report<E>(&self, error: E) -> miette::Report
    where
        E: Diagnostic + Send + Sync + 'static,
    {
        miette::Report::new(error).with_source_code(self.named_source())
    }
}

// ============================================================================
// Lex Errors
// ============================================================================

/// Errors that occur while tokenizing
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("illegal character {character:?}")]
    #[diagnostic(
        code(pendraw::lex::illegal_character),
        help("scripts may only contain letters, digits, `.`, `-` before a number, and `#` comments")
    )]
    IllegalCharacter {
        character: char,
        line: usize,
        column: usize,
        #[label("not allowed here")]
        span: SourceSpan,
    },

    /// pest rejected the input outright. The grammar accepts any text, so
    /// this only fires if the grammar changes.
    #[error("malformed input: {message}")]
    #[diagnostic(code(pendraw::lex::grammar))]
    Grammar {
        message: String,
        line: usize,
        column: usize,
    },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::IllegalCharacter { line, .. } | LexError::Grammar { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            LexError::IllegalCharacter { column, .. } | LexError::Grammar { column, .. } => {
                *column
            }
        }
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur during parsing
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unknown command {found}")]
    #[diagnostic(
        code(pendraw::parse::unknown_command),
        help("commands start with `draw`, `set`, `clear`, `move` or `pen`")
    )]
    UnknownCommand {
        found: String,
        line: usize,
        column: usize,
        #[label("expected a command here")]
        span: SourceSpan,
    },

    #[error("expected {expected}, found {found}")]
    #[diagnostic(code(pendraw::parse::unexpected_token))]
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
        column: usize,
        #[label("found this")]
        span: SourceSpan,
    },

    #[error("`{command}` is missing an argument: expected {expected}")]
    #[diagnostic(code(pendraw::parse::missing_argument))]
    MissingArgument {
        command: String,
        expected: String,
        line: usize,
        column: usize,
        #[label("line ends here")]
        span: SourceSpan,
    },

    #[error("unknown color `{name}`")]
    #[diagnostic(
        code(pendraw::parse::unknown_color),
        help("available colors: red, green, blue, yellow, orange, purple, pink, black, white, gray, brown, cyan, magenta")
    )]
    UnknownColor {
        name: String,
        line: usize,
        column: usize,
        #[label("not in the palette")]
        span: SourceSpan,
    },

    #[error("invalid number `{text}`: {reason}")]
    #[diagnostic(code(pendraw::parse::invalid_number))]
    InvalidNumber {
        text: String,
        reason: crate::types::NumericError,
        line: usize,
        column: usize,
        #[label("invalid number")]
        span: SourceSpan,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnknownCommand { line, .. }
            | ParseError::UnexpectedToken { line, .. }
            | ParseError::MissingArgument { line, .. }
            | ParseError::UnknownColor { line, .. }
            | ParseError::InvalidNumber { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            ParseError::UnknownCommand { column, .. }
            | ParseError::UnexpectedToken { column, .. }
            | ParseError::MissingArgument { column, .. }
            | ParseError::UnknownColor { column, .. }
            | ParseError::InvalidNumber { column, .. } => *column,
        }
    }
}

// ============================================================================
// Execution Errors
// ============================================================================

/// Errors that stop execution of a parsed program.
///
/// `index` is the position of the failing statement in the program.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("circle radius must be positive, got {radius}")]
    #[diagnostic(code(pendraw::exec::non_positive_radius))]
    NonPositiveRadius {
        radius: Number,
        index: usize,
        line: usize,
        column: usize,
        #[label("in this command")]
        span: SourceSpan,
    },

    #[error("rectangle size must be positive, got {width}x{height}")]
    #[diagnostic(code(pendraw::exec::non_positive_size))]
    NonPositiveSize {
        width: Number,
        height: Number,
        index: usize,
        line: usize,
        column: usize,
        #[label("in this command")]
        span: SourceSpan,
    },
}

impl ExecutionError {
    /// Index of the failing statement
    pub fn index(&self) -> usize {
        match self {
            ExecutionError::NonPositiveRadius { index, .. }
            | ExecutionError::NonPositiveSize { index, .. } => *index,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ExecutionError::NonPositiveRadius { line, .. }
            | ExecutionError::NonPositiveSize { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            ExecutionError::NonPositiveRadius { column, .. }
            | ExecutionError::NonPositiveSize { column, .. } => *column,
        }
    }
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur while producing SVG output
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("invalid canvas: {width}x{height} with stroke width {stroke_width}")]
    #[diagnostic(
        code(pendraw::render::invalid_canvas),
        help("width, height and stroke width must be positive")
    )]
    InvalidCanvas {
        width: f64,
        height: f64,
        stroke_width: f64,
    },

    #[error("infinite or NaN in bounds")]
    #[diagnostic(code(pendraw::render::invalid_bounds))]
    InvalidBounds,

    #[error("failed to write SVG")]
    #[diagnostic(code(pendraw::render::format))]
    Format(#[from] fmt::Error),
}

// ============================================================================
// Pipeline
// ============================================================================

/// Any error from a script run
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Execute(#[from] ExecutionError),
}

impl ScriptError {
    pub fn stage(&self) -> Stage {
        match self {
            ScriptError::Lex(_) => Stage::Lex,
            ScriptError::Parse(_) => Stage::Parse,
            ScriptError::Execute(_) => Stage::Execute,
        }
    }

    /// Flatten into the structured form presented to users
    pub fn report(&self) -> ErrorReport {
        let (line, column) = match self {
            ScriptError::Lex(e) => (e.line(), e.column()),
            ScriptError::Parse(e) => (e.line(), e.column()),
            ScriptError::Execute(e) => (e.line(), e.column()),
        };
        ErrorReport {
            stage: self.stage(),
            message: self.to_string(),
            line,
            column,
        }
    }
}

/// Pipeline stage an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Lex,
    Parse,
    Execute,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Lex => "lex",
            Stage::Parse => "parse",
            Stage::Execute => "execute",
        })
    }
}

/// Structured failure report: `{ stage, message, line, column }`.
///
/// Lines and columns are 1-based. The message is plain text without
/// position information; presentation is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub stage: Stage,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error at {}:{}: {}",
            self.stage, self.line, self.column, self.message
        )
    }
}

impl From<&LexError> for ErrorReport {
    fn from(e: &LexError) -> Self {
        ScriptError::Lex(e.clone()).report()
    }
}

impl From<&ParseError> for ErrorReport {
    fn from(e: &ParseError) -> Self {
        ScriptError::Parse(e.clone()).report()
    }
}

impl From<&ExecutionError> for ErrorReport {
    fn from(e: &ExecutionError) -> Self {
        ScriptError::Execute(e.clone()).report()
    }
}
