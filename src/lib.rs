//! An interpreter for a small line-oriented drawing language.
//!
//! ```text
//! set color blue
//! draw circle 400 300 50   # outline only
//! pen up
//! move 10 10
//! pen down
//! move 100 10
//! ```
//!
//! A script runs through three stages: [`tokenize`], [`parse`] and
//! [`execute`]. [`interpret`] chains them. Execution paints onto anything
//! implementing [`Surface`]; the crate ships a [`Recorder`] and an
//! [`SvgSurface`].

use pest_derive::Parser;

pub mod ast;
pub mod errors;
mod log;
pub mod parse;
pub mod render;
pub mod surface;
pub mod token;
pub mod types;

pub use ast::{Command, Program, Statement};
pub use errors::{
    ErrorReport, ExecutionError, LexError, ParseError, RenderError, ScriptError, SourceContext,
    Stage,
};
pub use parse::parse;
pub use render::{
    DrawingState, ExecutionReport, Options, Outcome, SvgOptions, SvgSurface, execute,
};
pub use surface::{Recorder, Surface, SurfaceCall};
pub use token::{Token, TokenKind, tokenize};
pub use types::{ColorName, Number};

#[derive(Parser)]
#[grammar = "pendraw.pest"]
pub struct PenParser;

/// Script loaded by the command-line tool's `--example` flag
pub const EXAMPLE_SCRIPT: &str = "\
# Example Drawing Commands
# Set colors and draw shapes

set color blue
draw circle 400 300 50

set color red
draw rectangle 300 200 100 80

set color green
draw line 100 100 700 500

set color purple
draw circle 200 150 30

set color orange
draw rectangle 500 400 150 100
";

/// Run a script from source text onto `surface`.
///
/// Lex and parse errors come back as `Err` before anything is drawn. An
/// execution error is carried in the returned report together with the
/// calls that were already made.
pub fn interpret<S: Surface + ?Sized>(
    source: &str,
    surface: &mut S,
    options: &Options,
) -> Result<ExecutionReport, ScriptError> {
    let tokens = tokenize(source)?;
    let program = parse(&tokens)?;
    Ok(execute(&program, surface, options))
}
