//! Parse a token stream into AST nodes
//!
//! Recursive descent, one line at a time. The leading keyword commits to a
//! command; after that every token must match the command's fixed pattern.
//! The first malformed line stops the parse.

use miette::SourceSpan;

use crate::ast::*;
use crate::errors::ParseError;
use crate::log::debug;
use crate::token::{Keyword, Token, TokenKind};
use crate::types::{ColorName, Number};

/// Parse tokens into a program
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    let mut statements = Vec::new();

    for line in tokens.split_inclusive(|t| t.kind == TokenKind::EndOfLine) {
        let (body, end) = match line.split_last() {
            Some((last, body)) if last.kind == TokenKind::EndOfLine => (body, Some(last)),
            _ => (line, None),
        };
        if body.is_empty() {
            continue;
        }
        let statement = parse_line(Cursor::new(body, end))?;
        debug!(
            line = statement.line,
            command = statement.command.name(),
            "parsed command"
        );
        statements.push(statement);
    }

    Ok(Program { statements })
}

/// Position inside one line's tokens
struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    end: Option<&'a Token>,
    /// Words consumed so far, for "missing argument" messages
    command: String,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token], end: Option<&'a Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            command: String::new(),
        }
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Record a consumed keyword as part of the command's name
    fn commit(&mut self, token: &Token) {
        if !self.command.is_empty() {
            self.command.push(' ');
        }
        self.command.push_str(&token.text.to_ascii_lowercase());
    }

    /// Where the line ends: the END_OF_LINE token, or just past the last token
    fn end_position(&self) -> (usize, usize, SourceSpan) {
        if let Some(eol) = self.end {
            return (eol.line, eol.column, eol.span);
        }
        match self.tokens.last() {
            Some(last) => (
                last.line,
                last.column + last.text.chars().count(),
                SourceSpan::from((last.span.offset() + last.span.len(), 0)),
            ),
            None => (1, 1, SourceSpan::from((0, 0))),
        }
    }

    fn missing(&self, expected: impl Into<String>) -> ParseError {
        let (line, column, span) = self.end_position();
        ParseError::MissingArgument {
            command: self.command.clone(),
            expected: expected.into(),
            line,
            column,
            span,
        }
    }

    fn unexpected(&self, expected: impl Into<String>, found: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.describe(),
            line: found.line,
            column: found.column,
            span: found.span,
        }
    }

    fn expect_number(&mut self, field: &str) -> Result<Number, ParseError> {
        let expected = format!("a number for {}", field);
        let Some(token) = self.next() else {
            return Err(self.missing(expected));
        };
        if token.kind != TokenKind::Number {
            return Err(self.unexpected(expected, token));
        }
        token
            .text
            .parse::<Number>()
            .map_err(|reason| ParseError::InvalidNumber {
                text: token.text.clone(),
                reason,
                line: token.line,
                column: token.column,
                span: token.span,
            })
    }

    /// Consume one of `choices`, returning which
    fn expect_keyword(&mut self, choices: &[Keyword]) -> Result<Keyword, ParseError> {
        let expected = describe_choices(choices);
        let Some(token) = self.next() else {
            return Err(self.missing(expected));
        };
        match token.kind {
            TokenKind::Keyword(kw) if choices.contains(&kw) => {
                self.commit(token);
                Ok(kw)
            }
            _ => Err(self.unexpected(expected, token)),
        }
    }

    fn expect_color(&mut self) -> Result<ColorName, ParseError> {
        let Some(token) = self.next() else {
            return Err(self.missing("a color name"));
        };
        match token.kind {
            TokenKind::Color(color) => Ok(color),
            // Any other word is a color we don't know
            TokenKind::Identifier | TokenKind::Keyword(_) => Err(ParseError::UnknownColor {
                name: token.text.clone(),
                line: token.line,
                column: token.column,
                span: token.span,
            }),
            _ => Err(self.unexpected("a color name", token)),
        }
    }

    /// The command is complete; nothing else may follow on the line
    fn finish(&mut self) -> Result<(), ParseError> {
        match self.next() {
            Some(extra) => Err(self.unexpected("end of line", extra)),
            None => Ok(()),
        }
    }

    /// Span from the first token to the last one consumed
    fn consumed_span(&self) -> SourceSpan {
        let first = &self.tokens[0];
        let last = &self.tokens[self.pos.saturating_sub(1)];
        let start = first.span.offset();
        let end = last.span.offset() + last.span.len();
        SourceSpan::from((start, end - start))
    }
}

fn describe_choices(choices: &[Keyword]) -> String {
    let quoted: Vec<String> = choices.iter().map(|kw| format!("`{}`", kw)).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

fn parse_line(mut cursor: Cursor<'_>) -> Result<Statement, ParseError> {
    let Some(lead) = cursor.next() else {
        return Err(cursor.missing("a command"));
    };

    let command = match lead.kind {
        TokenKind::Keyword(Keyword::Draw) => {
            cursor.commit(lead);
            parse_draw(&mut cursor)?
        }
        TokenKind::Keyword(Keyword::Set) => {
            cursor.commit(lead);
            parse_set(&mut cursor)?
        }
        TokenKind::Keyword(Keyword::Clear) => Command::Clear,
        TokenKind::Keyword(Keyword::Move) => {
            cursor.commit(lead);
            parse_move(&mut cursor)?
        }
        TokenKind::Keyword(Keyword::Pen) => {
            cursor.commit(lead);
            parse_pen(&mut cursor)?
        }
        _ => {
            return Err(ParseError::UnknownCommand {
                found: format!("`{}`", lead.text),
                line: lead.line,
                column: lead.column,
                span: lead.span,
            });
        }
    };
    cursor.finish()?;

    Ok(Statement {
        command,
        line: lead.line,
        column: lead.column,
        span: cursor.consumed_span(),
    })
}

fn parse_draw(cursor: &mut Cursor<'_>) -> Result<Command, ParseError> {
    let shape = cursor.expect_keyword(&[Keyword::Line, Keyword::Circle, Keyword::Rectangle])?;
    match shape {
        Keyword::Line => Ok(Command::DrawLine {
            x1: cursor.expect_number("x1")?,
            y1: cursor.expect_number("y1")?,
            x2: cursor.expect_number("x2")?,
            y2: cursor.expect_number("y2")?,
        }),
        Keyword::Circle => Ok(Command::DrawCircle {
            x: cursor.expect_number("x")?,
            y: cursor.expect_number("y")?,
            radius: cursor.expect_number("radius")?,
        }),
        _ => Ok(Command::DrawRectangle {
            x: cursor.expect_number("x")?,
            y: cursor.expect_number("y")?,
            width: cursor.expect_number("width")?,
            height: cursor.expect_number("height")?,
        }),
    }
}

fn parse_set(cursor: &mut Cursor<'_>) -> Result<Command, ParseError> {
    cursor.expect_keyword(&[Keyword::Color])?;
    let color = cursor.expect_color()?;
    Ok(Command::SetColor { color })
}

fn parse_move(cursor: &mut Cursor<'_>) -> Result<Command, ParseError> {
    Ok(Command::Move {
        x: cursor.expect_number("x")?,
        y: cursor.expect_number("y")?,
    })
}

fn parse_pen(cursor: &mut Cursor<'_>) -> Result<Command, ParseError> {
    match cursor.expect_keyword(&[Keyword::Up, Keyword::Down])? {
        Keyword::Up => Ok(Command::PenUp),
        _ => Ok(Command::PenDown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    fn parse_source(source: &str) -> Result<Program, ParseError> {
        parse(&tokenize(source).expect("source should tokenize"))
    }

    fn commands(source: &str) -> Vec<Command> {
        parse_source(source).unwrap().commands().copied().collect()
    }

    #[test]
    fn parses_every_command_family() {
        let source = "\
draw line 0 0 10 10
draw circle 5 5 2.5
draw rectangle 1 2 3 4
set color blue
clear
move -5 7
pen up
pen down
";
        assert_eq!(
            commands(source),
            [
                Command::DrawLine {
                    x1: Number::Integer(0),
                    y1: Number::Integer(0),
                    x2: Number::Integer(10),
                    y2: Number::Integer(10),
                },
                Command::DrawCircle {
                    x: Number::Integer(5),
                    y: Number::Integer(5),
                    radius: Number::Decimal(2.5),
                },
                Command::DrawRectangle {
                    x: Number::Integer(1),
                    y: Number::Integer(2),
                    width: Number::Integer(3),
                    height: Number::Integer(4),
                },
                Command::SetColor {
                    color: ColorName::Blue
                },
                Command::Clear,
                Command::Move {
                    x: Number::Integer(-5),
                    y: Number::Integer(7),
                },
                Command::PenUp,
                Command::PenDown,
            ]
        );
    }

    #[test]
    fn statements_remember_their_line() {
        let program = parse_source("# header\n\n  clear\nmove 1 2").unwrap();
        let positions: Vec<_> = program
            .statements
            .iter()
            .map(|s| (s.line, s.column))
            .collect();
        assert_eq!(positions, [(3, 3), (4, 1)]);
        assert_eq!(program.statements[1].span, SourceSpan::from((18, 8)));
    }

    #[test]
    fn empty_script_is_an_empty_program() {
        assert!(parse_source("").unwrap().is_empty());
        assert!(parse_source("# nothing\n\n").unwrap().is_empty());
    }

    #[test]
    fn missing_radius() {
        let err = parse_source("draw circle 10 10").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingArgument {
                command: "draw circle".to_string(),
                expected: "a number for radius".to_string(),
                line: 1,
                column: 18,
                span: SourceSpan::from((17, 0)),
            }
        );
        assert_eq!(
            err.to_string(),
            "`draw circle` is missing an argument: expected a number for radius"
        );
    }

    #[test]
    fn unknown_color_is_named() {
        let err = parse_source("set color chartreuse").unwrap_err();
        assert!(matches!(
            &err,
            ParseError::UnknownColor { name, line: 1, column: 11, .. } if name == "chartreuse"
        ));
        assert_eq!(err.to_string(), "unknown color `chartreuse`");
    }

    #[test]
    fn wrong_token_kind() {
        let err = parse_source("move 10 up").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected a number for y, found keyword `up`"
        );
        assert_eq!((err.line(), err.column()), (1, 9));
    }

    #[test]
    fn unknown_shape() {
        let err = parse_source("draw square 1 2 3").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected `line`, `circle` or `rectangle`, found `square`"
        );
    }

    #[test]
    fn pen_needs_direction() {
        let err = parse_source("pen sideways").unwrap_err();
        assert_eq!(err.to_string(), "expected `up` or `down`, found `sideways`");

        let err = parse_source("pen").unwrap_err();
        assert_eq!(
            err.to_string(),
            "`pen` is missing an argument: expected `up` or `down`"
        );
    }

    #[test]
    fn set_requires_color_keyword() {
        let err = parse_source("set colour red").unwrap_err();
        assert_eq!(err.to_string(), "expected `color`, found `colour`");
    }

    #[test]
    fn unknown_leading_word() {
        let err = parse_source("fly 1 2").unwrap_err();
        assert_eq!(err.to_string(), "unknown command `fly`");

        let err = parse_source("red").unwrap_err();
        assert!(matches!(err, ParseError::UnknownCommand { .. }));

        let err = parse_source("line 0 0 1 1").unwrap_err();
        assert!(matches!(err, ParseError::UnknownCommand { .. }));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let err = parse_source("clear 5").unwrap_err();
        assert_eq!(err.to_string(), "expected end of line, found number `5`");
        assert_eq!((err.line(), err.column()), (1, 7));
    }

    #[test]
    fn negative_sizes_are_syntactically_valid() {
        assert_eq!(
            commands("draw rectangle 10 10 5 -3"),
            [Command::DrawRectangle {
                x: Number::Integer(10),
                y: Number::Integer(10),
                width: Number::Integer(5),
                height: Number::Integer(-3),
            }]
        );
    }

    #[test]
    fn out_of_range_integer() {
        let err = parse_source("move 99999999999999999999 0").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { .. }));
    }

    #[test]
    fn first_bad_line_stops_the_parse() {
        let err = parse_source("draw line 0 0 1 1\ndraw circle 1 1\nfly").unwrap_err();
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn tokens_without_end_of_line() {
        let mut tokens = tokenize("move 1").unwrap();
        tokens.pop();
        let err = parse(&tokens).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingArgument { line: 1, column: 7, .. }
        ));
    }
}
