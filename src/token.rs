//! Lexer: script text to a flat token stream.
//!
//! Character classes come from `pendraw.pest`; this module walks the pest
//! pairs line by line, classifies words and appends one
//! [`TokenKind::EndOfLine`] per non-blank line.

use std::fmt;
use std::str::FromStr;

use miette::SourceSpan;
use pest::Parser;
use pest::error::LineColLocation;
use pest::iterators::Pair;

use crate::errors::LexError;
use crate::log::debug;
use crate::types::ColorName;
use crate::{PenParser, Rule};

/// Reserved words of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Draw,
    Line,
    Circle,
    Rectangle,
    Set,
    Color,
    Clear,
    Move,
    Pen,
    Up,
    Down,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Draw => "draw",
            Keyword::Line => "line",
            Keyword::Circle => "circle",
            Keyword::Rectangle => "rectangle",
            Keyword::Set => "set",
            Keyword::Color => "color",
            Keyword::Clear => "clear",
            Keyword::Move => "move",
            Keyword::Pen => "pen",
            Keyword::Up => "up",
            Keyword::Down => "down",
        }
    }
}

impl FromStr for Keyword {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draw" => Ok(Keyword::Draw),
            "line" => Ok(Keyword::Line),
            "circle" => Ok(Keyword::Circle),
            "rectangle" => Ok(Keyword::Rectangle),
            "set" => Ok(Keyword::Set),
            "color" => Ok(Keyword::Color),
            "clear" => Ok(Keyword::Clear),
            "move" => Ok(Keyword::Move),
            "pen" => Ok(Keyword::Pen),
            "up" => Ok(Keyword::Up),
            "down" => Ok(Keyword::Down),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Number,
    Color(ColorName),
    /// Any other word; only ever reported as an error by the parser
    Identifier,
    EndOfLine,
}

/// A single token with its source position.
///
/// `line` and `column` are 1-based, `column` counts characters.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
    pub span: SourceSpan,
}

impl Token {
    /// How the token reads in an "expected X, found Y" message
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Keyword(kw) => format!("keyword `{}`", kw),
            TokenKind::Number => format!("number `{}`", self.text),
            TokenKind::Color(_) => format!("color `{}`", self.text),
            TokenKind::Identifier => format!("`{}`", self.text),
            TokenKind::EndOfLine => "end of line".to_string(),
        }
    }
}

/// Tokenize a whole script.
///
/// Fails on the first character the language doesn't allow; no partial
/// token stream is returned.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let pairs = PenParser::parse(Rule::script, source).map_err(|e| {
        let (line, column) = match e.line_col {
            LineColLocation::Pos(pos) | LineColLocation::Span(pos, _) => pos,
        };
        LexError::Grammar {
            message: e.variant.message().into_owned(),
            line,
            column,
        }
    })?;

    // Lines are counted from the `line` pairs themselves: pest's own
    // `line_col` only breaks on `\n`, the grammar also accepts a lone `\r`.
    let mut tokens = Vec::new();
    let lines = pairs.flatten().filter(|pair| pair.as_rule() == Rule::line);
    for (index, pair) in lines.enumerate() {
        lex_line(index + 1, pair, &mut tokens)?;
    }

    debug!(count = tokens.len(), "tokenized script");
    Ok(tokens)
}

/// Where a line starts, for turning byte offsets into columns
struct LineStart<'i> {
    number: usize,
    offset: usize,
    text: &'i str,
}

impl LineStart<'_> {
    /// 1-based character column of `pair` within this line
    fn column_of(&self, pair: &Pair<Rule>) -> usize {
        let rel = pair.as_span().start() - self.offset;
        self.text[..rel].chars().count() + 1
    }
}

fn lex_line(number: usize, line: Pair<Rule>, tokens: &mut Vec<Token>) -> Result<(), LexError> {
    let start = LineStart {
        number,
        offset: line.as_span().start(),
        text: line.as_str(),
    };
    let mut last: Option<(usize, usize, usize)> = None;

    for pair in line.into_inner() {
        let kind = match pair.as_rule() {
            Rule::number => TokenKind::Number,
            Rule::word => classify_word(pair.as_str()),
            Rule::stray => TokenKind::Identifier,
            Rule::comment => break,
            Rule::illegal => {
                let character = pair.as_str().chars().next().unwrap_or_default();
                return Err(LexError::IllegalCharacter {
                    character,
                    line: start.number,
                    column: start.column_of(&pair),
                    span: span_of(&pair),
                });
            }
            _ => continue,
        };

        let token = make_token(kind, &pair, &start);
        last = Some((
            token.line,
            token.column + token.text.chars().count(),
            pair.as_span().end(),
        ));
        tokens.push(token);
    }

    if let Some((line, column, offset)) = last {
        tokens.push(Token {
            kind: TokenKind::EndOfLine,
            text: String::new(),
            line,
            column,
            span: SourceSpan::from((offset, 0)),
        });
    }
    Ok(())
}

/// Keywords win over palette names, anything else is an identifier
fn classify_word(word: &str) -> TokenKind {
    if let Ok(kw) = word.parse::<Keyword>() {
        TokenKind::Keyword(kw)
    } else if let Ok(color) = word.parse::<ColorName>() {
        TokenKind::Color(color)
    } else {
        TokenKind::Identifier
    }
}

fn make_token(kind: TokenKind, pair: &Pair<Rule>, start: &LineStart<'_>) -> Token {
    Token {
        kind,
        text: pair.as_str().to_string(),
        line: start.number,
        column: start.column_of(pair),
        span: span_of(pair),
    }
}

fn span_of(pair: &Pair<Rule>) -> SourceSpan {
    let span = pair.as_span();
    SourceSpan::from((span.start(), span.end() - span.start()))
}
