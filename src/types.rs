//! Value types shared by every stage: numeric literals and the color palette.

use std::fmt;
use std::str::FromStr;

/// Error type for numeric literals that cannot be represented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// Integer literal does not fit in an `i64`
    Overflow,
    /// Decimal literal is NaN or infinite
    NotFinite,
    /// Text is not a numeric literal at all
    Malformed,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => write!(f, "integer is out of range"),
            NumericError::NotFinite => write!(f, "value is not finite"),
            NumericError::Malformed => write!(f, "not a number"),
        }
    }
}

impl std::error::Error for NumericError {}

/// A numeric literal, keeping its lexical form.
///
/// A literal with a `.` is a [`Number::Decimal`], anything else is an
/// [`Number::Integer`]. Values are validated on construction, so a `Number`
/// is always finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Decimal(f64),
}

impl Number {
    /// The value as a float, for geometry.
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => i as f64,
            Number::Decimal(d) => d,
        }
    }

    /// Whether the value is strictly greater than zero
    #[inline]
    pub fn is_positive(self) -> bool {
        match self {
            Number::Integer(i) => i > 0,
            Number::Decimal(d) => d > 0.0,
        }
    }
}

impl FromStr for Number {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(NumericError::Malformed);
        }
        if digits.contains('.') {
            let value: f64 = s.parse().map_err(|_| NumericError::Malformed)?;
            if value.is_finite() {
                Ok(Number::Decimal(value))
            } else {
                Err(NumericError::NotFinite)
            }
        } else {
            s.parse::<i64>()
                .map(Number::Integer)
                .map_err(|_| NumericError::Overflow)
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            // Keep the decimal point so `1.0` doesn't read back as an integer
            Number::Decimal(d) if d.fract() == 0.0 => write!(f, "{:.1}", d),
            Number::Decimal(d) => write!(f, "{}", d),
        }
    }
}

/// One of the 13 colors a script may select with `set color`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ColorName {
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
    Pink,
    #[default]
    Black,
    White,
    Gray,
    Brown,
    Cyan,
    Magenta,
}

impl ColorName {
    /// The whole palette, in declaration order
    pub const ALL: [ColorName; 13] = [
        ColorName::Red,
        ColorName::Green,
        ColorName::Blue,
        ColorName::Yellow,
        ColorName::Orange,
        ColorName::Purple,
        ColorName::Pink,
        ColorName::Black,
        ColorName::White,
        ColorName::Gray,
        ColorName::Brown,
        ColorName::Cyan,
        ColorName::Magenta,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorName::Red => "red",
            ColorName::Green => "green",
            ColorName::Blue => "blue",
            ColorName::Yellow => "yellow",
            ColorName::Orange => "orange",
            ColorName::Purple => "purple",
            ColorName::Pink => "pink",
            ColorName::Black => "black",
            ColorName::White => "white",
            ColorName::Gray => "gray",
            ColorName::Brown => "brown",
            ColorName::Cyan => "cyan",
            ColorName::Magenta => "magenta",
        }
    }

    /// `#RRGGBB` form used by the SVG surface
    pub fn hex(self) -> &'static str {
        match self {
            ColorName::Red => "#FF0000",
            ColorName::Green => "#00FF00",
            ColorName::Blue => "#0000FF",
            ColorName::Yellow => "#FFFF00",
            ColorName::Orange => "#FFA500",
            ColorName::Purple => "#800080",
            ColorName::Pink => "#FFC0CB",
            ColorName::Black => "#000000",
            ColorName::White => "#FFFFFF",
            ColorName::Gray => "#808080",
            ColorName::Brown => "#A52A2A",
            ColorName::Cyan => "#00FFFF",
            ColorName::Magenta => "#FF00FF",
        }
    }
}

/// Returned when a word is not in the palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColor(pub String);

impl fmt::Display for UnknownColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown color `{}`", self.0)
    }
}

impl std::error::Error for UnknownColor {}

impl FromStr for ColorName {
    type Err = UnknownColor;

    /// Case-insensitive lookup in the palette
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        ColorName::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keeps_lexical_form() {
        assert_eq!("12".parse::<Number>(), Ok(Number::Integer(12)));
        assert_eq!("-3".parse::<Number>(), Ok(Number::Integer(-3)));
        assert_eq!("1.5".parse::<Number>(), Ok(Number::Decimal(1.5)));
        assert_eq!("1.".parse::<Number>(), Ok(Number::Decimal(1.0)));
        assert_eq!(".25".parse::<Number>(), Ok(Number::Decimal(0.25)));
    }

    #[test]
    fn number_rejects_unrepresentable_literals() {
        assert_eq!(
            "99999999999999999999".parse::<Number>(),
            Err(NumericError::Overflow)
        );
        assert_eq!("-".parse::<Number>(), Err(NumericError::Malformed));
        assert_eq!("1e5".parse::<Number>(), Err(NumericError::Malformed));

        let huge = format!("{}.0", "9".repeat(400));
        assert_eq!(huge.parse::<Number>(), Err(NumericError::NotFinite));
    }

    #[test]
    fn number_display() {
        assert_eq!(Number::Integer(-7).to_string(), "-7");
        assert_eq!(Number::Decimal(2.0).to_string(), "2.0");
        assert_eq!(Number::Decimal(0.5).to_string(), "0.5");
    }

    #[test]
    fn positivity() {
        assert!(Number::Integer(1).is_positive());
        assert!(!Number::Integer(0).is_positive());
        assert!(!Number::Decimal(-0.0).is_positive());
        assert!(Number::Decimal(0.01).is_positive());
    }

    #[test]
    fn palette_lookup_is_case_insensitive() {
        assert_eq!("Red".parse::<ColorName>(), Ok(ColorName::Red));
        assert_eq!("MAGENTA".parse::<ColorName>(), Ok(ColorName::Magenta));
        assert_eq!(
            "chartreuse".parse::<ColorName>(),
            Err(UnknownColor("chartreuse".to_string()))
        );
        // Only the spelling in the palette is accepted
        assert!("grey".parse::<ColorName>().is_err());
    }

    #[test]
    fn palette_has_thirteen_distinct_colors() {
        let mut hexes: Vec<_> = ColorName::ALL.iter().map(|c| c.hex()).collect();
        hexes.sort();
        hexes.dedup();
        assert_eq!(hexes.len(), 13);
        assert_eq!(ColorName::default(), ColorName::Black);
    }
}
