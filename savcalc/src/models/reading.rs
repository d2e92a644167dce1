// src/models/reading.rs

/// Numeric interpretation of one piece of page text.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    Number(f64),
    /// The text was present but is not a number. Counts as zero.
    Unparsable(String),
}

impl Reading {
    /// Parses text the way the host page coerces strings to numbers.
    ///
    /// Blank text is zero. Decimal and exponent forms, `0x`/`0o`/`0b`
    /// integers and the spelled-out `Infinity` forms are accepted; anything
    /// else, including thousands separators and `NaN`, is unparsable.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim_matches(is_coercion_whitespace);
        if text.is_empty() {
            return Self::Number(0.0);
        }

        match text {
            "Infinity" | "+Infinity" => return Self::Number(f64::INFINITY),
            "-Infinity" => return Self::Number(f64::NEG_INFINITY),
            _ => {}
        }

        if let Some(number) = parse_prefixed_integer(text) {
            return Self::Number(number);
        }

        let is_decimal = text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
        match text.parse::<f64>() {
            Ok(number) if is_decimal => Self::Number(number),
            _ => Self::Unparsable(raw.to_owned()),
        }
    }

    /// The value used in calculations.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> f64 {
        match self {
            Self::Number(number) => *number,
            Self::Unparsable(_) => 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_unparsable(&self) -> bool {
        matches!(self, Self::Unparsable(_))
    }
}

/// Whitespace stripped before coercion: Unicode white space plus the byte
/// order mark.
fn is_coercion_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

fn parse_prefixed_integer(text: &str) -> Option<f64> {
    let prefix = text.get(..2)?.to_ascii_lowercase();
    let radix: u32 = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = text.get(2..)?;
    if digits.is_empty() {
        return None;
    }

    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc.mul_add(f64::from(radix), f64::from(digit)))
    })
}
