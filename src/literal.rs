//! Typed literal values and numeric-lexeme interpretation
//!
//! The lexer stores a number's full character run (sign, digits, hex marker,
//! suffixes) as a single token and defers interpretation to this module.
//! Char and string tokens pass their content through without decoding escape
//! sequences; `'\n'` arrives as the two characters `\` `n`.

use thiserror::Error;

/// A constant value resolved from a Number, Char, or String token.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    /// Raw character-literal content, escapes undecoded.
    Char(String),
    /// Raw string-literal content, escapes undecoded.
    Str(String),
}

/// A number token whose lexeme matches no recognized numeric shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid numeric literal '{lexeme}'")]
pub struct NumericLiteralError {
    pub lexeme: String,
}

/// The suffix alphabet a number token may trail off with.
pub(crate) fn is_suffix_char(c: char) -> bool {
    matches!(
        c,
        'u' | 'U' | 'f' | 'F' | 'd' | 'D' | 'b' | 'B' | 'i' | 'I' | 'l' | 'L'
    )
}

/// A suffix character that forces floating-point interpretation.
fn is_float_suffix(c: char) -> bool {
    matches!(c, 'f' | 'F' | 'd' | 'D')
}

fn is_integer_suffix(c: char) -> bool {
    is_suffix_char(c) && !is_float_suffix(c)
}

/// Interpret a Number token's raw lexeme as a typed literal.
///
/// Decides integer vs. floating-point by the presence of `.` or an `f`/`d`
/// suffix, handles a leading `-` and a `0x`/`0X` prefix (integers only), and
/// validates the trailing suffix run. Hex digits win over suffix letters, so
/// `0xFF` is all digits while `0x123ull` splits after the `3`.
pub fn parse_number(lexeme: &str) -> Result<Literal, NumericLiteralError> {
    let err = || NumericLiteralError {
        lexeme: lexeme.to_string(),
    };
    let unsigned = lexeme.strip_prefix('-').unwrap_or(lexeme);

    if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        let split = hex
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(hex.len());
        let (digits, suffix) = hex.split_at(split);
        if digits.is_empty() || !suffix.chars().all(is_integer_suffix) {
            return Err(err());
        }
        // Radix-16 through u64 so full-width bit patterns survive the
        // reinterpretation into i64.
        let magnitude = u64::from_str_radix(digits, 16).map_err(|_| err())? as i64;
        let value = if lexeme.starts_with('-') {
            magnitude.wrapping_neg()
        } else {
            magnitude
        };
        return Ok(Literal::Int(value));
    }

    let split = unsigned
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(unsigned.len());
    let (body, suffix) = unsigned.split_at(split);
    if body.is_empty() || !suffix.chars().all(is_suffix_char) {
        return Err(err());
    }

    // Sign and body are a contiguous prefix of the lexeme.
    let signed_body = &lexeme[..lexeme.len() - suffix.len()];
    if body.contains('.') || suffix.chars().any(is_float_suffix) {
        let value: f64 = signed_body.parse().map_err(|_| err())?;
        Ok(Literal::Float(value))
    } else {
        let value: i64 = signed_body.parse().map_err(|_| err())?;
        Ok(Literal::Int(value))
    }
}

/// Pass a Char token's content through as a character literal.
pub fn char_literal(lexeme: &str) -> Literal {
    Literal::Char(unquote(lexeme))
}

/// Pass a String token's content through as a string literal.
pub fn string_literal(lexeme: &str) -> Literal {
    Literal::Str(unquote(lexeme))
}

/// Strips the delimiting quotes the lexer kept in the lexeme.
fn unquote(lexeme: &str) -> String {
    lexeme[1..lexeme.len() - 1].to_string()
}
