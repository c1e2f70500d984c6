//! Lexer (tokenizer) for C macro bodies
//!
//! Converts the raw body text of a preprocessor macro into a flat [`Token`]
//! stream consumed by the parser. Backslash line continuations are treated
//! as separators rather than spliced, matching how macro bodies arrive from
//! the header scanner.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use std::fmt;
use thiserror::Error;

/// Token classes produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    Char,
    String,
    Punctuator,
    Operator,
}

/// A single lexed token.
///
/// `start` and `len` are character offsets into the macro body. The span
/// `[start, start + len)` always slices back to exactly `lexeme`, so the
/// spans of all tokens plus the skipped separator characters tile the input.
/// For [`TokenKind::Char`] and [`TokenKind::String`] the lexeme includes the
/// delimiting quotes; the literal parser strips them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub start: usize,
    pub len: usize,
}

impl Token {
    /// Returns true for a punctuator token with exactly this text.
    pub fn is_punctuator(&self, lexeme: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.lexeme == lexeme
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Keyword => write!(f, "keyword '{}'", self.lexeme),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Number => write!(f, "number '{}'", self.lexeme),
            TokenKind::Char => write!(f, "char literal {}", self.lexeme),
            TokenKind::String => write!(f, "string literal {}", self.lexeme),
            TokenKind::Punctuator | TokenKind::Operator => {
                write!(f, "'{}'", self.lexeme)
            }
        }
    }
}

/// Lexer error type
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unrecognized character '{ch}' at offset {offset}")]
    UnrecognizedCharacter { ch: char, offset: usize },

    #[error("unterminated {what} literal starting at offset {offset}")]
    UnterminatedLiteral { what: &'static str, offset: usize },
}

/// C type and control keywords. Identifiers matching an entry are classified
/// [`TokenKind::Keyword`] so the parser can recognize cast target types.
static KEYWORDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "auto", "break", "case", "char", "const", "continue", "default",
        "do", "double", "else", "enum", "extern", "float", "for", "goto",
        "if", "int", "long", "register", "return", "short", "signed",
        "sizeof", "static", "struct", "switch", "typedef", "union",
        "unsigned", "void", "volatile", "while",
    ]
    .into_iter()
    .collect()
});

/// Skipped between tokens. The backslash covers line-continued macro bodies.
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\\')
}

fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '%' | '<' | '>' | '=' | '|' | '~' | '!' | '^' | '&'
    )
}

fn is_punctuator_char(c: char) -> bool {
    matches!(c, ',' | '(' | ')' | '[' | ']' | '{' | '}')
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_identifier_continue(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

/// Characters a number token keeps consuming after its start: digits, the
/// decimal point, and the hex marker. Interpretation is deferred to the
/// literal parser.
fn is_number_body(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | 'x' | 'X')
}

/// Lexer for macro body text
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given macro body.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input.
    ///
    /// Total and deterministic: the same input always yields the same token
    /// sequence, and a failure aborts without a partial token list.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(c) = self.peek() {
            if is_separator(c) {
                self.advance();
            } else if self.starts_number(c) {
                tokens.push(self.number());
            } else if is_identifier_start(c) {
                tokens.push(self.identifier_or_keyword());
            } else if c == '"' {
                tokens.push(self.quoted(TokenKind::String, '"', "string")?);
            } else if c == '\'' {
                tokens.push(self.quoted(TokenKind::Char, '\'', "char")?);
            } else if is_operator_char(c) {
                tokens.push(self.operator());
            } else if is_punctuator_char(c) {
                tokens.push(self.punctuator());
            } else {
                return Err(LexError::UnrecognizedCharacter {
                    ch: c,
                    offset: self.position,
                });
            }
        }

        Ok(tokens)
    }

    /// A `-` opens a number only when a digit or `.` follows; otherwise it
    /// belongs to an operator run, so `1 - 2` subtracts while `-1.1f` stays
    /// one token.
    fn starts_number(&self, c: char) -> bool {
        c.is_ascii_digit()
            || c == '.'
            || (c == '-'
                && matches!(self.peek_ahead(1), Some(n) if n.is_ascii_digit() || n == '.'))
    }

    /// Lex a number: optional sign, digit/point/hex-marker run, then the
    /// maximal suffix run. The whole run is one token.
    fn number(&mut self) -> Token {
        let start = self.position;
        let mut lexeme = String::new();

        if self.peek() == Some('-') {
            lexeme.push('-');
            self.advance();
        }
        while let Some(c) = self.peek() {
            if !is_number_body(c) {
                break;
            }
            lexeme.push(c);
            self.advance();
        }
        while let Some(c) = self.peek() {
            if !crate::literal::is_suffix_char(c) {
                break;
            }
            lexeme.push(c);
            self.advance();
        }

        self.token(TokenKind::Number, lexeme, start)
    }

    /// Lex an identifier run and classify it against the keyword table.
    fn identifier_or_keyword(&mut self) -> Token {
        let start = self.position;
        let mut lexeme = String::new();

        while let Some(c) = self.peek() {
            if !is_identifier_continue(c) {
                break;
            }
            lexeme.push(c);
            self.advance();
        }

        let kind = if KEYWORDS.contains(lexeme.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.token(kind, lexeme, start)
    }

    /// Lex a quote-delimited literal. The content between the quotes is kept
    /// verbatim: escape sequences are not decoded.
    fn quoted(
        &mut self,
        kind: TokenKind,
        quote: char,
        what: &'static str,
    ) -> Result<Token, LexError> {
        let start = self.position;
        let mut lexeme = String::from(quote);
        self.advance();

        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    lexeme.push(c);
                    self.advance();
                    return Ok(self.token(kind, lexeme, start));
                }
                Some(c) => {
                    lexeme.push(c);
                    self.advance();
                }
                None => {
                    return Err(LexError::UnterminatedLiteral {
                        what,
                        offset: start,
                    });
                }
            }
        }
    }

    /// Lex the maximal contiguous run of operator characters as one token,
    /// so `<<`, `&&`, and `<=` never split.
    fn operator(&mut self) -> Token {
        let start = self.position;
        let mut lexeme = String::new();

        while let Some(c) = self.peek() {
            if !is_operator_char(c) {
                break;
            }
            lexeme.push(c);
            self.advance();
        }

        self.token(TokenKind::Operator, lexeme, start)
    }

    /// Punctuators always lex one character at a time.
    fn punctuator(&mut self) -> Token {
        let start = self.position;
        let mut lexeme = String::new();
        if let Some(c) = self.peek() {
            lexeme.push(c);
            self.advance();
        }
        self.token(TokenKind::Punctuator, lexeme, start)
    }

    fn token(&self, kind: TokenKind, lexeme: String, start: usize) -> Token {
        Token {
            kind,
            lexeme,
            start,
            len: self.position - start,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }
}
