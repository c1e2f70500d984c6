//! # Introduction
//!
//! `cmacro` parses the textual body of a C preprocessor macro — object-like
//! or function-like — into an expression tree. It is the front end of a
//! binding-generation pipeline that lifts typed constants out of C headers;
//! a separate header scanner isolates each macro's body text before it
//! arrives here, and a separate emitter renders the resulting tree into
//! target-language source.
//!
//! ## Pipeline
//!
//! ```text
//! Macro body text → Lexer → Tokens → Parser → Expr
//! ```
//!
//! 1. [`lexer`] — tokenises the body: maximal operator runs, suffixed
//!    numeric literals, quote-delimited char/string literals, keywords and
//!    identifiers. Separators (including `\` line continuations) are
//!    skipped.
//! 2. [`literal`] — interprets a number token's raw lexeme into a typed
//!    [`Literal`].
//! 3. [`ops`] — the operator table: lexeme to operation kind plus a fixed
//!    precedence rank per C binding strength.
//! 4. [`parser`] — recursive descent with bounded lookahead for the
//!    call/unary/cast/atomic dispatch, and a single precedence-climbing
//!    loop for binary operators.
//! 5. [`ast`] — the [`Expr`] variant model handed to the emitter.
//!
//! Both entry points are pure functions of their input: no I/O, no shared
//! state, safe to call concurrently from any number of threads.
//!
//! ## Example
//!
//! ```
//! use cmacro::{parse, BinaryOp, Expr, Literal};
//!
//! let expr = parse("(LIBAVCODEC_VERSION_MAJOR < 58)").unwrap();
//! assert_eq!(
//!     expr,
//!     Expr::Binary {
//!         op: BinaryOp::Less,
//!         left: Box::new(Expr::Variable("LIBAVCODEC_VERSION_MAJOR".into())),
//!         right: Box::new(Expr::Constant(Literal::Int(58))),
//!     }
//! );
//! ```
//!
//! ## Known limitations
//!
//! Escape sequences inside char/string literals are passed through
//! undecoded, and a parenthesized identifier directly before an operand
//! (`(a)(b)`) reads as a cast — resolving it properly needs a symbol table
//! this stage does not have. Macro expansion, `#if` evaluation, and full C
//! type syntax are out of scope.

pub mod ast;
pub mod lexer;
pub mod literal;
pub mod ops;
pub mod parser;

pub use ast::Expr;
pub use lexer::{LexError, Lexer, Token, TokenKind};
pub use literal::{Literal, NumericLiteralError};
pub use ops::{BinaryOp, UnaryOp};
pub use parser::{ParseError, Parser};

/// Tokenize a macro body into its ordered token sequence.
pub fn tokenize(body: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(body);
    lexer.tokenize()
}

/// Parse a macro body into its root expression.
pub fn parse(body: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(body)?;
    parser.parse_expression()
}
