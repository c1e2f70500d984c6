//! Recursive-descent parser for macro-body expressions
//!
//! # Parser Architecture
//!
//! The parser tokenizes once, then walks the token buffer with a cursor that
//! only ever moves forward. At expression position it dispatches on a small
//! fixed-width lookahead, in priority order:
//!
//! 1. call — `Identifier` followed by `(`
//! 2. unary — an operator token
//! 3. cast — `(`, a keyword or identifier, `)`, and an operand start
//! 4. atomic — grouping parentheses, a literal, or a variable
//!
//! Binary operators are then folded by a single precedence-climbing loop
//! driven by the table in [`crate::ops`], instead of one grammar rule per
//! binding level.
//!
//! All errors are fail-fast: the offending token's offset is reported and no
//! partial tree is produced.

use crate::ast::Expr;
use crate::lexer::{LexError, Lexer, Token, TokenKind};
use crate::literal;
use crate::ops::{BinaryOp, UnaryOp, MAX_PRECEDENCE};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("invalid numeric literal '{lexeme}' at offset {offset}")]
    InvalidNumericLiteral { lexeme: String, offset: usize },

    #[error("unrecognized expression at {found}, offset {offset}")]
    UnrecognizedExpression { found: String, offset: usize },

    #[error("mismatched parenthesis at offset {offset}")]
    MismatchedParenthesis { offset: usize },
}

/// Recursive descent parser over a macro body's token buffer.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Tokenizes the macro body and positions the cursor at its start.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
        })
    }

    /// Parses one root expression from the token buffer.
    ///
    /// Tokens past the root are left unconsumed: a macro line of the shape
    /// `NAME(args) (body)` yields the call and ignores the remainder.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.expression(MAX_PRECEDENCE)
    }

    /// One dispatch, then binary continuation below `ceiling`.
    fn expression(&mut self, ceiling: u8) -> Result<Expr, ParseError> {
        let left = self.dispatch()?;
        self.binary_continuation(left, ceiling)
    }

    /// Expression-position dispatch, in fixed priority order.
    fn dispatch(&mut self) -> Result<Expr, ParseError> {
        if self.at_call() {
            return self.call();
        }
        if matches!(self.peek(), Some(t) if t.kind == TokenKind::Operator) {
            return self.unary();
        }
        if self.at_cast() {
            return self.cast();
        }
        self.atomic()
    }

    /// Folds infix operators into `left` while they bind tighter than
    /// `ceiling`. The right operand climbs at the operator's own rank, which
    /// makes equal ranks associate left.
    fn binary_continuation(
        &mut self,
        mut left: Expr,
        ceiling: u8,
    ) -> Result<Expr, ParseError> {
        loop {
            let op = match self.peek() {
                Some(t) if t.kind == TokenKind::Operator => {
                    BinaryOp::from_lexeme(&t.lexeme)
                }
                _ => None,
            };
            let op = match op {
                Some(op) if op.precedence() < ceiling => op,
                _ => return Ok(left),
            };

            self.advance();
            let right = self.expression(op.precedence())?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    /// Two-token lookahead for a function-style invocation.
    fn at_call(&self) -> bool {
        matches!(self.peek(), Some(t) if t.kind == TokenKind::Identifier)
            && matches!(self.peek_ahead(1), Some(t) if t.is_punctuator("("))
    }

    /// Parse `name ( expr , ... )` with a possibly-empty argument list.
    fn call(&mut self) -> Result<Expr, ParseError> {
        let name = self.expect_identifier()?;
        self.expect_paren("(")?;

        let mut args = Vec::new();
        if matches!(self.peek(), Some(t) if t.is_punctuator(")")) {
            self.advance();
            return Ok(Expr::Call { name, args });
        }
        loop {
            args.push(self.parse_expression()?);
            match self.peek() {
                Some(t) if t.is_punctuator(",") => {
                    self.advance();
                }
                Some(t) if t.is_punctuator(")") => {
                    self.advance();
                    return Ok(Expr::Call { name, args });
                }
                _ => {
                    return Err(ParseError::MismatchedParenthesis {
                        offset: self.current_offset(),
                    });
                }
            }
        }
    }

    /// Parse a prefix operator. The operand is a full expression, so the
    /// prefix binds looser than any following infix operator.
    fn unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek() {
            Some(t) if t.kind == TokenKind::Operator => {
                UnaryOp::from_lexeme(&t.lexeme)
            }
            _ => None,
        };
        let op = match op {
            Some(op) => op,
            None => return Err(self.unrecognized()),
        };

        self.advance();
        let operand = self.parse_expression()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// Three-token lookahead for a cast, plus a gate on what follows the
    /// closing parenthesis: a cast needs an operand, so `((x))` stays a
    /// grouped variable and `(d) | c` stays a binary expression. `(a)(b)`
    /// still reads as a cast of `(b)` to type `a`; real C needs a symbol
    /// table to do better.
    fn at_cast(&self) -> bool {
        matches!(self.peek(), Some(t) if t.is_punctuator("("))
            && matches!(
                self.peek_ahead(1),
                Some(t) if matches!(t.kind, TokenKind::Keyword | TokenKind::Identifier)
            )
            && matches!(self.peek_ahead(2), Some(t) if t.is_punctuator(")"))
            && matches!(self.peek_ahead(3), Some(t) if starts_operand(t))
    }

    /// Parse `( type ) operand`. The operand is one dispatch-level parse,
    /// not a full binary expression, so `(unsigned)(a) << 24` shifts the
    /// cast rather than casting the shift.
    fn cast(&mut self) -> Result<Expr, ParseError> {
        self.expect_paren("(")?;
        let target_type = match self.peek() {
            Some(t) => t.lexeme.clone(),
            None => return Err(self.unrecognized()),
        };
        self.advance();
        self.expect_paren(")")?;

        let operand = self.dispatch()?;
        Ok(Expr::Cast {
            target_type,
            operand: Box::new(operand),
        })
    }

    /// Grouping parentheses, a constant, or a variable reference.
    fn atomic(&mut self) -> Result<Expr, ParseError> {
        let token = match self.peek() {
            Some(t) => t.clone(),
            None => return Err(self.unrecognized()),
        };

        match token.kind {
            TokenKind::Punctuator if token.lexeme == "(" => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect_paren(")")?;
                // Grouping only; no node is retained for the parentheses.
                Ok(inner)
            }
            TokenKind::Number => {
                self.advance();
                match literal::parse_number(&token.lexeme) {
                    Ok(value) => Ok(Expr::Constant(value)),
                    Err(e) => Err(ParseError::InvalidNumericLiteral {
                        lexeme: e.lexeme,
                        offset: token.start,
                    }),
                }
            }
            TokenKind::Char => {
                self.advance();
                Ok(Expr::Constant(literal::char_literal(&token.lexeme)))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::Constant(literal::string_literal(&token.lexeme)))
            }
            TokenKind::Identifier => {
                self.advance();
                Ok(Expr::Variable(token.lexeme))
            }
            _ => Err(self.unrecognized()),
        }
    }

    // ===== Cursor helpers =====

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Offset of the current token, or one past the final token when the
    /// buffer is exhausted.
    fn current_offset(&self) -> usize {
        match self.peek() {
            Some(t) => t.start,
            None => self.end_offset(),
        }
    }

    fn end_offset(&self) -> usize {
        self.tokens.last().map(|t| t.start + t.len).unwrap_or(0)
    }

    fn unrecognized(&self) -> ParseError {
        match self.peek() {
            Some(t) => ParseError::UnrecognizedExpression {
                found: t.to_string(),
                offset: t.start,
            },
            None => ParseError::UnrecognizedExpression {
                found: "end of input".to_string(),
                offset: self.end_offset(),
            },
        }
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(t) if t.kind == TokenKind::Identifier => {
                let name = t.lexeme.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unrecognized()),
        }
    }

    fn expect_paren(&mut self, paren: &str) -> Result<(), ParseError> {
        match self.peek() {
            Some(t) if t.is_punctuator(paren) => {
                self.advance();
                Ok(())
            }
            _ => Err(ParseError::MismatchedParenthesis {
                offset: self.current_offset(),
            }),
        }
    }
}

/// Whether a token can begin a cast operand. Operators and keywords do not
/// count; see [`Parser::at_cast`].
fn starts_operand(token: &Token) -> bool {
    match token.kind {
        TokenKind::Identifier
        | TokenKind::Number
        | TokenKind::Char
        | TokenKind::String => true,
        TokenKind::Punctuator => token.lexeme == "(",
        TokenKind::Keyword | TokenKind::Operator => false,
    }
}
