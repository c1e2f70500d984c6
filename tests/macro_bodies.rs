//! Integration tests over realistic header-macro bodies.

use cmacro::{parse, tokenize, BinaryOp, Expr, LexError, Literal, ParseError, TokenKind, UnaryOp};

fn int(value: i64) -> Expr {
    Expr::Constant(Literal::Int(value))
}

fn var(name: &str) -> Expr {
    Expr::Variable(name.to_string())
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn cast(target_type: &str, operand: Expr) -> Expr {
    Expr::Cast {
        target_type: target_type.to_string(),
        operand: Box::new(operand),
    }
}

#[test]
fn test_version_int_call_with_line_continuations() {
    let body = "AV_VERSION_INT(LIBAVCODEC_VERSION_MAJOR, \\\n\
                LIBAVCODEC_VERSION_MINOR, \\\n\
                LIBAVCODEC_VERSION_MICRO)";

    let expr = parse(body).expect("Parsing failed");
    assert_eq!(
        expr,
        Expr::Call {
            name: "AV_VERSION_INT".to_string(),
            args: vec![
                var("LIBAVCODEC_VERSION_MAJOR"),
                var("LIBAVCODEC_VERSION_MINOR"),
                var("LIBAVCODEC_VERSION_MICRO"),
            ],
        }
    );
}

#[test]
fn test_version_comparison() {
    let expr = parse("(LIBAVCODEC_VERSION_MAJOR < 58)").expect("Parsing failed");
    assert_eq!(
        expr,
        binary(BinaryOp::Less, var("LIBAVCODEC_VERSION_MAJOR"), int(58))
    );
}

#[test]
fn test_byte_tag_argument_order() {
    let expr = parse("MKBETAG('N','O','N','E')").expect("Parsing failed");
    let args: Vec<Expr> = ["N", "O", "N", "E"]
        .iter()
        .map(|c| Expr::Constant(Literal::Char(c.to_string())))
        .collect();
    assert_eq!(
        expr,
        Expr::Call {
            name: "MKBETAG".to_string(),
            args,
        }
    );
}

#[test]
fn test_bit_packing_body() {
    let body = "((d) | ((c) << 8) | ((b) << 16) | ((unsigned)(a) << 24))";

    let expr = parse(body).expect("Parsing failed");
    assert_eq!(
        expr,
        binary(
            BinaryOp::BitOr,
            binary(
                BinaryOp::BitOr,
                binary(
                    BinaryOp::BitOr,
                    var("d"),
                    binary(BinaryOp::ShiftLeft, var("c"), int(8)),
                ),
                binary(BinaryOp::ShiftLeft, var("b"), int(16)),
            ),
            binary(
                BinaryOp::ShiftLeft,
                cast("unsigned", var("a")),
                int(24)
            ),
        )
    );
}

#[test]
fn test_mixed_literal_arithmetic() {
    let expr = parse("(-1 + 2u) / (4 - 3.f)").expect("Parsing failed");
    assert_eq!(
        expr,
        binary(
            BinaryOp::Divide,
            binary(BinaryOp::Add, int(-1), int(2)),
            binary(
                BinaryOp::Subtract,
                int(4),
                Expr::Constant(Literal::Float(3.0))
            ),
        )
    );
}

#[test]
fn test_masked_flag_body() {
    let expr = parse("(x & ~0xFull) == 0").expect("Parsing failed");
    // The prefix `~` binds the whole remaining expression inside its
    // parentheses; the mask literal keeps its suffix run.
    assert_eq!(
        expr,
        binary(
            BinaryOp::Equal,
            binary(
                BinaryOp::BitAnd,
                var("x"),
                Expr::Unary {
                    op: UnaryOp::BitNot,
                    operand: Box::new(int(0xF)),
                },
            ),
            int(0),
        )
    );
}

#[test]
fn test_one_expression_per_call() {
    // A name/args/body line fed as one string: the call parses, the
    // remainder is left alone.
    let body = "MKBETAG(a,b,c,d) ((d) | ((c) << 8))";
    let expr = parse(body).expect("Parsing failed");
    assert_eq!(
        expr,
        Expr::Call {
            name: "MKBETAG".to_string(),
            args: vec![var("a"), var("b"), var("c"), var("d")],
        }
    );
}

#[test]
fn test_string_constant_body() {
    let expr = parse("\"libavcodec\"").expect("Parsing failed");
    assert_eq!(
        expr,
        Expr::Constant(Literal::Str("libavcodec".to_string()))
    );
}

#[test]
fn test_tokenizer_counts() {
    let tokens = tokenize("MKBETAG('N','O','N','E')").expect("Tokenizing failed");
    assert_eq!(tokens.len(), 10);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(
        tokens.iter().filter(|t| t.kind == TokenKind::Char).count(),
        4
    );
}

#[test]
fn test_unmatched_parenthesis_fails() {
    assert!(matches!(
        parse("(1 + 2"),
        Err(ParseError::MismatchedParenthesis { .. })
    ));
}

#[test]
fn test_unrecognized_character_fails() {
    assert_eq!(
        tokenize("FLAG_A @ FLAG_B"),
        Err(LexError::UnrecognizedCharacter { ch: '@', offset: 7 })
    );
}
