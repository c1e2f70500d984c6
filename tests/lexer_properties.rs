//! Property tests for the lexer's coverage and determinism invariants.

use cmacro::{tokenize, TokenKind};
use proptest::prelude::*;

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\\')
}

/// Strings drawn from every lexable character class. Quotes are excluded so
/// the generated soup never depends on pairing to terminate a literal.
fn token_soup() -> impl Strategy<Value = String> {
    let class = prop_oneof![
        prop::char::range('a', 'z'),
        prop::char::range('A', 'Z'),
        prop::char::range('0', '9'),
        prop::sample::select(vec![
            ' ', '\t', '\r', '\n', '\\', '_', '.', ',', '(', ')', '[', ']',
            '{', '}', '+', '-', '*', '/', '%', '<', '>', '=', '|', '~', '!',
            '^', '&',
        ]),
    ];
    proptest::collection::vec(class, 0..64).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    /// Every non-separator character lands in exactly one token, and each
    /// token's span slices back to its lexeme.
    #[test]
    fn token_spans_tile_the_input(body in token_soup()) {
        let tokens = tokenize(&body).unwrap();
        let chars: Vec<char> = body.chars().collect();

        let mut cursor = 0;
        for token in &tokens {
            prop_assert!(token.start >= cursor);
            for &c in &chars[cursor..token.start] {
                prop_assert!(is_separator(c));
            }
            let span: String =
                chars[token.start..token.start + token.len].iter().collect();
            prop_assert_eq!(&span, &token.lexeme);
            cursor = token.start + token.len;
        }
        for &c in &chars[cursor..] {
            prop_assert!(is_separator(c));
        }

        let token_chars: usize = tokens.iter().map(|t| t.len).sum();
        let separator_chars = chars.iter().copied().filter(|&c| is_separator(c)).count();
        prop_assert_eq!(token_chars + separator_chars, chars.len());
    }

    /// Tokenizing is restartable: the same input yields the same sequence.
    #[test]
    fn tokenizing_is_deterministic(body in token_soup()) {
        prop_assert_eq!(tokenize(&body), tokenize(&body));
    }

    /// Operator runs never split: two adjacent operator characters always
    /// share a token.
    #[test]
    fn operator_runs_are_maximal(body in token_soup()) {
        let tokens = tokenize(&body).unwrap();
        for pair in tokens.windows(2) {
            if pair[0].kind == TokenKind::Operator {
                prop_assert!(
                    pair[1].kind != TokenKind::Operator
                        || pair[1].start > pair[0].start + pair[0].len,
                    "adjacent operator tokens {:?} and {:?}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }
}
