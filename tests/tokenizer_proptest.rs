//! Property-based tests for the shading-language tokenizer and the
//! normalization passes.

use proptest::prelude::*;

use shade::glsl::{normalize, rules, GlslKind, NormalizeOptions, TypeRegistry};
use shade::lexing::Tokenizer;
use shade::token::Token;

fn tokenize(source: &str) -> Result<Vec<Token<GlslKind>>, String> {
    let table = rules().unwrap();
    let registry = TypeRegistry::with_builtins();
    let mut tokenizer = Tokenizer::new(&table, source, &registry).map_err(|e| e.to_string())?;

    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.pop().map_err(|e| e.to_string())?;
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

/// Identifiers that cannot collide with keywords, bool constants, or
/// built-in type names.
fn safe_identifier() -> impl Strategy<Value = String> {
    "v_[a-z0-9]{0,8}"
}

/// Source text drawn from characters every rule table entry can handle.
fn lexable_source() -> impl Strategy<Value = String> {
    r"[ \t\na-zA-Z0-9_+*/%;,:(){}\[\]<>=!&|^~?.-]{0,60}"
}

proptest! {
    #[test]
    fn test_lexable_input_never_panics_or_errors(source in lexable_source()) {
        let tokens = tokenize(&source).unwrap();
        prop_assert!(!tokens.is_empty());
        prop_assert!(tokens.last().unwrap().is_eof());
    }

    #[test]
    fn test_sentinel_kinds_are_never_emitted_as_tokens(source in lexable_source()) {
        let tokens = tokenize(&source).unwrap();
        for token in &tokens[..tokens.len() - 1] {
            prop_assert_ne!(token.kind(), GlslKind::Ignore);
            prop_assert_ne!(token.kind(), GlslKind::Reject);
            prop_assert_ne!(token.kind(), GlslKind::Eof);
        }
    }

    #[test]
    fn test_token_positions_never_move_backwards(source in lexable_source()) {
        let tokens = tokenize(&source).unwrap();
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].position() <= pair[1].position());
        }
    }

    #[test]
    fn test_identifier_sequences_roundtrip(
        identifiers in prop::collection::vec(safe_identifier(), 1..8)
    ) {
        let source = identifiers.join(" ");
        let tokens = tokenize(&source).unwrap();

        prop_assert_eq!(tokens.len(), identifiers.len() + 1);
        for (token, expected) in tokens.iter().zip(&identifiers) {
            prop_assert_eq!(token.kind(), GlslKind::Identifier);
            prop_assert_eq!(token.text(), expected.as_str());
        }
    }

    #[test]
    fn test_newlines_in_separators_set_line_and_column(
        first in safe_identifier(),
        separator in r"[ \t]{0,4}\n[ \t]{0,4}",
        second in safe_identifier(),
    ) {
        let source = format!("{}{}{}", first, separator, second);
        let tokens = tokenize(&source).unwrap();

        let newlines = separator.matches('\n').count() as u64;
        let after_last = separator.rsplit('\n').next().unwrap().chars().count() as u64;

        prop_assert_eq!(tokens[1].position().line, 1 + newlines);
        prop_assert_eq!(tokens[1].position().column, after_last + 1);
    }

    #[test]
    fn test_splice_preserves_line_count(
        lines in prop::collection::vec("[a-z0-9 ]{0,10}", 1..6),
        continued in prop::collection::vec(any::<bool>(), 1..6),
    ) {
        // Join each line with an escaped or a plain newline, ending with a
        // plain one; with maintain_line_count set, the newline count must
        // survive normalization.
        let mut source = String::new();
        for (i, line) in lines.iter().enumerate() {
            source.push_str(line);
            if continued.get(i).copied().unwrap_or(false) && i + 1 < lines.len() {
                source.push_str("\\\n");
            } else {
                source.push('\n');
            }
        }

        let options = NormalizeOptions { maintain_line_count: true };
        let result = normalize(&source, &options);

        let newlines_in = source.matches('\n').count();
        let newlines_out = result.text.matches('\n').count();
        prop_assert_eq!(newlines_in, newlines_out);
    }
}
