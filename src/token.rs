//! Core token types shared across the tokenizer, parser, and tooling.

use std::fmt;

use crate::lexing::StreamPosition;

/// The closed set of token kinds of one grammar.
///
/// Each grammar defines its kinds as an enum implementing this trait. The
/// three reserved sentinels are mandatory and must be distinct from each
/// other and from every grammar-specific kind; an enum makes the latter
/// automatic, and [`RuleTable::new`](crate::lexing::RuleTable::new) verifies
/// the former when a table is built.
pub trait TokenKind: Copy + Eq + fmt::Debug {
    /// Matched text is consumed and discarded; lexing continues.
    const IGNORE: Self;
    /// A reclassification callback vetoed the rule; lower-priority rules are
    /// tried at the same position.
    const REJECT: Self;
    /// End of input.
    const EOF: Self;
}

/// One lexed token: kind, matched text, and the stream position at the start
/// of the match. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Token<K> {
    kind: K,
    text: String,
    position: StreamPosition,
}

impl<K: TokenKind> Token<K> {
    pub fn new(kind: K, text: impl Into<String>, position: StreamPosition) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> StreamPosition {
        self.position
    }

    pub fn is_eof(&self) -> bool {
        self.kind == K::EOF
    }
}

impl<K: TokenKind> fmt::Display for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) at {}", self.kind, self.text, self.position)
    }
}
