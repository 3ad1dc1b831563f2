//! The tokenizer: rule-table driven lexing with one token of lookahead.
//!
//! The tokenizer consumes a compiled [`RuleTable`], an in-memory text
//! buffer, and a caller-supplied context threaded into reclassification
//! callbacks. The lookahead is computed eagerly, so `peek` is side-effect
//! free and construction itself can fail on a lexical error at the very
//! first token.

use std::fmt;
use std::mem;

use crate::lexing::position::StreamPosition;
use crate::lexing::rules::RuleTable;
use crate::token::{Token, TokenKind};

/// A fatal lexical error: no rule in the table matched at the cursor.
///
/// The cursor cannot be advanced meaningfully without matching something,
/// so there is no recovery; the error carries the offending position and a
/// snippet of the unmatched input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalError {
    position: StreamPosition,
    snippet: String,
}

impl LexicalError {
    const SNIPPET_CHARS: usize = 12;

    fn new(position: StreamPosition, rest: &str) -> Self {
        Self {
            position,
            snippet: rest.chars().take(Self::SNIPPET_CHARS).collect(),
        }
    }

    pub fn position(&self) -> StreamPosition {
        self.position
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no lexical rule matches at {}: {:?}",
            self.position, self.snippet
        )
    }
}

impl std::error::Error for LexicalError {}

/// A restorable snapshot of tokenizer state: cursor, position, lookahead.
///
/// Produced by [`Tokenizer::state`] and consumed by [`Tokenizer::restore`];
/// this is the primitive the parser's checkpoint stack is built on.
#[derive(Debug, Clone)]
pub struct TokenizerState<K> {
    cursor: usize,
    position: StreamPosition,
    lookahead: Token<K>,
}

/// A prioritized, regex-driven tokenizer with single-token lookahead.
pub struct Tokenizer<'a, K, C> {
    table: &'a RuleTable<K, C>,
    source: &'a str,
    context: &'a C,
    cursor: usize,
    position: StreamPosition,
    lookahead: Token<K>,
}

impl<'a, K: TokenKind, C> Tokenizer<'a, K, C> {
    /// Build a tokenizer and compute the first lookahead token.
    pub fn new(
        table: &'a RuleTable<K, C>,
        source: &'a str,
        context: &'a C,
    ) -> Result<Self, LexicalError> {
        let mut tokenizer = Self {
            table,
            source,
            context,
            cursor: 0,
            position: StreamPosition::default(),
            lookahead: Token::new(K::EOF, "", StreamPosition::default()),
        };
        tokenizer.lookahead = tokenizer.find_next_token()?;
        Ok(tokenizer)
    }

    /// The current lookahead token. No side effects.
    pub fn peek(&self) -> &Token<K> {
        &self.lookahead
    }

    /// Return the lookahead token and compute the next one. This is the only
    /// operation that advances tokenizer state. Past end of input it keeps
    /// returning the EOF token at the same terminal position.
    pub fn pop(&mut self) -> Result<Token<K>, LexicalError> {
        let next = self.find_next_token()?;
        Ok(mem::replace(&mut self.lookahead, next))
    }

    /// The position just past everything consumed so far.
    pub fn position(&self) -> StreamPosition {
        self.position
    }

    pub fn context(&self) -> &C {
        self.context
    }

    /// Snapshot the restorable state.
    pub fn state(&self) -> TokenizerState<K> {
        TokenizerState {
            cursor: self.cursor,
            position: self.position,
            lookahead: self.lookahead.clone(),
        }
    }

    /// Reapply a snapshot taken earlier on this tokenizer.
    pub fn restore(&mut self, state: TokenizerState<K>) {
        self.cursor = state.cursor;
        self.position = state.position;
        self.lookahead = state.lookahead;
    }

    fn find_next_token(&mut self) -> Result<Token<K>, LexicalError> {
        let source = self.source;
        loop {
            if self.cursor >= source.len() {
                return Ok(Token::new(K::EOF, "", self.position));
            }

            let rest = &source[self.cursor..];
            let (kind, length) = match self.table.scan(rest, self.context) {
                Some(found) => found,
                None => return Err(LexicalError::new(self.position, rest)),
            };
            let matched = &rest[..length];

            if kind == K::IGNORE {
                self.position.advance(matched);
                self.cursor += length;
                continue;
            }

            let start = self.position;
            self.position.advance(matched);
            self.cursor += length;
            return Ok(Token::new(kind, matched, start));
        }
    }
}

impl<K: TokenKind, C> fmt::Debug for Tokenizer<'_, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("cursor", &self.cursor)
            .field("position", &self.position)
            .field("lookahead", &self.lookahead)
            .finish()
    }
}
