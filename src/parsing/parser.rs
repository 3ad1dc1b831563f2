//! The parser driver: token lookahead pass-through, the checkpoint stack,
//! and grammar evaluation.
//!
//! The driver owns exactly one tokenizer and a per-parse node arena.
//! Checkpoints nest with stack discipline to arbitrary recursive-descent
//! depth; restoring one puts the tokenizer bit-for-bit back at the saved
//! state and reclaims every node allocated since.
//!
//! Plain backtracking alone would report a total mismatch with no context
//! at all, so the driver additionally records the furthest position any
//! abandoned alternative reached and which terminal kinds were expected
//! there; [`ParseError::NoMatch`] carries both.

use std::cmp::Ordering;
use std::fmt;

use crate::lexing::{LexicalError, RuleTable, StreamPosition, Tokenizer, TokenizerState};
use crate::parsing::grammar::Grammar;
use crate::parsing::node::{NodeArena, NodeId};
use crate::token::{Token, TokenKind};

/// Why a parse did not produce a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError<K> {
    /// The tokenizer hit input no rule matches. Fatal, never backtracked.
    Lexical(LexicalError),
    /// No alternative of the start production matched. `furthest` is the
    /// deepest position reached across all abandoned alternatives and
    /// `expected` the terminal kinds tried there.
    NoMatch {
        furthest: StreamPosition,
        expected: Vec<K>,
    },
}

impl<K: TokenKind> fmt::Display for ParseError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lexical(error) => write!(f, "{}", error),
            ParseError::NoMatch { furthest, expected } => {
                if expected.is_empty() {
                    write!(f, "grammar does not match the input (stalled at {})", furthest)
                } else {
                    write!(
                        f,
                        "grammar does not match the input: at {} expected one of {:?}",
                        furthest, expected
                    )
                }
            }
        }
    }
}

impl<K: TokenKind> std::error::Error for ParseError<K> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lexical(error) => Some(error),
            ParseError::NoMatch { .. } => None,
        }
    }
}

struct Checkpoint<K> {
    tokenizer: TokenizerState<K>,
    arena_len: usize,
}

/// Recursive-descent parser driver over one tokenizer.
pub struct Parser<'a, K, C> {
    tokenizer: Tokenizer<'a, K, C>,
    checkpoints: Vec<Checkpoint<K>>,
    arena: NodeArena<K>,
    furthest: StreamPosition,
    expected: Vec<K>,
}

impl<'a, K: TokenKind, C> Parser<'a, K, C> {
    /// Build a parser over fresh tokenizer state. Fails on a lexical error
    /// at the first token.
    pub fn new(
        table: &'a RuleTable<K, C>,
        source: &'a str,
        context: &'a C,
    ) -> Result<Self, LexicalError> {
        Ok(Self::from_tokenizer(Tokenizer::new(table, source, context)?))
    }

    /// Wrap an already-positioned tokenizer.
    pub fn from_tokenizer(tokenizer: Tokenizer<'a, K, C>) -> Self {
        Self {
            tokenizer,
            checkpoints: Vec::new(),
            arena: NodeArena::new(),
            furthest: StreamPosition::default(),
            expected: Vec::new(),
        }
    }

    pub fn peek(&self) -> &Token<K> {
        self.tokenizer.peek()
    }

    pub fn pop(&mut self) -> Result<Token<K>, LexicalError> {
        self.tokenizer.pop()
    }

    pub fn context(&self) -> &C {
        self.tokenizer.context()
    }

    /// Push the current restorable state.
    pub fn set_checkpoint(&mut self) {
        self.checkpoints.push(Checkpoint {
            tokenizer: self.tokenizer.state(),
            arena_len: self.arena.len(),
        });
    }

    /// Pop the most recent checkpoint and reapply it: the attempt failed.
    /// Nodes allocated since the checkpoint are reclaimed.
    pub fn restore_checkpoint(&mut self) {
        debug_assert!(!self.checkpoints.is_empty(), "unbalanced restore_checkpoint");
        if let Some(checkpoint) = self.checkpoints.pop() {
            self.tokenizer.restore(checkpoint.tokenizer);
            self.arena.truncate(checkpoint.arena_len);
        }
    }

    /// Pop the most recent checkpoint and discard it: the attempt succeeded.
    pub fn clear_checkpoint(&mut self) {
        debug_assert!(!self.checkpoints.is_empty(), "unbalanced clear_checkpoint");
        self.checkpoints.pop();
    }

    pub fn checkpoint_depth(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn arena(&self) -> &NodeArena<K> {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut NodeArena<K> {
        &mut self.arena
    }

    /// Consume the parser, keeping the arena (and thus any parse tree) alive.
    pub fn into_arena(self) -> NodeArena<K> {
        self.arena
    }

    /// Record a terminal mismatch at the lookahead for NoMatch diagnostics.
    pub(crate) fn note_expected(&mut self, kind: K) {
        let at = self.peek().position();
        match at.cmp(&self.furthest) {
            Ordering::Greater => {
                self.furthest = at;
                self.expected.clear();
                self.expected.push(kind);
            }
            Ordering::Equal => {
                if !self.expected.contains(&kind) {
                    self.expected.push(kind);
                }
            }
            Ordering::Less => {}
        }
    }

    /// Evaluate the grammar's start production against the remaining input.
    ///
    /// On success the returned id addresses the root node in [`Parser::arena`].
    /// Parser state after a failed parse is exactly as it was on entry.
    pub fn parse(&mut self, grammar: &Grammar<K, C>) -> Result<NodeId, ParseError<K>> {
        match grammar.start_production().accept(self, grammar) {
            Ok(Some(root)) => Ok(root),
            Ok(None) => Err(ParseError::NoMatch {
                furthest: self.furthest,
                expected: self.expected.clone(),
            }),
            Err(error) => Err(ParseError::Lexical(error)),
        }
    }
}

impl<K: TokenKind, C> fmt::Debug for Parser<'_, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("tokenizer", &self.tokenizer)
            .field("checkpoint_depth", &self.checkpoints.len())
            .field("arena_len", &self.arena.len())
            .finish()
    }
}
