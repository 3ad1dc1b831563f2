//! # shade
//!
//! A front-end toolkit for building text-language processors: a
//! prioritized, regex-driven tokenizer and a backtracking
//! grammar-combinator engine for recursive-descent parsing, demonstrated on
//! a C-like shading language.
//!
//! Layout
//!
//! The engine is generic over the token-kind set and an opaque parser
//! context, and knows nothing about any particular language:
//!
//!   src/token       Token, and the TokenKind trait every grammar implements
//!   src/lexing      stream positions, rule tables, the tokenizer
//!   src/parsing     grammar combinator, parser driver, parse-node arena
//!
//! The shading language itself is configuration layered on top:
//!
//!   src/glsl        token table, type registry, partial grammar,
//!                   and the pre-tokenization normalization passes
//!
//! Data flows: normalized text -> tokenizer (lazy, one token of lookahead)
//! -> parser driver pulling tokens on demand -> checkpointed backtracking
//! over the grammar -> parse-node tree or a structured failure.

pub mod glsl;
pub mod lexing;
pub mod parsing;
pub mod token;

pub use lexing::{
    LexicalError, LexicalRule, RuleError, RuleTable, StreamPosition, Tokenizer, TokenizerState,
};
pub use parsing::{
    action, call, splice, terminal, Element, Grammar, GrammarError, NodeArena, NodeId, ParseError,
    ParseNode, Parser, Production,
};
pub use token::{Token, TokenKind};
