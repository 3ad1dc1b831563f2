//! Tokenization: stream positions, prioritized rule tables, and the
//! rule-driven tokenizer with single-token lookahead.

pub mod position;
pub mod rules;
pub mod tokenizer;

pub use position::StreamPosition;
pub use rules::{LexicalRule, ReclassifyFn, RuleError, RuleTable};
pub use tokenizer::{LexicalError, Tokenizer, TokenizerState};
