//! Parsing: the grammar combinator, the parser driver, and parse nodes.

pub mod grammar;
pub mod node;
pub mod parser;

pub use grammar::{action, call, splice, terminal, ActionFn, Element, Grammar, GrammarError, Production};
pub use node::{NodeArena, NodeId, ParseNode};
pub use parser::{ParseError, Parser};
