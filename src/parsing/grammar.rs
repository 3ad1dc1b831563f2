//! The grammar combinator: productions, alternatives, and elements.
//!
//! A production describes one nonterminal as an ordered set of alternatives,
//! each an ordered sequence of elements. Elements are built with the
//! explicit constructors [`terminal`], [`call`], and [`action`]; a
//! single-alternative production can be copied into another alternative
//! with [`splice`]. Productions are registered into a [`Grammar`], which
//! validates the whole rule set once at construction.
//!
//! Evaluation (`accept`) tries alternatives strictly in declaration order
//! under a parser checkpoint. An alternative is accepted only if every
//! element in its sequence succeeds; its result is the node produced by the
//! final element. On failure the checkpoint is restored, so the parser is
//! bit-for-bit back at the pre-attempt state before the next alternative.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::lexing::LexicalError;
use crate::parsing::node::NodeId;
use crate::parsing::parser::Parser;
use crate::token::{Token, TokenKind};

/// A semantic action: receives the parser and the tokens matched so far in
/// the current alternative, and returns the node it built. `None` denotes
/// failure and abandons the alternative.
pub type ActionFn<K, C> = dyn Fn(&mut Parser<'_, K, C>, &[Token<K>]) -> Option<NodeId>;

/// One element of an alternative's sequence.
pub enum Element<K, C> {
    /// Succeeds iff the lookahead token has this kind; consumes it.
    Terminal(K),
    /// Delegates to the named production of the enclosing grammar.
    Nonterminal(&'static str),
    /// Caller-supplied logic producing a node from the tokens matched so far.
    Action(Rc<ActionFn<K, C>>),
}

/// Element constructor: match one token of `kind`.
pub fn terminal<K, C>(kind: K) -> Element<K, C> {
    Element::Terminal(kind)
}

/// Element constructor: evaluate the production registered as `production`.
pub fn call<K, C>(production: &'static str) -> Element<K, C> {
    Element::Nonterminal(production)
}

/// Element constructor: run a semantic action.
pub fn action<K, C>(
    callback: impl Fn(&mut Parser<'_, K, C>, &[Token<K>]) -> Option<NodeId> + 'static,
) -> Element<K, C> {
    Element::Action(Rc::new(callback))
}

/// Copy a single-alternative production's elements, in order, for use inside
/// another alternative. Splicing a production with more than one alternative
/// is undefined (the distributive expansion is ambiguous) and fails fast.
pub fn splice<K: TokenKind, C>(
    production: &Production<K, C>,
) -> Result<Vec<Element<K, C>>, GrammarError> {
    if production.alternatives.len() != 1 {
        return Err(GrammarError::SpliceAmbiguous {
            production: production.name,
        });
    }
    Ok(production.alternatives[0].clone())
}

impl<K: Clone, C> Clone for Element<K, C> {
    fn clone(&self) -> Self {
        match self {
            Element::Terminal(kind) => Element::Terminal(kind.clone()),
            Element::Nonterminal(name) => Element::Nonterminal(name),
            Element::Action(callback) => Element::Action(Rc::clone(callback)),
        }
    }
}

impl<K: fmt::Debug, C> fmt::Debug for Element<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Terminal(kind) => f.debug_tuple("Terminal").field(kind).finish(),
            Element::Nonterminal(name) => f.debug_tuple("Nonterminal").field(name).finish(),
            Element::Action(_) => f.write_str("Action(..)"),
        }
    }
}

/// Errors raised while building productions or a [`Grammar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// [`splice`] was given a production with more than one alternative.
    SpliceAmbiguous { production: &'static str },
    /// Two productions share a name.
    DuplicateProduction { production: &'static str },
    /// A production has no alternatives at all.
    EmptyProduction { production: &'static str },
    /// An alternative has no elements; it could never produce a result node.
    EmptyAlternative { production: &'static str },
    /// An element references a production the grammar does not contain.
    UnknownProduction {
        production: &'static str,
        referenced: &'static str,
    },
    /// The designated start symbol is not among the registered productions.
    MissingStart { start: &'static str },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::SpliceAmbiguous { production } => write!(
                f,
                "cannot splice production '{}': it has more than one alternative",
                production
            ),
            GrammarError::DuplicateProduction { production } => {
                write!(f, "production '{}' is defined twice", production)
            }
            GrammarError::EmptyProduction { production } => {
                write!(f, "production '{}' has no alternatives", production)
            }
            GrammarError::EmptyAlternative { production } => {
                write!(f, "production '{}' has an empty alternative", production)
            }
            GrammarError::UnknownProduction {
                production,
                referenced,
            } => write!(
                f,
                "production '{}' references unknown production '{}'",
                production, referenced
            ),
            GrammarError::MissingStart { start } => {
                write!(f, "start symbol '{}' is not a registered production", start)
            }
        }
    }
}

impl std::error::Error for GrammarError {}

/// A named nonterminal: an ordered set of alternatives, each an ordered
/// sequence of elements.
pub struct Production<K, C> {
    name: &'static str,
    alternatives: Vec<Vec<Element<K, C>>>,
}

impl<K: TokenKind, C> Production<K, C> {
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            alternatives: Vec::new(),
        }
    }

    /// Append one alternative. Alternatives are tried in the order they are
    /// added.
    pub fn alternative(mut self, elements: Vec<Element<K, C>>) -> Self {
        self.alternatives.push(elements);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Evaluate this production against the parser, trying alternatives
    /// strictly in declaration order with checkpointed backtracking.
    ///
    /// `Ok(None)` is a clean mismatch with parser state exactly as on entry;
    /// a lexical error is fatal and is never absorbed by backtracking.
    pub fn accept(
        &self,
        parser: &mut Parser<'_, K, C>,
        grammar: &Grammar<K, C>,
    ) -> Result<Option<NodeId>, LexicalError> {
        for elements in &self.alternatives {
            parser.set_checkpoint();
            match self.evaluate_alternative(elements, parser, grammar) {
                Ok(Some(node)) => {
                    parser.clear_checkpoint();
                    return Ok(Some(node));
                }
                Ok(None) => parser.restore_checkpoint(),
                Err(error) => {
                    parser.clear_checkpoint();
                    return Err(error);
                }
            }
        }

        Ok(None)
    }

    fn evaluate_alternative(
        &self,
        elements: &[Element<K, C>],
        parser: &mut Parser<'_, K, C>,
        grammar: &Grammar<K, C>,
    ) -> Result<Option<NodeId>, LexicalError> {
        let mut matched: Vec<Token<K>> = Vec::new();
        let mut result = None;

        for element in elements {
            let outcome = match element {
                Element::Terminal(kind) => {
                    if parser.peek().kind() == *kind {
                        let token = parser.pop()?;
                        let node = parser.arena_mut().terminal(token.clone());
                        matched.push(token);
                        Some(node)
                    } else {
                        parser.note_expected(*kind);
                        None
                    }
                }
                Element::Nonterminal(name) => match grammar.production(name) {
                    Some(target) => target.accept(parser, grammar)?,
                    // Grammar::new rejects dangling references; this arm is
                    // reachable only when a production is evaluated against a
                    // foreign grammar.
                    None => None,
                },
                Element::Action(callback) => callback(parser, &matched),
            };

            // Every element of the sequence must succeed; the alternative's
            // result is the node produced by its final element.
            match outcome {
                Some(node) => result = Some(node),
                None => return Ok(None),
            }
        }

        Ok(result)
    }
}

impl<K: fmt::Debug, C> fmt::Debug for Production<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Production")
            .field("name", &self.name)
            .field("alternatives", &self.alternatives)
            .finish()
    }
}

/// A validated set of named productions with one designated start symbol.
pub struct Grammar<K, C> {
    productions: HashMap<&'static str, Production<K, C>>,
    start: &'static str,
}

impl<K: TokenKind, C> Grammar<K, C> {
    /// Register `productions` and validate the rule set: duplicate names,
    /// productions without alternatives, empty alternatives, dangling
    /// nonterminal references, and a missing start symbol all fail fast.
    pub fn new(
        start: &'static str,
        productions: Vec<Production<K, C>>,
    ) -> Result<Self, GrammarError> {
        let mut registered: HashMap<&'static str, Production<K, C>> = HashMap::new();

        for production in productions {
            let name = production.name;
            if production.alternatives.is_empty() {
                return Err(GrammarError::EmptyProduction { production: name });
            }
            if production.alternatives.iter().any(|a| a.is_empty()) {
                return Err(GrammarError::EmptyAlternative { production: name });
            }
            if registered.insert(name, production).is_some() {
                return Err(GrammarError::DuplicateProduction { production: name });
            }
        }

        if !registered.contains_key(start) {
            return Err(GrammarError::MissingStart { start });
        }

        for production in registered.values() {
            for elements in &production.alternatives {
                for element in elements {
                    if let Element::Nonterminal(referenced) = element {
                        if !registered.contains_key(referenced) {
                            return Err(GrammarError::UnknownProduction {
                                production: production.name,
                                referenced: *referenced,
                            });
                        }
                    }
                }
            }
        }

        Ok(Self {
            productions: registered,
            start,
        })
    }

    pub fn start(&self) -> &'static str {
        self.start
    }

    pub fn production(&self, name: &str) -> Option<&Production<K, C>> {
        self.productions.get(name)
    }

    pub(crate) fn start_production(&self) -> &Production<K, C> {
        self.productions
            .get(self.start)
            .expect("start symbol validated by Grammar::new")
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }
}

impl<K: fmt::Debug, C> fmt::Debug for Grammar<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.productions.keys().copied().collect();
        names.sort_unstable();
        f.debug_struct("Grammar")
            .field("start", &self.start)
            .field("productions", &names)
            .finish()
    }
}
