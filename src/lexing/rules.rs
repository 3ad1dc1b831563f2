//! Lexical rule tables.
//!
//! A rule table is an ordered list of (pattern, default kind, optional
//! reclassification callback) entries. Order encodes priority: at every
//! cursor position the table is scanned top to bottom and the first match
//! wins, independent of match length. Patterns are compiled once, at table
//! construction, anchored so that a match must start exactly at the cursor.

use std::fmt;

use regex::Regex;

use crate::token::TokenKind;

/// A reclassification callback: receives the matched text, the rule's
/// default kind, and the caller-supplied context, and returns the kind to
/// use instead. Returning [`TokenKind::REJECT`] skips this rule; returning
/// [`TokenKind::IGNORE`] discards the match and continues lexing.
pub type ReclassifyFn<K, C> = dyn Fn(&str, K, &C) -> K;

/// A single entry in a rule table: a regex pattern, the default token kind,
/// and an optional reclassification callback.
pub struct LexicalRule<K, C> {
    pattern: String,
    kind: K,
    reclassify: Option<Box<ReclassifyFn<K, C>>>,
}

impl<K: TokenKind, C> LexicalRule<K, C> {
    pub fn new(pattern: impl Into<String>, kind: K) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
            reclassify: None,
        }
    }

    /// A rule whose default kind may be replaced by `callback` after each
    /// match.
    pub fn with_callback(
        pattern: impl Into<String>,
        kind: K,
        callback: impl Fn(&str, K, &C) -> K + 'static,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
            reclassify: Some(Box::new(callback)),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn kind(&self) -> K {
        self.kind
    }
}

impl<K: TokenKind, C> fmt::Debug for LexicalRule<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexicalRule")
            .field("pattern", &self.pattern)
            .field("kind", &self.kind)
            .field("reclassify", &self.reclassify.is_some())
            .finish()
    }
}

/// Errors raised while building a [`RuleTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A pattern failed to compile.
    InvalidPattern { pattern: String, message: String },
    /// A rule used `EOF` as its default kind; only the tokenizer produces it.
    ReservedKind { pattern: String },
    /// The grammar's sentinel kinds are not pairwise distinct.
    SentinelOverlap,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::InvalidPattern { pattern, message } => {
                write!(f, "invalid pattern {:?}: {}", pattern, message)
            }
            RuleError::ReservedKind { pattern } => {
                write!(f, "rule {:?} uses the reserved EOF kind", pattern)
            }
            RuleError::SentinelOverlap => {
                write!(f, "IGNORE, REJECT, and EOF sentinel kinds must be distinct")
            }
        }
    }
}

impl std::error::Error for RuleError {}

struct CompiledRule<K, C> {
    regex: Regex,
    pattern: String,
    kind: K,
    reclassify: Option<Box<ReclassifyFn<K, C>>>,
}

/// An ordered, compiled rule table. Priority is declaration order.
pub struct RuleTable<K, C> {
    rules: Vec<CompiledRule<K, C>>,
}

impl<K: TokenKind, C> RuleTable<K, C> {
    /// Compile `rules` in priority order.
    ///
    /// Fails fast on an invalid pattern, on a rule claiming the reserved
    /// `EOF` kind, or on overlapping sentinel kinds.
    pub fn new(rules: Vec<LexicalRule<K, C>>) -> Result<Self, RuleError> {
        if K::IGNORE == K::REJECT || K::IGNORE == K::EOF || K::REJECT == K::EOF {
            return Err(RuleError::SentinelOverlap);
        }

        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            if rule.kind == K::EOF {
                return Err(RuleError::ReservedKind {
                    pattern: rule.pattern,
                });
            }

            // Anchoring gives continuous-match semantics: the match must
            // start exactly at the cursor.
            let anchored = format!(r"\A(?:{})", rule.pattern);
            let regex = Regex::new(&anchored).map_err(|e| RuleError::InvalidPattern {
                pattern: rule.pattern.clone(),
                message: e.to_string(),
            })?;

            compiled.push(CompiledRule {
                regex,
                pattern: rule.pattern,
                kind: rule.kind,
                reclassify: rule.reclassify,
            });
        }

        Ok(Self { rules: compiled })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Scan the table in priority order against the text at the cursor.
    ///
    /// Returns the first surviving match as (kind, matched length). A
    /// reclassification callback may substitute the kind; a `REJECT` result
    /// skips to the next rule at the same position. Zero-length matches are
    /// skipped as well, since they could never advance the cursor.
    pub(crate) fn scan(&self, rest: &str, context: &C) -> Option<(K, usize)> {
        for rule in &self.rules {
            let found = match rule.regex.find(rest) {
                Some(found) if found.end() > 0 => found,
                _ => continue,
            };

            let kind = match &rule.reclassify {
                Some(callback) => callback(found.as_str(), rule.kind, context),
                None => rule.kind,
            };
            if kind == K::REJECT {
                continue;
            }

            return Some((kind, found.end()));
        }

        None
    }
}

impl<K: TokenKind, C> fmt::Debug for RuleTable<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let patterns: Vec<&str> = self.rules.iter().map(|r| r.pattern.as_str()).collect();
        f.debug_struct("RuleTable")
            .field("rules", &patterns)
            .finish()
    }
}
