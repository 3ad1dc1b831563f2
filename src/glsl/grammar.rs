//! The (partial) shading-language grammar.
//!
//! Covers the expression entry points: `variable_identifier`,
//! `primary_expression`, and an `expression` that currently only reaches
//! primary expressions. The remaining productions of the language
//! (postfix/unary/binary expression chains, declarations, statements,
//! function definitions) are not implemented yet.

use crate::glsl::tokens::{GlslKind, TypeRegistry};
use crate::parsing::grammar::{action, call, splice, terminal, Grammar, GrammarError, Production};
use crate::parsing::node::NodeId;
use crate::parsing::parser::Parser;
use crate::token::Token;

fn paren_expression_action(
    parser: &mut Parser<'_, GlslKind, TypeRegistry>,
    _matched: &[Token<GlslKind>],
) -> Option<NodeId> {
    Some(parser.arena_mut().branch("paren_expression", None, None))
}

/// Build the grammar. Start symbol: `expression`.
pub fn grammar() -> Result<Grammar<GlslKind, TypeRegistry>, GrammarError> {
    use GlslKind::*;

    let variable_identifier = Production::named("variable_identifier")
        .alternative(vec![terminal(Identifier)]);

    // A parenthesized expression group, spliced below so that
    // primary_expression stays a flat list of alternatives.
    let paren_group: Production<GlslKind, TypeRegistry> = Production::named("paren_group")
        .alternative(vec![
            terminal(LeftParen),
            call("expression"),
            terminal(RightParen),
        ]);

    let mut grouped = splice(&paren_group)?;
    grouped.push(action(paren_expression_action));

    let primary_expression = Production::named("primary_expression")
        .alternative(vec![call("variable_identifier")])
        .alternative(vec![terminal(IntConstant)])
        .alternative(vec![terminal(UintConstant)])
        .alternative(vec![terminal(FloatConstant)])
        .alternative(vec![terminal(BoolConstant)])
        .alternative(grouped);

    let expression = Production::named("expression")
        .alternative(vec![call("primary_expression")]);

    Grammar::new(
        "expression",
        vec![variable_identifier, primary_expression, expression],
    )
}
