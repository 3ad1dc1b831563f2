//! Command-line interface for shade
//! This binary normalizes a shading-language source file, tokenizes it, and
//! prints the result in a few formats. With `--parse` it also runs the
//! partial expression grammar over the input.
//!
//! Usage:
//!   shade `<path>` [--format `<format>`]   - Tokenize a file (simple | json | normalized)
//!   shade `<path>` --parse                 - Parse with the partial grammar

use clap::{Arg, ArgAction, Command};

use shade::glsl::{self, GlslKind, NormalizeOptions, TypeRegistry};
use shade::lexing::{LexicalError, RuleTable, Tokenizer};
use shade::parsing::Parser;
use shade::token::Token;

fn main() {
    let matches = Command::new("shade")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting shading-language sources")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the shader source file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: simple, json, or normalized")
                .default_value("simple"),
        )
        .arg(
            Arg::new("parse")
                .long("parse")
                .help("Run the partial expression grammar instead of dumping tokens")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-line-fixup")
                .long("no-line-fixup")
                .help("Do not re-insert blank lines for spliced line continuations")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let path = matches.get_one::<String>("path").expect("path is required");
    let format = matches.get_one::<String>("format").expect("format has a default");

    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    });

    let options = NormalizeOptions {
        maintain_line_count: !matches.get_flag("no-line-fixup"),
    };
    let normalized = glsl::normalize(&source, &options);

    if format == "normalized" {
        print!("{}", normalized.text);
        return;
    }

    let table = glsl::rules().unwrap_or_else(|e| {
        eprintln!("Error building the rule table: {}", e);
        std::process::exit(1);
    });
    let registry = TypeRegistry::with_builtins();

    if matches.get_flag("parse") {
        handle_parse(&table, &normalized.text, &registry);
        return;
    }

    let tokens = collect_tokens(&table, &normalized.text, &registry).unwrap_or_else(|e| {
        eprintln!("Lexical error: {}", e);
        std::process::exit(1);
    });

    match format.as_str() {
        "simple" => {
            for token in &tokens {
                println!(
                    "{:>4}:{:<4} {:?} {:?}",
                    token.position().line,
                    token.position().column,
                    token.kind(),
                    token.text()
                );
            }
        }
        "json" => {
            let rendered = serde_json::to_string_pretty(&tokens).unwrap_or_else(|e| {
                eprintln!("Error formatting tokens: {}", e);
                std::process::exit(1);
            });
            println!("{}", rendered);
        }
        unknown => {
            eprintln!("Unknown format '{}'; expected simple, json, or normalized", unknown);
            std::process::exit(1);
        }
    }
}

/// Drain the tokenizer into a vector, including the final EOF token.
fn collect_tokens(
    table: &RuleTable<GlslKind, TypeRegistry>,
    source: &str,
    registry: &TypeRegistry,
) -> Result<Vec<Token<GlslKind>>, LexicalError> {
    let mut tokenizer = Tokenizer::new(table, source, registry)?;
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.pop()?;
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

/// Handle the --parse command
fn handle_parse(table: &RuleTable<GlslKind, TypeRegistry>, source: &str, registry: &TypeRegistry) {
    let grammar = glsl::grammar().unwrap_or_else(|e| {
        eprintln!("Error building the grammar: {}", e);
        std::process::exit(1);
    });

    let mut parser = Parser::new(table, source, registry).unwrap_or_else(|e| {
        eprintln!("Lexical error: {}", e);
        std::process::exit(1);
    });

    match parser.parse(&grammar) {
        Ok(root) => {
            println!(
                "parse succeeded: {} nodes, root {:?}",
                parser.arena().len(),
                parser.arena().get(root)
            );
        }
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    }
}
