//! # playscript
//!
//! playscript is a small scripting language implemented as a classic
//! pipeline: a tokenizer, a recursive-descent parser with precedence
//! climbing, a declaration pass and a resolution pass over nested lexical
//! scopes, and a tree-walking interpreter.
//!
//! Mistakes in a script never stop the pipeline. Every phase reports them
//! into a shared [`Diagnostics`](error::Diagnostics) list and carries on with
//! what it could recover.
//!
//! ```
//! let mut out = Vec::new();
//! let diagnostics = playscript::run("function greet() { println(\"hi\", 1 + 2); } greet();",
//!                                   &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "hi 3\n");
//! assert!(diagnostics.is_empty());
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use tracing::debug;

use crate::{
    ast::Program,
    error::{Diagnostics, HostError},
    interpreter::{
        evaluator::core::Context,
        parser::core::Parser,
        semantic::{enter::Enter, resolver::RefResolver, scope::SymbolTable},
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the statement and expression types the parser
/// produces, the declaration ids that link symbols back to the tree, and the
/// write-once bindings the resolution pass fills in. It also renders the
/// tree as the indented dump.
pub mod ast;
/// Provides the error types of every phase.
///
/// Each phase has its own error enum. Script mistakes are wrapped in a
/// [`Diagnostic`](error::Diagnostic) and collected in
/// [`Diagnostics`](error::Diagnostics); only failures of the host, such as a
/// broken output stream, are returned as Rust errors.
///
/// # Responsibilities
/// - Defines error enums for lexing, parsing, resolution and evaluation.
/// - Attaches line numbers for context.
/// - Logs every reported diagnostic.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together the cursor, tokenizer, parser, semantic passes,
/// evaluator and runtime values.
pub mod interpreter;
/// General utilities for numeric conversion.
pub mod util;

/// A program that went through parsing and both semantic passes, ready to
/// run.
///
/// Owns the tree, the symbol table the passes built and every diagnostic
/// reported so far. Running it adds runtime diagnostics to the same list.
#[derive(Debug)]
pub struct Compilation {
    /// The analyzed tree.
    pub program:     Program,
    /// Scopes and symbols built by the semantic passes.
    pub symbols:     SymbolTable,
    /// Diagnostics from every phase, in the order they were reported.
    pub diagnostics: Diagnostics,
}

impl Compilation {
    /// Runs the program, writing `println` output to `out`.
    ///
    /// A compilation is meant to run once; variables keep the values the
    /// previous run left behind.
    ///
    /// # Errors
    /// Returns a [`HostError`] if writing to `out` fails.
    pub fn execute<W: Write>(&mut self, out: &mut W) -> Result<(), HostError> {
        let program = &self.program;
        let mut context = Context::new(program, &mut self.symbols, &mut self.diagnostics, out);
        context.eval_program(program)
    }

    /// An evaluation context over this compilation, writing to `out`.
    pub fn context<'a>(&'a mut self, out: &'a mut dyn Write) -> Context<'a> {
        Context::new(&self.program, &mut self.symbols, &mut self.diagnostics, out)
    }
}

/// Parses `source` into a tree.
///
/// Never fails: malformed statements are reported in the returned
/// diagnostics and left out of the tree.
///
/// # Example
/// ```
/// let (program, diagnostics) = playscript::parse("let x = 1; @;");
/// assert_eq!(program.statements.len(), 1);
/// assert_eq!(diagnostics.len(), 2);
/// ```
#[must_use]
pub fn parse(source: &str) -> (Program, Diagnostics) {
    Parser::new(source).parse_program()
}

/// Runs the declaration pass and then the resolution pass over `program`.
///
/// Semantic diagnostics are appended to `diagnostics`.
#[must_use]
pub fn analyze(mut program: Program, mut diagnostics: Diagnostics) -> Compilation {
    let mut symbols = SymbolTable::new();

    Enter::new(&mut symbols, &mut diagnostics).visit_program(&mut program);
    RefResolver::new(&symbols, &mut diagnostics).visit_program(&mut program);
    debug!(diagnostics = diagnostics.len(), "analysis finished");

    Compilation { program,
                  symbols,
                  diagnostics }
}

/// Parses and analyzes `source`.
///
/// # Example
/// ```
/// let compilation = playscript::compile("function a() { b(); } function b() {}");
/// assert!(compilation.diagnostics.is_empty());
/// ```
#[must_use]
pub fn compile(source: &str) -> Compilation {
    let (program, diagnostics) = parse(source);
    analyze(program, diagnostics)
}

/// Parses, analyzes and runs `source`, writing program output to `out`.
///
/// # Returns
/// Every diagnostic reported by any phase.
///
/// # Errors
/// Returns a [`HostError`] if writing to `out` fails.
pub fn run<W: Write>(source: &str, out: &mut W) -> Result<Diagnostics, HostError> {
    let mut compilation = compile(source);
    compilation.execute(out)?;
    Ok(compilation.diagnostics)
}
