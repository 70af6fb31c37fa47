//! # Introduction
//!
//! ctrans translates a small subset of C into Java or Python source. Each
//! stage of the pipeline is exposed on its own so the terminal viewer can
//! show the token stream and syntax tree next to the generated code.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Generator → Java | Python
//! ```
//!
//! 1. [`parser::lexer`] splits source text into tokens.
//! 2. [`parser::parse`] builds a [`parser::ast::AstNode::Program`] tree by
//!    recursive descent.
//! 3. [`codegen`] renders the tree in the selected [`codegen::Dialect`].
//! 4. [`ui`] is the ratatui viewer; not part of the stable library API.
//!
//! Every stage is total: malformed input is skipped or approximated, never
//! rejected. What was skipped is recorded as a [`diagnostics::Diagnostic`];
//! [`transpile_strict`] turns any such record into an error.
//!
//! ## Example
//!
//! ```
//! use ctrans::{codegen::Dialect, transpile};
//!
//! let python = transpile("int x;", Dialect::Python);
//! assert_eq!(python, "x = 0\n");
//! ```

pub mod codegen;
pub mod diagnostics;
pub mod parser;
pub mod ui;

use codegen::{generate, Dialect};
use diagnostics::{Diagnostic, TranspileError};
use parser::ast::AstNode;
use parser::lexer::{Lexer, Token};
use parser::Parser;

/// Every intermediate result of one pipeline run
#[derive(Debug, Clone)]
pub struct Transpilation {
    pub tokens: Vec<Token>,
    pub program: AstNode,
    pub output: String,
    /// Lexer diagnostics first, then parser diagnostics
    pub diagnostics: Vec<Diagnostic>,
}

/// Run tokenize → parse → generate, keeping every intermediate result
pub fn run_pipeline(source: &str, dialect: Dialect) -> Transpilation {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize();

    let mut parser = Parser::new(tokens.clone());
    let program = parser.parse_program();

    let mut diagnostics = lexer.into_diagnostics();
    diagnostics.extend(parser.into_diagnostics());

    let output = generate(&program, dialect);

    Transpilation {
        tokens,
        program,
        output,
        diagnostics,
    }
}

/// Translate `source` into `dialect`. Never fails.
pub fn transpile(source: &str, dialect: Dialect) -> String {
    run_pipeline(source, dialect).output
}

/// Translate `source` into `dialect`, failing if any stage had to skip or
/// drop part of the input. On success the output equals [`transpile`]'s.
pub fn transpile_strict(source: &str, dialect: Dialect) -> Result<String, TranspileError> {
    let run = run_pipeline(source, dialect);
    if run.diagnostics.is_empty() {
        Ok(run.output)
    } else {
        Err(TranspileError {
            diagnostics: run.diagnostics,
        })
    }
}
