//! C source code parser
//!
//! This module transforms C source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Supported C Subset
//!
//! The parser accepts the subset of C that the code generators can express:
//! - Types: `int`, `float`, `double`, `char`, `long`, `short`, `bool`, `void`
//!   (with `unsigned`/`signed` folded away)
//! - Top level: `#include`, global variables, function definitions and prototypes
//! - Statements: declarations, assignments (`=`, `+=`, `-=`, `*=`, `/=`, `%=`,
//!   `++`, `--`), `if`/`else`, `while`, `for`, `return`, `printf`, `scanf`,
//!   call statements and blocks
//! - Expressions: arithmetic, comparison, logical, unary `-`, `!` and `&`,
//!   function calls
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per precedence level.
//! Parsing never fails: anything outside the subset is skipped and reported
//! as a [`crate::diagnostics::Diagnostic`].

pub mod ast;
pub mod lexer;
pub mod parse;

mod declarations;
mod expressions;
mod statements;

pub use lexer::tokenize;
pub use parse::{parse, Parser};
