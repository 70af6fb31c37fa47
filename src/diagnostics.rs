//! Diagnostics collected by the permissive pipeline
//!
//! The tokenizer and parser never fail: malformed input is skipped or elided.
//! Each such event is still recorded as a [`Diagnostic`] so that callers can
//! opt into strictness ([`crate::transpile_strict`]) without changing the
//! permissive output.

use crate::parser::ast::SourceLocation;
use std::fmt;

/// Pipeline stage that recorded a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lexer,
    Parser,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Lexer => write!(f, "Lexer"),
            Stage::Parser => write!(f, "Parser"),
        }
    }
}

/// A tolerated problem in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub message: String,
    pub location: SourceLocation,
}

impl Diagnostic {
    pub fn new(stage: Stage, message: impl Into<String>, location: SourceLocation) -> Self {
        Diagnostic {
            stage,
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} warning at line {}, column {}: {}",
            self.stage, self.location.line, self.location.column, self.message
        )
    }
}

/// Strict-mode failure: every diagnostic recorded while transpiling
#[derive(Debug)]
pub struct TranspileError {
    pub diagnostics: Vec<Diagnostic>,
}

impl fmt::Display for TranspileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Strict mode rejected the input ({} diagnostic{})",
            self.diagnostics.len(),
            if self.diagnostics.len() == 1 { "" } else { "s" }
        )?;
        for diagnostic in &self.diagnostics {
            write!(f, "\n  {}", diagnostic)?;
        }
        Ok(())
    }
}

impl std::error::Error for TranspileError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_every_diagnostic() {
        let err = TranspileError {
            diagnostics: vec![
                Diagnostic::new(Stage::Lexer, "Skipped character '@'", SourceLocation::new(1, 5)),
                Diagnostic::new(Stage::Parser, "Skipped token ']'", SourceLocation::new(2, 1)),
            ],
        };

        let text = err.to_string();
        assert!(text.starts_with("Strict mode rejected the input (2 diagnostics)"));
        assert!(text.contains("Lexer warning at line 1, column 5: Skipped character '@'"));
        assert!(text.contains("Parser warning at line 2, column 1: Skipped token ']'"));
    }
}
