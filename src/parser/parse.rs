//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! the token cursor, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: `#include`, variable declarations and function definitions
//! - `statements`: statement dispatch (if, while, for, printf, ...)
//! - `expressions`: expression parsing, one method per precedence level
//!
//! # Error policy
//!
//! Parsing is total. Every statement-level dispatch consumes at least one
//! token, so the cursor always reaches end of input. Tokens that fit no rule
//! are skipped and statements missing a required expression are dropped; both
//! are recorded as [`Diagnostic`]s instead of being raised.
//!
//! Nesting of statements and expressions is capped at [`MAX_NESTING`] levels.
//! Past the cap the current token is skipped instead of descending, so
//! pathological input cannot exhaust the stack.

use crate::diagnostics::{Diagnostic, Stage};
use crate::parser::ast::*;
use crate::parser::lexer::{is_type_keyword, Lexer, Token, TokenKind};

/// Deepest statement/expression nesting the parser descends into
pub const MAX_NESTING: usize = 64;

/// Parse a token sequence into a `Program` node, discarding diagnostics.
pub fn parse(tokens: Vec<Token>) -> AstNode {
    Parser::new(tokens).parse_program()
}

/// Recursive descent parser for the C subset
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Current statement + expression nesting
    pub(crate) depth: usize,
}

impl Parser {
    /// Build a parser over `tokens`. Newline tokens are discarded here:
    /// statement boundaries are purely structural.
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Newline)
            .collect();

        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let loc = tokens.last().map(|t| t.location).unwrap_or_default();
            tokens.push(Token::eof(loc));
        }

        Self {
            tokens,
            position: 0,
            diagnostics: Vec::new(),
            depth: 0,
        }
    }

    /// Tokenize `source` and build a parser over the result. Lexer
    /// diagnostics are carried over into [`Parser::diagnostics`].
    pub fn from_source(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize();
        let mut parser = Parser::new(tokens);
        parser.diagnostics = lexer.into_diagnostics();
        parser
    }

    /// Parse the entire program
    pub fn parse_program(&mut self) -> AstNode {
        let mut body = Vec::new();

        while !self.is_at_end() {
            if let Some(node) = self.parse_statement() {
                body.push(node);
            }
        }

        AstNode::Program { body }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// Token `n` positions ahead, clamped to the end-of-input token
    pub(crate) fn peek_ahead(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + n).min(last)]
    }

    /// Consume the current token. The end-of-input token is never consumed.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    /// Most recently consumed token (the first token before any advance)
    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn check(&self, kind: TokenKind, text: &str) -> bool {
        self.peek().is(kind, text)
    }

    pub(crate) fn check_delimiter(&self, text: &str) -> bool {
        self.check(TokenKind::Delimiter, text)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind, text: &str) -> bool {
        if self.check(kind, text) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advance only if the current token is exactly the delimiter `text`.
    pub(crate) fn consume_delimiter(&mut self, text: &str) -> bool {
        self.match_token(TokenKind::Delimiter, text)
    }

    pub(crate) fn at_type_keyword(&self) -> bool {
        let token = self.peek();
        token.kind == TokenKind::Keyword && is_type_keyword(token.text())
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Enter one nesting level. At [`MAX_NESTING`] the current token is
    /// skipped with a diagnostic and `false` is returned; the caller must not
    /// descend and must not call [`Parser::leave_nested`].
    pub(crate) fn enter_nested(&mut self) -> bool {
        if self.depth >= MAX_NESTING {
            let token = self.advance();
            self.warn(
                format!(
                    "Nesting deeper than {} levels, skipped token {}",
                    MAX_NESTING, token
                ),
                token.location,
            );
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn warn(&mut self, message: impl Into<String>, location: SourceLocation) {
        self.diagnostics
            .push(Diagnostic::new(Stage::Parser, message, location));
    }

    /// Skip the current token, recording why. Stray `;` is an empty
    /// statement and is dropped silently.
    pub(crate) fn skip_token(&mut self) -> Option<AstNode> {
        let token = self.advance();
        if !token.is(TokenKind::Delimiter, ";") {
            self.warn(format!("Skipped token {}", token), token.location);
        }
        None
    }

    /// Consume up to and including the `)` closing the current group.
    ///
    /// Leftover tokens inside the group are skipped. Stops without consuming
    /// at `{`, `}` or `;` so a missing `)` cannot swallow a following block.
    pub(crate) fn close_paren(&mut self) {
        let mut depth = 0usize;

        loop {
            let kind = self.peek().kind;
            if kind == TokenKind::Eof {
                return;
            }
            if kind == TokenKind::Delimiter {
                match self.peek().text() {
                    ")" if depth == 0 => break,
                    ")" => depth -= 1,
                    "(" => depth += 1,
                    "{" | "}" | ";" => return,
                    _ => {}
                }
            }
            let skipped = self.advance();
            self.warn(
                format!("Skipped token {} before ')'", skipped),
                skipped.location,
            );
        }

        self.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn parse_source(source: &str) -> Vec<AstNode> {
        match parse(tokenize(source)) {
            AstNode::Program { body } => body,
            other => panic!("Expected Program, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_function() {
        let body = parse_source("int main() { return 0; }");

        assert_eq!(body.len(), 1);
        match &body[0] {
            AstNode::Function {
                name,
                params,
                return_type,
                body,
                is_prototype,
                ..
            } => {
                assert_eq!(name, "main");
                assert!(params.is_empty());
                assert_eq!(return_type, "int");
                assert_eq!(body.len(), 1);
                assert!(!is_prototype);
            }
            other => panic!("Expected function definition, got {:?}", other),
        }
    }

    #[test]
    fn test_newlines_do_not_affect_parsing() {
        let spread = parse_source("int\nx\n=\n5\n;\n");
        let compact = parse_source("int x = 5;");
        assert_eq!(spread.len(), 1);
        assert_eq!(spread[0].kind_name(), compact[0].kind_name());
        assert_eq!(spread[0].label(), compact[0].label());
    }

    #[test]
    fn test_empty_and_eof_only_inputs() {
        assert!(parse_source("").is_empty());
        assert_eq!(parse(Vec::new()), AstNode::Program { body: Vec::new() });
    }

    #[test]
    fn test_garbage_terminates_and_is_bounded() {
        let source = ") ) ] } else ; : ? , . [ { ( + - * &";
        let tokens = tokenize(source);
        let token_count = tokens.len();
        let body = parse_source(source);
        assert!(body.len() <= token_count);
    }

    #[test]
    fn test_skipped_tokens_are_diagnosed() {
        let mut parser = Parser::from_source("break; int x;");
        let program = parser.parse_program();

        assert_eq!(program.children().len(), 1);
        assert_eq!(parser.diagnostics().len(), 1);
        assert!(parser.diagnostics()[0].message.contains("break"));
    }

    #[test]
    fn test_moderate_nesting_parses_cleanly() {
        let source = format!("x = {}1{};", "(".repeat(20), ")".repeat(20));
        let mut parser = Parser::from_source(&source);
        let program = parser.parse_program();

        assert_eq!(program.children().len(), 1);
        assert!(parser.diagnostics().is_empty());
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn test_nesting_past_the_cap_is_skipped() {
        let depth = MAX_NESTING * 2;
        let source = format!("x = {}1{};\nint y;", "(".repeat(depth), ")".repeat(depth));
        let mut parser = Parser::from_source(&source);
        let program = parser.parse_program();

        assert_eq!(parser.depth, 0);
        assert!(parser
            .diagnostics()
            .iter()
            .any(|d| d.message.starts_with("Nesting deeper than")));
        let labels: Vec<String> = program.children().iter().map(|(_, n)| n.label()).collect();
        assert_eq!(labels.last().map(String::as_str), Some("Variable int y"));
    }

    #[test]
    fn test_lexer_diagnostics_are_carried_over() {
        let mut parser = Parser::from_source("int x = 1 @;");
        parser.parse_program();
        assert_eq!(parser.diagnostics().len(), 1);
        assert_eq!(parser.diagnostics()[0].stage, Stage::Lexer);
    }
}
