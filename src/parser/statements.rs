//! Statement parsing implementation
//!
//! This module handles statement dispatch by leading token:
//!
//! - `#` → include directive
//! - type keyword → variable declaration or function definition
//! - Control flow: `if`, `while`, `for`, `return`
//! - I/O: `printf`, `scanf` become dedicated statement nodes
//! - identifier → assignment, `++`/`--`, or an expression statement
//! - `{` → block
//!
//! # Grammar
//!
//! ```text
//! statement ::= include | declaration | if_stmt | while_stmt | for_stmt
//!             | return_stmt | printf_stmt | scanf_stmt | block
//!             | assignment | expr_stmt
//! if_stmt   ::= "if" "(" expr ")" statement ( "else" statement )?
//! ```
//!
//! Any other leading token is skipped. Trailing semicolons are consumed when
//! present but never required.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{is_type_keyword, TokenKind};
use crate::parser::parse::Parser;

impl Parser {
    /// Parse a statement. Returns `None` when the leading token was skipped
    /// or the statement could not be formed; at least one token is consumed
    /// unless the cursor is already at end of input.
    pub(crate) fn parse_statement(&mut self) -> Option<AstNode> {
        if self.is_at_end() || !self.enter_nested() {
            return None;
        }
        let statement = self.parse_statement_kind();
        self.leave_nested();
        statement
    }

    /// Dispatch on the leading token of a statement
    fn parse_statement_kind(&mut self) -> Option<AstNode> {
        let kind = self.peek().kind;
        let text = self.peek().text().to_string();

        match kind {
            TokenKind::Eof => None,
            TokenKind::Delimiter if text == "#" => self.parse_include(),
            TokenKind::Delimiter if text == "{" => Some(self.parse_block()),
            TokenKind::Keyword if is_type_keyword(&text) => self.parse_declaration_or_function(),
            TokenKind::Keyword => match text.as_str() {
                "if" => self.parse_if_statement(),
                "while" => self.parse_while_statement(),
                "for" => self.parse_for_statement(),
                "return" => Some(self.parse_return_statement()),
                "printf" | "scanf" => Some(self.parse_io_statement()),
                _ => self.skip_token(),
            },
            TokenKind::Identifier => self.parse_identifier_statement(),
            _ => self.skip_token(),
        }
    }

    /// Parse `{ statements }` into a `Block` node
    pub(crate) fn parse_block(&mut self) -> AstNode {
        let loc = self.current_location();
        let body = self.parse_block_body();
        AstNode::Block { body, location: loc }
    }

    /// Parse statements between braces (the braces themselves are consumed)
    pub(crate) fn parse_block_body(&mut self) -> Vec<AstNode> {
        let mut statements = Vec::new();
        self.consume_delimiter("{");

        while !self.check_delimiter("}") && !self.is_at_end() {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
        }

        self.consume_delimiter("}");
        statements
    }

    /// Parse the body of `if`/`else`/`while`/`for`. A missing or skipped
    /// statement becomes an empty block.
    fn parse_branch(&mut self) -> Box<AstNode> {
        let loc = self.current_location();
        let branch = self.parse_statement().unwrap_or(AstNode::Block {
            body: Vec::new(),
            location: loc,
        });
        Box::new(branch)
    }

    /// Parse `( expression )`, tolerating a missing `(` and stray tokens
    /// before `)`
    fn parse_condition(&mut self) -> Option<AstNode> {
        self.consume_delimiter("(");
        let condition = self.parse_expression();
        self.close_paren();
        condition
    }

    /// Parse if statement. The `else` clause is parsed in the same call frame
    /// as its `if`, so it always binds to the nearest one.
    fn parse_if_statement(&mut self) -> Option<AstNode> {
        let loc = self.advance().location;

        let condition = self.parse_condition();
        let then_branch = self.parse_branch();
        let else_branch = if self.match_token(TokenKind::Keyword, "else") {
            Some(self.parse_branch())
        } else {
            None
        };

        let Some(condition) = condition else {
            self.warn("Dropped 'if' statement without a condition", loc);
            return None;
        };

        Some(AstNode::IfStatement {
            condition: Box::new(condition),
            then_branch,
            else_branch,
            location: loc,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Option<AstNode> {
        let loc = self.advance().location;

        let condition = self.parse_condition();
        let body = self.parse_branch();

        let Some(condition) = condition else {
            self.warn("Dropped 'while' loop without a condition", loc);
            return None;
        };

        Some(AstNode::WhileLoop {
            condition: Box::new(condition),
            body,
            location: loc,
        })
    }

    /// Parse the classic three-clause for statement
    fn parse_for_statement(&mut self) -> Option<AstNode> {
        let loc = self.advance().location;
        self.consume_delimiter("(");

        // Init: declaration or identifier-led statement; either may already
        // have consumed the separating ';'
        let init = if self.consume_delimiter(";") {
            None
        } else {
            let init = if self.at_type_keyword() {
                self.parse_declaration_or_function()
            } else if self.peek().kind == TokenKind::Identifier {
                self.parse_identifier_statement()
            } else {
                self.warn("Unsupported for-loop initializer", self.current_location());
                None
            };
            if !self.previous().is(TokenKind::Delimiter, ";") {
                self.consume_delimiter(";");
            }
            init
        };

        let condition = if self.check_delimiter(";") {
            None
        } else {
            self.parse_expression()
        };
        self.consume_delimiter(";");

        let update = if self.check_delimiter(")") {
            None
        } else if self.peek().kind == TokenKind::Identifier {
            self.parse_identifier_statement()
        } else {
            self.parse_expression()
        };
        self.close_paren();

        let body = self.parse_branch();

        Some(AstNode::ForLoop {
            init: init.map(Box::new),
            condition: condition.map(Box::new),
            update: update.map(Box::new),
            body,
            location: loc,
        })
    }

    /// Parse return statement with optional value
    fn parse_return_statement(&mut self) -> AstNode {
        let loc = self.advance().location;

        let value = if self.check_delimiter(";") || self.check_delimiter("}") || self.is_at_end()
        {
            None
        } else {
            self.parse_expression().map(Box::new)
        };

        self.consume_delimiter(";");
        AstNode::ReturnStatement { value, location: loc }
    }

    /// Parse `printf(...)` / `scanf(...)` into their dedicated nodes
    fn parse_io_statement(&mut self) -> AstNode {
        let keyword = self.advance();
        let args = self.parse_argument_list();
        self.consume_delimiter(";");

        if keyword.text() == "scanf" {
            AstNode::ScanfStatement {
                args,
                location: keyword.location,
            }
        } else {
            AstNode::PrintfStatement {
                args,
                location: keyword.location,
            }
        }
    }

    /// Parse a statement that starts with an identifier.
    ///
    /// One token of lookahead decides the branch: an assignment operator or
    /// `++`/`--` makes an `Assignment`; anything else (including a call) is
    /// parsed as an expression statement.
    pub(crate) fn parse_identifier_statement(&mut self) -> Option<AstNode> {
        let next = self.peek_ahead(1);
        let assign_op = if next.kind == TokenKind::Operator {
            AssignOp::from_symbol(next.text())
        } else {
            None
        };

        let Some(op) = assign_op else {
            let expr = self.parse_expression();
            self.consume_delimiter(";");
            return expr;
        };

        let target = self.advance();
        self.advance(); // operator

        let value = if op.is_step() {
            None
        } else {
            match self.parse_expression() {
                Some(value) => Some(Box::new(value)),
                None => {
                    self.warn(
                        format!(
                            "Dropped assignment to '{}' without a value",
                            target.text()
                        ),
                        target.location,
                    );
                    self.consume_delimiter(";");
                    return None;
                }
            }
        };

        self.consume_delimiter(";");

        Some(AstNode::Assignment {
            target: target.text().to_string(),
            op,
            value,
            location: target.location,
        })
    }
}
