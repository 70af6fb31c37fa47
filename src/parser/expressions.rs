//! Expression parsing implementation
//!
//! Binary operators are parsed with one method per precedence level, each a
//! left-associative fold over the level below it.
//!
//! # Operator Precedence (lowest to highest)
//!
//! 1. Logical OR: `||`
//! 2. Logical AND: `&&`
//! 3. Equality: `==`, `!=`
//! 4. Relational: `<`, `>`, `<=`, `>=`
//! 5. Additive: `+`, `-`
//! 6. Multiplicative: `*`, `/`, `%`
//! 7. Unary: `&` (address-of), `-`, `!`
//! 8. Primary: literals, identifiers, calls, parenthesized expressions
//!
//! Expression methods return `None` when no operand can start at the cursor;
//! in that case nothing is consumed, except past the nesting cap where one
//! token is skipped. A dangling binary operator is consumed and the left
//! operand is kept.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::Parser;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Option<AstNode> {
        self.parse_logical_or()
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Option<AstNode> {
        self.parse_binary_level(&[BinOp::Or], Self::parse_logical_and)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Option<AstNode> {
        self.parse_binary_level(&[BinOp::And], Self::parse_equality)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Option<AstNode> {
        self.parse_binary_level(&[BinOp::Eq, BinOp::Ne], Self::parse_relational)
    }

    /// Parse relational (< > <= >=)
    fn parse_relational(&mut self) -> Option<AstNode> {
        self.parse_binary_level(
            &[BinOp::Lt, BinOp::Gt, BinOp::Le, BinOp::Ge],
            Self::parse_additive,
        )
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Option<AstNode> {
        self.parse_binary_level(&[BinOp::Add, BinOp::Sub], Self::parse_multiplicative)
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Option<AstNode> {
        self.parse_binary_level(&[BinOp::Mul, BinOp::Div, BinOp::Mod], Self::parse_unary)
    }

    /// Left fold: `operand (op operand)*` while the next token is one of `ops`
    fn parse_binary_level(
        &mut self,
        ops: &[BinOp],
        operand: fn(&mut Self) -> Option<AstNode>,
    ) -> Option<AstNode> {
        let mut left = operand(self)?;

        loop {
            let token = self.peek();
            if token.kind != TokenKind::Operator {
                break;
            }
            let Some(op) = BinOp::from_symbol(token.text()).filter(|op| ops.contains(op)) else {
                break;
            };

            let loc = self.advance().location;
            let Some(right) = operand(self) else {
                self.warn(
                    format!("Missing right operand for '{}'", op.symbol()),
                    loc,
                );
                break;
            };

            left = AstNode::BinaryExpression {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location: loc,
            };
        }

        Some(left)
    }

    /// Parse unary prefix operators. Address-of wraps a primary expression.
    ///
    /// Every operand, including each parenthesized group, passes through
    /// here, so this is where expression nesting is counted.
    fn parse_unary(&mut self) -> Option<AstNode> {
        if self.is_at_end() || !self.enter_nested() {
            return None;
        }
        let operand = self.parse_unary_operand();
        self.leave_nested();
        operand
    }

    fn parse_unary_operand(&mut self) -> Option<AstNode> {
        let token = self.peek();
        if token.kind != TokenKind::Operator {
            return self.parse_primary();
        }

        let op = match token.text() {
            "&" => UnOp::AddrOf,
            "-" => UnOp::Neg,
            "!" => UnOp::Not,
            _ => return None,
        };

        let loc = self.advance().location;
        let operand = if op == UnOp::AddrOf {
            self.parse_primary()
        } else {
            self.parse_unary()
        };

        let Some(operand) = operand else {
            self.warn(format!("Missing operand for '{}'", op.symbol()), loc);
            return None;
        };

        Some(AstNode::UnaryExpression {
            op,
            operand: Box::new(operand),
            location: loc,
        })
    }

    /// Parse primary (literals, identifiers, calls, parenthesized expressions)
    fn parse_primary(&mut self) -> Option<AstNode> {
        let token = self.peek();
        let loc = token.location;
        let kind = token.kind;
        let opens_group = token.is(TokenKind::Delimiter, "(");

        match kind {
            TokenKind::Number => {
                let value = self.advance().text().to_string();
                let kind = if value.contains('.') {
                    LiteralKind::Float
                } else {
                    LiteralKind::Int
                };
                Some(AstNode::Literal {
                    value,
                    kind,
                    location: loc,
                })
            }
            TokenKind::String => {
                let value = self.advance().text().to_string();
                Some(AstNode::Literal {
                    value,
                    kind: LiteralKind::String,
                    location: loc,
                })
            }
            TokenKind::Identifier => {
                let is_call = self.peek_ahead(1).is(TokenKind::Delimiter, "(");
                let name = self.advance().text().to_string();
                if is_call {
                    let args = self.parse_argument_list();
                    Some(AstNode::FunctionCall {
                        name,
                        args,
                        location: loc,
                    })
                } else {
                    Some(AstNode::Identifier {
                        name,
                        location: loc,
                    })
                }
            }
            TokenKind::Delimiter if opens_group => {
                self.advance();
                let inner = self.parse_expression();
                self.close_paren();
                inner
            }
            _ => None,
        }
    }

    /// Parse argument list: `(expr, expr, ...)`, consuming both parentheses
    pub(crate) fn parse_argument_list(&mut self) -> Vec<AstNode> {
        let mut args = Vec::new();
        self.consume_delimiter("(");

        if !self.check_delimiter(")") {
            while let Some(arg) = self.parse_expression() {
                args.push(arg);
                if !self.consume_delimiter(",") {
                    break;
                }
            }
        }

        self.close_paren();
        args
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::Parser;

    fn expr(source: &str) -> AstNode {
        let mut parser = Parser::new(tokenize(source));
        parser.parse_expression().expect("expected an expression")
    }

    /// Fully parenthesized rendering, to make tree shape visible
    fn shape(node: &AstNode) -> String {
        match node {
            AstNode::BinaryExpression {
                op, left, right, ..
            } => format!("({} {} {})", shape(left), op.symbol(), shape(right)),
            AstNode::UnaryExpression { op, operand, .. } => {
                format!("{}{}", op.symbol(), shape(operand))
            }
            AstNode::Literal { value, .. } => value.clone(),
            AstNode::Identifier { name, .. } => name.clone(),
            AstNode::FunctionCall { name, args, .. } => format!(
                "{}({})",
                name,
                args.iter().map(shape).collect::<Vec<_>>().join(", ")
            ),
            other => panic!("Unexpected node in expression: {:?}", other),
        }
    }

    #[test]
    fn test_multiplicative_binds_tighter() {
        assert_eq!(shape(&expr("1 + 2 * 3")), "(1 + (2 * 3))");
        assert_eq!(shape(&expr("a * b - c % d")), "((a * b) - (c % d))");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(shape(&expr("a - b - c")), "((a - b) - c)");
        assert_eq!(shape(&expr("a / b * c")), "((a / b) * c)");
    }

    #[test]
    fn test_logical_and_comparison_levels() {
        assert_eq!(
            shape(&expr("a < b && c != d || e")),
            "(((a < b) && (c != d)) || e)"
        );
        assert_eq!(shape(&expr("a == b < c")), "(a == (b < c))");
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(shape(&expr("(a + b) * c")), "((a + b) * c)");
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(shape(&expr("&x")), "&x");
        assert_eq!(shape(&expr("-a * b")), "(-a * b)");
        assert_eq!(shape(&expr("!(a && b)")), "!(a && b)");
    }

    #[test]
    fn test_calls_and_literals() {
        assert_eq!(shape(&expr("max(a, 2.5) + f()")), "(max(a, 2.5) + f())");
        match expr("\"hi\"") {
            AstNode::Literal { kind, value, .. } => {
                assert_eq!(kind, LiteralKind::String);
                assert_eq!(value, "hi");
            }
            other => panic!("Expected literal, got {:?}", other),
        }
        assert!(matches!(expr("3.0"), AstNode::Literal { kind: LiteralKind::Float, .. }));
        assert!(matches!(expr("3"), AstNode::Literal { kind: LiteralKind::Int, .. }));
    }

    #[test]
    fn test_dangling_operator_keeps_left_operand() {
        let mut parser = Parser::new(tokenize("a + ;"));
        let node = parser.parse_expression().expect("left operand survives");
        assert_eq!(shape(&node), "a");
        assert_eq!(parser.diagnostics().len(), 1);
    }

    #[test]
    fn test_no_operand_consumes_nothing() {
        let mut parser = Parser::new(tokenize(") x"));
        assert!(parser.parse_expression().is_none());
        assert_eq!(parser.position, 0);
    }
}
