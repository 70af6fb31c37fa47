//! Code generation: render a parsed `Program` in one of two target dialects
//!
//! - [`Dialect::Java`]: typed-block output, one `public class Main`
//! - [`Dialect::Python`]: indentation-scoped output, no type annotations
//!
//! Generation never fails. Constructs with no target equivalent degrade to a
//! documented substitute: address-of is elided, unrecognized I/O markers use
//! the integer primitive, and `for` loops that are not simple counting loops
//! become a placeholder comment in Python. The only explicit diagnostic is a
//! root that is not a `Program` node.
//!
//! Expressions are rendered by the shared [`render_expression`] walker; each
//! generator supplies its operator spelling through [`ExprSyntax`].

pub mod format;
mod java;
mod python;
mod types;

use std::fmt;
use std::str::FromStr;

use crate::parser::ast::{AstNode, BinOp, LiteralKind, UnOp};

pub use java::JavaGenerator;
pub use python::PythonGenerator;

/// Target output syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Typed-block dialect: explicit braces and type annotations
    #[default]
    Java,
    /// Indentation-scoped dialect
    Python,
}

impl Dialect {
    /// The other dialect
    pub fn toggle(self) -> Self {
        match self {
            Dialect::Java => Dialect::Python,
            Dialect::Python => Dialect::Java,
        }
    }

    /// Line comment prefix in this dialect
    pub fn comment_prefix(self) -> &'static str {
        match self {
            Dialect::Java => "//",
            Dialect::Python => "#",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Java => write!(f, "Java"),
            Dialect::Python => write!(f, "Python"),
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "java" | "typed" => Ok(Dialect::Java),
            "python" | "py" | "indented" => Ok(Dialect::Python),
            other => Err(format!("Unknown dialect '{}'", other)),
        }
    }
}

/// Render `root` in `dialect`.
///
/// A root that is not a `Program` yields a single diagnostic comment line.
pub fn generate(root: &AstNode, dialect: Dialect) -> String {
    let AstNode::Program { body } = root else {
        return format!(
            "{} Error: expected a Program node at the AST root\n",
            dialect.comment_prefix()
        );
    };

    match dialect {
        Dialect::Java => JavaGenerator::new().generate(body),
        Dialect::Python => PythonGenerator::new().generate(body),
    }
}

/// Indentation-aware line buffer shared by both generators
pub(crate) struct CodeWriter {
    out: String,
    depth: usize,
}

impl CodeWriter {
    const INDENT: &'static str = "    ";

    pub(crate) fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.out.push_str(Self::INDENT);
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    /// Ensure exactly `count` blank lines precede the next line. No-op at the
    /// start of the output.
    pub(crate) fn blank_lines(&mut self, count: usize) {
        if self.out.is_empty() {
            return;
        }
        while self.out.ends_with("\n\n") {
            self.out.pop();
        }
        for _ in 0..count {
            self.out.push('\n');
        }
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Byte length written so far, to detect whether a region emitted anything
    pub(crate) fn len(&self) -> usize {
        self.out.len()
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

/// Dialect-specific spelling used by [`render_expression`]
pub(crate) trait ExprSyntax {
    fn binary_symbol(&self, op: BinOp) -> &'static str;

    /// Prefix rendered for logical not, including any trailing space
    fn not_prefix(&self) -> &'static str;

    /// Whether `child`, an operand of `parent`, must be parenthesized
    fn needs_parens(&self, parent: BinOp, child: &AstNode, right_side: bool) -> bool {
        binds_looser(parent, child, right_side)
    }

    /// Spelling of a string literal with raw text `raw`
    fn quote_string(&self, raw: &str) -> String {
        quote(raw)
    }
}

/// C precedence rule: a looser child always needs parentheses, an equally
/// loose child only on the right (all operators are left-associative).
pub(crate) fn binds_looser(parent: BinOp, child: &AstNode, right_side: bool) -> bool {
    match child {
        AstNode::BinaryExpression { op, .. } => {
            op.precedence() < parent.precedence()
                || (right_side && op.precedence() == parent.precedence())
        }
        _ => false,
    }
}

/// Render an expression tree as target source text
pub(crate) fn render_expression(node: &AstNode, syntax: &dyn ExprSyntax) -> String {
    match node {
        AstNode::Literal { value, kind, .. } => match kind {
            LiteralKind::Int | LiteralKind::Float => value.clone(),
            LiteralKind::String => syntax.quote_string(value),
        },
        AstNode::Identifier { name, .. } => name.clone(),
        AstNode::FunctionCall { name, args, .. } => {
            format!("{}({})", name, render_arguments(args, syntax))
        }
        AstNode::BinaryExpression {
            op, left, right, ..
        } => {
            let left_text = binary_operand(*op, left, false, syntax);
            let right_text = binary_operand(*op, right, true, syntax);
            format!("{} {} {}", left_text, syntax.binary_symbol(*op), right_text)
        }
        AstNode::UnaryExpression { op, operand, .. } => {
            let inner = render_expression(operand, syntax);
            let wrapped = match (op, operand.as_ref()) {
                (UnOp::AddrOf, _) => return inner,
                (_, AstNode::BinaryExpression { .. }) => format!("({})", inner),
                (
                    UnOp::Neg,
                    AstNode::UnaryExpression {
                        op: UnOp::Neg | UnOp::Not,
                        ..
                    },
                ) => format!("({})", inner),
                _ => inner,
            };
            match op {
                UnOp::Not => format!("{}{}", syntax.not_prefix(), wrapped),
                _ => format!("{}{}", op.symbol(), wrapped),
            }
        }
        // Statement nodes never sit in expression position
        AstNode::Program { .. }
        | AstNode::Include { .. }
        | AstNode::Function { .. }
        | AstNode::Variable { .. }
        | AstNode::Assignment { .. }
        | AstNode::IfStatement { .. }
        | AstNode::WhileLoop { .. }
        | AstNode::ForLoop { .. }
        | AstNode::ReturnStatement { .. }
        | AstNode::PrintfStatement { .. }
        | AstNode::ScanfStatement { .. }
        | AstNode::Block { .. } => String::new(),
    }
}

/// Comma-separated argument list
pub(crate) fn render_arguments(args: &[AstNode], syntax: &dyn ExprSyntax) -> String {
    args.iter()
        .map(|arg| render_expression(arg, syntax))
        .collect::<Vec<_>>()
        .join(", ")
}

fn binary_operand(parent: BinOp, child: &AstNode, right_side: bool, syntax: &dyn ExprSyntax) -> String {
    let text = render_expression(child, syntax);
    if syntax.needs_parens(parent, child, right_side) {
        format!("({})", text)
    } else {
        text
    }
}

/// Wrap raw literal text in double quotes
pub(crate) fn quote(raw: &str) -> String {
    format!("\"{}\"", escape_quotes(raw))
}

/// Escape bare `"` characters. Existing escape sequences pass through
/// unchanged.
pub(crate) fn escape_quotes(raw: &str) -> String {
    escape_delimiter(raw, '"')
}

/// Escape bare occurrences of `delimiter`, leaving escape sequences intact
pub(crate) fn escape_delimiter(raw: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                out.push('\\');
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// String-literal text of `node`, if it is one
pub(crate) fn string_literal(node: &AstNode) -> Option<&str> {
    match node {
        AstNode::Literal {
            value,
            kind: LiteralKind::String,
            ..
        } => Some(value),
        _ => None,
    }
}
