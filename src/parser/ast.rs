// AST (Abstract Syntax Tree) definitions for the C subset

use std::fmt::Write as _;

/// Source location information for diagnostics and the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Binary operators, ordered here from loosest to tightest binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Logical
    Or,
    And,
    // Equality
    Eq,
    Ne,
    // Relational
    Lt,
    Gt,
    Le,
    Ge,
    // Additive
    Add,
    Sub,
    // Multiplicative
    Mul,
    Div,
    Mod,
}

impl BinOp {
    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Or => 1,
            BinOp::And => 2,
            BinOp::Eq | BinOp::Ne => 3,
            BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => 4,
            BinOp::Add | BinOp::Sub => 5,
            BinOp::Mul | BinOp::Div | BinOp::Mod => 6,
        }
    }

    /// C spelling of the operator
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Or => "||",
            BinOp::And => "&&",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "||" => BinOp::Or,
            "&&" => BinOp::And,
            "==" => BinOp::Eq,
            "!=" => BinOp::Ne,
            "<" => BinOp::Lt,
            ">" => BinOp::Gt,
            "<=" => BinOp::Le,
            ">=" => BinOp::Ge,
            "+" => BinOp::Add,
            "-" => BinOp::Sub,
            "*" => BinOp::Mul,
            "/" => BinOp::Div,
            "%" => BinOp::Mod,
            _ => return None,
        };
        Some(op)
    }
}

/// Unary (prefix) operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,    // -x
    Not,    // !x
    AddrOf, // &x, elided by both generators
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
            UnOp::AddrOf => "&",
        }
    }
}

/// Assignment-like statement operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,    // =
    AddAssign, // +=
    SubAssign, // -=
    MulAssign, // *=
    DivAssign, // /=
    ModAssign, // %=
    Increment, // ++
    Decrement, // --
}

impl AssignOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::ModAssign => "%=",
            AssignOp::Increment => "++",
            AssignOp::Decrement => "--",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "=" => AssignOp::Assign,
            "+=" => AssignOp::AddAssign,
            "-=" => AssignOp::SubAssign,
            "*=" => AssignOp::MulAssign,
            "/=" => AssignOp::DivAssign,
            "%=" => AssignOp::ModAssign,
            "++" => AssignOp::Increment,
            "--" => AssignOp::Decrement,
            _ => return None,
        };
        Some(op)
    }

    /// `++` and `--` carry no right-hand side
    pub fn is_step(self) -> bool {
        matches!(self, AssignOp::Increment | AssignOp::Decrement)
    }
}

/// Literal sub-kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Float,
    String,
}

/// Function parameter: declared C type keyword plus name
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub param_type: String,
}

/// AST nodes representing statements and expressions.
///
/// The set of variants is closed; every generator site matches it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Program {
        body: Vec<AstNode>,
    },
    Include {
        library: String,
        location: SourceLocation,
    },
    Function {
        name: String,
        return_type: String,
        params: Vec<Param>,
        body: Vec<AstNode>,
        /// Header with no following block (`int f(int x);`)
        is_prototype: bool,
        location: SourceLocation,
    },
    Variable {
        name: String,
        var_type: String,
        init: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    Assignment {
        target: String,
        op: AssignOp,
        /// `None` only for `++` / `--`
        value: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    IfStatement {
        condition: Box<AstNode>,
        then_branch: Box<AstNode>,
        else_branch: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    WhileLoop {
        condition: Box<AstNode>,
        body: Box<AstNode>,
        location: SourceLocation,
    },
    ForLoop {
        init: Option<Box<AstNode>>,
        condition: Option<Box<AstNode>>,
        update: Option<Box<AstNode>>,
        body: Box<AstNode>,
        location: SourceLocation,
    },
    ReturnStatement {
        value: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    PrintfStatement {
        args: Vec<AstNode>,
        location: SourceLocation,
    },
    ScanfStatement {
        args: Vec<AstNode>,
        location: SourceLocation,
    },
    FunctionCall {
        name: String,
        args: Vec<AstNode>,
        location: SourceLocation,
    },
    Block {
        body: Vec<AstNode>,
        location: SourceLocation,
    },
    BinaryExpression {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        location: SourceLocation,
    },
    UnaryExpression {
        op: UnOp,
        operand: Box<AstNode>,
        location: SourceLocation,
    },
    Literal {
        value: String,
        kind: LiteralKind,
        location: SourceLocation,
    },
    Identifier {
        name: String,
        location: SourceLocation,
    },
}

impl AstNode {
    /// Get the source location of this node (`Program` sits at 1:1)
    pub fn location(&self) -> SourceLocation {
        match self {
            AstNode::Program { .. } => SourceLocation::new(1, 1),
            AstNode::Include { location, .. }
            | AstNode::Function { location, .. }
            | AstNode::Variable { location, .. }
            | AstNode::Assignment { location, .. }
            | AstNode::IfStatement { location, .. }
            | AstNode::WhileLoop { location, .. }
            | AstNode::ForLoop { location, .. }
            | AstNode::ReturnStatement { location, .. }
            | AstNode::PrintfStatement { location, .. }
            | AstNode::ScanfStatement { location, .. }
            | AstNode::FunctionCall { location, .. }
            | AstNode::Block { location, .. }
            | AstNode::BinaryExpression { location, .. }
            | AstNode::UnaryExpression { location, .. }
            | AstNode::Literal { location, .. }
            | AstNode::Identifier { location, .. } => *location,
        }
    }

    /// Tag name of the variant, as shown by the AST viewer
    pub fn kind_name(&self) -> &'static str {
        match self {
            AstNode::Program { .. } => "Program",
            AstNode::Include { .. } => "Include",
            AstNode::Function { .. } => "Function",
            AstNode::Variable { .. } => "Variable",
            AstNode::Assignment { .. } => "Assignment",
            AstNode::IfStatement { .. } => "IfStatement",
            AstNode::WhileLoop { .. } => "WhileLoop",
            AstNode::ForLoop { .. } => "ForLoop",
            AstNode::ReturnStatement { .. } => "ReturnStatement",
            AstNode::PrintfStatement { .. } => "PrintfStatement",
            AstNode::ScanfStatement { .. } => "ScanfStatement",
            AstNode::FunctionCall { .. } => "FunctionCall",
            AstNode::Block { .. } => "Block",
            AstNode::BinaryExpression { .. } => "BinaryExpression",
            AstNode::UnaryExpression { .. } => "UnaryExpression",
            AstNode::Literal { .. } => "Literal",
            AstNode::Identifier { .. } => "Identifier",
        }
    }

    /// Short one-line summary of the node's own fields (no children)
    pub fn label(&self) -> String {
        match self {
            AstNode::Program { body } => format!("Program ({} items)", body.len()),
            AstNode::Include { library, .. } => format!("Include <{}>", library),
            AstNode::Function {
                name,
                return_type,
                params,
                is_prototype,
                ..
            } => {
                let params = params
                    .iter()
                    .map(|p| format!("{} {}", p.param_type, p.name))
                    .collect::<Vec<_>>()
                    .join(", ");
                let suffix = if *is_prototype { " [prototype]" } else { "" };
                format!("Function {} {}({}){}", return_type, name, params, suffix)
            }
            AstNode::Variable { name, var_type, .. } => {
                format!("Variable {} {}", var_type, name)
            }
            AstNode::Assignment { target, op, .. } => {
                format!("Assignment {} {}", target, op.symbol())
            }
            AstNode::IfStatement { .. } => "IfStatement".to_string(),
            AstNode::WhileLoop { .. } => "WhileLoop".to_string(),
            AstNode::ForLoop { .. } => "ForLoop".to_string(),
            AstNode::ReturnStatement { .. } => "ReturnStatement".to_string(),
            AstNode::PrintfStatement { args, .. } => {
                format!("PrintfStatement ({} args)", args.len())
            }
            AstNode::ScanfStatement { args, .. } => {
                format!("ScanfStatement ({} args)", args.len())
            }
            AstNode::FunctionCall { name, args, .. } => {
                format!("FunctionCall {} ({} args)", name, args.len())
            }
            AstNode::Block { body, .. } => format!("Block ({} items)", body.len()),
            AstNode::BinaryExpression { op, .. } => {
                format!("BinaryExpression {}", op.symbol())
            }
            AstNode::UnaryExpression { op, .. } => {
                format!("UnaryExpression {}", op.symbol())
            }
            AstNode::Literal { value, kind, .. } => match kind {
                LiteralKind::String => format!("Literal string \"{}\"", value),
                LiteralKind::Int => format!("Literal int {}", value),
                LiteralKind::Float => format!("Literal float {}", value),
            },
            AstNode::Identifier { name, .. } => format!("Identifier {}", name),
        }
    }

    /// Child nodes in source order, each with an optional role name
    pub fn children(&self) -> Vec<(Option<&'static str>, &AstNode)> {
        fn opt<'a>(
            role: &'static str,
            node: &'a Option<Box<AstNode>>,
        ) -> Option<(Option<&'static str>, &'a AstNode)> {
            node.as_deref().map(|n| (Some(role), n))
        }

        match self {
            AstNode::Program { body }
            | AstNode::Function { body, .. }
            | AstNode::Block { body, .. } => body.iter().map(|n| (None, n)).collect(),
            AstNode::PrintfStatement { args, .. }
            | AstNode::ScanfStatement { args, .. }
            | AstNode::FunctionCall { args, .. } => args.iter().map(|n| (None, n)).collect(),
            AstNode::Variable { init, .. } => opt("init", init).into_iter().collect(),
            AstNode::Assignment { value, .. } => opt("value", value).into_iter().collect(),
            AstNode::ReturnStatement { value, .. } => {
                opt("value", value).into_iter().collect()
            }
            AstNode::IfStatement {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                let mut out = vec![
                    (Some("condition"), condition.as_ref()),
                    (Some("then"), then_branch.as_ref()),
                ];
                out.extend(opt("else", else_branch));
                out
            }
            AstNode::WhileLoop {
                condition, body, ..
            } => vec![
                (Some("condition"), condition.as_ref()),
                (Some("body"), body.as_ref()),
            ],
            AstNode::ForLoop {
                init,
                condition,
                update,
                body,
                ..
            } => {
                let mut out: Vec<_> = [opt("init", init), opt("condition", condition), opt("update", update)]
                    .into_iter()
                    .flatten()
                    .collect();
                out.push((Some("body"), body.as_ref()));
                out
            }
            AstNode::BinaryExpression { left, right, .. } => vec![
                (Some("left"), left.as_ref()),
                (Some("right"), right.as_ref()),
            ],
            AstNode::UnaryExpression { operand, .. } => vec![(None, operand.as_ref())],
            AstNode::Include { .. } | AstNode::Literal { .. } | AstNode::Identifier { .. } => {
                Vec::new()
            }
        }
    }
}

/// Indented outline of the tree: one line per node, two spaces per depth.
pub fn outline(root: &AstNode) -> String {
    fn walk(node: &AstNode, role: Option<&str>, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        match role {
            Some(role) => {
                let _ = writeln!(out, "{}{}: {}", indent, role, node.label());
            }
            None => {
                let _ = writeln!(out, "{}{}", indent, node.label());
            }
        }
        for (child_role, child) in node.children() {
            walk(child, child_role, depth + 1, out);
        }
    }

    let mut out = String::new();
    walk(root, None, 0, &mut out);
    out
}
