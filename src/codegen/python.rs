//! Indentation-scoped dialect (Python)
//!
//! Structure is carried by indentation alone; declared types only select a
//! default value. A block that would otherwise be empty renders `pass`.
//!
//! # For loops
//!
//! A C `for` loop is approximated as `for v in range(start, stop[, step])`,
//! which only covers counting loops:
//!
//! - the initializer assigns a value to `v`,
//! - the condition compares `v` against a bound (`<` / `<=` when counting up,
//!   `>` / `>=` when counting down),
//! - the update is `v++`, `v--`, `v += k` or `v -= k` with a literal `k`.
//!
//! Any other shape renders a placeholder comment followed by `pass`.

use rustc_hash::FxHashSet;

use crate::codegen::format::{self, Conversion, Marker, Segment};
use crate::codegen::types::TypeTable;
use crate::codegen::{
    binds_looser, escape_delimiter, escape_quotes, quote, render_expression, string_literal,
    CodeWriter, ExprSyntax,
};
use crate::parser::ast::*;

const UNSUPPORTED_FOR: &str = "# unsupported for-loop: cannot be expressed as range()";

/// Python source generator
pub struct PythonGenerator {
    defaults: TypeTable,
    writer: CodeWriter,
    /// Names declared at module level
    globals: FxHashSet<String>,
}

impl Default for PythonGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprSyntax for PythonGenerator {
    fn binary_symbol(&self, op: BinOp) -> &'static str {
        match op {
            BinOp::And => "and",
            BinOp::Or => "or",
            other => other.symbol(),
        }
    }

    fn not_prefix(&self) -> &'static str {
        "not "
    }

    /// Python chains comparisons and binds `not` below them, so both need
    /// explicit grouping where C would not.
    fn needs_parens(&self, parent: BinOp, child: &AstNode, right_side: bool) -> bool {
        if binds_looser(parent, child, right_side) {
            return true;
        }
        match child {
            AstNode::BinaryExpression { op, .. } => is_comparison(parent) && is_comparison(*op),
            AstNode::UnaryExpression { op: UnOp::Not, .. } => {
                !matches!(parent, BinOp::And | BinOp::Or)
            }
            _ => false,
        }
    }
}

impl PythonGenerator {
    pub fn new() -> Self {
        Self {
            defaults: TypeTable::python_defaults(),
            writer: CodeWriter::new(),
            globals: FxHashSet::default(),
        }
    }

    /// Render the body of a `Program` node
    pub fn generate(mut self, program: &[AstNode]) -> String {
        self.globals = program
            .iter()
            .filter_map(|node| match node {
                AstNode::Variable { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect();

        let mut has_main = false;
        let mut after_function = false;

        for node in program {
            match node {
                AstNode::Include { .. } | AstNode::Function { is_prototype: true, .. } => {}
                AstNode::Function {
                    name, params, body, ..
                } => {
                    self.writer.blank_lines(2);
                    self.function(name, params, body);
                    has_main |= name == "main";
                    after_function = true;
                }
                other => {
                    if after_function {
                        self.writer.blank_lines(2);
                        after_function = false;
                    }
                    self.statement(other);
                }
            }
        }

        if has_main {
            self.writer.blank_lines(2);
            self.writer.line("if __name__ == \"__main__\":");
            self.writer.indent();
            self.writer.line("main()");
            self.writer.dedent();
        }

        self.writer.finish()
    }

    fn function(&mut self, name: &str, params: &[Param], body: &[AstNode]) {
        let names = params
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.writer.line(format!("def {}({}):", name, names));
        self.writer.indent();

        let globals = self.assigned_globals(params, body);
        if !globals.is_empty() {
            self.writer.line(format!("global {}", globals.join(", ")));
        }

        let start = self.writer.len();
        self.statements(body);
        if self.writer.len() == start {
            self.writer.line("pass");
        }
        self.writer.dedent();
    }

    /// Module-level names assigned inside a function body that the body
    /// does not declare itself, in first-assignment order
    fn assigned_globals(&self, params: &[Param], body: &[AstNode]) -> Vec<String> {
        let mut locals: FxHashSet<&str> = params.iter().map(|p| p.name.as_str()).collect();
        let mut assigned: Vec<&str> = Vec::new();
        for node in body {
            collect_assignments(node, &mut locals, &mut assigned);
        }

        let mut seen = FxHashSet::default();
        assigned
            .into_iter()
            .filter(|name| self.globals.contains(*name) && !locals.contains(name))
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }

    fn statements(&mut self, nodes: &[AstNode]) {
        for node in nodes {
            self.statement(node);
        }
    }

    /// Indented body of a compound statement, `pass` if it renders nothing
    fn branch(&mut self, node: &AstNode) {
        self.writer.indent();
        let start = self.writer.len();
        match node {
            AstNode::Block { body, .. } => self.statements(body),
            other => self.statement(other),
        }
        if self.writer.len() == start {
            self.writer.line("pass");
        }
        self.writer.dedent();
    }

    fn statement(&mut self, node: &AstNode) {
        match node {
            // Python blocks do not scope names, so nested blocks flatten
            AstNode::Program { body } | AstNode::Block { body, .. } => self.statements(body),
            AstNode::Include { .. } => {}
            AstNode::Function {
                name,
                params,
                body,
                is_prototype,
                ..
            } => {
                if !is_prototype {
                    self.function(name, params, body);
                }
            }
            AstNode::Variable {
                name,
                var_type,
                init,
                ..
            } => {
                let value = match init {
                    Some(init) => self.expr(init),
                    None => self.defaults.get(var_type).to_string(),
                };
                self.writer.line(format!("{} = {}", name, value));
            }
            AstNode::Assignment {
                target, op, value, ..
            } => {
                let line = match op {
                    AssignOp::Increment => format!("{} += 1", target),
                    AssignOp::Decrement => format!("{} -= 1", target),
                    _ => {
                        let value = value.as_deref().map(|v| self.expr(v)).unwrap_or_default();
                        format!("{} {} {}", target, op.symbol(), value)
                    }
                };
                self.writer.line(line);
            }
            AstNode::IfStatement {
                condition,
                then_branch,
                else_branch,
                ..
            } => self.if_statement(condition, then_branch, else_branch.as_deref()),
            AstNode::WhileLoop {
                condition, body, ..
            } => {
                self.writer
                    .line(format!("while {}:", self.expr(condition)));
                self.branch(body);
            }
            AstNode::ForLoop {
                init,
                condition,
                update,
                body,
                ..
            } => match self.range_loop(init.as_deref(), condition.as_deref(), update.as_deref()) {
                Some((var, args)) => {
                    self.writer.line(format!("for {} in range({}):", var, args));
                    self.branch(body);
                }
                None => {
                    self.writer.line(UNSUPPORTED_FOR);
                    self.writer.line("pass");
                }
            },
            AstNode::ReturnStatement { value, .. } => match value {
                Some(value) => self.writer.line(format!("return {}", self.expr(value))),
                None => self.writer.line("return"),
            },
            AstNode::PrintfStatement { args, .. } => self.printf(args),
            AstNode::ScanfStatement { args, .. } => self.scanf(args),
            AstNode::FunctionCall { .. }
            | AstNode::BinaryExpression { .. }
            | AstNode::UnaryExpression { .. }
            | AstNode::Literal { .. }
            | AstNode::Identifier { .. } => {
                self.writer.line(self.expr(node));
            }
        }
    }

    fn if_statement(
        &mut self,
        condition: &AstNode,
        then_branch: &AstNode,
        else_branch: Option<&AstNode>,
    ) {
        self.writer.line(format!("if {}:", self.expr(condition)));
        self.branch(then_branch);

        let mut next = else_branch;
        while let Some(node) = next {
            match node {
                AstNode::IfStatement {
                    condition,
                    then_branch,
                    else_branch,
                    ..
                } => {
                    self.writer.line(format!("elif {}:", self.expr(condition)));
                    self.branch(then_branch);
                    next = else_branch.as_deref();
                }
                other => {
                    self.writer.line("else:");
                    self.branch(other);
                    next = None;
                }
            }
        }
    }

    /// Loop variable and `range()` arguments, if the loop is a counting loop
    fn range_loop(
        &self,
        init: Option<&AstNode>,
        condition: Option<&AstNode>,
        update: Option<&AstNode>,
    ) -> Option<(String, String)> {
        let (var, start) = match init? {
            AstNode::Variable {
                name,
                init: Some(value),
                ..
            } => (name, value),
            AstNode::Assignment {
                target,
                op: AssignOp::Assign,
                value: Some(value),
                ..
            } => (target, value),
            _ => return None,
        };

        let AstNode::BinaryExpression {
            op,
            left,
            right: bound,
            ..
        } = condition?
        else {
            return None;
        };
        if !matches!(left.as_ref(), AstNode::Identifier { name, .. } if name == var) {
            return None;
        }

        let step = loop_step(var, update?)?;
        let stop = match (op, step > 0) {
            (BinOp::Lt, true) | (BinOp::Gt, false) => self.expr(bound),
            (BinOp::Le, true) => self.offset_bound(bound, 1),
            (BinOp::Ge, false) => self.offset_bound(bound, -1),
            _ => return None,
        };

        let start = self.expr(start);
        let args = if step == 1 {
            format!("{}, {}", start, stop)
        } else {
            format!("{}, {}, {}", start, stop, step)
        };
        Some((var.clone(), args))
    }

    /// `bound ± 1`, folded when the bound is an integer literal
    fn offset_bound(&self, bound: &AstNode, delta: i64) -> String {
        if let Some(folded) = int_literal(bound).and_then(|value| value.checked_add(delta)) {
            return folded.to_string();
        }
        let mut text = self.expr(bound);
        if self.needs_parens(BinOp::Add, bound, false) {
            text = format!("({})", text);
        }
        let sign = if delta > 0 { '+' } else { '-' };
        format!("{} {} {}", text, sign, delta.abs())
    }

    fn printf(&mut self, args: &[AstNode]) {
        let Some((first, rest)) = args.split_first() else {
            return;
        };

        let Some(text) = string_literal(first) else {
            self.writer
                .line(format!("print({}, end=\"\")", self.expr(first)));
            return;
        };

        if rest.is_empty() {
            let text = format::plain_text(text);
            match text.strip_suffix("\\n") {
                Some(line) => self.writer.line(format!("print({})", quote(line))),
                None => self
                    .writer
                    .line(format!("print({}, end=\"\")", quote(&text))),
            }
        } else {
            let template = self.f_string(text, rest);
            self.writer.line(format!("print({}, end=\"\")", template));
        }
    }

    /// Build an f-string with markers replaced positionally by arguments.
    /// String-literal arguments are inlined as text.
    fn f_string(&self, format_text: &str, args: &[AstNode]) -> String {
        let mut body = String::new();
        let mut args = args.iter();

        for segment in format::parse_format(format_text) {
            match segment {
                Segment::Text(text) => body.push_str(&escape_braces(&escape_quotes(&text))),
                Segment::Percent => body.push('%'),
                Segment::Marker(marker) => match args.next() {
                    Some(arg) => match string_literal(arg) {
                        Some(text) => body.push_str(&escape_braces(&escape_quotes(text))),
                        None => {
                            let expr = render_expression(arg, &PlaceholderSyntax(self));
                            body.push_str(&placeholder(&expr, &marker));
                        }
                    },
                    None => body.push_str(&marker.raw),
                },
            }
        }

        format!("f\"{}\"", body)
    }

    /// One read statement per target, typed by the matching marker
    fn scanf(&mut self, args: &[AstNode]) {
        let (conversions, targets) = match args.split_first() {
            Some((first, rest)) => match string_literal(first) {
                Some(text) => (format::conversions(text), rest),
                None => (Vec::new(), args),
            },
            None => (Vec::new(), args),
        };

        if targets.is_empty() {
            self.writer.line("input()");
            return;
        }

        for (i, target) in targets.iter().enumerate() {
            let read = match conversions.get(i).copied().unwrap_or(Conversion::Integer) {
                Conversion::Integer => "int(input())",
                Conversion::Float => "float(input())",
                Conversion::String => "input()",
                Conversion::Char => "input()[0]",
            };
            self.writer
                .line(format!("{} = {}", self.expr(target), read));
        }
    }

    fn expr(&self, node: &AstNode) -> String {
        render_expression(node, self)
    }
}

/// Expression spelling inside an f-string placeholder. A `"` there would
/// close the enclosing f-string on Python before 3.12, so nested string
/// literals use single quotes.
struct PlaceholderSyntax<'a>(&'a PythonGenerator);

impl ExprSyntax for PlaceholderSyntax<'_> {
    fn binary_symbol(&self, op: BinOp) -> &'static str {
        self.0.binary_symbol(op)
    }

    fn not_prefix(&self) -> &'static str {
        self.0.not_prefix()
    }

    fn needs_parens(&self, parent: BinOp, child: &AstNode, right_side: bool) -> bool {
        self.0.needs_parens(parent, child, right_side)
    }

    fn quote_string(&self, raw: &str) -> String {
        format!("'{}'", escape_delimiter(raw, '\''))
    }
}

fn is_comparison(op: BinOp) -> bool {
    matches!(
        op,
        BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge
    )
}

fn int_literal(node: &AstNode) -> Option<i64> {
    match node {
        AstNode::Literal {
            value,
            kind: LiteralKind::Int,
            ..
        } => value.parse().ok(),
        _ => None,
    }
}

/// Signed step of a counting-loop update on `var`
fn loop_step(var: &str, update: &AstNode) -> Option<i64> {
    let AstNode::Assignment {
        target, op, value, ..
    } = update
    else {
        return None;
    };
    if target != var {
        return None;
    }

    let literal_step = || value.as_deref().and_then(int_literal).filter(|k| *k > 0);
    match op {
        AssignOp::Increment => Some(1),
        AssignOp::Decrement => Some(-1),
        AssignOp::AddAssign => literal_step(),
        AssignOp::SubAssign => literal_step().map(|k| -k),
        _ => None,
    }
}

/// Names a statement assigns to, and names it declares locally
fn collect_assignments<'a>(
    node: &'a AstNode,
    locals: &mut FxHashSet<&'a str>,
    assigned: &mut Vec<&'a str>,
) {
    match node {
        AstNode::Variable { name, .. } => {
            locals.insert(name);
        }
        AstNode::Assignment { target, .. } => assigned.push(target),
        AstNode::ScanfStatement { args, .. } => {
            assigned.extend(args.iter().filter_map(scanf_target));
        }
        // Nested functions get their own scope
        AstNode::Function { .. } => {}
        _ => {
            for (_, child) in node.children() {
                collect_assignments(child, locals, assigned);
            }
        }
    }
}

fn scanf_target(node: &AstNode) -> Option<&str> {
    match node {
        AstNode::Identifier { name, .. } => Some(name),
        AstNode::UnaryExpression { operand, .. } => scanf_target(operand),
        _ => None,
    }
}

fn escape_braces(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

/// f-string replacement field for one marker
fn placeholder(expr: &str, marker: &Marker) -> String {
    match (marker.conversion, marker.precision) {
        (Some(Conversion::Float), Some(precision)) => {
            let letter = match marker.letter.to_ascii_lowercase() {
                'e' => 'e',
                'g' => 'g',
                _ => 'f',
            };
            format!("{{{}:.{}{}}}", expr, precision, letter)
        }
        _ => format!("{{{}}}", expr),
    }
}
