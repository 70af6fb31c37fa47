//! Typed-block dialect (Java)
//!
//! The whole program becomes one `public class Main`. Globals are `static`
//! fields, functions are `public static` methods and loose top-level
//! statements run from a `static { }` initializer. `main` owns the
//! `Scanner` used by every `scanf` translation.

use crate::codegen::format::{self, Conversion, Marker, Segment};
use crate::codegen::types::TypeTable;
use crate::codegen::{
    quote, render_expression, string_literal, CodeWriter, ExprSyntax,
};
use crate::parser::ast::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Member {
    Field,
    Method,
    Initializer,
}

/// Java source generator
pub struct JavaGenerator {
    types: TypeTable,
    defaults: TypeTable,
    writer: CodeWriter,
    in_main: bool,
    last_member: Option<Member>,
}

impl Default for JavaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprSyntax for JavaGenerator {
    fn binary_symbol(&self, op: BinOp) -> &'static str {
        op.symbol()
    }

    fn not_prefix(&self) -> &'static str {
        "!"
    }
}

impl JavaGenerator {
    pub fn new() -> Self {
        Self {
            types: TypeTable::java_types(),
            defaults: TypeTable::java_defaults(),
            writer: CodeWriter::new(),
            in_main: false,
            last_member: None,
        }
    }

    /// Render the body of a `Program` node
    pub fn generate(mut self, program: &[AstNode]) -> String {
        if program.iter().any(is_main) {
            self.writer.line("import java.util.Scanner;");
            self.writer.blank_lines(1);
        }

        self.writer.line("public class Main {");
        self.writer.indent();

        let mut loose: Vec<&AstNode> = Vec::new();
        for node in program {
            match node {
                AstNode::Include { .. } | AstNode::Function { is_prototype: true, .. } => {}
                AstNode::Function {
                    name,
                    return_type,
                    params,
                    body,
                    ..
                } => {
                    self.static_initializer(&mut loose);
                    self.begin_member(Member::Method);
                    self.method(name, return_type, params, body);
                }
                AstNode::Variable {
                    name,
                    var_type,
                    init,
                    ..
                } => {
                    self.static_initializer(&mut loose);
                    self.begin_member(Member::Field);
                    let field = self.declaration(var_type, name, init.as_deref());
                    self.writer.line(format!("static {};", field));
                }
                other => loose.push(other),
            }
        }
        self.static_initializer(&mut loose);

        self.writer.dedent();
        self.writer.line("}");
        self.writer.finish()
    }

    /// Fields stay grouped; every other member is separated by a blank line
    fn begin_member(&mut self, member: Member) {
        let grouped = member == Member::Field && self.last_member == Some(Member::Field);
        if self.last_member.is_some() && !grouped {
            self.writer.blank_lines(1);
        }
        self.last_member = Some(member);
    }

    /// Emit pending top-level statements as one `static { }` block
    fn static_initializer(&mut self, loose: &mut Vec<&AstNode>) {
        if loose.is_empty() {
            return;
        }
        self.begin_member(Member::Initializer);
        self.writer.line("static {");
        self.writer.indent();
        for node in loose.drain(..) {
            self.statement(node);
        }
        self.writer.dedent();
        self.writer.line("}");
    }

    fn method(&mut self, name: &str, return_type: &str, params: &[Param], body: &[AstNode]) {
        if name == "main" {
            self.writer
                .line("public static void main(String[] args) {");
            self.writer.indent();
            self.writer
                .line("Scanner scanner = new Scanner(System.in);");

            // A final return is covered by the closing scanner.close()
            let body = match body.split_last() {
                Some((AstNode::ReturnStatement { .. }, rest)) => rest,
                _ => body,
            };

            self.in_main = true;
            self.statements(body);
            self.in_main = false;
            self.writer.line("scanner.close();");
        } else {
            let params = params
                .iter()
                .map(|p| format!("{} {}", self.types.get(&p.param_type), p.name))
                .collect::<Vec<_>>()
                .join(", ");
            self.writer.line(format!(
                "public static {} {}({}) {{",
                self.types.get(return_type),
                name,
                params
            ));
            self.writer.indent();
            self.statements(body);
        }

        self.writer.dedent();
        self.writer.line("}");
    }

    fn statements(&mut self, nodes: &[AstNode]) {
        for node in nodes {
            self.statement(node);
        }
    }

    /// Body of an `if` / loop: a block's items, or the single statement
    fn branch(&mut self, node: &AstNode) {
        self.writer.indent();
        match node {
            AstNode::Block { body, .. } => self.statements(body),
            other => self.statement(other),
        }
        self.writer.dedent();
    }

    fn statement(&mut self, node: &AstNode) {
        match node {
            AstNode::Program { body } => self.statements(body),
            AstNode::Block { body, .. } => {
                self.writer.line("{");
                self.branch_items(body);
                self.writer.line("}");
            }
            AstNode::Include { .. } => {}
            AstNode::Function {
                name, is_prototype, ..
            } => {
                if !is_prototype {
                    self.writer
                        .line(format!("// unsupported: nested function {}()", name));
                }
            }
            AstNode::Variable {
                name,
                var_type,
                init,
                ..
            } => {
                let declaration = self.declaration(var_type, name, init.as_deref());
                self.writer.line(format!("{};", declaration));
            }
            AstNode::Assignment {
                target, op, value, ..
            } => {
                let assignment = self.assignment(target, *op, value.as_deref());
                self.writer.line(format!("{};", assignment));
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
                    .line(format!("while ({}) {{", self.expr(condition)));
                self.branch(body);
                self.writer.line("}");
            }
            AstNode::ForLoop {
                init,
                condition,
                update,
                body,
                ..
            } => {
                let init = init.as_deref().map(|n| self.clause(n)).unwrap_or_default();
                let condition = condition
                    .as_deref()
                    .map(|n| self.expr(n))
                    .unwrap_or_default();
                let update = update.as_deref().map(|n| self.clause(n)).unwrap_or_default();
                self.writer
                    .line(format!("for ({}; {}; {}) {{", init, condition, update));
                self.branch(body);
                self.writer.line("}");
            }
            AstNode::ReturnStatement { value, .. } => {
                if self.in_main {
                    self.writer.line("scanner.close();");
                    self.writer.line("return;");
                } else if let Some(value) = value {
                    self.writer.line(format!("return {};", self.expr(value)));
                } else {
                    self.writer.line("return;");
                }
            }
            AstNode::PrintfStatement { args, .. } => self.printf(args),
            AstNode::ScanfStatement { args, .. } => self.scanf(args),
            AstNode::FunctionCall { .. }
            | AstNode::BinaryExpression { .. }
            | AstNode::UnaryExpression { .. }
            | AstNode::Literal { .. }
            | AstNode::Identifier { .. } => {
                self.writer.line(format!("{};", self.expr(node)));
            }
        }
    }

    fn branch_items(&mut self, body: &[AstNode]) {
        self.writer.indent();
        self.statements(body);
        self.writer.dedent();
    }

    fn if_statement(
        &mut self,
        condition: &AstNode,
        then_branch: &AstNode,
        else_branch: Option<&AstNode>,
    ) {
        self.writer.line(format!("if ({}) {{", self.expr(condition)));
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
                    self.writer
                        .line(format!("}} else if ({}) {{", self.expr(condition)));
                    self.branch(then_branch);
                    next = else_branch.as_deref();
                }
                other => {
                    self.writer.line("} else {");
                    self.branch(other);
                    next = None;
                }
            }
        }

        self.writer.line("}");
    }

    /// `T name = value`, without the terminating `;`
    fn declaration(&self, var_type: &str, name: &str, init: Option<&AstNode>) -> String {
        let java_type = self.types.get(var_type);
        let value = match init {
            Some(init) if java_type == "char" => {
                char_literal(init).unwrap_or_else(|| self.expr(init))
            }
            Some(init) => self.expr(init),
            None => self.defaults.get(var_type).to_string(),
        };
        format!("{} {} = {}", java_type, name, value)
    }

    /// Assignment without the terminating `;`
    fn assignment(&self, target: &str, op: AssignOp, value: Option<&AstNode>) -> String {
        if op.is_step() {
            return format!("{}{}", target, op.symbol());
        }
        let value = value.map(|v| self.expr(v)).unwrap_or_default();
        format!("{} {} {}", target, op.symbol(), value)
    }

    /// `for` header clause: declaration, assignment or bare expression
    fn clause(&self, node: &AstNode) -> String {
        match node {
            AstNode::Variable {
                name,
                var_type,
                init,
                ..
            } => self.declaration(var_type, name, init.as_deref()),
            AstNode::Assignment {
                target, op, value, ..
            } => self.assignment(target, *op, value.as_deref()),
            other => self.expr(other),
        }
    }

    fn printf(&mut self, args: &[AstNode]) {
        let Some((first, rest)) = args.split_first() else {
            return;
        };

        let Some(text) = string_literal(first) else {
            self.writer
                .line(format!("System.out.print({});", self.expr(first)));
            return;
        };

        if rest.is_empty() {
            self.writer.line(format!(
                "System.out.print({});",
                quote(&format::plain_text(text))
            ));
        } else {
            let conversions = format::conversions(text);
            let arguments = rest
                .iter()
                .enumerate()
                .map(|(i, arg)| match conversions.get(i) {
                    Some(Conversion::Char) => {
                        char_literal(arg).unwrap_or_else(|| self.expr(arg))
                    }
                    _ => self.expr(arg),
                })
                .collect::<Vec<_>>()
                .join(", ");
            self.writer.line(format!(
                "System.out.printf({}, {});",
                quote(&java_format(text)),
                arguments
            ));
        }
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
            self.writer.line("scanner.nextLine();");
            return;
        }

        for (i, target) in targets.iter().enumerate() {
            let read = match conversions.get(i).copied().unwrap_or(Conversion::Integer) {
                Conversion::Integer => "scanner.nextInt()",
                Conversion::Float => "scanner.nextDouble()",
                Conversion::String => "scanner.next()",
                Conversion::Char => "scanner.next().charAt(0)",
            };
            self.writer
                .line(format!("{} = {};", self.expr(target), read));
        }
    }

    fn expr(&self, node: &AstNode) -> String {
        render_expression(node, self)
    }
}

fn is_main(node: &AstNode) -> bool {
    matches!(
        node,
        AstNode::Function { name, is_prototype: false, .. } if name == "main"
    )
}

/// Rewrite a C format string with markers in `java.util.Formatter` spelling
fn java_format(text: &str) -> String {
    format::parse_format(text)
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => text.clone(),
            Segment::Percent => "%%".to_string(),
            Segment::Marker(marker) => java_marker(marker),
        })
        .collect()
}

fn java_marker(marker: &Marker) -> String {
    let letter = match marker.conversion {
        Some(Conversion::Integer) => 'd',
        Some(Conversion::Float) if marker.letter == 'F' => 'f',
        Some(Conversion::Float) => marker.letter,
        Some(Conversion::String) => 's',
        Some(Conversion::Char) => 'c',
        None => marker.letter,
    };
    let precision = marker
        .precision
        .map(|p| format!(".{}", p))
        .unwrap_or_default();
    format!("%{}{}{}", marker.flags, precision, letter)
}

/// A one-character string literal as a Java `char` literal
fn char_literal(node: &AstNode) -> Option<String> {
    let text = string_literal(node)?;
    let mut chars = text.chars();
    let single = match (chars.next(), chars.next(), chars.next()) {
        (Some('\''), None, _) => "\\'".to_string(),
        (Some(c), None, _) => c.to_string(),
        (Some('\\'), Some(c), None) => format!("\\{}", c),
        _ => return None,
    };
    Some(format!("'{}'", single))
}
