//! Syntax tree pane: the parsed program as an indented outline

use crate::parser::ast::AstNode;
use crate::ui::panes::common::{clamp_scroll, pane_block, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Flatten the tree into styled rows, mirroring [`crate::parser::ast::outline`]
pub(crate) fn tree_lines(root: &AstNode) -> Vec<Line<'static>> {
    fn walk(node: &AstNode, role: Option<&str>, depth: usize, out: &mut Vec<Line<'static>>) {
        let mut spans = vec![Span::raw("  ".repeat(depth))];
        if let Some(role) = role {
            spans.push(Span::styled(
                format!("{}: ", role),
                Style::default().fg(DEFAULT_THEME.muted),
            ));
        }

        let label = node.label();
        let kind = node.kind_name();
        let rest = label.strip_prefix(kind).unwrap_or("").to_string();
        spans.push(Span::styled(
            kind,
            Style::default().fg(DEFAULT_THEME.type_name),
        ));
        spans.push(Span::styled(rest, Style::default().fg(DEFAULT_THEME.text)));
        out.push(Line::from(spans));

        for (child_role, child) in node.children() {
            walk(child, child_role, depth + 1, out);
        }
    }

    let mut out = Vec::new();
    walk(root, None, 0, &mut out);
    out
}

/// Render the syntax tree pane
pub fn render_ast_pane(
    frame: &mut Frame,
    area: Rect,
    program: &AstNode,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Syntax Tree ".to_string(), is_focused);

    let lines = tree_lines(program);
    let height = visible_height(area);
    clamp_scroll(lines.len(), height, scroll_offset);

    let visible: Vec<Line> = lines.into_iter().skip(*scroll_offset).take(height).collect();
    frame.render_widget(Paragraph::new(visible).block(block), area);
}
