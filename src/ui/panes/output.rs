//! Generated code pane

use crate::codegen::Dialect;
use crate::ui::panes::common::{clamp_scroll, pane_block, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the generated output pane
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    output: &str,
    dialect: Dialect,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(format!(" Output ({}) ", dialect), is_focused);

    if output.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.muted));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let comment = dialect.comment_prefix();

    let lines: Vec<&str> = output.lines().collect();
    let height = visible_height(area);
    clamp_scroll(lines.len(), height, scroll_offset);

    let items: Vec<ListItem> = lines
        .iter()
        .skip(*scroll_offset)
        .take(height)
        .map(|line| {
            let color = if line.trim_start().starts_with(comment) {
                DEFAULT_THEME.muted
            } else {
                DEFAULT_THEME.text
            };
            ListItem::new(*line).style(Style::default().fg(color))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
