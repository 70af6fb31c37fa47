//! Status bar rendering with pipeline phase indicators and keybindings

use crate::codegen::Dialect;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Per-phase counts shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseSummary {
    pub tokens: usize,
    pub lexer_warnings: usize,
    /// Top-level program items
    pub nodes: usize,
    pub parser_warnings: usize,
    pub output_lines: usize,
}

/// Chip for one phase: green when the phase recorded nothing, orange otherwise
fn phase_chip(name: &str, count: usize, warnings: usize) -> Span<'static> {
    let (bg, text) = if warnings == 0 {
        (DEFAULT_THEME.ok, format!(" ✓ {} {} ", name, count))
    } else {
        (
            DEFAULT_THEME.warning,
            format!(" ! {} {} ({} warn) ", name, count, warnings),
        )
    };

    Span::styled(
        text,
        Style::default()
            .bg(bg)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )
}

/// Render the status bar at the bottom
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    phases: &PhaseSummary,
    dialect: Dialect,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let bar_style = Style::default().bg(DEFAULT_THEME.status_bg);
    let sep_style = bar_style.fg(DEFAULT_THEME.muted);

    // Left side: phase indicators and status message
    let left_spans = vec![
        phase_chip("tokenize", phases.tokens, phases.lexer_warnings),
        Span::styled(" ", bar_style),
        phase_chip("parse", phases.nodes, phases.parser_warnings),
        Span::styled(" ", bar_style),
        phase_chip("generate", phases.output_lines, 0),
        Span::styled(" | ", sep_style),
        Span::styled(format!(" {} ", message), bar_style.fg(DEFAULT_THEME.text)),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(bar_style)
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds and the active dialect
    let key_style = Style::default().bg(DEFAULT_THEME.muted).fg(Color::Black);
    let desc_style = bar_style.fg(DEFAULT_THEME.text);

    let right_spans = vec![
        Span::styled(" ⇥ ", key_style),
        Span::styled(" focus ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" scroll ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" d ", key_style),
        Span::styled(" dialect ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" r ", key_style),
        Span::styled(" reload ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(
            format!(" {} ", dialect),
            Style::default()
                .bg(DEFAULT_THEME.accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(bar_style)
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
