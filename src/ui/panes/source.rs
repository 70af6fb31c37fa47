//! Source code pane rendering with syntax highlighting
//!
//! Displays the C input with line numbers. Lines on which the lexer or parser
//! recorded a diagnostic get a highlighted line number.
//!
//! # Rendering
//!
//! Highlighting uses a simple character-by-character scan so that a line is
//! styled on its own, without re-running the lexer for every frame. Keyword
//! classes come from the lexer's keyword tables.

use crate::parser::lexer::{is_keyword, is_type_keyword};
use crate::ui::panes::common::{clamp_scroll, pane_block, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Simple syntax highlighting for C code
fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte, c) = chars[i];

        // Comments and preprocessor lines run to end of line
        let starts_comment = c == '/' && matches!(chars.get(i + 1), Some((_, '/' | '*')));
        if starts_comment || (c == '#' && line[..byte].trim().is_empty()) {
            if !current_word.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut current_word)));
            }
            spans.push(Span::styled(
                line[byte..].to_string(),
                Style::default().fg(DEFAULT_THEME.muted),
            ));
            break;
        }

        // Handle string and character literals
        if c == '"' || c == '\'' {
            if !current_word.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut current_word)));
            }
            let mut end = i + 1;
            while end < chars.len() && chars[end].1 != c {
                if chars[end].1 == '\\' {
                    end += 2;
                } else {
                    end += 1;
                }
            }
            end = (end + 1).min(chars.len());
            let end_byte = chars.get(end).map_or(line.len(), |(b, _)| *b);
            spans.push(Span::styled(
                line[byte..end_byte].to_string(),
                Style::default().fg(DEFAULT_THEME.string_literal),
            ));
            i = end;
            continue;
        }

        // Handle non-alphanumeric (delimiters)
        if !c.is_alphanumeric() && c != '_' {
            if !current_word.is_empty() {
                let style = word_style(&current_word, c == '(');
                spans.push(Span::styled(std::mem::take(&mut current_word), style));
            }

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.accent),
                _ => Style::default().fg(DEFAULT_THEME.text),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        let style = word_style(&current_word, false);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn word_style(word: &str, is_call: bool) -> Style {
    if is_type_keyword(word) {
        Style::default().fg(DEFAULT_THEME.type_name)
    } else if word == "printf" || word == "scanf" || is_call {
        Style::default().fg(DEFAULT_THEME.call)
    } else if is_keyword(word) {
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD)
    } else if word.starts_with(|c: char| c.is_ascii_digit()) {
        Style::default().fg(DEFAULT_THEME.number_literal)
    } else {
        Style::default().fg(DEFAULT_THEME.text)
    }
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    diagnostic_lines: &[usize],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Source ".to_string(), is_focused);

    let lines: Vec<&str> = source_code.lines().collect();
    let height = visible_height(area);
    clamp_scroll(lines.len(), height, scroll_offset);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let num_style = if diagnostic_lines.contains(&line_num) {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.muted)
            };

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(highlight_source_code(line).spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
