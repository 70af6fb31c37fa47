//! Token stream pane: one row per token with its position and kind

use crate::parser::lexer::{Token, TokenKind};
use crate::ui::panes::common::{clamp_scroll, pane_block, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

fn kind_style(kind: TokenKind) -> Style {
    let color = match kind {
        TokenKind::Keyword => DEFAULT_THEME.keyword,
        TokenKind::Identifier => DEFAULT_THEME.text,
        TokenKind::Number => DEFAULT_THEME.number_literal,
        TokenKind::String => DEFAULT_THEME.string_literal,
        TokenKind::Operator => DEFAULT_THEME.warning,
        TokenKind::Delimiter => DEFAULT_THEME.accent,
        TokenKind::Newline | TokenKind::Eof => DEFAULT_THEME.muted,
    };
    Style::default().fg(color)
}

/// One display row: `line:col  KIND  text`
fn token_line(token: &Token) -> Line<'static> {
    let text = match token.kind {
        TokenKind::String => format!("\"{}\"", token.text()),
        TokenKind::Newline => "\\n".to_string(),
        _ => token.text().to_string(),
    };

    Line::from(vec![
        Span::styled(
            format!("{:>4}:{:<3} ", token.location.line, token.location.column),
            Style::default().fg(DEFAULT_THEME.muted),
        ),
        Span::styled(
            format!("{:<10} ", token.kind.to_string()),
            kind_style(token.kind).add_modifier(Modifier::BOLD),
        ),
        Span::styled(text, Style::default().fg(DEFAULT_THEME.text)),
    ])
}

/// Render the token stream pane
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(format!(" Tokens ({}) ", tokens.len()), is_focused);

    let height = visible_height(area);
    clamp_scroll(tokens.len(), height, scroll_offset);

    let items: Vec<ListItem> = tokens
        .iter()
        .skip(*scroll_offset)
        .take(height)
        .map(|token| ListItem::new(token_line(token)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::SourceLocation;

    #[test]
    fn test_token_line_columns() {
        let token = Token::new(TokenKind::String, "hi", SourceLocation::new(3, 7));
        let line = token_line(&token);
        let texts: Vec<String> = line.spans.iter().map(|s| s.content.to_string()).collect();
        assert_eq!(texts, vec!["   3:7   ", "STRING     ", "\"hi\""]);
    }
}
