//! Pieces shared by every scrolling pane

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered pane frame; the focused pane gets a bold highlighted border
pub(crate) fn pane_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Number of content rows inside a bordered pane
pub(crate) fn visible_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize // Account for borders, min 1
}

/// Clamp `offset` so the last page is never scrolled past
pub(crate) fn clamp_scroll(total_items: usize, visible_height: usize, offset: &mut usize) {
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *offset = (*offset).min(max_scroll);
    } else {
        *offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_scroll() {
        let mut offset = 50;
        clamp_scroll(30, 10, &mut offset);
        assert_eq!(offset, 20);

        let mut offset = 3;
        clamp_scroll(5, 10, &mut offset);
        assert_eq!(offset, 0);
    }

    #[test]
    fn test_visible_height_excludes_borders() {
        assert_eq!(visible_height(Rect::new(0, 0, 10, 12)), 10);
        assert_eq!(visible_height(Rect::new(0, 0, 10, 1)), 1);
    }
}
