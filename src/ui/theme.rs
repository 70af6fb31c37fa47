//! Color palette shared by every pane

use ratatui::style::Color;

/// Colors by role in the viewer
pub struct Theme {
    /// Plain text, identifiers, generated code
    pub text: Color,
    /// Brackets, delimiters and the dialect badge
    pub accent: Color,
    /// Operators and phases that recorded diagnostics
    pub warning: Color,
    /// Line numbers, comments, positions
    pub muted: Color,
    /// Phases that ran clean
    pub ok: Color,
    /// Source lines carrying a diagnostic
    pub error: Color,
    pub keyword: Color,
    pub string_literal: Color,
    pub number_literal: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub status_bg: Color,
    /// Function names at call sites, `printf` and `scanf`
    pub call: Color,
    /// Type keywords and AST node kinds
    pub type_name: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    text: Color::Rgb(205, 214, 244),
    accent: Color::Rgb(137, 180, 250),
    warning: Color::Rgb(250, 179, 135),
    muted: Color::Rgb(108, 112, 134),
    ok: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(203, 166, 247),
    string_literal: Color::Rgb(166, 227, 161),
    number_literal: Color::Rgb(250, 179, 135),
    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(108, 112, 134),
    status_bg: Color::Rgb(49, 50, 68),
    call: Color::Rgb(249, 226, 175),
    type_name: Color::Rgb(148, 226, 213),
};
