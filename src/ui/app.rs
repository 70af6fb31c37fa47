//! Main TUI application state and logic

use crate::codegen::{generate, Dialect};
use crate::diagnostics::Stage;
use crate::parser::ast::AstNode;
use crate::ui::panes::PhaseSummary;
use crate::{run_pipeline, Transpilation};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Ast,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> output -> ast -> tokens)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Ast,
            FocusedPane::Ast => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Ast,
            FocusedPane::Ast => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// File the source was read from, re-read on reload
    pub path: PathBuf,

    /// The C source being translated
    pub source_code: String,

    /// Active output dialect
    pub dialect: Dialect,

    /// Tokens, tree, output and diagnostics of the latest run
    pub run: Transpilation,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tokens_scroll: usize,
    pub ast_scroll: usize,
    pub output_scroll: usize,

    /// Rows scrolled by PgUp/PgDn, refreshed on every render
    pub page_height: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app and run the pipeline once on `source_code`
    pub fn new(path: impl Into<PathBuf>, source_code: String, dialect: Dialect) -> Self {
        let run = run_pipeline(&source_code, dialect);
        let status_message = summarize(&run);

        App {
            path: path.into(),
            source_code,
            dialect,
            run,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            tokens_scroll: 0,
            ast_scroll: 0,
            output_scroll: 0,
            page_height: 10,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Counts shown by the status bar phase chips
    pub fn phase_summary(&self) -> PhaseSummary {
        let count = |stage: Stage| {
            self.run
                .diagnostics
                .iter()
                .filter(|d| d.stage == stage)
                .count()
        };
        let nodes = match &self.run.program {
            AstNode::Program { body } => body.len(),
            _ => 0,
        };

        PhaseSummary {
            tokens: self.run.tokens.len(),
            lexer_warnings: count(Stage::Lexer),
            nodes,
            parser_warnings: count(Stage::Parser),
            output_lines: self.run.output.lines().count(),
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(pane_area);

        // Left column: Source (top) | Tokens (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        // Right column: Output (top) | Syntax tree (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        self.page_height = (left_rows[1].height as usize).saturating_sub(2).max(1);

        let diagnostic_lines = diagnostic_lines(&self.run);

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            &diagnostic_lines,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            left_rows[1],
            &self.run.tokens,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_output_pane(
            frame,
            right_rows[0],
            &self.run.output,
            self.dialect,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        super::panes::render_ast_pane(
            frame,
            right_rows[1],
            &self.run.program,
            self.focused_pane == FocusedPane::Ast,
            &mut self.ast_scroll,
        );

        let phases = self.phase_summary();
        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            &phases,
            self.dialect,
        );
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
            FocusedPane::Ast => &mut self.ast_scroll,
            FocusedPane::Output => &mut self.output_scroll,
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let page = self.page_height;
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(page);
            }
            KeyCode::PageDown => {
                let page = self.page_height;
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(page);
            }
            KeyCode::Home => {
                *self.focused_scroll() = 0;
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.switch_dialect();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reload();
            }
            _ => {}
        }
    }

    /// Regenerate the output in the other dialect from the existing tree
    fn switch_dialect(&mut self) {
        self.dialect = self.dialect.toggle();
        self.run.output = generate(&self.run.program, self.dialect);
        self.output_scroll = 0;
        self.status_message = format!("Switched to {}", self.dialect);
    }

    /// Re-read the source file and rerun the whole pipeline
    fn reload(&mut self) {
        match fs::read_to_string(&self.path) {
            Ok(source) => {
                self.run = run_pipeline(&source, self.dialect);
                self.source_code = source;
                self.status_message = format!("Reloaded: {}", summarize(&self.run));
            }
            Err(e) => {
                self.status_message =
                    format!("Reload failed for '{}': {}", self.path.display(), e);
            }
        }
    }
}

/// One-line description of a pipeline run
fn summarize(run: &Transpilation) -> String {
    match run.diagnostics.first() {
        None => "Ready!".to_string(),
        Some(first) if run.diagnostics.len() == 1 => first.to_string(),
        Some(first) => format!("{} (+{} more)", first, run.diagnostics.len() - 1),
    }
}

/// Sorted, distinct source lines carrying at least one diagnostic
fn diagnostic_lines(run: &Transpilation) -> Vec<usize> {
    let mut lines: Vec<usize> = run.diagnostics.iter().map(|d| d.location.line).collect();
    lines.sort_unstable();
    lines.dedup();
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_focus_cycle_round_trips() {
        let mut pane = FocusedPane::Source;
        for _ in 0..4 {
            pane = pane.next();
        }
        assert_eq!(pane, FocusedPane::Source);
        assert_eq!(FocusedPane::Ast.next().prev(), FocusedPane::Ast);
    }

    #[test]
    fn test_dialect_key_regenerates_output() {
        let mut app = App::new("unused.c", "int x = 5;".to_string(), Dialect::Java);
        assert!(app.run.output.starts_with("public class Main"));
        assert_eq!(app.status_message, "Ready!");

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.dialect, Dialect::Python);
        assert_eq!(app.run.output, "x = 5\n");
        assert_eq!(app.status_message, "Switched to Python");
    }

    #[test]
    fn test_scroll_keys_move_focused_pane_only() {
        let mut app = App::new("unused.c", "int x;".to_string(), Dialect::Python);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Output);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.output_scroll, 1 + app.page_height);
        assert_eq!(app.source_scroll, 0);

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.output_scroll, 0);
    }

    #[test]
    fn test_reload_missing_file_keeps_previous_run() {
        let mut app = App::new(
            "definitely/not/here.c",
            "int x;".to_string(),
            Dialect::Python,
        );
        press(&mut app, KeyCode::Char('r'));
        assert!(app.status_message.starts_with("Reload failed"));
        assert_eq!(app.run.output, "x = 0\n");
    }

    #[test]
    fn test_phase_summary_counts_diagnostics_by_stage() {
        let app = App::new("unused.c", "int x = @;".to_string(), Dialect::Python);
        let phases = app.phase_summary();
        assert_eq!(phases.lexer_warnings, 1);
        assert_eq!(phases.nodes, 1);
        assert!(app.status_message.contains("Lexer"));
    }

    #[test]
    fn test_diagnostic_lines_are_sorted_and_distinct() {
        // Lexer warnings on line 3 are reported before parser warnings on line 1
        let source = "break;\nint x;\nint y = 1 @ @;\nbreak;";
        let app = App::new("unused.c", source.to_string(), Dialect::Python);
        assert_eq!(diagnostic_lines(&app.run), vec![1, 3, 4]);
    }

    #[test]
    fn test_quit_key() {
        let mut app = App::new("unused.c", String::new(), Dialect::Java);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
