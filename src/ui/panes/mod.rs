//! TUI pane rendering modules
//!
//! Each pane shows one stage of the pipeline:
//!
//! - [`source`]: C input with syntax highlighting and diagnostic line markers
//! - [`tokens`]: token stream with positions and kinds
//! - [`ast`]: the parsed program as an indented outline
//! - [`output`]: generated Java or Python code
//! - [`status`]: status bar with phase indicators and keybindings
//!
//! Render functions are stateless apart from the scroll offset they clamp.

mod common;

pub mod ast;
pub mod output;
pub mod source;
pub mod status;
pub mod tokens;

pub use ast::render_ast_pane;
pub use output::render_output_pane;
pub use source::render_source_pane;
pub use status::{render_status_bar, PhaseSummary};
pub use tokens::render_tokens_pane;
