// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. render::RenderError)
    clippy::module_name_repetitions
)]

//! # playmark
//!
//! A multi-format markup playground.
//!
//! One text area, one format selector and one output surface. The selected
//! format decides how the source is turned into HTML:
//! - Markdown through comrak
//! - Mermaid diagrams to inline SVG
//! - LaTeX math typeset with KaTeX
//! - PlantUML as a placeholder showing the source
//! - Vega-Lite charts mounted with vega-embed
//! - AsciiDoc through asciidocr
//!
//! ## Architecture
//!
//! The session uses The Elm Architecture (TEA) pattern:
//! - **Model**: selector, source and surface state
//! - **Message**: edits, format changes, resets and render completions
//! - **Update**: pure state transitions
//! - **Effects**: render jobs on worker threads, file output
//!
//! ## Modules
//!
//! - [`format`]: the closed set of formats
//! - [`registry`]: formats in display order and their examples
//! - [`selector`]: the format selection control
//! - [`render`]: capabilities and the renderer dispatcher
//! - [`session`]: the session controller
//! - [`surface`]: the output surface
//! - [`templates`]: HTML templates
//! - [`query`]: format hints from page addresses
//! - [`watcher`]: source file watching
//! - [`config`]: saved command-line defaults

pub mod config;
pub mod format;
pub mod perf;
pub mod query;
pub mod registry;
pub mod render;
pub mod selector;
pub mod session;
pub mod surface;
pub mod templates;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::format::Format;
    pub use crate::registry::FormatRegistry;
    pub use crate::render::{Capabilities, Dispatcher, RenderError, RenderResult, RenderToken};
    pub use crate::session::{Message, Model, Session, update};
    pub use crate::surface::OutputSurface;
}
