//! Capability seams the dispatcher delegates to.
//!
//! Implementations must be `Send + Sync`: deferred work runs on worker threads.

use serde::Serialize;

use super::RenderError;

/// Markdown source → HTML.
pub trait MarkdownConverter: Send + Sync {
    fn to_html(&self, source: &str) -> Result<String, RenderError>;
}

/// Diagram source → SVG markup. Called from a worker thread.
pub trait DiagramRenderer: Send + Sync {
    fn render_svg(&self, source: &str) -> Result<String, RenderError>;
}

/// Rewrites math in already-written HTML. Called from a worker thread.
pub trait Typesetter: Send + Sync {
    fn typeset(&self, html: &str) -> Result<String, RenderError>;
}

/// Options forwarded to the chart capability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChartOptions {
    /// Show the export/source action menu next to the chart.
    pub actions: bool,
}

/// Parsed chart specification → markup that draws it into `target`.
/// Called from a worker thread.
pub trait ChartRenderer: Send + Sync {
    fn render_chart(
        &self,
        target: &str,
        spec: &serde_json::Value,
        options: &ChartOptions,
    ) -> Result<String, RenderError>;
}

/// Lightweight markup (AsciiDoc) → HTML.
pub trait LightweightMarkupConverter: Send + Sync {
    fn convert(&self, source: &str) -> Result<String, RenderError>;
}
