//! Renderer dispatcher.
//!
//! Turns `(format, source)` into a [`RenderResult`] by delegating to one
//! capability per format:
//! - **Markdown**: comrak, synchronous
//! - **Mermaid**: `mermaid-rs-renderer`, deferred
//! - **LaTeX**: source written verbatim, then KaTeX typesets it, deferred
//! - **PlantUML**: fixed placeholder plus the source; never rendered
//! - **Vega-Lite**: strict JSON parse, then vega-embed markup, deferred
//! - **AsciiDoc**: asciidocr, synchronous
//!
//! Synchronous failures become [`RenderResult::Failed`] and are shown as an
//! error block. Failures inside deferred jobs travel back in the
//! [`Completion`] and are not turned into error blocks.

mod asciidoc;
mod latex;
mod markdown;
mod mermaid;
mod traits;
mod vega;

pub use asciidoc::Asciidocr;
pub use latex::{KatexTypesetter, MathSpan, find_math};
pub use markdown::ComrakMarkdown;
pub use mermaid::{NativeMermaid, render_to_svg};
pub use traits::{
    ChartOptions, ChartRenderer, DiagramRenderer, LightweightMarkupConverter, MarkdownConverter,
    Typesetter,
};
pub use vega::{VegaEmbed, parse_spec};

use std::fmt;
use std::sync::Arc;

use crate::format::Format;
use crate::surface::OutputSurface;
use crate::templates;

/// Errors raised by rendering capabilities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The structured chart specification is not valid JSON.
    #[error("{0}")]
    Parse(String),
    /// A capability rejected the source or failed while converting it.
    #[error("{format} conversion failed: {message}")]
    Conversion { format: Format, message: String },
    /// A built-in HTML template could not be rendered.
    #[error("template error: {0}")]
    Template(String),
}

impl RenderError {
    pub fn conversion(format: Format, message: impl fmt::Display) -> Self {
        Self::Conversion {
            format,
            message: message.to_string(),
        }
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        Self::Template(err.to_string())
    }
}

/// Identifies one render request. Later requests carry larger tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderToken(pub u64);

impl RenderToken {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RenderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Work = Box<dyn FnOnce() -> Result<String, RenderError> + Send>;

/// Deferred rendering work, run off the event loop.
pub struct RenderJob {
    token: RenderToken,
    format: Format,
    work: Work,
}

impl RenderJob {
    fn new(
        token: RenderToken,
        format: Format,
        work: impl FnOnce() -> Result<String, RenderError> + Send + 'static,
    ) -> Self {
        Self {
            token,
            format,
            work: Box::new(work),
        }
    }

    pub const fn token(&self) -> RenderToken {
        self.token
    }

    pub const fn format(&self) -> Format {
        self.format
    }

    /// Run the work to completion on the current thread.
    pub fn run(self) -> Completion {
        let _scope = crate::perf::scope("render.job");
        Completion {
            token: self.token,
            format: self.format,
            result: (self.work)(),
        }
    }
}

impl fmt::Debug for RenderJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderJob")
            .field("token", &self.token)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

/// The outcome of a deferred job: markup that replaces the surface content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub token: RenderToken,
    pub format: Format,
    pub result: Result<String, RenderError>,
}

/// What a render call produced.
#[derive(Debug)]
pub enum RenderResult {
    /// Final markup.
    Html(String),
    /// A synchronous failure; the message is shown in an error block.
    Failed(String),
    /// Markup to show now, replaced when `job` completes.
    Deferred { initial: String, job: RenderJob },
}

impl RenderResult {
    /// Clear `surface` and write this result into it.
    ///
    /// Returns the job still to run, if any.
    pub fn apply(self, surface: &mut OutputSurface) -> Option<RenderJob> {
        surface.clear();
        match self {
            Self::Html(html) => {
                surface.set_html(html);
                None
            }
            Self::Failed(message) => {
                surface.set_html(error_html(&message));
                None
            }
            Self::Deferred { initial, job } => {
                if !initial.is_empty() {
                    surface.set_html(initial);
                }
                Some(job)
            }
        }
    }
}

/// The error block for `message`.
pub fn error_html(message: &str) -> String {
    templates::error_block(message).unwrap_or_else(|err| {
        tracing::error!(%err, "error block template failed");
        message.to_string()
    })
}

/// The set of external capabilities the dispatcher delegates to.
#[derive(Clone)]
pub struct Capabilities {
    pub markdown: Arc<dyn MarkdownConverter>,
    pub diagram: Arc<dyn DiagramRenderer>,
    pub typesetter: Arc<dyn Typesetter>,
    pub chart: Arc<dyn ChartRenderer>,
    pub asciidoc: Arc<dyn LightweightMarkupConverter>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            markdown: Arc::new(ComrakMarkdown),
            diagram: Arc::new(NativeMermaid),
            typesetter: Arc::new(KatexTypesetter),
            chart: Arc::new(VegaEmbed),
            asciidoc: Arc::new(Asciidocr),
        }
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities").finish_non_exhaustive()
    }
}

impl Capabilities {
    #[must_use]
    pub fn with_markdown(mut self, markdown: impl MarkdownConverter + 'static) -> Self {
        self.markdown = Arc::new(markdown);
        self
    }

    #[must_use]
    pub fn with_diagram(mut self, diagram: impl DiagramRenderer + 'static) -> Self {
        self.diagram = Arc::new(diagram);
        self
    }

    #[must_use]
    pub fn with_typesetter(mut self, typesetter: impl Typesetter + 'static) -> Self {
        self.typesetter = Arc::new(typesetter);
        self
    }

    #[must_use]
    pub fn with_chart(mut self, chart: impl ChartRenderer + 'static) -> Self {
        self.chart = Arc::new(chart);
        self
    }

    #[must_use]
    pub fn with_asciidoc(mut self, asciidoc: impl LightweightMarkupConverter + 'static) -> Self {
        self.asciidoc = Arc::new(asciidoc);
        self
    }
}

/// Selects and invokes the capability for a format. Holds no render state.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    caps: Capabilities,
}

impl Dispatcher {
    pub const fn new(caps: Capabilities) -> Self {
        Self { caps }
    }

    /// Render `source` as `format`.
    ///
    /// Synchronous errors never escape: they come back as
    /// [`RenderResult::Failed`].
    pub fn render(&self, format: Format, source: &str, token: RenderToken) -> RenderResult {
        let _scope = crate::perf::scope("render.dispatch");
        crate::perf::log_event(
            "render.request",
            format!("token={token} format={format} bytes={}", source.len()),
        );
        match self.dispatch(format, source, token) {
            Ok(result) => result,
            Err(err) => {
                tracing::debug!(%format, %token, %err, "synchronous render failed");
                crate::perf::log_event("render.failed", format!("token={token} err={err}"));
                RenderResult::Failed(err.to_string())
            }
        }
    }

    fn dispatch(
        &self,
        format: Format,
        source: &str,
        token: RenderToken,
    ) -> Result<RenderResult, RenderError> {
        match format {
            Format::Markdown => self.render_markdown(source),
            Format::Mermaid => Ok(self.render_mermaid(source, token)),
            Format::LaTeX => Ok(self.render_latex(source, token)),
            Format::PlantUML => Self::render_plantuml(source),
            Format::VegaLite => self.render_vega_lite(source, token),
            Format::AsciiDoc => self.render_asciidoc(source),
        }
    }

    fn render_markdown(&self, source: &str) -> Result<RenderResult, RenderError> {
        self.caps.markdown.to_html(source).map(RenderResult::Html)
    }

    fn render_mermaid(&self, source: &str, token: RenderToken) -> RenderResult {
        let diagram = Arc::clone(&self.caps.diagram);
        let source = source.to_string();
        RenderResult::Deferred {
            initial: String::new(),
            job: RenderJob::new(token, Format::Mermaid, move || diagram.render_svg(&source)),
        }
    }

    fn render_latex(&self, source: &str, token: RenderToken) -> RenderResult {
        let typesetter = Arc::clone(&self.caps.typesetter);
        let written = source.to_string();
        RenderResult::Deferred {
            initial: source.to_string(),
            job: RenderJob::new(token, Format::LaTeX, move || typesetter.typeset(&written)),
        }
    }

    fn render_plantuml(source: &str) -> Result<RenderResult, RenderError> {
        Ok(RenderResult::Html(templates::plantuml_placeholder(source)?))
    }

    fn render_vega_lite(
        &self,
        source: &str,
        token: RenderToken,
    ) -> Result<RenderResult, RenderError> {
        let spec = parse_spec(source)?;
        let chart = Arc::clone(&self.caps.chart);
        Ok(RenderResult::Deferred {
            initial: String::new(),
            job: RenderJob::new(token, Format::VegaLite, move || {
                let target = format!("#{}", templates::OUTPUT_ID);
                chart.render_chart(&target, &spec, &ChartOptions::default())
            }),
        })
    }

    fn render_asciidoc(&self, source: &str) -> Result<RenderResult, RenderError> {
        self.caps.asciidoc.convert(source).map(RenderResult::Html)
    }
}
