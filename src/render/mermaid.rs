//! Mermaid diagram rendering.
//!
//! Renders mermaid source text to SVG using `mermaid-rs-renderer` and fixes
//! the font-family quoting so the SVG can be inlined into HTML.

use mermaid_rs_renderer::{LayoutConfig, RenderOptions, Theme};

use super::RenderError;
use super::traits::DiagramRenderer;
use crate::format::Format;

/// Pure-Rust mermaid renderer using the modern theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeMermaid;

impl DiagramRenderer for NativeMermaid {
    fn render_svg(&self, source: &str) -> Result<String, RenderError> {
        render_to_svg(source)
    }
}

/// Render a mermaid diagram to an SVG string.
///
/// # Errors
///
/// Returns an error if the mermaid source cannot be parsed.
pub fn render_to_svg(source: &str) -> Result<String, RenderError> {
    let opts = RenderOptions {
        theme: Theme::modern(),
        layout: LayoutConfig::default(),
    };
    let svg = mermaid_rs_renderer::render_with_options(source, opts)
        .map_err(|err| RenderError::conversion(Format::Mermaid, err))?;
    tracing::debug!(bytes = svg.len(), "mermaid svg generated");
    Ok(fix_svg_font_families(&svg))
}

/// Fix unescaped double quotes inside font-family attributes.
///
/// `mermaid-rs-renderer` emits font-family values like:
///   `font-family="Inter, ... "Segoe UI", sans-serif"`
/// The inner `"Segoe UI"` ends the attribute early once the SVG is parsed as
/// markup. Inner double quotes are replaced with single quotes.
fn fix_svg_font_families(svg: &str) -> String {
    const MARKER: &str = "font-family=\"";
    let mut result = String::with_capacity(svg.len());
    let mut rest = svg;

    while let Some(pos) = rest.find(MARKER) {
        result.push_str(&rest[..pos + MARKER.len()]);
        rest = &rest[pos + MARKER.len()..];

        // The closing quote is the one followed by `>`, ` `, `/`, or the end.
        let mut value = String::new();
        let mut end_offset = rest.len();
        for (i, ch) in rest.char_indices() {
            if ch != '"' {
                value.push(ch);
                continue;
            }
            let after = rest.get(i + 1..i + 2).unwrap_or("");
            if after.is_empty() || after.starts_with(['>', ' ', '/']) {
                result.push_str(&value.replace('"', "'"));
                result.push('"');
                end_offset = i + 1;
                break;
            }
            value.push('"');
        }
        rest = &rest[end_offset..];
    }
    result.push_str(rest);
    result
}
