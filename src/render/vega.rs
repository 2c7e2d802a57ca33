//! Vega-Lite: strict spec parsing and the vega-embed chart capability.

use super::RenderError;
use super::traits::{ChartOptions, ChartRenderer};
use crate::templates;

/// Parse a chart specification. Only strict JSON is accepted.
///
/// # Errors
///
/// Returns [`RenderError::Parse`] when `source` is not valid JSON.
pub fn parse_spec(source: &str) -> Result<serde_json::Value, RenderError> {
    serde_json::from_str(source).map_err(|err| RenderError::Parse(err.to_string()))
}

/// Emits a mount point plus a `vegaEmbed` call; the page shell loads vega,
/// vega-lite and vega-embed, which draw the chart in the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct VegaEmbed;

impl ChartRenderer for VegaEmbed {
    fn render_chart(
        &self,
        target: &str,
        spec: &serde_json::Value,
        options: &ChartOptions,
    ) -> Result<String, RenderError> {
        Ok(templates::vega_embed(target, spec, options)?)
    }
}
