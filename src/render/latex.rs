//! Math typesetting via KaTeX.
//!
//! The LaTeX branch writes the source verbatim and then typesets the math
//! inside it, the way a page-level typesetter would: delimited regions are
//! replaced in place and everything else is left untouched.

use once_cell::sync::Lazy;
use regex::Regex;

use super::RenderError;
use super::traits::Typesetter;
use crate::format::Format;

/// `$$…$$` and `\[…\]` are display math, `\(…\)` is inline math.
static MATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\$\$(?P<dollars>.+?)\$\$|\\\[(?P<bracket>.+?)\\\]|\\\((?P<paren>.+?)\\\)")
        .expect("math delimiter pattern is valid")
});

/// A delimited math region found in the surface content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSpan<'a> {
    /// Byte range of the whole match, delimiters included.
    pub range: std::ops::Range<usize>,
    pub tex: &'a str,
    pub display: bool,
}

/// Find every delimited math region, in order.
pub fn find_math(html: &str) -> Vec<MathSpan<'_>> {
    MATH.captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let (tex, display) = if let Some(m) = caps.name("dollars") {
                (m.as_str(), true)
            } else if let Some(m) = caps.name("bracket") {
                (m.as_str(), true)
            } else {
                (caps.name("paren")?.as_str(), false)
            };
            Some(MathSpan {
                range: whole.range(),
                tex,
                display,
            })
        })
        .collect()
}

/// Typesets math with the embedded KaTeX engine.
///
/// Invalid TeX is rendered as an inline KaTeX error rather than failing the
/// whole surface; only engine failures are returned as errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct KatexTypesetter;

impl KatexTypesetter {
    fn opts(display: bool) -> Result<katex::Opts, RenderError> {
        katex::Opts::builder()
            .display_mode(display)
            .throw_on_error(false)
            .build()
            .map_err(|err| RenderError::conversion(Format::LaTeX, err))
    }
}

impl Typesetter for KatexTypesetter {
    fn typeset(&self, html: &str) -> Result<String, RenderError> {
        let spans = find_math(html);
        if spans.is_empty() {
            return Ok(html.to_string());
        }
        let display = Self::opts(true)?;
        let inline = Self::opts(false)?;

        let mut out = String::with_capacity(html.len() * 2);
        let mut last = 0;
        for span in &spans {
            out.push_str(&html[last..span.range.start]);
            let opts = if span.display { &display } else { &inline };
            let rendered = katex::render_with_opts(span.tex.trim(), opts)
                .map_err(|err| RenderError::conversion(Format::LaTeX, err))?;
            out.push_str(&rendered);
            last = span.range.end;
        }
        out.push_str(&html[last..]);
        tracing::debug!(spans = spans.len(), "typeset math");
        Ok(out)
    }
}
