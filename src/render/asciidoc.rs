//! AsciiDoc conversion via asciidocr's HTMLBook backend.

use std::path::PathBuf;

use asciidocr::backends::htmls::render_htmlbook;
use asciidocr::parser::Parser;
use asciidocr::scanner::Scanner;

use super::RenderError;
use super::traits::LightweightMarkupConverter;
use crate::format::Format;

#[derive(Debug, Clone, Copy, Default)]
pub struct Asciidocr;

impl LightweightMarkupConverter for Asciidocr {
    fn convert(&self, source: &str) -> Result<String, RenderError> {
        // The parser is still incomplete and can panic on constructs it does
        // not know; surface that as a conversion failure.
        let converted = std::panic::catch_unwind(|| {
            let graph = Parser::new(PathBuf::from("-"))
                .parse(Scanner::new(source))
                .map_err(|err| format!("{err:?}"))?;
            render_htmlbook(&graph).map_err(|err| format!("{err:?}"))
        })
        .map_err(|_| RenderError::conversion(Format::AsciiDoc, "converter panicked"))?;
        converted.map_err(|err| RenderError::conversion(Format::AsciiDoc, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_section_and_list() {
        let html = Asciidocr
            .convert("== Section\n\n* one\n* two\n")
            .unwrap();
        assert!(html.contains("Section"));
        assert!(html.contains("<li>"));
    }

    #[test]
    fn test_converts_paragraph_text() {
        let html = Asciidocr.convert("Plain paragraph.\n").unwrap();
        assert!(html.contains("Plain paragraph."));
    }
}
