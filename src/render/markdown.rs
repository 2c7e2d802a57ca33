//! Markdown rendering via comrak.

use comrak::{Options, markdown_to_html};

use super::RenderError;
use super::traits::MarkdownConverter;

/// GFM-flavoured comrak renderer. Raw HTML in the source is passed through.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComrakMarkdown;

impl MarkdownConverter for ComrakMarkdown {
    fn to_html(&self, source: &str) -> Result<String, RenderError> {
        Ok(markdown_to_html(source, &create_options()))
    }
}

fn create_options() -> Options {
    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;

    options.render.unsafe_ = true;

    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str) -> String {
        ComrakMarkdown.to_html(source).unwrap()
    }

    #[test]
    fn test_heading_becomes_h1() {
        assert_eq!(render("# Title"), "<h1>Title</h1>\n");
    }

    #[test]
    fn test_emphasis_and_lists() {
        let html = render("This is **bold**.\n\n- one\n- two");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<li>two</li>"));
    }

    #[test]
    fn test_gfm_table_and_strikethrough() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = render("<div class=\"note\">hi</div>");
        assert!(html.contains("<div class=\"note\">hi</div>"));
    }

    #[test]
    fn test_empty_source_renders_nothing() {
        assert_eq!(render(""), "");
    }
}
