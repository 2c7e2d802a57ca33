//! The output surface rendered markup is written into.

/// In-memory stand-in for the page's output container.
///
/// Every write bumps `revision`, so callers can tell whether the content
/// changed since they last flushed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSurface {
    html: String,
    revision: u64,
}

impl OutputSurface {
    pub const fn new() -> Self {
        Self {
            html: String::new(),
            revision: 0,
        }
    }

    pub fn clear(&mut self) {
        self.html.clear();
        self.revision += 1;
    }

    /// Replace the content with `html`.
    pub fn set_html(&mut self, html: impl Into<String>) {
        self.html = html.into();
        self.revision += 1;
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_html_replaces_content() {
        let mut surface = OutputSurface::new();
        surface.set_html("<p>one</p>");
        surface.set_html("<p>two</p>");
        assert_eq!(surface.html(), "<p>two</p>");
        assert_eq!(surface.revision(), 2);
    }

    #[test]
    fn test_clear_empties_and_bumps_revision() {
        let mut surface = OutputSurface::new();
        surface.set_html("<p>one</p>");
        surface.clear();
        assert!(surface.is_empty());
        assert_eq!(surface.revision(), 2);
    }
}
