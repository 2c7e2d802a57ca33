//! The format selector control.

use crate::format::Format;

/// Holds the selectable options and the currently selected format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatSelector {
    options: Vec<Format>,
    current: Option<Format>,
}

impl FormatSelector {
    pub const fn new() -> Self {
        Self {
            options: Vec::new(),
            current: None,
        }
    }

    /// Replace the options with one entry per format, in the given order.
    ///
    /// The first option becomes the current value.
    pub fn populate(&mut self, formats: &[Format]) {
        self.options.clear();
        for &format in formats {
            if !self.options.contains(&format) {
                self.options.push(format);
            }
        }
        self.current = self.options.first().copied();
    }

    pub fn options(&self) -> &[Format] {
        &self.options
    }

    /// The selected format. `None` only before [`Self::populate`].
    pub const fn current(&self) -> Option<Format> {
        self.current
    }

    /// Select the option named `name`.
    ///
    /// Unknown names and formats that are not among the options leave the
    /// selection untouched. Returns whether the selection was applied.
    pub fn set_current(&mut self, name: &str) -> bool {
        let Some(format) = Format::from_name(name) else {
            tracing::debug!(name, "ignoring unknown format selection");
            return false;
        };
        if !self.options.contains(&format) {
            tracing::debug!(name, "ignoring format that is not an option");
            return false;
        }
        self.current = Some(format);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> FormatSelector {
        let mut selector = FormatSelector::new();
        selector.populate(&Format::ALL);
        selector
    }

    #[test]
    fn test_populate_creates_one_option_per_format_in_order() {
        let selector = populated();
        assert_eq!(selector.options(), &Format::ALL);
        assert_eq!(selector.current(), Some(Format::Markdown));
    }

    #[test]
    fn test_populate_twice_does_not_duplicate_options() {
        let mut selector = populated();
        selector.populate(&Format::ALL);
        assert_eq!(selector.options().len(), Format::ALL.len());
    }

    #[test]
    fn test_empty_selector_has_no_current() {
        let selector = FormatSelector::new();
        assert!(selector.options().is_empty());
        assert_eq!(selector.current(), None);
    }

    #[test]
    fn test_set_current_selects_known_format() {
        let mut selector = populated();
        assert!(selector.set_current("Vega-Lite"));
        assert_eq!(selector.current(), Some(Format::VegaLite));
    }

    #[test]
    fn test_set_current_ignores_unknown_name() {
        let mut selector = populated();
        selector.set_current("LaTeX");
        assert!(!selector.set_current("latex"));
        assert!(!selector.set_current("Graphviz"));
        assert_eq!(selector.current(), Some(Format::LaTeX));
    }

    #[test]
    fn test_set_current_ignores_format_outside_options() {
        let mut selector = FormatSelector::new();
        selector.populate(&[Format::Markdown, Format::Mermaid]);
        assert!(!selector.set_current("AsciiDoc"));
        assert_eq!(selector.current(), Some(Format::Markdown));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn unknown_names_never_change_selection(name in "\\PC*") {
                prop_assume!(Format::from_name(&name).is_none());
                let mut selector = populated();
                selector.set_current("PlantUML");
                prop_assert!(!selector.set_current(&name));
                prop_assert_eq!(selector.current(), Some(Format::PlantUML));
            }
        }
    }
}
