//! The closed set of supported source formats.

use std::fmt;

/// A markup, diagram or document format the playground can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Markdown,
    Mermaid,
    LaTeX,
    PlantUML,
    VegaLite,
    AsciiDoc,
}

impl Format {
    /// Every format, in registry order. The first entry is the default.
    pub const ALL: [Self; 6] = [
        Self::Markdown,
        Self::Mermaid,
        Self::LaTeX,
        Self::PlantUML,
        Self::VegaLite,
        Self::AsciiDoc,
    ];

    /// Display name, also the value accepted by `?format=` and `--format`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Markdown => "Markdown",
            Self::Mermaid => "Mermaid",
            Self::LaTeX => "LaTeX",
            Self::PlantUML => "PlantUML",
            Self::VegaLite => "Vega-Lite",
            Self::AsciiDoc => "AsciiDoc",
        }
    }

    /// Look up a format by its exact, case-sensitive display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.name() == name)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
