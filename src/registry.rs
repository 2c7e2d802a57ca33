//! Format registry: the ordered format list and one example per format.

use crate::format::Format;

const MARKDOWN_EXAMPLE: &str = "\
# Heading
This is **bold** text, and this is *italic*.

- List item 1
- List item 2

[Link to Google](https://google.com)";

const MERMAID_EXAMPLE: &str = "\
graph TD;
    A[Start] --> B{Any questions?};
    B -- Yes --> C[Answer];
    B -- No --> D[Finish];
    C --> D;";

const LATEX_EXAMPLE: &str = r"Euler's identity:
$$e^{i\pi} + 1 = 0$$

Quadratic formula:
$$x = \frac{-b \pm \sqrt{b^2-4ac}}{2a}$$";

const PLANTUML_EXAMPLE: &str = "\
@startuml
Alice -> Bob: Authentication request
Bob --> Alice: Response
@enduml";

const VEGA_LITE_EXAMPLE: &str = r#"{
  "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
  "description": "A simple bar chart.",
  "data": {
    "values": [
      {"a": "A", "b": 28}, {"a": "B", "b": 55}, {"a": "C", "b": 43},
      {"a": "D", "b": 91}, {"a": "E", "b": 81}, {"a": "F", "b": 53}
    ]
  },
  "mark": "bar",
  "encoding": {
    "x": {"field": "a", "type": "ordinal"},
    "y": {"field": "b", "type": "quantitative"}
  }
}"#;

const ASCIIDOC_EXAMPLE: &str = r#"= Document Title
Author <author@example.com>

This is an example AsciiDoc document.

== Section

* List item
* Another item

[source,python]
----
print("Hello, AsciiDoc!")
----"#;

/// Read-only mapping from format to its example source.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatRegistry;

impl FormatRegistry {
    pub const fn new() -> Self {
        Self
    }

    /// Registered formats, in order.
    pub const fn formats(&self) -> &'static [Format] {
        &Format::ALL
    }

    /// The canned example used to seed the text area.
    pub const fn example(&self, format: Format) -> &'static str {
        match format {
            Format::Markdown => MARKDOWN_EXAMPLE,
            Format::Mermaid => MERMAID_EXAMPLE,
            Format::LaTeX => LATEX_EXAMPLE,
            Format::PlantUML => PLANTUML_EXAMPLE,
            Format::VegaLite => VEGA_LITE_EXAMPLE,
            Format::AsciiDoc => ASCIIDOC_EXAMPLE,
        }
    }

    /// Find a registered format by exact name.
    pub fn lookup(&self, name: &str) -> Option<Format> {
        Format::from_name(name).filter(|format| self.formats().contains(format))
    }

    /// The format selected when no hint applies.
    pub const fn default_format(&self) -> Format {
        Format::ALL[0]
    }
}
