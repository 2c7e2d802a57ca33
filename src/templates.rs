//! HTML templates for the page shell and the fixed output blocks.
//!
//! All templates end in `.html`, so minijinja escapes interpolated values.

use minijinja::{Environment, context};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::format::Format;

/// Id of the element the rendered output lives in.
pub const OUTPUT_ID: &str = "output";

/// Reference PlantUML server, only named in the placeholder.
pub const PLANTUML_SERVER: &str = "http://www.plantuml.com/plantuml/svg/";

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>playmark · {{ format }}</title>
{%- if refresh_secs %}
<meta http-equiv="refresh" content="{{ refresh_secs }}">
{%- endif %}
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@0.16/dist/katex.min.css">
<script src="https://cdn.jsdelivr.net/npm/vega@5"></script>
<script src="https://cdn.jsdelivr.net/npm/vega-lite@5"></script>
<script src="https://cdn.jsdelivr.net/npm/vega-embed@6"></script>
<style>
body { font-family: sans-serif; margin: 2rem; }
#{{ output_id }} { border: 1px solid #ccc; padding: 1rem; min-height: 4rem; }
</style>
</head>
<body>
<h1>{{ format }}</h1>
<div id="{{ output_id }}">
{{ body|safe }}
</div>
</body>
</html>
"#;

const ERROR_BLOCK: &str =
    r#"<pre class="render-error" style="color: red;">Render error:
{{ message }}</pre>"#;

const PLANTUML_PLACEHOLDER: &str = r#"<p>PlantUML rendering needs the source to be specially encoded for {{ server|safe }}. A simple preview is not implemented.</p><p>Source:</p><pre>{{ source }}</pre>"#;

const VEGA_EMBED: &str = r#"<div class="vega-chart" data-target="{{ target }}"></div>
<script>vegaEmbed({{ target|tojson }}, {{ spec|tojson }}, {{ options|tojson }});</script>"#;

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    for (name, source) in [
        ("page.html", PAGE),
        ("error.html", ERROR_BLOCK),
        ("plantuml.html", PLANTUML_PLACEHOLDER),
        ("vega.html", VEGA_EMBED),
    ] {
        if let Err(err) = env.add_template(name, source) {
            tracing::error!(name, %err, "built-in template failed to compile");
        }
    }
    env
});

fn render(name: &str, ctx: minijinja::Value) -> Result<String, minijinja::Error> {
    TEMPLATES.get_template(name)?.render(ctx)
}

/// The visually flagged block shown in place of output after a failure.
///
/// # Errors
///
/// Returns an error if the built-in template cannot be rendered.
pub fn error_block(message: &str) -> Result<String, minijinja::Error> {
    render("error.html", context! { message })
}

/// Placeholder text plus the verbatim source in a preformatted block.
///
/// # Errors
///
/// Returns an error if the built-in template cannot be rendered.
pub fn plantuml_placeholder(source: &str) -> Result<String, minijinja::Error> {
    render(
        "plantuml.html",
        context! { source, server => PLANTUML_SERVER },
    )
}

/// A vega-embed mount point and call for `spec`.
///
/// # Errors
///
/// Returns an error if the built-in template cannot be rendered.
pub fn vega_embed<O: Serialize>(
    target: &str,
    spec: &serde_json::Value,
    options: &O,
) -> Result<String, minijinja::Error> {
    render(
        "vega.html",
        context! {
            target,
            spec => minijinja::Value::from_serialize(spec),
            options => minijinja::Value::from_serialize(options),
        },
    )
}

/// A complete preview document wrapping `body`.
///
/// # Errors
///
/// Returns an error if the built-in template cannot be rendered.
pub fn page(
    format: Format,
    body: &str,
    refresh_secs: Option<u32>,
) -> Result<String, minijinja::Error> {
    render(
        "page.html",
        context! {
            format => format.name(),
            body,
            refresh_secs,
            output_id => OUTPUT_ID,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_block_escapes_message() {
        let html = error_block("expected `}` <here>").unwrap();
        assert!(html.starts_with("<pre class=\"render-error\" style=\"color: red;\">"));
        assert!(html.contains("Render error:\nexpected `}` &lt;here&gt;"));
        assert!(html.ends_with("</pre>"));
    }

    #[test]
    fn test_plantuml_placeholder_escapes_source() {
        let html = plantuml_placeholder("@startuml\nA -> B\n@enduml").unwrap();
        assert!(html.contains("A simple preview is not implemented."));
        assert!(html.contains("<pre>@startuml\nA -&gt; B\n@enduml</pre>"));
        assert!(html.contains(PLANTUML_SERVER));
    }

    #[test]
    fn test_vega_embed_serializes_spec_and_options() {
        let spec = serde_json::json!({"mark": "bar"});
        let options = serde_json::json!({"actions": false});
        let html = vega_embed("#output", &spec, &options).unwrap();
        assert!(html.contains("vegaEmbed("));
        assert!(html.contains("\"mark\":\"bar\""));
        assert!(html.contains("\"actions\":false"));
    }

    #[test]
    fn test_vega_embed_cannot_break_out_of_script() {
        let spec = serde_json::json!({"description": "</script><b>"});
        let html = vega_embed("#output", &spec, &serde_json::json!({})).unwrap();
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[test]
    fn test_page_wraps_body_unescaped() {
        let html = page(Format::Markdown, "<h1>Title</h1>", None).unwrap();
        assert!(html.contains("<div id=\"output\">\n<h1>Title</h1>\n</div>"));
        assert!(html.contains("<title>playmark · Markdown</title>"));
        assert!(!html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn test_page_refresh_meta() {
        let html = page(Format::LaTeX, "", Some(2)).unwrap();
        assert!(html.contains("<meta http-equiv=\"refresh\" content=\"2\">"));
    }
}
