use playmark::format::Format;
use playmark::prelude::*;
use playmark::query::format_hint;
use playmark::session::OutputTarget;

fn settle(mut model: Model, dispatcher: &Dispatcher) -> Model {
    if let Some(job) = model.render_pending(dispatcher) {
        model = update(model, Message::RenderCompleted(job.run()));
    }
    model
}

#[test]
fn test_selector_lists_every_format_in_registry_order() {
    let model = Model::init(None);
    let names: Vec<&str> = model.selector.options().iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        ["Markdown", "Mermaid", "LaTeX", "PlantUML", "Vega-Lite", "AsciiDoc"]
    );
}

#[test]
fn test_markdown_heading_renders() {
    let dispatcher = Dispatcher::default();
    let model = update(Model::init(None), Message::SourceEdited("# Title".into()));
    let model = settle(model, &dispatcher);
    assert_eq!(model.surface.html(), "<h1>Title</h1>\n");
}

#[test]
fn test_url_hint_preselects_asciidoc() {
    let hint = format_hint("?format=AsciiDoc");
    let model = Model::init(hint.as_deref());
    assert_eq!(model.selector.current(), Some(Format::AsciiDoc));
    assert_eq!(
        model.state.source,
        FormatRegistry::new().example(Format::AsciiDoc)
    );
}

#[test]
fn test_asciidoc_example_renders_heading() {
    let dispatcher = Dispatcher::default();
    let model = settle(Model::init(Some("AsciiDoc")), &dispatcher);
    let html = model.surface.html();
    assert!(!html.contains("render-error"), "{html}");
    assert!(html.contains("Section"));
}

#[test]
fn test_latex_example_is_typeset() {
    let dispatcher = Dispatcher::default();
    let model = settle(Model::init(Some("LaTeX")), &dispatcher);
    let html = model.surface.html();
    assert!(html.contains("katex"), "{html}");
    assert!(html.contains("Quadratic formula:"));
    assert!(!html.contains("$$"));
}

#[test]
fn test_mermaid_example_renders_svg() {
    let dispatcher = Dispatcher::default();
    let model = settle(Model::init(Some("Mermaid")), &dispatcher);
    assert!(model.surface.html().contains("<svg"));
}

#[test]
fn test_vega_lite_example_mounts_chart_without_actions() {
    let dispatcher = Dispatcher::default();
    let model = settle(Model::init(Some("Vega-Lite")), &dispatcher);
    let html = model.surface.html();
    assert!(html.contains("vegaEmbed("), "{html}");
    assert!(html.contains("\"actions\":false"));
}

#[test]
fn test_malformed_vega_lite_shows_error_block() {
    let dispatcher = Dispatcher::default();
    let model = update(Model::init(Some("Vega-Lite")), Message::SourceEdited("{not json".into()));
    let mut model = model;
    assert!(model.render_pending(&dispatcher).is_none());
    assert!(model.surface.html().contains("Render error:"));
}

#[test]
fn test_plantuml_shows_source_verbatim() {
    let dispatcher = Dispatcher::default();
    let model = update(
        Model::init(Some("PlantUML")),
        Message::SourceEdited("@startuml\nA -> B\n@enduml".into()),
    );
    let model = settle(model, &dispatcher);
    assert!(model.surface.html().contains("<pre>@startuml\nA -&gt; B\n@enduml</pre>"));
}

#[test]
fn test_one_shot_session_writes_full_page() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("chart.json");
    let out = dir.path().join("preview.html");
    std::fs::write(&source, r#"{"mark":"point"}"#).unwrap();

    Session::new(OutputTarget::File(out.clone()))
        .with_source_path(Some(source))
        .with_format_hint(format_hint("format=Vega-Lite"))
        .with_refresh_secs(Some(3))
        .run()
        .unwrap();

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("<div id=\"output\">"));
    assert!(html.contains("vega-embed"));
    assert!(html.contains("http-equiv=\"refresh\""));
    assert!(html.contains("vegaEmbed(\"#output\""));
}
