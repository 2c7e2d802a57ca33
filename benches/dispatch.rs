//! Benchmarks for the renderer dispatcher.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use playmark::format::Format;
use playmark::registry::FormatRegistry;
use playmark::render::{Dispatcher, RenderToken, parse_spec};
use playmark::surface::OutputSurface;

fn bench_markdown(c: &mut Criterion) {
    let dispatcher = Dispatcher::default();
    let source = FormatRegistry::new().example(Format::Markdown).repeat(20);

    c.bench_function("dispatch_markdown", |b| {
        b.iter(|| {
            let mut surface = OutputSurface::new();
            dispatcher
                .render(Format::Markdown, black_box(&source), RenderToken(1))
                .apply(&mut surface)
        });
    });
}

fn bench_plantuml_placeholder(c: &mut Criterion) {
    let dispatcher = Dispatcher::default();
    let source = FormatRegistry::new().example(Format::PlantUML);

    c.bench_function("dispatch_plantuml", |b| {
        b.iter(|| dispatcher.render(Format::PlantUML, black_box(source), RenderToken(1)));
    });
}

fn bench_vega_parse(c: &mut Criterion) {
    let source = FormatRegistry::new().example(Format::VegaLite);

    c.bench_function("vega_parse_spec", |b| {
        b.iter(|| parse_spec(black_box(source)));
    });
}

criterion_group!(
    benches,
    bench_markdown,
    bench_plantuml_placeholder,
    bench_vega_parse
);
criterion_main!(benches);
