//! playmark - a multi-format markup playground.
//!
//! # Usage
//!
//! ```bash
//! playmark notes.md
//! playmark --format LaTeX --watch scratch.tex
//! playmark --url 'https://play.example/?format=Mermaid' -o - --fragment
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use playmark::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use playmark::perf;
use playmark::query;
use playmark::registry::FormatRegistry;
use playmark::selector::FormatSelector;
use playmark::session::{OutputTarget, Session};

const DEFAULT_OUT: &str = "playmark-preview.html";
const WATCH_REFRESH_SECS: u32 = 2;

/// Render Markdown, Mermaid, LaTeX, PlantUML, Vega-Lite and AsciiDoc to HTML
#[derive(Parser, Debug)]
#[command(name = "playmark", version, about, long_about = None)]
struct Cli {
    /// File used as the text area
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Format to start with (exact name, e.g. "Vega-Lite")
    #[arg(long, value_name = "NAME")]
    format: Option<String>,

    /// Page address whose `format` query parameter picks the format
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Preview file, or `-` for stdout
    #[arg(short, long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Watch SOURCE for edits and read commands from stdin
    #[arg(short, long)]
    watch: bool,

    /// Write only the rendered content, without the page shell
    #[arg(long)]
    fragment: bool,

    /// Reload interval for the preview page, in seconds
    #[arg(long, value_name = "SECS")]
    refresh: Option<u32>,

    /// Print the available formats and exit
    #[arg(long)]
    list: bool,

    /// Print render timings to stderr
    #[arg(long)]
    perf: bool,

    /// Write detailed render/watch debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn list_formats() {
    let registry = FormatRegistry::new();
    let mut selector = FormatSelector::default();
    selector.populate(registry.formats());
    for format in selector.options() {
        println!("{format}");
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();

    if cli.list {
        list_formats();
        return Ok(());
    }

    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os(perf::DEBUG_LOG_ENV).map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        tracing::warn!(
            path = %render_debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            %err,
            "failed to initialize render debug log"
        );
    }

    let hint = query::resolve_format_hint(
        cli_flags.format.as_deref(),
        cli.url.as_deref(),
        file_flags.format.as_deref(),
    );
    let out = effective.out.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUT));
    let output = OutputTarget::from_path(&out);
    if effective.watch && output == OutputTarget::Stdout {
        anyhow::bail!("Watch mode needs a file for --out");
    }
    let refresh = effective
        .refresh
        .or_else(|| effective.watch.then_some(WATCH_REFRESH_SECS))
        .filter(|&secs| secs > 0);

    let session = Session::new(output)
        .with_source_path(cli.source)
        .with_watch(effective.watch)
        .with_fragment(effective.fragment)
        .with_format_hint(hint)
        .with_refresh_secs(refresh);

    session.run().context("Session error")
}
