//! Session controller.
//!
//! This module follows The Elm Architecture (TEA):
//! - [`Model`]: the complete session state
//! - [`Message`]: text edits, format changes, resets, render completions
//! - [`update`]: pure state transitions
//! - [`Session::run`]: dispatches renders and writes the output

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use effects::OutputTarget;
pub use input::{Command, parse_command};
pub use model::{Model, Phase, SessionState};
pub use update::{Message, update};

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::render::Dispatcher;

/// Owns the session configuration and drives a [`Model`].
pub struct Session {
    source_path: Option<PathBuf>,
    output: OutputTarget,
    watch_enabled: bool,
    fragment: bool,
    hint: Option<String>,
    refresh_secs: Option<u32>,
    dispatcher: Dispatcher,
}

impl Session {
    /// Create a session writing its output to `output`.
    pub fn new(output: OutputTarget) -> Self {
        Self {
            source_path: None,
            output,
            watch_enabled: false,
            fragment: false,
            hint: None,
            refresh_secs: None,
            dispatcher: Dispatcher::default(),
        }
    }

    /// Use a file as the text area.
    pub fn with_source_path(mut self, path: Option<PathBuf>) -> Self {
        self.source_path = path;
        self
    }

    /// Keep running and re-render on every edit of the source file.
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Write only the rendered fragment instead of a full page.
    pub const fn with_fragment(mut self, enabled: bool) -> Self {
        self.fragment = enabled;
        self
    }

    /// Preselect a format by name; unknown names are ignored.
    pub fn with_format_hint(mut self, hint: Option<String>) -> Self {
        self.hint = hint;
        self
    }

    /// Ask the browser to reload the preview page periodically.
    pub const fn with_refresh_secs(mut self, secs: Option<u32>) -> Self {
        self.refresh_secs = secs;
        self
    }

    /// Replace the rendering capabilities.
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// The initial model, with the source file applied as an edit when it
    /// already has contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the source file exists but cannot be read.
    pub fn initial_model(&self) -> Result<Model> {
        let mut model = Model::init(self.hint.as_deref());
        if let Some(path) = &self.source_path
            && path.exists()
        {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read source {}", path.display()))?;
            if !(self.watch_enabled && text.is_empty()) {
                model = update(model, Message::SourceEdited(text));
            }
        }
        Ok(model)
    }

    /// Render once, or keep rendering on edits in watch mode.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failures. Render failures are written to the
    /// output, not returned.
    pub fn run(&self) -> Result<()> {
        let model = self.initial_model()?;
        if self.watch_enabled {
            return self.event_loop(model);
        }
        let model = self.render_blocking(model);
        let mut last_revision = None;
        self.flush_output(&model, &mut last_revision)
    }
}
