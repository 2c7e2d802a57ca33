use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use anyhow::{Context, Result};

use crate::format::Format;
use crate::render::{Completion, RenderError, RenderJob, RenderToken};
use crate::session::{Message, Model, Session, update};
use crate::templates;
use crate::watcher::SourceWatcher;

/// Where the rendered surface goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `-` means stdout; anything else is a file path.
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdout
        } else {
            Self::File(path.to_path_buf())
        }
    }
}

/// Runs deferred jobs on worker threads and reports back on `tx`.
pub(super) struct JobRunner<E> {
    tx: Sender<E>,
}

impl<E: From<Completion> + Send + 'static> JobRunner<E> {
    pub(super) const fn new(tx: Sender<E>) -> Self {
        Self { tx }
    }

    pub(super) fn spawn(&self, job: RenderJob) {
        let tx = self.tx.clone();
        let token = job.token();
        let format = job.format();
        let spawned = std::thread::Builder::new()
            .name(format!("render-{}", token.0))
            .spawn(move || {
                let completion = job.run();
                // The session may have ended; nothing left to apply to.
                let _ = tx.send(completion.into());
            });
        if let Err(err) = spawned {
            self.report_spawn_failure(token, format, &err);
        }
    }

    /// Answer a job that never ran with a failed completion, so the session
    /// leaves the rendering phase.
    pub(super) fn report_spawn_failure(
        &self,
        token: RenderToken,
        format: Format,
        err: &std::io::Error,
    ) {
        tracing::error!(%token, %format, %err, "failed to spawn render worker");
        let completion = Completion {
            token,
            format,
            result: Err(RenderError::conversion(
                format,
                format!("failed to spawn render worker: {err}"),
            )),
        };
        let _ = self.tx.send(completion.into());
    }
}

impl Session {
    /// Dispatch the pending render. A deferred job is handed to `spawn`.
    pub(super) fn dispatch_pending(&self, model: &mut Model, spawn: impl FnOnce(RenderJob)) {
        if let Some(job) = model.render_pending(&self.dispatcher) {
            spawn(job);
        }
    }

    /// Dispatch the pending render and run any deferred job to completion
    /// on this thread.
    pub(super) fn render_blocking(&self, model: Model) -> Model {
        let mut model = model;
        let mut job = None;
        self.dispatch_pending(&mut model, |j| job = Some(j));
        match job {
            Some(job) => update(model, Message::RenderCompleted(job.run())),
            None => model,
        }
    }

    /// Copy an example that replaced the text area into the source file.
    pub(super) fn sync_text_area(
        &self,
        model: &mut Model,
        watcher: Option<&mut SourceWatcher>,
    ) -> Result<()> {
        if !model.text_area_replaced {
            return Ok(());
        }
        model.text_area_replaced = false;
        let Some(path) = &self.source_path else {
            return Ok(());
        };
        if let Some(watcher) = watcher {
            watcher.mark_seen(&model.state.source);
        }
        std::fs::write(path, &model.state.source)
            .with_context(|| format!("Failed to write source {}", path.display()))?;
        crate::perf::log_event(
            "text_area.write",
            format!("path={} format={}", path.display(), model.state.format),
        );
        Ok(())
    }

    /// The bytes written for the current surface.
    pub(super) fn output_document(&self, model: &Model) -> Result<String> {
        if self.fragment {
            return Ok(model.surface.html().to_string());
        }
        templates::page(model.current_format(), model.surface.html(), self.refresh_secs)
            .context("Failed to render preview page")
    }

    /// Write the surface if it changed since `last_revision`.
    pub(super) fn flush_output(&self, model: &Model, last_revision: &mut Option<u64>) -> Result<()> {
        let revision = model.surface.revision();
        if *last_revision == Some(revision) {
            return Ok(());
        }
        let document = self.output_document(model)?;
        match &self.output {
            OutputTarget::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(document.as_bytes())?;
                if !document.ends_with('\n') {
                    out.write_all(b"\n")?;
                }
                out.flush()?;
            }
            OutputTarget::File(path) => {
                std::fs::write(path, &document)
                    .with_context(|| format!("Failed to write output {}", path.display()))?;
            }
        }
        *last_revision = Some(revision);
        crate::perf::log_event("output.flush", format!("revision={revision}"));
        Ok(())
    }
}
