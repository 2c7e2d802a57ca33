use std::io::BufRead;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::render::Completion;
use crate::session::effects::JobRunner;
use crate::session::input::{Command, HELP, parse_command};
use crate::session::{Message, Model, Session, update};
use crate::watcher::SourceWatcher;

const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Everything the loop waits on, funneled through one channel.
#[derive(Debug)]
pub(super) enum LoopEvent {
    Line(String),
    InputClosed,
    Completed(Completion),
}

impl From<Completion> for LoopEvent {
    fn from(completion: Completion) -> Self {
        Self::Completed(completion)
    }
}

fn spawn_stdin_reader(tx: Sender<LoopEvent>) -> Result<()> {
    std::thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(LoopEvent::Line(line)).is_err() {
                    return;
                }
            }
            let _ = tx.send(LoopEvent::InputClosed);
        })
        .context("Failed to spawn stdin reader")?;
    Ok(())
}

impl Session {
    /// Run the watch-mode loop until `quit` or end of input and watcher.
    pub(super) fn event_loop(&self, mut model: Model) -> Result<()> {
        let _run_scope = crate::perf::scope("session.event_loop");
        let source_path = self
            .source_path
            .clone()
            .context("Watch mode needs a SOURCE file to use as the text area")?;

        let (tx, rx) = mpsc::channel();
        let runner = JobRunner::new(tx.clone());
        spawn_stdin_reader(tx)?;

        let mut last_revision = None;
        self.step(&mut model, &runner, None, &mut last_revision)?;

        let mut watcher = match SourceWatcher::new(&source_path, WATCH_DEBOUNCE) {
            Ok(mut watcher) => {
                watcher.mark_seen(&model.state.source);
                Some(watcher)
            }
            Err(err) => {
                tracing::warn!(%err, path = %source_path.display(), "watch unavailable");
                crate::perf::log_event(
                    "watcher.error",
                    format!("failed path={} err={err}", source_path.display()),
                );
                None
            }
        };

        eprintln!(
            "watching {} as {} (type `help` for commands)",
            source_path.display(),
            model.current_format()
        );

        let mut input_open = true;
        while !model.should_quit {
            let mut messages = Vec::new();
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(LoopEvent::Line(line)) => {
                    if let Some(msg) = Self::handle_command(&model, parse_command(&line)) {
                        messages.push(msg);
                    }
                }
                Ok(LoopEvent::Completed(completion)) => {
                    messages.push(Message::RenderCompleted(completion));
                }
                Ok(LoopEvent::InputClosed) => {
                    input_open = false;
                    tracing::debug!("stdin closed; continuing on file changes only");
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if let Some(watcher) = watcher.as_mut() {
                match watcher.poll_edit() {
                    Ok(Some(text)) => messages.push(Message::SourceEdited(text)),
                    Ok(None) => {}
                    Err(err) => tracing::warn!(%err, "failed to read edited source"),
                }
            } else if !input_open {
                break;
            }

            for msg in messages {
                let switched = matches!(msg, Message::FormatSelected(_) | Message::Reset);
                model = update(model, msg);
                self.step(&mut model, &runner, watcher.as_mut(), &mut last_revision)?;
                if switched {
                    eprintln!("format: {}", model.current_format());
                }
            }
        }
        Ok(())
    }

    /// Turn a console command into a message, printing what needs printing.
    pub(super) fn handle_command(model: &Model, command: Command) -> Option<Message> {
        match command {
            Command::Send(msg) => {
                if let Message::FormatSelected(name) = &msg
                    && model.registry.lookup(name).is_none()
                {
                    eprintln!("unknown format: {name}");
                }
                Some(msg)
            }
            Command::ListFormats => {
                for &format in model.selector.options() {
                    let marker = if format == model.current_format() { "*" } else { " " };
                    eprintln!("{marker} {format}");
                }
                None
            }
            Command::Help => {
                eprintln!("{HELP}");
                None
            }
            Command::Nothing => None,
            Command::Unknown(line) => {
                eprintln!("unknown command: {line} (type `help`)");
                None
            }
        }
    }

    /// Side effects after every transition: write the text area file,
    /// dispatch the render, flush the output.
    pub(super) fn step(
        &self,
        model: &mut Model,
        runner: &JobRunner<LoopEvent>,
        watcher: Option<&mut SourceWatcher>,
        last_revision: &mut Option<u64>,
    ) -> Result<()> {
        self.sync_text_area(model, watcher)?;
        self.dispatch_pending(model, |job| runner.spawn(job));
        self.flush_output(model, last_revision)
    }
}
