use crate::format::Format;
use crate::registry::FormatRegistry;
use crate::render::{Completion, Dispatcher, RenderJob, RenderToken};
use crate::selector::FormatSelector;
use crate::surface::OutputSurface;

/// The current format and the current text-area contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub format: Format,
    pub source: String,
}

impl SessionState {
    /// Replace the source with the registry example for `format`.
    #[must_use]
    pub fn load_example(self, registry: &FormatRegistry, format: Format) -> Self {
        Self {
            format,
            source: registry.example(format).to_string(),
        }
    }

    /// Overwrite the source verbatim.
    #[must_use]
    pub fn edit(self, source: String) -> Self {
        Self { source, ..self }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        let registry = FormatRegistry::new();
        let format = registry.default_format();
        Self {
            format,
            source: registry.example(format).to_string(),
        }
    }
}

/// Whether a render is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Rendering(RenderToken),
}

/// The complete session state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Default)]
pub struct Model {
    pub registry: FormatRegistry,
    pub selector: FormatSelector,
    pub state: SessionState,
    pub surface: OutputSurface,
    pub phase: Phase,
    /// Set when the text area was overwritten with an example and the
    /// backing file still needs the new contents.
    pub text_area_replaced: bool,
    pub should_quit: bool,
    last_token: RenderToken,
    pending_render: Option<RenderToken>,
}

impl Model {
    /// Build the initial session: populate the selector, apply the format
    /// hint if it names a known format, and load that format's example.
    pub fn init(hint: Option<&str>) -> Self {
        let mut model = Self::default();
        model.selector.populate(model.registry.formats());
        if let Some(name) = hint
            && !model.selector.set_current(name)
        {
            tracing::info!(name, "format hint does not name a known format");
        }
        model.load_example();
        model
    }

    /// Seed the text area with the selected format's example and request a
    /// render. Any edits in the text area are discarded.
    pub fn load_example(&mut self) {
        let format = self
            .selector
            .current()
            .unwrap_or_else(|| self.registry.default_format());
        let state = std::mem::take(&mut self.state);
        self.state = state.load_example(&self.registry, format);
        self.text_area_replaced = true;
        self.request_render();
    }

    /// Replace the text area contents and request a render.
    pub fn edit_source(&mut self, source: String) {
        let state = std::mem::take(&mut self.state);
        self.state = state.edit(source);
        self.text_area_replaced = false;
        self.request_render();
    }

    /// Issue a new token for the current state. Only the newest pending
    /// request is dispatched.
    pub fn request_render(&mut self) {
        self.last_token = self.last_token.next();
        self.pending_render = Some(self.last_token);
    }

    /// The newest token issued.
    pub const fn latest_token(&self) -> RenderToken {
        self.last_token
    }

    pub const fn has_pending_render(&self) -> bool {
        self.pending_render.is_some()
    }

    /// Dispatch the pending request, writing the result into the surface.
    ///
    /// Returns the deferred job, if the format has one.
    pub fn render_pending(&mut self, dispatcher: &Dispatcher) -> Option<RenderJob> {
        let token = self.pending_render.take()?;
        let job = dispatcher
            .render(self.state.format, &self.state.source, token)
            .apply(&mut self.surface);
        self.phase = if job.is_some() {
            Phase::Rendering(token)
        } else {
            Phase::Idle
        };
        job
    }

    /// Apply a finished job, unless a newer request superseded it.
    pub fn apply_completion(&mut self, completion: Completion) {
        let Completion {
            token,
            format,
            result,
        } = completion;
        if token != self.last_token {
            tracing::debug!(%token, latest = %self.last_token, %format, "discarding stale render");
            crate::perf::log_event(
                "render.stale",
                format!("token={token} latest={}", self.last_token),
            );
            return;
        }
        match result {
            Ok(html) => {
                self.surface.set_html(html);
                crate::perf::log_event("render.completed", format!("token={token} format={format}"));
            }
            Err(err) => {
                // Deferred failures are not caught into the surface; it keeps
                // whatever the capability left there.
                tracing::error!(%token, %format, %err, "deferred render failed");
                crate::perf::log_event("render.deferred_error", format!("token={token} err={err}"));
            }
        }
        self.phase = Phase::Idle;
    }

    pub fn current_format(&self) -> Format {
        self.state.format
    }
}
