use crate::render::Completion;
use crate::session::Model;

/// All possible events and actions in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The text area now holds this text
    SourceEdited(String),
    /// The format selector changed to this value
    FormatSelected(String),
    /// Reload the current format's example
    Reset,
    /// A deferred render finished
    RenderCompleted(Completion),
    /// End the session
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// Rendering itself is requested here and dispatched by the caller through
/// [`Model::render_pending`].
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::SourceEdited(text) => {
            model.edit_source(text);
        }
        Message::FormatSelected(name) => {
            // Unknown names are ignored entirely; edits survive a typo.
            if model.selector.set_current(&name) {
                model.load_example();
            }
        }
        Message::Reset => {
            model.load_example();
        }
        Message::RenderCompleted(completion) => {
            model.apply_completion(completion);
        }
        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}
