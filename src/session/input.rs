//! Console commands read from stdin in watch mode.

use crate::session::Message;

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward to the session.
    Send(Message),
    /// Print the selector options.
    ListFormats,
    /// Print the command summary.
    Help,
    /// Blank line.
    Nothing,
    /// Anything else, kept for the error message.
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  format <NAME>   switch format (replaces the source with its example)
  reset           reload the current format's example
  formats         list available formats
  help            show this help
  quit            exit";

/// Map one console line to a command.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));
    match word {
        "" => Command::Nothing,
        "format" | "f" if !rest.is_empty() => {
            Command::Send(Message::FormatSelected(rest.to_string()))
        }
        "reset" | "r" => Command::Send(Message::Reset),
        "formats" | "ls" => Command::ListFormats,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Send(Message::Quit),
        _ => Command::Unknown(line.to_string()),
    }
}
