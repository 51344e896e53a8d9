use snip_core::EntryId;

/// One line of the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Anything that is not a keyword is taken as a URL, verbatim.
    Shorten(String),
    List,
    /// Copy an entry, or the latest result when no id is given.
    Copy(Option<EntryId>),
    Delete(EntryId),
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub const HELP: &str = "\
Type a URL to shorten it, or one of:
  list             show the history, newest first
  copy [ID]        copy an entry (or the latest result) to the clipboard
  delete ID        delete an entry
  help             show this text
  quit             leave the session";

pub fn parse_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplCommand::Empty;
    }

    let mut words = trimmed.split_whitespace();
    let keyword = words.next().unwrap_or_default();
    let arg = words.next();
    let extra = words.next();

    match (keyword.to_ascii_lowercase().as_str(), arg, extra) {
        ("list" | "ls" | "history", None, _) => ReplCommand::List,
        ("help" | "?", None, _) => ReplCommand::Help,
        ("quit" | "exit" | "q", None, _) => ReplCommand::Quit,
        ("copy" | "cp", None, _) => ReplCommand::Copy(None),
        ("copy" | "cp", Some(id), None) => match parse_id(id) {
            Ok(id) => ReplCommand::Copy(Some(id)),
            Err(msg) => ReplCommand::Invalid(msg),
        },
        ("delete" | "del" | "rm", Some(id), None) => match parse_id(id) {
            Ok(id) => ReplCommand::Delete(id),
            Err(msg) => ReplCommand::Invalid(msg),
        },
        ("delete" | "del" | "rm", None, _) => {
            ReplCommand::Invalid("delete needs an entry id".to_string())
        }
        _ => ReplCommand::Shorten(line.to_string()),
    }
}

fn parse_id(raw: &str) -> Result<EntryId, String> {
    raw.parse::<u64>()
        .map(EntryId)
        .map_err(|_| format!("{raw:?} is not an entry id"))
}
