//! Issue message formatting.

use crate::rules::DeprecatedEntry;

/// Fixed lead-in of every deprecation message.
pub const MESSAGE_PREFIX: &str = "This API is deprecated for this project. ";

/// Builds the message reported for a matched entry.
///
/// `migration` is used verbatim; a non-empty `note` is appended in parentheses.
pub fn build_message(entry: &DeprecatedEntry) -> String {
    let migration = entry.migration.as_deref().unwrap_or("");
    let mut message = String::with_capacity(MESSAGE_PREFIX.len() + migration.len() + 16);
    message.push_str(MESSAGE_PREFIX);
    message.push_str(migration);

    if let Some(note) = entry.note.as_deref().filter(|n| !n.is_empty()) {
        message.push_str(" (");
        message.push_str(note);
        message.push(')');
    }

    message
}
