//! A stored blog post.

use serde::Serialize;

use super::EntryId;

/// One post as read back from the entry store.
///
/// `title` and `text` are kept exactly as submitted. Escaping happens at
/// render time: the title is untrusted, the text is trusted markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Store-assigned identifier.
    pub id: EntryId,
    /// Post title, raw.
    pub title: String,
    /// Post body, raw.
    pub text: String,
}

impl Entry {
    /// Returns `true` if `needle` occurs in the title or the text.
    ///
    /// Literal, case-sensitive match; an empty needle matches everything.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.title.contains(needle) || self.text.contains(needle)
    }
}
