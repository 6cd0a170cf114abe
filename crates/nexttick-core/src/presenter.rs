//! Reasoning presentation.

use crate::Reasoning;

/// Text to display for a reasoning payload, or `None` when there is nothing to show.
///
/// A missing field and a blank string are both "nothing to show", never an error.
pub fn present(reasoning: &Reasoning) -> Option<&str> {
    reasoning
        .reasoning
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}
