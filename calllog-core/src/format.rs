//! Formatting helpers for showing a payload to a person.

use crate::encode::EncodedPayload;

/// Characters shown in an on-screen preview
pub const PREVIEW_CHARS: usize = 4000;

/// First `max_chars` characters of the payload.
///
/// Display only; the uploaded payload is never truncated.
pub fn preview(payload: &EncodedPayload, max_chars: usize) -> &str {
    let text = payload.as_str();
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Whether [`preview`] would cut the payload short.
pub fn is_truncated(payload: &EncodedPayload, max_chars: usize) -> bool {
    payload.as_str().char_indices().nth(max_chars).is_some()
}
