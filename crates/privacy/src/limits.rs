//! Size limits for captured values.

/// Maximum characters of a public value that may leave the field.
pub const MAX_VALUE_LEN: usize = 1000;

/// Longest mask emitted for a secret.
pub const MAX_MASK_LEN: usize = 8;

pub const MASK_CHAR: char = '*';

/// Truncate to `max_chars` characters. Returns the text and whether it was cut.
pub fn truncate_chars(content: &str, max_chars: usize) -> (String, bool) {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (content[..byte_idx].to_string(), true),
        None => (content.to_string(), false),
    }
}
