/// Characters kept when an entity is shown in listings and logs.
pub const DISPLAY_LENGTH: usize = 20;

/// Truncate to `DISPLAY_LENGTH` characters (not bytes).
pub fn short(text: &str) -> &str {
    match text.char_indices().nth(DISPLAY_LENGTH) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
