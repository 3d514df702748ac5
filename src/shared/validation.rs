use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters that are unsafe in a file name on common platforms.
    /// Control characters plus the Windows reserved set.
    pub static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r#"[\x00-\x1f\x7f<>:"|?*]"#).unwrap();
}

/// Reduce a client supplied name to a bare, safe file name.
///
/// Directory components are dropped, unsafe characters become `_`, and
/// leading dots/whitespace are trimmed. Returns `None` when nothing usable
/// is left.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(base, "_");
    let trimmed = cleaned
        .trim()
        .trim_start_matches('.')
        .trim_end_matches(['.', ' '])
        .trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
