//! Save-name validation.
//!
//! The server stores saved charts as plain files, so names must be legal on
//! both Unix and Windows. The rules here are the usual cross-platform
//! intersection: no path separators or shell-hostile characters, no control
//! characters, no DOS device names, no `.`/`..`.

/// Characters that are illegal in a filename on at least one platform.
const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Returns true when `name` must be rejected as a saved-chart name.
///
/// Re-evaluated on every edit of the save-name field, not only on submit, so
/// the save action's enabled state always reflects the current text.
pub fn invalid_filename(name: &str) -> bool {
    if name.is_empty() || name.len() > 255 {
        return true;
    }

    if name
        .chars()
        .any(|c| ILLEGAL_CHARS.contains(&c) || (c as u32) < 0x20)
    {
        return true;
    }

    if is_reserved_device(name) {
        return true;
    }

    matches!(name, "." | "..")
}

/// DOS reserved device names, matched case-insensitively and only when the
/// whole name is the device (e.g. "com1" but not "com1.txt" or "com10").
fn is_reserved_device(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    match lower.as_str() {
        "con" | "prn" | "aux" | "nul" => true,
        _ => {
            lower.len() == 4
                && (lower.starts_with("com") || lower.starts_with("lpt"))
                && lower.as_bytes()[3].is_ascii_digit()
        }
    }
}
