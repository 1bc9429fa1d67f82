//! Text escaping and URL checks shared by every block renderer and the
//! template assembler.

/// Escape text for use in HTML text content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// URL schemes an image source may use.
const ALLOWED_SCHEMES: &[&str] = &["http:", "https:"];

/// Whether `url` is safe to place in a `src` attribute.
///
/// Accepts absolute `http(s)` URLs, root/relative paths and inline
/// `data:image/` payloads. Anything carrying another scheme
/// (`javascript:`, `vbscript:`, ...) is rejected.
pub fn is_valid_url(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() || url.chars().any(char::is_whitespace) {
        return false;
    }

    let lower = url.to_ascii_lowercase();
    if lower.starts_with("data:image/") {
        return true;
    }

    match lower.find(':') {
        Some(colon) => {
            // A colon after the first path separator belongs to the path, not a scheme
            let first_separator = lower.find(['/', '?', '#']).unwrap_or(lower.len());
            if colon > first_separator {
                return true;
            }
            let scheme = &lower[..=colon];
            ALLOWED_SCHEMES.contains(&scheme) && lower[colon + 1..].starts_with("//")
        }
        None => true,
    }
}
