//! Permissive numeric-cell parsing.

/// Placeholder tokens scraped tables use for "no data". Compared after
/// trimming and ASCII-lowercasing.
const PLACEHOLDER_TOKENS: &[&str] = &["", "none", "n/a", "...", "\u{2026}", "\u{2014}", "\u{2013}"];

/// Parse a raw numeric-looking cell, or `None` for placeholders and garbage.
///
/// Currency symbols, thousands separators, footnote markers, and unit
/// suffixes are stripped before parsing; anything still unparseable is
/// absent, never an error. One malformed cell must not abort the batch.
pub fn sanitize(raw_value: &str) -> Option<f64> {
    let trimmed = raw_value.trim();
    let lowered = trimmed.to_ascii_lowercase();
    if PLACEHOLDER_TOKENS.contains(&lowered.as_str()) {
        return None;
    }

    let stripped: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    stripped.parse::<f64>().ok()
}
