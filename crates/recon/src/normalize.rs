//! Match-key derivation from noisy display names.

/// Derive the canonical match key for a display name: bracketed footnote
/// segments (`[5]`, `[a]`) are removed, accented Latin letters fold to their
/// base ASCII letter, then only ASCII letters and digits survive, lowercased.
/// Punctuation, parenthetical qualifiers, and whitespace all fall away.
///
/// Lossy on purpose — names differing only in accents or non-alphanumeric
/// content conflate, which buys join recall across differently-formatted
/// sources.
pub fn normalize(raw_name: &str) -> String {
    strip_footnotes(raw_name)
        .chars()
        .map(fold_diacritic)
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Map accented Latin letters to their base ASCII letter. Covers the Latin-1
/// Supplement and Latin Extended-A letters that show up in scraped country
/// names; anything outside those blocks passes through (and is then dropped
/// by the alphanumeric filter).
fn fold_diacritic(c: char) -> char {
    match c {
        'À'..='Å' | 'à'..='å' | 'Ā'..='ą' | 'Æ' | 'æ' => 'a',
        'Ç' | 'ç' | 'Ć'..='č' => 'c',
        'Ð' | 'ð' | 'Ď'..='đ' => 'd',
        'È'..='Ë' | 'è'..='ë' | 'Ē'..='ě' => 'e',
        'Ĝ'..='ģ' => 'g',
        'Ĥ'..='ħ' => 'h',
        'Ì'..='Ï' | 'ì'..='ï' | 'Ĩ'..='ı' => 'i',
        'Ĵ' | 'ĵ' => 'j',
        'Ķ'..='ĸ' => 'k',
        'Ĺ'..='ł' => 'l',
        'Ñ' | 'ñ' | 'Ń'..='ň' => 'n',
        'Ò'..='Ö' | 'Ø' | 'ò'..='ö' | 'ø' | 'Ō'..='ő' | 'Œ' | 'œ' => 'o',
        'Ŕ'..='ř' => 'r',
        'ß' | 'Ś'..='š' => 's',
        'Ţ'..='ŧ' => 't',
        'Ù'..='Ü' | 'ù'..='ü' | 'Ũ'..='ų' => 'u',
        'Ŵ' | 'ŵ' => 'w',
        'Ý' | 'ý' | 'ÿ' | 'Ŷ' | 'ŷ' | 'Ÿ' => 'y',
        'Ź'..='ž' => 'z',
        _ => c,
    }
}

/// Remove every closed `[...]` segment. An unclosed bracket is left alone;
/// the alphanumeric filter keeps its content, matching how the scraped
/// sources render broken markup.
fn strip_footnotes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('[') {
        match rest[start..].find(']') {
            Some(offset) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + offset + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footnote_matches_plain() {
        assert_eq!(normalize("United States[a]"), normalize("united states"));
        assert_eq!(normalize("Japan[5]"), "japan");
    }

    #[test]
    fn multiple_footnotes_removed() {
        assert_eq!(normalize("Congo[1][note 2]"), "congo");
    }

    #[test]
    fn unclosed_bracket_content_survives() {
        assert_eq!(normalize("Japan[5"), "japan5");
    }

    #[test]
    fn punctuation_and_whitespace_fold() {
        assert_eq!(normalize("  Côte d'Ivoire "), "cotedivoire");
        assert_eq!(normalize("Korea, South"), "koreasouth");
        assert_eq!(normalize("Congo (DRC)"), "congodrc");
    }

    #[test]
    fn diacritic_spellings_share_a_key() {
        assert_eq!(normalize("Côte d'Ivoire"), normalize("Cote dIvoire"));
        assert_eq!(normalize("São Tomé and Príncipe"), "saotomeandprincipe");
        assert_eq!(normalize("Curaçao"), "curacao");
        assert_eq!(normalize("Åland Islands"), "alandislands");
        // Non-Latin scripts are outside the fold and still drop out.
        assert_eq!(normalize("日本 Japan"), "japan");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" [1] "), "");
    }

    #[test]
    fn already_normalized_is_fixed_point() {
        let once = normalize("Japan[5]");
        assert_eq!(normalize(&once), once);
    }
}
