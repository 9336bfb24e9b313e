//! Fragment-level text normalization.
//!
//! Everything downstream (display, pattern matching, numeric parsing) runs
//! on the output of [`clean`], so entity decoding has to happen here —
//! some pages render `½` as `&#189;` and a result cell that still contains
//! the entity would never match a score pattern.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Named entities the results site actually emits. `&frac12;` shows up in
/// result cells; the rest is garden-variety table chrome.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&frac12;", "½"),
];

/// Strip tags, decode entities, collapse whitespace, trim.
pub fn clean(fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(fragment, " ");
    let decoded = decode_entities(&stripped);
    collapse_whitespace(&decoded)
}

/// Single left-to-right pass; a decoded replacement is never rescanned, so
/// `&amp;nbsp;` comes out as the literal text `&nbsp;` rather than a space.
/// Also used on extracted `href` values, where `&amp;` separates query
/// parameters.
pub(crate) fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    'outer: while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        for (entity, replacement) in NAMED_ENTITIES {
            if rest.starts_with(entity) {
                out.push_str(replacement);
                rest = &rest[entity.len()..];
                continue 'outer;
            }
        }
        if let Some((decoded, consumed)) = numeric_entity(rest) {
            out.push(decoded);
            rest = &rest[consumed..];
            continue;
        }
        out.push('&');
        rest = &rest[1..];
    }
    out.push_str(rest);
    out
}

/// `&#NNN;` with a decimal code point. Anything else stays as-is.
fn numeric_entity(s: &str) -> Option<(char, usize)> {
    let digits = s.strip_prefix("&#")?;
    let end = digits.find(';')?;
    if end == 0 || end > 7 {
        return None;
    }
    let code: u32 = digits[..end].parse().ok()?;
    Some((char::from_u32(code)?, end + 3))
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comma decimals become dot decimals before parsing; the site flips the
/// separator depending on the locale parameter. Unparsable input is `0.0`.
pub fn parse_locale_number(s: &str) -> f64 {
    s.trim().replace(',', ".").parse().unwrap_or(0.0)
}

/// Rank cells print as `5` or `5.`.
pub fn parse_rank(s: &str) -> Option<u32> {
    s.trim().trim_end_matches('.').parse().ok()
}

/// A rating cell is either all digits or a bare dash.
pub fn is_elo(s: &str) -> bool {
    let t = s.trim();
    t == "-" || (!t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_decodes_entities() {
        assert_eq!(clean("<td class=\"CRg1\">&frac12; - &#189;</td>"), "½ - ½");
        assert_eq!(clean("<b>TJ&nbsp;Bižuterie</b>"), "TJ Bižuterie");
        assert_eq!(clean("a &amp; b &lt;c&gt; &quot;A&quot;"), "a & b <c> \"A\"");
    }

    #[test]
    fn clean_is_idempotent() {
        let samples = [
            "<td>&frac12; - &#189;</td>",
            "  spaced \t out\n text ",
            "<tr class=\"CRg2\"><td>5</td><td>TJ \"A\"</td></tr>",
            "no markup at all",
            "&unknown; stays & alone",
        ];
        for sample in samples {
            let once = clean(sample);
            assert_eq!(clean(&once), once, "double clean changed {sample:?}");
        }
    }

    #[test]
    fn unknown_and_unterminated_entities_survive() {
        assert_eq!(clean("&bogus; &#; &#99999999; &"), "&bogus; &#; &#99999999; &");
    }

    #[test]
    fn locale_numbers_round_trip() {
        assert_eq!(parse_locale_number("4,5"), 4.5);
        assert_eq!(parse_locale_number("4.5"), 4.5);
        assert_eq!(parse_locale_number("21,0"), 21.0);
        assert_eq!(parse_locale_number(" 7 "), 7.0);
        assert_eq!(parse_locale_number("n/a"), 0.0);
    }

    #[test]
    fn rank_accepts_trailing_dot() {
        assert_eq!(parse_rank("5"), Some(5));
        assert_eq!(parse_rank("12."), Some(12));
        assert_eq!(parse_rank("Rg."), None);
        assert_eq!(parse_rank(""), None);
    }

    #[test]
    fn elo_cells() {
        assert!(is_elo("2105"));
        assert!(is_elo("-"));
        assert!(!is_elo(""));
        assert!(!is_elo("m 2105"));
        assert!(!is_elo("Novák"));
    }
}
