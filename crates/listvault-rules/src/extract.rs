use std::borrow::Cow;

/// Line prefixes that never carry a rule.
pub const SKIPPED_PREFIXES: &[&str] = &["!", "data:"];

/// Characters that split tokens in addition to whitespace and other
/// punctuation.
pub const TOKEN_SEPARATORS: &[char] = &['-', '.', '_', '#', '$', ','];

/// One rule line from a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub text:        String,
    /// 1-based line number in the source document.
    pub line_number: usize,
}

/// Pull rule lines out of a list document.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. They are trimmed; blank lines,
/// comments (`!`) and `data:` lines are dropped; everything else is
/// lowercased.
pub fn extract_rules(text: &str) -> Vec<Rule> {
    lines(text)
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            if line.is_empty() || SKIPPED_PREFIXES.iter().any(|p| line.starts_with(p)) {
                return None;
            }
            Some(Rule {
                text:        line.to_lowercase(),
                line_number: index + 1,
            })
        })
        .collect()
}

fn lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(['\r', '\n']) {
            Some(at) => {
                let width = if current[at..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&current[at + width..]);
                Some(&current[..at])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

/// Decode a stored list, falling back to Latin-1 for non-UTF-8 bytes.
pub fn decode_list(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

/// Split a rule into search tokens.
pub fn tokenize(rule: &str) -> Vec<&str> {
    rule.split(|c: char| !c.is_alphanumeric() || TOKEN_SEPARATORS.contains(&c))
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_skips_comments_and_blanks() {
        let doc = "[Adblock Plus 2.0]\n! Title: Test\n\n  ||Ads.Example.COM^  \ndata:text/plain,x\n##.Banner\n";
        let rules = extract_rules(doc);

        assert_eq!(rules, vec![
            Rule { text: "[adblock plus 2.0]".into(), line_number: 1 },
            Rule { text: "||ads.example.com^".into(), line_number: 4 },
            Rule { text: "##.banner".into(), line_number: 6 },
        ]);
    }

    #[test]
    fn test_extract_handles_crlf() {
        let rules = extract_rules("! header\r\n||a.example^\r\n");
        assert_eq!(rules, vec![Rule { text: "||a.example^".into(), line_number: 2 }]);
    }

    #[test]
    fn test_extract_handles_bare_cr() {
        let rules = extract_rules("! header\r||a.example^\r||b.example^");
        assert_eq!(rules, vec![
            Rule { text: "||a.example^".into(), line_number: 2 },
            Rule { text: "||b.example^".into(), line_number: 3 },
        ]);
    }

    #[test]
    fn test_mixed_line_endings_keep_numbering() {
        let rules = extract_rules("||a^\r\n\r||b^\n\r\n||c^");
        let numbers: Vec<usize> = rules.iter().map(|r| r.line_number).collect();
        assert_eq!(numbers, vec![1, 3, 5]);
    }

    #[test]
    fn test_indented_comment_is_skipped() {
        assert!(extract_rules("   ! indented comment").is_empty());
    }

    #[test]
    fn test_decode_utf8_borrows() {
        assert!(matches!(decode_list("||é.example^".as_bytes()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_decode_latin1_fallback() {
        let decoded = decode_list(&[b'|', b'|', 0xE9, b'^']);
        assert_eq!(decoded, "||é^");
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("||ads.example-cdn.com^$third-party"), vec![
            "ads", "example", "cdn", "com", "third", "party"
        ]);
        assert_eq!(tokenize("##.ad_banner,#sponsor"), vec!["ad", "banner", "sponsor"]);
        assert!(tokenize("^$,").is_empty());
    }
}
