//! Locating the `! Checksum: ...` line publishers embed in list documents.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// `! Checksum: <base64>` at the start of a line, any case, terminated by a
/// newline. Separators between the keyword and the token may be any mix of
/// whitespace, `-` and `:`.
static CHECKSUM_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^\s*!\s*checksum[\s\-:]+([\w+/=]+).*\n")
        .expect("checksum header pattern compiles")
});

/// A checksum header found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumHeader<'a> {
    /// The declared checksum token, as written.
    pub token: &'a str,
    /// Byte range of the whole header match, including its newline.
    pub span: Range<usize>,
}

/// Find the first checksum header in `text`.
pub fn find_checksum_header(text: &str) -> Option<ChecksumHeader<'_>> {
    let caps = CHECKSUM_HEADER.captures(text)?;
    let whole = caps.get(0)?;
    let token = caps.get(1)?;
    Some(ChecksumHeader {
        token: token.as_str(),
        span:  whole.range(),
    })
}

/// `text` with exactly the given header removed.
pub fn strip_checksum_header(text: &str, header: &ChecksumHeader<'_>) -> String {
    let mut out = String::with_capacity(text.len() - header.span.len());
    out.push_str(&text[..header.span.start]);
    out.push_str(&text[header.span.end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_standard_header() {
        let doc = "[Adblock Plus 2.0]\n! Checksum: abc+/12\n! Title: x\n";
        let header = find_checksum_header(doc).unwrap();
        assert_eq!(header.token, "abc+/12");
        assert_eq!(&doc[header.span.clone()], "! Checksum: abc+/12\n");
    }

    #[test]
    fn header_is_case_insensitive_and_allows_dash() {
        let doc = "  !  CHECKSUM - Zm9v==\nrule\n";
        assert_eq!(find_checksum_header(doc).unwrap().token, "Zm9v==");
    }

    #[test]
    fn header_requires_bang_prefix() {
        assert!(find_checksum_header("Checksum: abc\n").is_none());
        assert!(find_checksum_header("# Checksum: abc\n").is_none());
    }

    #[test]
    fn header_requires_trailing_newline() {
        assert!(find_checksum_header("! Checksum: abc").is_none());
    }

    #[test]
    fn header_with_crlf_consumes_carriage_return() {
        let doc = "! Checksum: abc\r\nrule\r\n";
        let header = find_checksum_header(doc).unwrap();
        assert_eq!(header.token, "abc");
        assert_eq!(strip_checksum_header(doc, &header), "rule\r\n");
    }

    #[test]
    fn strip_removes_only_first_header() {
        let doc = "! Checksum: one\n! Checksum: two\nrule\n";
        let header = find_checksum_header(doc).unwrap();
        assert_eq!(header.token, "one");
        assert_eq!(strip_checksum_header(doc, &header), "! Checksum: two\nrule\n");
    }
}
