use crate::error::{Result, VerificationError};
use crate::header::{find_checksum_header, strip_checksum_header};
use crate::normalize::{document_checksum, normalize, strip_padding};

/// Outcome of a verification that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The embedded checksum matched the recomputed one.
    Verified { checksum: String },
    /// No comparison was made.
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The source URL belongs to an origin exempt from verification.
    TrustedOrigin,
    /// The document carries no checksum header.
    NoChecksum,
}

impl Verdict {
    pub fn is_verified(&self) -> bool { matches!(self, Verdict::Verified { .. }) }
}

/// Verify a document's embedded checksum against its content.
pub fn verify_document(bytes: &[u8]) -> Result<Verdict> {
    let text = std::str::from_utf8(bytes)?;

    let Some(header) = find_checksum_header(text) else {
        return Ok(Verdict::Skipped(SkipReason::NoChecksum));
    };

    let expected = strip_padding(header.token);
    let body = normalize(&strip_checksum_header(text, &header));
    let actual = document_checksum(&body);

    if expected == actual {
        Ok(Verdict::Verified { checksum: actual })
    } else {
        Err(VerificationError::Mismatch {
            expected: expected.to_string(),
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "[Adblock Plus 2.0]\n! Title: Test\n||example.com^\n";
    const BODY_SUM: &str = "UkmRDEFMpQESMcvQghYxUA";

    fn with_header(token: &str) -> String {
        format!("[Adblock Plus 2.0]\n! Checksum: {token}\n! Title: Test\n||example.com^\n")
    }

    #[test]
    fn valid_checksum_passes() {
        let doc = with_header(BODY_SUM);
        let verdict = verify_document(doc.as_bytes()).unwrap();
        assert_eq!(verdict, Verdict::Verified { checksum: BODY_SUM.to_string() });
    }

    #[test]
    fn padded_token_passes() {
        let doc = with_header(&format!("{BODY_SUM}=="));
        assert!(verify_document(doc.as_bytes()).unwrap().is_verified());
    }

    #[test]
    fn crlf_and_trailing_newlines_pass() {
        let doc = with_header(BODY_SUM).replace('\n', "\r\n") + "\r\n\r\n";
        assert!(verify_document(doc.as_bytes()).unwrap().is_verified());
    }

    #[test]
    fn mutated_body_fails() {
        let doc = with_header(BODY_SUM).replace("example.com", "example.org");
        match verify_document(doc.as_bytes()) {
            Err(VerificationError::Mismatch { expected, actual }) => {
                assert_eq!(expected, BODY_SUM);
                assert_eq!(actual, "wzpDWHpsdwnjYOmG1BhrjA");
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn every_single_byte_mutation_fails() {
        let doc = with_header(BODY_SUM);
        let header_end = doc.find("! Title").unwrap();
        for i in header_end..doc.len() - 1 {
            let mut bytes = doc.clone().into_bytes();
            bytes[i] = if bytes[i] == b'x' { b'y' } else { b'x' };
            assert!(verify_document(&bytes).is_err(), "mutation at {i} passed");
        }
    }

    #[test]
    fn missing_header_is_skipped() {
        let verdict = verify_document(BODY.as_bytes()).unwrap();
        assert_eq!(verdict, Verdict::Skipped(SkipReason::NoChecksum));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let err = verify_document(&[b'!', 0xff, 0xfe, b'\n']).unwrap_err();
        assert!(matches!(err, VerificationError::NotUtf8(_)));
    }
}
