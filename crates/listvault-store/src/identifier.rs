use listvault_verify::Md5Hasher;

/// Extension of every stored list.
pub const ARTIFACT_EXTENSION: &str = "txt";

/// Stable storage identifier for a source URL: hex MD5 of the URL bytes plus
/// `.txt`.
///
/// Depends on the URL alone, never the content, so the same URL always lands
/// on the same path.
///
/// ```
/// assert_eq!(
///     listvault_store::identifier_for("https://example.org/list.txt"),
///     "13e54af0bc7eefaad97e885deebccda4.txt",
/// );
/// ```
pub fn identifier_for(url: &str) -> String {
    format!("{}.{ARTIFACT_EXTENSION}", Md5Hasher::hex_digest(url.as_bytes()))
}
