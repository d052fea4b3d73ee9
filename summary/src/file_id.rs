use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

static NON_WORD: OnceLock<Regex> = OnceLock::new();

/// Opaque handle that groups a summary and its follow-up questions on the server.
///
/// Derived from the PDF URL as `fid_<hash>_<segment>`, where `hash` is the
/// 32-bit polynomial hash of the trimmed, lower-cased URL and `segment` is its
/// last path segment with non-word characters replaced by `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn from_url(url: &str) -> Self {
        let normalized = url.trim().to_lowercase();
        let last_segment = normalized.rsplit('/').next().unwrap_or_default();
        let mut segment = sanitize_segment(last_segment);
        if segment.is_empty() {
            segment = "file".to_string();
        }

        Self(format!("fid_{:x}_{}", hash32(&normalized), segment))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FileId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `hash = hash * 31 + unit (mod 2^32)` over the UTF-16 code units of `text`.
pub fn hash32(text: &str) -> u32 {
    text.encode_utf16()
        .fold(0u32, |hash, unit| hash.wrapping_mul(31).wrapping_add(u32::from(unit)))
}

/// Replaces every character outside `[A-Za-z0-9_]` with `_`, one per UTF-16 code unit.
pub fn sanitize_segment(segment: &str) -> String {
    let re = NON_WORD.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid regex"));
    re.replace_all(segment, |caps: &Captures| "_".repeat(caps[0].encode_utf16().count()))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_falls_back_to_file() {
        assert_eq!(FileId::from_url("").as_str(), "fid_0_file");
        assert_eq!(FileId::from_url("   ").as_str(), "fid_0_file");
    }

    #[test]
    fn hash_matches_known_values() {
        assert_eq!(hash32(""), 0);
        assert_eq!(hash32("a"), 97);
        assert_eq!(hash32("ab"), 97 * 31 + 98);
        // 31^7 overflows 32 bits, so this exercises the wrap-around.
        let expected = "abcdefgh"
            .bytes()
            .fold(0u64, |h, b| (h * 31 + u64::from(b)) % (1u64 << 32)) as u32;
        assert_eq!(hash32("abcdefgh"), expected);
    }

    #[test]
    fn arxiv_url_keeps_sanitized_basename() {
        let url = "https://arxiv.org/pdf/1234.pdf";
        let id = FileId::from_url(url);

        assert_eq!(id.as_str(), format!("fid_{:x}_1234_pdf", hash32(url)));
        assert_eq!(id, FileId::from_url(url));
    }

    #[test]
    fn normalization_ignores_case_and_surrounding_whitespace() {
        assert_eq!(
            FileId::from_url("  HTTPS://ARXIV.ORG/PDF/1234.PDF \n"),
            FileId::from_url("https://arxiv.org/pdf/1234.pdf")
        );
    }

    #[test]
    fn trailing_slash_yields_default_segment() {
        let id = FileId::from_url("https://example.com/docs/");
        assert!(id.as_str().ends_with("_file"), "{id}");
    }

    #[test]
    fn url_without_slash_uses_whole_string() {
        let id = FileId::from_url("report.pdf");
        assert_eq!(id.as_str(), format!("fid_{:x}_report_pdf", hash32("report.pdf")));
    }

    #[test]
    fn sanitize_counts_utf16_units() {
        assert_eq!(sanitize_segment("a-b c"), "a_b_c");
        assert_eq!(sanitize_segment("논문.pdf"), "___pdf");
        assert_eq!(sanitize_segment("x😀y"), "x__y");
        assert_eq!(sanitize_segment("keep_me_123"), "keep_me_123");
    }

    #[test]
    fn query_string_is_part_of_segment() {
        let id = FileId::from_url("https://host/paper.pdf?download=1");
        assert!(id.as_str().ends_with("_paper_pdf_download_1"), "{id}");
    }
}
