//! Completion provider seam
//!
//! Every language-generation backend sits behind [`CompletionProvider`].
//! Constrained mode returns one member of a caller-supplied label set.

use crate::models::Message;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Generate a reply for `messages`.
    ///
    /// With `constrained_to`, the returned string is guaranteed to be one of
    /// the supplied labels, or the call fails with an upstream error.
    async fn complete(
        &self,
        messages: &[Message],
        constrained_to: Option<&[&str]>,
    ) -> Result<String>;
}

/// Coerce raw model output onto a closed label set.
///
/// Accepts the bare label, quoted or fenced forms, and the
/// `"content": "<label>"` shape the classifier prompt demonstrates.
/// Falls back to a single whole-word mention; ambiguous text is rejected.
pub fn match_label<'a>(raw: &str, labels: &[&'a str]) -> Option<&'a str> {
    let mut cleaned = raw.trim().trim_matches('`').trim();

    if let Some(rest) = cleaned.strip_prefix("\"content\"") {
        cleaned = rest.trim_start().trim_start_matches(':').trim();
    } else if let Some(rest) = cleaned.strip_prefix("content:") {
        cleaned = rest.trim();
    }

    let cleaned = cleaned
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '.' || c.is_whitespace())
        .to_lowercase();

    if let Some(label) = labels
        .iter()
        .copied()
        .find(|l| l.eq_ignore_ascii_case(&cleaned))
    {
        return Some(label);
    }

    let words: Vec<&str> = cleaned
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let mut mentioned = labels
        .iter()
        .copied()
        .filter(|l| words.iter().any(|w| w.eq_ignore_ascii_case(l)));

    match (mentioned.next(), mentioned.next()) {
        (Some(label), None) => Some(label),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: &[&str] = &["executive", "finance", "hr", "legal"];

    #[test]
    fn test_exact_and_decorated_labels() {
        assert_eq!(match_label("hr", LABELS), Some("hr"));
        assert_eq!(match_label("  Finance\n", LABELS), Some("finance"));
        assert_eq!(match_label("\"legal\"", LABELS), Some("legal"));
        assert_eq!(match_label("`executive`", LABELS), Some("executive"));
        assert_eq!(match_label("\"content\": \"hr\"", LABELS), Some("hr"));
        assert_eq!(match_label("content: finance.", LABELS), Some("finance"));
    }

    #[test]
    fn test_single_mention_in_sentence() {
        assert_eq!(
            match_label("This belongs to the legal team.", LABELS),
            Some("legal")
        );
    }

    #[test]
    fn test_rejects_ambiguous_or_foreign_output() {
        assert_eq!(match_label("either hr or legal", LABELS), None);
        assert_eq!(match_label("marketing", LABELS), None);
        assert_eq!(match_label("", LABELS), None);
        // substring of a longer word is not a mention
        assert_eq!(match_label("threshold", LABELS), None);
    }
}
