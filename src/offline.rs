//! Offline completion provider
//!
//! Keeps the dispatcher functional without an LLM: constrained calls are
//! answered by keyword scoring, free-text calls by a canned reply that
//! names the active persona.

use crate::error::OrchestrationError;
use crate::models::{Message, Role};
use crate::provider::CompletionProvider;
use crate::Result;
use async_trait::async_trait;

/// Keywords scored per label
const LABEL_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "executive",
        &[
            "strategy", "vision", "leadership", "direction", "priorit", "board", "mission",
        ],
    ),
    (
        "finance",
        &[
            "budget", "expense", "accounting", "invest", "cash", "money", "cost", "profit",
            "forecast",
        ],
    ),
    (
        "hr",
        &[
            "hire", "hiring", "job", "opening", "payroll", "onboard", "employee", "recruit",
            "position", "salary",
        ],
    ),
    (
        "operations",
        &[
            "process", "logistic", "supply", "delivery", "shipment", "workflow", "inventory",
        ],
    ),
    (
        "marketing",
        &[
            "brand", "campaign", "advertis", "social media", "seo", "audience", "promotion",
        ],
    ),
    ("sales", &["deal", "lead", "crm", "pitch", "negotia", "client", "revenue", "quota"]),
    (
        "technology",
        &[
            "software", "server", "security", "network", "bug", "deploy", "vpn", "laptop", "api",
        ],
    ),
    (
        "legal",
        &[
            "law", "contract", "compliance", "regulat", "nda", "clause", "lawsuit", "governance",
        ],
    ),
];

pub struct OfflineProvider;

impl OfflineProvider {
    /// Highest keyword score wins; ties keep label-set order
    fn pick_label<'a>(text: &str, labels: &[&'a str]) -> Option<&'a str> {
        let text = text.to_lowercase();

        let score = |label: &str| {
            LABEL_KEYWORDS
                .iter()
                .find(|(name, _)| *name == label)
                .map(|(_, keywords)| keywords.iter().filter(|kw| text.contains(**kw)).count())
                .unwrap_or(0)
        };

        let mut best: Option<(&'a str, usize)> = None;
        for label in labels.iter().copied() {
            let s = score(label);
            if best.map_or(true, |(_, top)| s > top) {
                best = Some((label, s));
            }
        }
        best.map(|(label, _)| label)
    }
}

#[async_trait]
impl CompletionProvider for OfflineProvider {
    fn name(&self) -> &str {
        "offline"
    }

    async fn complete(
        &self,
        messages: &[Message],
        constrained_to: Option<&[&str]>,
    ) -> Result<String> {
        let user_text = messages
            .iter()
            .rev()
            .find(|m| m.role() == Role::User)
            .map(|m| m.content())
            .unwrap_or_default();

        if let Some(labels) = constrained_to {
            return Self::pick_label(user_text, labels)
                .map(str::to_string)
                .ok_or_else(|| {
                    OrchestrationError::Upstream("empty label set for offline provider".to_string())
                });
        }

        let persona = messages
            .iter()
            .find(|m| m.role() == Role::System)
            .map(|m| m.content())
            .unwrap_or("You are a helpful assistant.");
        let first_sentence = persona
            .split_inclusive('.')
            .next()
            .unwrap_or(persona)
            .trim();

        Ok(format!(
            "[offline] {} I received: \"{}\". Configure GEMINI_API_KEY for full answers.",
            first_sentence, user_text
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::prompts;

    #[tokio::test]
    async fn test_constrained_result_is_always_a_label() {
        let labels = Category::labels();
        let inputs = [
            "What job openings are available?",
            "Review this NDA",
            "Our VPN keeps dropping",
            "",
            "🤷",
            "completely unrelated chatter about the weather",
        ];

        for input in inputs {
            let label = OfflineProvider
                .complete(&[Message::user(input)], Some(&labels[..]))
                .await
                .unwrap();
            assert!(label.parse::<Category>().is_ok(), "{} -> {}", input, label);
        }
    }

    #[test]
    fn test_keyword_scoring() {
        let labels = Category::labels();
        assert_eq!(
            OfflineProvider::pick_label("What job openings are available?", &labels),
            Some("hr")
        );
        assert_eq!(
            OfflineProvider::pick_label("Please review the contract clause", &labels),
            Some("legal")
        );
        // no keyword hits: first label in the set
        assert_eq!(OfflineProvider::pick_label("hello", &labels), Some("executive"));
        assert_eq!(OfflineProvider::pick_label("hello", &[]), None);
    }

    #[tokio::test]
    async fn test_free_text_names_persona() {
        let reply = OfflineProvider
            .complete(
                &[
                    Message::system(prompts::persona(Category::Legal)),
                    Message::user("Is this enforceable?"),
                ],
                None,
            )
            .await
            .unwrap();

        assert!(reply.starts_with("[offline] You are the legal advisor"));
        assert!(reply.contains("Is this enforceable?"));
    }
}
