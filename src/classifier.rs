//! Intent Classifier
//!
//! Maps the latest user message onto exactly one [`Category`] using the
//! completion provider's constrained mode. Earlier turns and the previous
//! classification are never sent, so each turn is classified independently.

use crate::error::OrchestrationError;
use crate::models::{Category, Message};
use crate::prompts::CLASSIFIER_PROMPT;
use crate::provider::CompletionProvider;
use crate::state::ConversationState;
use crate::Result;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct IntentClassifier {
    provider: Arc<dyn CompletionProvider>,
}

impl IntentClassifier {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Classify the most recent user message in `state`
    pub async fn classify(&self, state: &ConversationState) -> Result<Category> {
        let last_user = state.last_user_message().ok_or_else(|| {
            OrchestrationError::Precondition("no user message to classify".to_string())
        })?;

        let messages = [
            Message::system(CLASSIFIER_PROMPT),
            Message::user(last_user.content()),
        ];
        let labels = Category::labels();

        let label = self.provider.complete(&messages, Some(&labels[..])).await?;

        // The provider promises a member of the set; hold it to that.
        let category = label.parse::<Category>().map_err(|e| {
            warn!(provider = self.provider.name(), label = %label, "Classifier label rejected");
            OrchestrationError::Upstream(format!(
                "{} returned {} for constrained classification",
                self.provider.name(),
                e
            ))
        })?;

        debug!(%category, "Message classified");
        Ok(category)
    }
}
