//! Department Dispatcher
//!
//! A single-turn conversational dispatcher that:
//! - Classifies each user message into one business department
//! - Routes it to that department's persona handler
//! - Lets handlers enrich their persona with read-only tool lookups
//! - Threads an append-only conversation state across turns
//!
//! PER-TURN GRAPH:
//! START → CLASSIFYING → ROUTING → HANDLING → DONE

pub mod agent;
pub mod classifier;
pub mod config;
pub mod error;
pub mod gemini;
pub mod handlers;
pub mod models;
pub mod offline;
pub mod prompts;
pub mod provider;
pub mod router;
pub mod session;
pub mod state;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{OrchestrationError, Result};

// Re-export common types
pub use agent::{Orchestrator, TurnOutcome};
pub use classifier::IntentClassifier;
pub use models::*;
pub use provider::CompletionProvider;
pub use router::{Route, Router};
pub use session::SessionInput;
pub use state::ConversationState;
