//! Turn orchestrator - implements the per-turn graph
//!
//! START → CLASSIFYING → ROUTING → HANDLING(route) → DONE
//!
//! The orchestrator keeps no state between turns; everything that persists
//! lives in the caller's [`ConversationState`].

use crate::classifier::IntentClassifier;
use crate::error::OrchestrationError;
use crate::handlers::HandlerRegistry;
use crate::models::{Category, Message};
use crate::router::{Route, Router};
use crate::state::ConversationState;
use crate::Result;
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Stage of a turn in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStage {
    Start,
    Classifying,
    Routing,
    Handling(Route),
    Done,
}

impl fmt::Display for TurnStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnStage::Start => write!(f, "START"),
            TurnStage::Classifying => write!(f, "CLASSIFYING"),
            TurnStage::Routing => write!(f, "ROUTING"),
            TurnStage::Handling(route) => write!(f, "HANDLING({})", route),
            TurnStage::Done => write!(f, "DONE"),
        }
    }
}

/// Result of one completed turn
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub reply: String,
    pub category: Category,
    pub route: Route,
    pub reasoning_trace: Vec<String>,
    pub execution_time_ms: u64,
}

pub struct Orchestrator {
    classifier: IntentClassifier,
    handlers: HandlerRegistry,
}

impl Orchestrator {
    /// Wire the graph. Fails fast if any route lacks a handler.
    pub fn new(classifier: IntentClassifier, handlers: HandlerRegistry) -> Result<Self> {
        handlers.validate()?;
        Ok(Self {
            classifier,
            handlers,
        })
    }

    /// Run one turn for `user_text`, appending to `state`.
    ///
    /// On failure the state keeps the user message (if it was accepted)
    /// and never a partial reply.
    pub async fn submit_turn(
        &self,
        state: &mut ConversationState,
        user_text: &str,
    ) -> Result<TurnOutcome> {
        let start_time = Instant::now();
        let mut reasoning_trace = Vec::new();

        if user_text.trim().is_empty() {
            return Err(OrchestrationError::Precondition(
                "user message is empty".to_string(),
            ));
        }

        // === START ===
        state.append(Message::user(user_text));
        reasoning_trace.push(format!("{}: user message received", TurnStage::Start));
        debug!(session_id = %state.session_id, turn_len = state.len(), "Turn started");

        // === CLASSIFYING ===
        let category = match self.classifier.classify(state).await {
            Ok(category) => category,
            Err(e) => {
                warn!(stage = %TurnStage::Classifying, "Turn aborted: {}", e);
                return Err(e);
            }
        };
        state.record_classification(category);
        reasoning_trace.push(format!("{}: {}", TurnStage::Classifying, category));

        // === ROUTING ===
        let route = Router::route(state.last_category());
        reasoning_trace.push(format!("{}: {}", TurnStage::Routing, route));
        debug!(%category, %route, "Route selected");

        let handler = self.handlers.get(route).ok_or_else(|| {
            OrchestrationError::Configuration(format!("No handler registered for {}", route))
        })?;

        // === HANDLING ===
        let stage = TurnStage::Handling(route);
        let reply = match handler.handle(state).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(stage = %stage, "Turn aborted: {}", e);
                return Err(e);
            }
        };
        reasoning_trace.push(format!("{}: {} chars", stage, reply.len()));

        // === DONE ===
        state.append(Message::assistant(reply.clone()));
        reasoning_trace.push(format!("{}: reply appended", TurnStage::Done));

        let execution_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            session_id = %state.session_id,
            %category,
            handler = handler.name(),
            execution_time_ms,
            "Turn complete"
        );

        Ok(TurnOutcome {
            reply,
            category,
            route,
            reasoning_trace,
            execution_time_ms,
        })
    }

    /// Route the given state would take without running a turn
    pub fn peek_route(&self, state: &ConversationState) -> Route {
        Router::route(state.last_category())
    }
}
