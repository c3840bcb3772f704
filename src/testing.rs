//! Test doubles shared by unit tests

use crate::error::OrchestrationError;
use crate::models::Message;
use crate::provider::CompletionProvider;
use crate::tools::AuxiliaryTool;
use crate::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub messages: Vec<Message>,
    pub labels: Option<Vec<String>>,
}

impl RecordedCall {
    pub fn system_text(&self) -> String {
        self.messages
            .iter()
            .filter(|m| m.role() == crate::models::Role::System)
            .map(|m| m.content())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Provider that replays a fixed script and records every request.
///
/// Constrained calls draw from the label queue, free-text calls from the
/// reply queue.
#[derive(Default)]
pub(crate) struct ScriptedProvider {
    labels: Mutex<VecDeque<Result<String>>>,
    replies: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(self, label: &str) -> Self {
        self.labels.lock().unwrap().push_back(Ok(label.to_string()));
        self
    }

    pub fn fail_label(self, detail: &str) -> Self {
        self.labels
            .lock()
            .unwrap()
            .push_back(Err(OrchestrationError::Upstream(detail.to_string())));
        self
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, detail: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(OrchestrationError::Upstream(detail.to_string())));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        messages: &[Message],
        constrained_to: Option<&[&str]>,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            messages: messages.to_vec(),
            labels: constrained_to.map(|l| l.iter().map(|s| s.to_string()).collect()),
        });

        let queue = if constrained_to.is_some() {
            &self.labels
        } else {
            &self.replies
        };

        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(OrchestrationError::Upstream("script exhausted".to_string())))
    }
}

/// Tool returning fixed text and counting invocations
pub(crate) struct CountingTool {
    output: String,
    calls: AtomicUsize,
}

impl CountingTool {
    pub fn new(output: &str) -> Self {
        Self {
            output: output.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuxiliaryTool for CountingTool {
    fn name(&self) -> &'static str {
        crate::tools::AVAILABLE_POSITIONS
    }

    fn description(&self) -> &'static str {
        "counting stand-in for the openings lookup"
    }

    async fn call(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.output.clone())
    }
}

pub(crate) struct FailingTool;

#[async_trait]
impl AuxiliaryTool for FailingTool {
    fn name(&self) -> &'static str {
        "failing_lookup"
    }

    fn description(&self) -> &'static str {
        "always fails"
    }

    async fn call(&self) -> Result<String> {
        Err(OrchestrationError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            "lookup unavailable",
        )))
    }
}
