//! Auxiliary tool trait and registry
//!
//! Tools are read-only, side-effect-free lookups that take no input.
//! Handlers call them before building their persona instruction.

use crate::error::OrchestrationError;
use crate::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info_span, warn, Instrument};

pub const AVAILABLE_POSITIONS: &str = "available_positions";

/// Trait for a single read-only lookup
#[async_trait::async_trait]
pub trait AuxiliaryTool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    async fn call(&self) -> Result<String>;
}

/// Tool registry for looking up tools by name
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn AuxiliaryTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(&mut self, tool: Arc<dyn AuxiliaryTool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn AuxiliaryTool>> {
        self.tools.get(name).cloned()
    }

    /// Look up a tool a handler depends on; absence is a wiring error
    pub fn require(&self, name: &str) -> Result<Arc<dyn AuxiliaryTool>> {
        self.get(name).ok_or_else(|| {
            OrchestrationError::Configuration(format!("Tool not registered: {}", name))
        })
    }

    pub fn list(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Invoke a tool inside a `tool_call` span.
///
/// Any failure is reported as upstream so it bubbles like a provider error.
pub async fn call_traced(tool: &dyn AuxiliaryTool) -> Result<String> {
    let span = info_span!("tool_call", tool = tool.name());
    debug!(parent: &span, description = tool.description(), "Calling tool");

    async {
        let start = Instant::now();
        let result = tool.call().await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(output) => {
                debug!(elapsed_ms, chars = output.len(), "Tool returned");
                Ok(output)
            }
            Err(e) if e.is_upstream() => {
                warn!(elapsed_ms, "Tool failed: {}", e);
                Err(e)
            }
            Err(e) => {
                warn!(elapsed_ms, "Tool failed: {}", e);
                Err(OrchestrationError::Upstream(format!(
                    "Tool {} failed: {}",
                    tool.name(),
                    e
                )))
            }
        }
    }
    .instrument(span)
    .await
}

/// Static description of current openings
pub struct AvailablePositionsTool;

#[async_trait::async_trait]
impl AuxiliaryTool for AvailablePositionsTool {
    fn name(&self) -> &'static str {
        AVAILABLE_POSITIONS
    }

    fn description(&self) -> &'static str {
        "Returns a string listing currently available positions in the company"
    }

    async fn call(&self) -> Result<String> {
        Ok("Currently, we have openings for AI Engineers and Data Scientists.".to_string())
    }
}

/// Create a registry with the built-in lookups
pub fn create_default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(AvailablePositionsTool));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingTool, FailingTool};
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_available_positions() {
        let output = assert_ok!(call_traced(&AvailablePositionsTool).await);
        assert!(output.contains("AI Engineers and Data Scientists"));
    }

    #[test]
    fn test_default_registry() {
        let registry = create_default_registry();
        assert!(registry.get(AVAILABLE_POSITIONS).is_some());
        assert_eq!(registry.list(), vec![AVAILABLE_POSITIONS]);

        let err = registry.require("org_chart").err().unwrap();
        assert!(matches!(err, OrchestrationError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_tool_failure_surfaces_as_upstream() {
        let err = assert_err!(call_traced(&FailingTool).await);
        assert!(err.is_upstream());
        assert!(err.to_string().contains("failing_lookup"));
    }

    #[tokio::test]
    async fn test_call_traced_invokes_once() {
        let tool = CountingTool::new("Openings: none");
        assert_ok!(call_traced(&tool).await);
        assert_eq!(tool.calls(), 1);
    }
}
