//! Category handlers and their registry
//!
//! Every department runs through [`PersonaHandler`], parameterized by its
//! persona text. Handlers that depend on lookups are wrapped in
//! [`ToolAugmentedHandler`], which folds tool output into the persona
//! before delegating to the same execution path.

use crate::error::OrchestrationError;
use crate::models::{Category, Message};
use crate::prompts::{self, HR_TOOL_INSTRUCTIONS, SUPPORT_PERSONA, TOOL_OUTPUT_PLACEHOLDER};
use crate::provider::CompletionProvider;
use crate::router::Route;
use crate::state::ConversationState;
use crate::tools::{call_traced, AuxiliaryTool, ToolRegistry, AVAILABLE_POSITIONS};
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Produces a reply for the latest user message
#[async_trait]
pub trait Handler: Send + Sync {
    fn name(&self) -> &str;
    async fn handle(&self, state: &ConversationState) -> Result<String>;
}

/// Generic persona-driven responder
pub struct PersonaHandler {
    name: &'static str,
    persona: &'static str,
    provider: Arc<dyn CompletionProvider>,
}

impl PersonaHandler {
    pub fn new(
        name: &'static str,
        persona: &'static str,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            name,
            persona,
            provider,
        }
    }

    pub fn persona(&self) -> &'static str {
        self.persona
    }

    /// Shared execution path: system instruction plus the latest user turn
    pub async fn respond(&self, instruction: &str, state: &ConversationState) -> Result<String> {
        let last_user = state.last_user_message().ok_or_else(|| {
            OrchestrationError::Precondition(format!("{} handler has no user message", self.name))
        })?;

        let messages = [
            Message::system(instruction),
            Message::user(last_user.content()),
        ];

        debug!(handler = self.name, provider = self.provider.name(), "Generating reply");
        self.provider.complete(&messages, None).await
    }
}

#[async_trait]
impl Handler for PersonaHandler {
    fn name(&self) -> &str {
        self.name
    }

    async fn handle(&self, state: &ConversationState) -> Result<String> {
        self.respond(self.persona, state).await
    }
}

/// Calls its tools on every invocation and injects their output into the
/// wrapped handler's persona
pub struct ToolAugmentedHandler {
    inner: PersonaHandler,
    tools: Vec<Arc<dyn AuxiliaryTool>>,
    /// Appended to the persona; must contain `{tool_output}`
    template: &'static str,
}

impl ToolAugmentedHandler {
    pub fn new(
        inner: PersonaHandler,
        tools: Vec<Arc<dyn AuxiliaryTool>>,
        template: &'static str,
    ) -> Result<Self> {
        if !template.contains(TOOL_OUTPUT_PLACEHOLDER) {
            return Err(OrchestrationError::Configuration(format!(
                "{} tool template lacks {}",
                inner.name, TOOL_OUTPUT_PLACEHOLDER
            )));
        }

        Ok(Self {
            inner,
            tools,
            template,
        })
    }

    async fn build_instruction(&self) -> Result<String> {
        let mut outputs = Vec::with_capacity(self.tools.len());
        for tool in &self.tools {
            outputs.push(call_traced(tool.as_ref()).await?);
        }

        let tool_section = self
            .template
            .replace(TOOL_OUTPUT_PLACEHOLDER, &outputs.join("\n"));

        Ok(format!("{}\n\n{}\n", self.inner.persona(), tool_section))
    }
}

#[async_trait]
impl Handler for ToolAugmentedHandler {
    fn name(&self) -> &str {
        self.inner.name
    }

    async fn handle(&self, state: &ConversationState) -> Result<String> {
        if state.last_user_message().is_none() {
            return Err(OrchestrationError::Precondition(format!(
                "{} handler has no user message",
                self.inner.name
            )));
        }

        let instruction = self.build_instruction().await?;
        self.inner.respond(&instruction, state).await
    }
}

/// Static handler configuration: persona, then tools in call order
struct DepartmentSpec {
    category: Category,
    tools: &'static [&'static str],
    template: Option<&'static str>,
}

const DEPARTMENTS: &[DepartmentSpec] = &[
    DepartmentSpec {
        category: Category::Executive,
        tools: &[],
        template: None,
    },
    DepartmentSpec {
        category: Category::Finance,
        tools: &[],
        template: None,
    },
    DepartmentSpec {
        category: Category::Hr,
        tools: &[AVAILABLE_POSITIONS],
        template: Some(HR_TOOL_INSTRUCTIONS),
    },
    DepartmentSpec {
        category: Category::Operations,
        tools: &[],
        template: None,
    },
    DepartmentSpec {
        category: Category::Marketing,
        tools: &[],
        template: None,
    },
    DepartmentSpec {
        category: Category::Sales,
        tools: &[],
        template: None,
    },
    DepartmentSpec {
        category: Category::Technology,
        tools: &[],
        template: None,
    },
    DepartmentSpec {
        category: Category::Legal,
        tools: &[],
        template: None,
    },
];

/// Route → handler lookup. Read-only once built.
pub struct HandlerRegistry {
    handlers: HashMap<Route, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, route: Route, handler: Arc<dyn Handler>) {
        self.handlers.insert(route, handler);
    }

    pub fn get(&self, route: Route) -> Option<Arc<dyn Handler>> {
        self.handlers.get(&route).cloned()
    }

    /// Fail unless every route the router can produce has a handler
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = Route::all()
            .filter(|route| !self.handlers.contains_key(route))
            .map(|route| route.handler_name())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(OrchestrationError::Configuration(format!(
                "No handler registered for: {}",
                missing.join(", ")
            )))
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the eight department handlers plus the supportive fallback
pub fn create_default_registry(
    provider: Arc<dyn CompletionProvider>,
    tools: &ToolRegistry,
) -> Result<HandlerRegistry> {
    let mut registry = HandlerRegistry::new();

    for dept in DEPARTMENTS {
        let base = PersonaHandler::new(
            dept.category.as_str(),
            prompts::persona(dept.category),
            provider.clone(),
        );

        let handler: Arc<dyn Handler> = match dept.template {
            Some(template) => {
                let resolved = dept
                    .tools
                    .iter()
                    .map(|name| tools.require(name))
                    .collect::<Result<Vec<_>>>()?;
                Arc::new(ToolAugmentedHandler::new(base, resolved, template)?)
            }
            None => Arc::new(base),
        };

        registry.register(Route::Department(dept.category), handler);
    }

    registry.register(
        Route::Fallback,
        Arc::new(PersonaHandler::new(
            Route::Fallback.handler_name(),
            SUPPORT_PERSONA,
            provider,
        )),
    );

    Ok(registry)
}
