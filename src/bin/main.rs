use department_dispatcher::{
    classifier::IntentClassifier,
    config::Config,
    gemini::GeminiClient,
    handlers::create_default_registry,
    offline::OfflineProvider,
    provider::CompletionProvider,
    tools,
    ConversationState, Orchestrator, SessionInput,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Department Dispatcher starting");

    let provider: Arc<dyn CompletionProvider> = if config.provider.has_api_key() {
        Arc::new(GeminiClient::new(config.provider.clone())?)
    } else {
        warn!("GEMINI_API_KEY not set, using offline provider");
        Arc::new(OfflineProvider)
    };
    info!(provider = provider.name(), model = %config.provider.model, "Provider ready");

    // Create components
    let tool_registry = tools::create_default_registry();
    info!(tools = ?tool_registry.list(), "Tools registered");
    let handlers = create_default_registry(provider.clone(), &tool_registry)?;
    let orchestrator = Orchestrator::new(IntentClassifier::new(provider), handlers)?;

    let mut state = ConversationState::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    info!(session_id = %state.session_id, exit_token = %config.exit_token, "Session started");

    loop {
        stdout.write_all(b"Message: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let text = match SessionInput::parse(&line, &config.exit_token) {
            SessionInput::Exit => break,
            SessionInput::Message(text) => text,
        };

        match orchestrator.submit_turn(&mut state, text).await {
            Ok(outcome) => {
                let output = format!("Assistant: {}\n", outcome.reply);
                stdout.write_all(output.as_bytes()).await?;
            }
            Err(e) => {
                error!(kind = ?e.kind(), "Turn failed: {}", e);
                eprintln!("Turn failed: {}", e);
            }
        }
    }

    stdout.write_all(b"Bye\n").await?;
    stdout.flush().await?;

    info!(messages = state.len(), "Session ended");
    Ok(())
}
