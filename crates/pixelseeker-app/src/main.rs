//! PixelSeeker application binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Overlay credentials from the environment
//! 3. Build the conversation controller with the real HTTP clients
//! 4. Run a line-oriented chat loop on stdin/stdout

mod cli;

use std::sync::Arc;

use clap::Parser;
use pixelseeker_chat::{ChatError, ConversationController, Direction, Message};
use pixelseeker_core::PixelSeekerConfig;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cli::CliArgs;

fn print_message(message: &Message) {
    let who = match message.direction {
        Direction::Incoming => message.sender.as_str(),
        Direction::Outgoing => "you",
    };
    println!("\n{who}: {}\n", message.text);
}

/// Print the typing label each time a request starts.
async fn typing_indicator(controller: Arc<ConversationController>, label: String) {
    let mut pending = controller.subscribe_pending();
    while pending.changed().await.is_ok() {
        if *pending.borrow_and_update() {
            println!("{label}");
        }
    }
}

async fn chat_loop(
    controller: Arc<ConversationController>,
    prompt: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(format!("{prompt} > ").as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match controller.submit_user_message(&line).await {
            Ok(()) => {
                if let Some(reply) = controller.last_message() {
                    print_message(&reply);
                }
            }
            Err(ChatError::EmptyMessage) => continue,
            Err(e) => {
                tracing::warn!(error = %e, "Message not sent");
                println!("{e}");
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = PixelSeekerConfig::load_or_default(&config_file);
    config.apply_env_overrides();
    let log_level = args.resolve_log_level(&config.general.log_level);

    // Tracing.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    tracing::info!("Starting PixelSeeker v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration resolved");

    config.validate()?;

    let controller = Arc::new(ConversationController::from_config(&config));
    tracing::info!(
        model = %config.dialogue.model,
        trigger = %config.catalog.trigger,
        "Conversation controller ready"
    );

    for message in controller.transcript() {
        print_message(&message);
    }

    tokio::spawn(typing_indicator(
        Arc::clone(&controller),
        config.assistant.typing_label.clone(),
    ));

    chat_loop(controller, &config.assistant.input_prompt).await?;

    tracing::info!("Goodbye");
    Ok(())
}
