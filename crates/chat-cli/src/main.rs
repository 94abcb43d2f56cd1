use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chat_client::{ChatSession, HttpChatClient, SubmitOutcome};
use chat_core::{render_markdown, Config};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "chat-cli")]
#[command(about = "Render chat markdown and talk to a chat backend")]
#[command(version)]
struct Cli {
    /// Backend base URL, overrides config and CHAT_API_BASE
    #[arg(long)]
    server_url: Option<String>,

    /// Explicit JSON or TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug mode
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render markdown to an HTML fragment
    Render {
        /// Text to render; read from stdin when omitted
        text: Option<String>,
    },
    /// Send a single message and print the transcript
    Send {
        /// Message content
        message: String,
    },
    /// Start interactive chat
    Chat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::Render { text } => render(text),
        Commands::Send { ref message } => {
            let config = load_config(&cli)?;
            send_message(&config, message).await
        }
        Commands::Chat => {
            let config = load_config(&cli)?;
            run_interactive_chat(&config).await
        }
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    // Logs go to stderr so stdout carries only HTML.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_line_number(true)
                .with_file(false),
        )
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env(|key| std::env::var(key).ok());
            config
        }
        None => Config::load(),
    };
    if let Some(server_url) = &cli.server_url {
        config.api_base = server_url.clone();
    }
    tracing::debug!("Chat endpoint: {}", config.chat_url());
    Ok(config)
}

fn build_session(config: &Config) -> anyhow::Result<ChatSession> {
    let client = HttpChatClient::new(config).context("Failed to create chat client")?;
    Ok(ChatSession::new(Arc::new(client), config))
}

fn render(text: Option<String>) -> anyhow::Result<()> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };
    println!("{}", render_markdown(&text));
    Ok(())
}

async fn send_message(config: &Config, message: &str) -> anyhow::Result<()> {
    let mut session = build_session(config)?;

    match session.submit(message).await {
        SubmitOutcome::Ignored => anyhow::bail!("Message is empty"),
        SubmitOutcome::Failed { message, .. } => {
            println!("{}", session.transcript().to_html());
            anyhow::bail!(message)
        }
        SubmitOutcome::Answered { .. } | SubmitOutcome::EmptyReply { .. } => {
            println!("{}", session.transcript().to_html());
            Ok(())
        }
    }
}

async fn run_interactive_chat(config: &Config) -> anyhow::Result<()> {
    let mut session = build_session(config)?;

    eprintln!("{}", "Chat".cyan().bold());
    eprintln!("{}", format!("Endpoint: {}", config.chat_url()).dimmed());
    eprintln!("{}", "Type 'exit' or 'quit' to leave".dimmed());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        eprint!("{} ", "You:".cyan().bold());
        io::stderr().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        let outcome = session.submit(input).await;
        let Some(index) = outcome.bot_index() else {
            continue;
        };
        if let SubmitOutcome::Failed { message, .. } = &outcome {
            eprintln!("{}", format!("❌ Error: {}", message).red());
        }
        if let Some(reply) = session.transcript().get(index) {
            println!("{}", reply.to_html());
        }
    }

    eprintln!("{}", "Goodbye!".cyan());
    Ok(())
}
