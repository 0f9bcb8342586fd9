use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ragdesk_cli::{command, ui, Backends, Command, Console};
use ragdesk_kb::{SimProfile, GREETING};

#[derive(Parser)]
#[command(name = "ragdesk")]
#[command(about = "Console for the internal RAG knowledge base", long_about = None)]
struct Cli {
    /// Run one console command and exit, e.g. "docs sort name"
    #[arg(short, long)]
    command: Option<String>,
}

/// Log filter: `RUST_LOG` directives layered over an info baseline
fn log_filter() -> EnvFilter {
    EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(log_filter())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let profile = SimProfile::from_env();
    let backends = Backends::simulated(&profile);
    let mut console = Console::new(backends, profile.upload_step_delay);

    // Handle direct command execution
    if let Some(line) = cli.command {
        match command::parse(&line) {
            Ok(cmd) => console.dispatch(cmd).await,
            Err(message) => println!("{} {}", "❌".red(), message),
        }
        return Ok(());
    }

    // Interactive mode
    ui::display_banner();
    println!("{} {}", "🤖".cyan(), GREETING);
    println!();

    let mut history = Vec::new();

    loop {
        let input = ui::handle_input_with_history(&mut history).await?;

        if input.trim().is_empty() {
            continue;
        }

        match command::parse(&input) {
            Ok(Command::Exit) => {
                println!("{}", "👋 Goodbye!".green());
                break;
            }
            Ok(cmd) => console.dispatch(cmd).await,
            Err(message) => println!("{} {}", "❌".red(), message),
        }
        println!();
    }

    Ok(())
}
