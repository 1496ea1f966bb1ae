use anyhow::{Context, Result};
use caredesk_core::{agent, config, providers};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
mod onboard;

#[derive(Parser)]
#[command(name = "caredesk")]
#[command(about = "caredesk - customer care agent with tool calling", long_about = None)]
struct Cli {
    /// Log tool invocations and model turns
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file interactively
    Onboard,
    /// Describe an issue and let the agent work on it
    Chat {
        /// Issue text; prompted for when omitted
        #[arg(short, long)]
        issue: Option<String>,

        /// Skip the follow-up question
        #[arg(long)]
        no_follow_up: bool,
    },
    /// Print the tool declarations sent to the model
    Tools,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Chat {
        issue: None,
        no_follow_up: false,
    });

    match command {
        Commands::Onboard => {
            let onboard_config = onboard::run_onboard().map_err(|e| {
                eprintln!("❌ Onboarding failed: {}", e);
                anyhow::anyhow!("Onboarding failed: {}", e)
            })?;
            config::save_config(&onboard_config)?;
            println!(
                "✅ Config written to {}",
                config::get_config_path().display()
            );
        }
        Commands::Tools => {
            let registry = agent::ToolRegistry::builtin()?;
            println!("{}", serde_json::to_string_pretty(registry.specs())?);
        }
        Commands::Chat {
            issue,
            no_follow_up,
        } => {
            let config = config::Config::load_or_init()?;
            run_chat(&config, issue, no_follow_up).await?;
        }
    }

    Ok(())
}

async fn run_chat(config: &config::Config, issue: Option<String>, no_follow_up: bool) -> Result<()> {
    let provider = providers::create_provider(config)?;
    let tool_registry = Arc::new(agent::ToolRegistry::builtin()?);
    let invoker = agent::ChatInvoker::new(provider, config.model.clone())
        .with_temperature(config.temperature);
    let agent_loop = agent::AgentLoop::new(invoker, tool_registry)
        .with_max_iterations(config.max_iterations)
        .with_budget_mode(config.budget_mode)
        .with_tool_errors(config.tool_errors);
    let context = agent::ContextBuilder::new(config.team_queue_catalog());

    println!("🎧 caredesk");
    let issue = match issue {
        Some(issue) => issue,
        None => match read_line("Enter the issue: ")? {
            Some(issue) => issue,
            None => return Ok(()),
        },
    };

    let mut session = agent::Session::open(&agent_loop, &context, &issue);
    let outcome = session.respond().await.context("Agent processing failed")?;
    println!("Agent: {}", outcome.reply.content);
    if outcome.budget_exhausted {
        println!("(stopped after {} tool rounds)", outcome.rounds);
    }

    let follow_up = if no_follow_up {
        None
    } else {
        read_line("\nYou: ")?
    };
    finish_session(&mut session, outcome, follow_up.as_deref(), &mut io::stdout()).await
}

/// Sends the follow-up, if any, and prints the agent's answer to it, then the
/// final content.
async fn finish_session(
    session: &mut agent::Session<'_>,
    outcome: agent::LoopOutcome,
    follow_up: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let outcome = match follow_up {
        Some(follow_up) => {
            let outcome = session
                .follow_up(follow_up)
                .await
                .context("Agent processing failed")?;
            writeln!(out, "Agent: {}", outcome.reply.content)?;
            outcome
        }
        None => outcome,
    };

    writeln!(out, "\nFinal content: {}", outcome.reply.content)?;
    Ok(())
}

/// Prompts for one line. `None` on EOF or a blank line.
fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        return Ok(None);
    }

    let input = input.trim();
    Ok(if input.is_empty() {
        None
    } else {
        Some(input.to_string())
    })
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("caredesk_core=debug,caredesk=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
