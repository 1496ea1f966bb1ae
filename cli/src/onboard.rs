use anyhow::Result;
use caredesk_core::config::{BudgetMode, Config, ToolErrorPolicy};
use caredesk_core::providers::OllamaProvider;
use console::style;
use dialoguer::{Input, Select};

const PROVIDERS: &[&str] = &["ollama", "openai"];

fn print_step(step: usize, total: usize, title: &str) {
    println!();
    println!(
        "{}",
        style(format!("[{}/{}] {}", step, total, title))
            .cyan()
            .bold()
    );
    println!();
}

pub fn run_onboard() -> Result<Config> {
    let mut config = Config::load_or_init()?;

    println!("{}", style("caredesk setup").bold());

    print_step(1, 3, "Model backend");
    let provider_idx = Select::new()
        .with_prompt("Provider")
        .items(PROVIDERS)
        .default(0)
        .interact()?;
    let provider = PROVIDERS[provider_idx];
    config.provider = Some(provider.to_string());

    if provider == "openai" {
        let api_key: String = Input::new()
            .with_prompt("API key (leave empty to use OPENAI_API_KEY)")
            .allow_empty(true)
            .interact_text()?;
        config.api_key = api_key;
    }

    let default_base_url = match provider {
        "ollama" => OllamaProvider::DEFAULT_BASE_URL,
        _ => "https://api.openai.com/v1",
    };
    let base_url: String = Input::new()
        .with_prompt("Base URL")
        .default(default_base_url.to_string())
        .interact_text()?;
    config.base_url = Some(base_url);

    print_step(2, 3, "Model");
    let default_model = match provider {
        "ollama" => config.model.clone(),
        _ => "gpt-4o-mini".to_string(),
    };
    config.model = Input::new()
        .with_prompt("Model")
        .default(default_model)
        .interact_text()?;

    print_step(3, 3, "Tool calling");
    config.max_iterations = Input::new()
        .with_prompt("Tool rounds per answer")
        .default(config.max_iterations)
        .interact_text()?;

    let budget_idx = Select::new()
        .with_prompt("When the tool budget runs out")
        .items(&[
            "stop and answer (hard cap)",
            "keep going while the model asks for tools (legacy)",
        ])
        .default(0)
        .interact()?;
    config.budget_mode = if budget_idx == 0 {
        BudgetMode::HardCap
    } else {
        BudgetMode::Legacy
    };

    let errors_idx = Select::new()
        .with_prompt("When a tool call fails")
        .items(&["abort the session", "report the error to the model"])
        .default(0)
        .interact()?;
    config.tool_errors = if errors_idx == 0 {
        ToolErrorPolicy::Abort
    } else {
        ToolErrorPolicy::Report
    };

    println!();
    println!(
        "{} provider {}, model {}",
        style("✓").green().bold(),
        style(provider).white().bold(),
        style(&config.model).white().bold()
    );

    Ok(config)
}
