use anyhow::{Context, Result};
use chessprompt::board::Game;
use chessprompt::controller::{Controller, ControllerConfig};
use chessprompt::llm::{LlmClient, LlmConfig, LlmProvider};
use chessprompt::players::{HumanPlayer, OraclePlayer};
use clap::Parser;
use cozy_chess::Color;
use std::io;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against a language-model oracle", long_about = None)]
struct Args {
    /// Your color: 'w' for white, 'b' for black
    #[arg(long, default_value = "w")]
    color: String,

    /// Suggestion service provider
    #[arg(long, value_enum, default_value = "openai", env = "CHESSPROMPT_PROVIDER")]
    provider: LlmProvider,

    /// Model name passed to the provider
    #[arg(long, default_value = "gpt-4", env = "CHESSPROMPT_MODEL")]
    model: String,

    /// API key (falls back to OPENAI_API_KEY / ANTHROPIC_API_KEY)
    #[arg(long, env = "CHESSPROMPT_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Override the provider's API base URL
    #[arg(long, env = "CHESSPROMPT_BASE_URL")]
    base_url: Option<String>,

    /// Token limit for each oracle reply
    #[arg(long, default_value_t = 16)]
    max_tokens: u32,

    /// Seconds before an oracle request counts as failed
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Extra attempts the oracle gets after a bad suggestion
    #[arg(long, default_value_t = 0)]
    oracle_retries: u32,

    /// Starting FEN position
    #[arg(long)]
    fen: Option<String>,
}

fn parse_color(color_str: &str) -> Result<Color> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Color::White),
        "b" | "black" => Ok(Color::Black),
        _ => anyhow::bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    let human_color = parse_color(&args.color)?;
    let api_key = match args.api_key {
        Some(key) => key,
        None => std::env::var(args.provider.api_key_var())
            .with_context(|| format!("no API key: pass --api-key or set {}", args.provider.api_key_var()))?,
    };

    let mut llm = LlmConfig::new(args.provider, api_key, args.model, args.max_tokens)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    if let Some(url) = args.base_url {
        llm = llm.with_base_url(url);
    }
    let client = LlmClient::new(llm).context("building suggestion client")?;

    let game = match args.fen {
        Some(fen) => Game::from_fen(&fen)?,
        None => Game::new(),
    };

    let human = HumanPlayer::new("You", io::stdin().lock(), io::stdout());
    let oracle = OraclePlayer::new("Oracle", client);
    let config = ControllerConfig { human_color, oracle_retries: args.oracle_retries };
    let mut controller = Controller::new(game, human, oracle, config, io::stdout());

    let outcome = controller.run()?;
    if outcome.is_aborted() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
