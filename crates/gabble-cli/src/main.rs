//! gabble CLI: Terminal chat client for the Gemini API

use clap::{ArgAction, Parser, Subcommand};
use gabble_engine::{ChatBackend, ChatSession, Config, GeminiClient, SubmitError};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = ".gabble/config.json";
const DEFAULT_LOG_PATH: &str = ".gabble/gabble.log";

/// Chat with a Gemini model from the terminal
#[derive(Parser)]
#[command(name = "gabble")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Model to use (overrides config and GEMINI_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Log file used while the chat screen is open
    #[arg(long, global = true, default_value = DEFAULT_LOG_PATH)]
    log_file: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat screen (default when no command specified)
    Tui,

    /// Send one prompt and print the reply
    Ask {
        /// Text to send
        prompt: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file
    Init,

    /// Print the resolved configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // The chat screen owns the terminal, so its logs go to a file
    let tui_mode = matches!(cli.command, None | Some(Commands::Tui));
    let log_file = tui_mode.then_some(cli.log_file.as_path());
    if let Err(e) = init_logging(cli.verbose, log_file) {
        eprintln!("Failed to set up logging: {e}");
        std::process::exit(1);
    }

    match cli.command {
        None | Some(Commands::Tui) => {
            let config = load_config(&cli.config, cli.model);
            cmd_tui(&config);
        }
        Some(Commands::Ask { ref prompt, json }) => {
            let config = load_config(&cli.config, cli.model);
            cmd_ask(&config, prompt, json);
        }
        Some(Commands::Init) => {
            cmd_init(&cli.config);
        }
        Some(Commands::Config { json }) => {
            let config = load_config(&cli.config, cli.model);
            cmd_config(&config, &cli.config, json);
        }
    }
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> std::io::Result<()> {
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn load_config(path: &Path, model: Option<String>) -> Config {
    let mut config = match Config::resolve(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {}: {e}", path.display());
            std::process::exit(1);
        }
    };
    if let Some(model) = model {
        config.model = model;
    }
    config
}

fn build_client(config: &Config) -> GeminiClient {
    match GeminiClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {e}");
            std::process::exit(1);
        }
    }
}

fn build_runtime() -> tokio::runtime::Runtime {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_tui(config: &Config) {
    let backend: Arc<dyn ChatBackend> = Arc::new(build_client(config));
    let rt = build_runtime();
    if let Err(e) = rt.block_on(gabble_tui::run_tui(config, backend)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_ask(config: &Config, prompt: &str, json: bool) {
    let client = build_client(config);
    let rt = build_runtime();

    let mut session = ChatSession::new();
    let turn = match session.begin(prompt) {
        Ok(turn) => turn,
        Err(SubmitError::Empty) => {
            eprintln!("Nothing to send: the prompt is empty");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    info!(model = %client.model_name(), "sending one-shot prompt");
    let outcome = rt.block_on(client.generate(&turn.prompt));
    let failed = outcome.is_err();

    let Some(reply) = session.finish(&turn, outcome) else {
        // A fresh session has no stale turns
        std::process::exit(1);
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "model": client.model_name(),
                "prompt": turn.prompt,
                "reply": reply.text,
                "ok": !failed,
                "timestamp": reply.timestamp.to_rfc3339(),
            })
        );
    } else {
        println!("{}", reply.text);
    }

    if failed {
        std::process::exit(1);
    }
}

fn cmd_init(path: &Path) {
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return;
    }

    match Config::default().save(path) {
        Ok(()) => {
            println!("Created {}", path.display());
            println!(
                "Set GEMINI_API_KEY or add an \"api_key\" entry to {} before chatting.",
                path.display()
            );
        }
        Err(e) => {
            eprintln!("Failed to write config: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_config(config: &Config, path: &Path, json: bool) {
    let masked = Config {
        api_key: Some(config.masked_api_key()),
        ..config.clone()
    };

    if json {
        match serde_json::to_string_pretty(&masked) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Failed to serialize config: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Config file:  {}", path.display());
    println!("API key:      {}", config.masked_api_key());
    println!("Model:        {}", config.model);
    println!("Base URL:     {}", config.base_url);
    match config.request_timeout() {
        Some(timeout) => println!("Timeout:      {}s", timeout.as_secs()),
        None => println!("Timeout:      none"),
    }
    println!("Theme:        {:?}", config.theme);
    println!("Icons:        {:?}", config.icons);
}
