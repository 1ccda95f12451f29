//! ballantine - check the commits a deployment would ship
//!
//! # Usage
//! ```bash
//! ballantine init                              # Create ./.ballantine.json
//! ballantine config --local slack_webhook URL  # Store a webhook
//! ballantine diff production main              # Print commits by author
//! ballantine diff production main --slack      # Send them to Slack
//! ```

use std::io::{self, IsTerminal};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ballantine::config::{self, Config, OutputMode, Scope};
use ballantine::diff::{DiffRequest, run_diff};
use ballantine::git::GitGateway;
use ballantine::report::delivery::{Deliver, SlackWebhook};
use ballantine::report::{self, Rendered, Sink};

/// Review the commits between two revisions, grouped by author
#[derive(Parser)]
#[command(name = "ballantine")]
#[command(about = "Describe your commits before deployment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,

        /// Create it in the home directory instead of the current one
        #[arg(long)]
        global: bool,
    },
    /// Print or set configuration values
    Config {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Key to print or set
        key: Option<String>,

        /// New value for KEY
        value: Option<String>,

        /// Print progress
        #[arg(long)]
        verbose: bool,
    },
    /// Diff commits between TARGET and SOURCE
    Diff {
        /// Revision being deployed over (branch, tag or hash)
        target: String,

        /// Revision being deployed; defaults to the current branch
        source: Option<String>,

        /// Send the report to the configured Slack webhook
        #[arg(short, long)]
        slack: bool,

        /// Print progress
        #[arg(long)]
        verbose: bool,
    },
    /// Display version information
    Version,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ScopeArgs {
    /// Use ./.ballantine.json
    #[arg(long)]
    local: bool,

    /// Use ~/.ballantine.json
    #[arg(long)]
    global: bool,
}

impl ScopeArgs {
    fn scope(&self) -> Scope {
        if self.global { Scope::Global } else { Scope::Local }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let verbose = matches!(
        cli.command,
        Commands::Config { verbose: true, .. } | Commands::Diff { verbose: true, .. }
    );
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| if verbose { "debug" } else { "warn" }.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run(cli.command).await {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Init { force, global } => {
            let scope = if global { Scope::Global } else { Scope::Local };
            let path = Config::init(scope, force)?;
            println!("🥃 Initialized ballantine. ({})", path.display());
        }
        Commands::Config { scope, key, value, .. } => {
            handle_config(scope.scope(), key, value)?;
        }
        Commands::Diff {
            target,
            source,
            slack,
            ..
        } => {
            handle_diff(target, source, slack).await?;
        }
        Commands::Version => {
            println!("ballantine version {}", env!("CARGO_PKG_VERSION"));
        }
    }
    Ok(())
}

fn handle_config(scope: Scope, key: Option<String>, value: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load(scope)?;
    match (key, value) {
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            println!("✓ {} = {}", key, value);
        }
        (Some(key), None) => println!("{}", config.get(&key)?.unwrap_or("")),
        (None, _) => {
            for (key, value) in config.entries() {
                println!("{}: {}", key, value);
            }
        }
    }
    Ok(())
}

async fn handle_diff(target: String, source: Option<String>, slack: bool) -> anyhow::Result<()> {
    let root = std::env::current_dir()?;
    let (mode, webhook) = if slack {
        let local = Config::load(Scope::Local)?;
        let global = Config::load(Scope::Global)?;
        (OutputMode::Slack, config::effective_webhook(&local, &global))
    } else {
        (OutputMode::Terminal, None)
    };

    let request = DiffRequest {
        target,
        source,
        mode,
        webhook,
    };
    let outcome = run_diff(&GitGateway, &root, &request)?;

    let sink = match request.mode {
        OutputMode::Terminal => Sink::Console {
            color: io::stdout().is_terminal(),
        },
        OutputMode::Slack => Sink::Chat,
    };

    match report::render(&outcome.report(), sink) {
        Rendered::Console(text) => print!("{}", text),
        Rendered::Chat(payload) => {
            let Some(url) = request.webhook else {
                return Err(ballantine::AppError::MissingDeliveryTarget.into());
            };
            SlackWebhook::new(url, reqwest::Client::new())
                .deliver(&payload)
                .await?
                .ensure_success()?;
            println!("✓ Sent to Slack");
        }
    }
    Ok(())
}
