use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::PathBuf;
use talent_match::profile::{CleanMode, HonorsSource, NormalizerOptions};
use talent_match::{start_web_server, ConfigManager, Normalizer, RawTextProfile, SourceProfile};
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE: &str = "/tmp/talent-match.log";

#[derive(Parser)]
#[command(name = "talent-match")]
#[command(about = "Import, normalize and match candidate and job profiles")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API (default)
    Serve,
    /// Normalize a profile JSON file and print the canonical profile
    Normalize {
        /// Pasted-text profile: {"name", "text", ...}
        #[arg(long, conflicts_with = "linkedin", required_unless_present = "linkedin")]
        raw: Option<PathBuf>,
        /// Provider profile as returned by the LinkedIn API
        #[arg(long)]
        linkedin: Option<PathBuf>,
        /// Re-apply cleanup rules until the text stops changing
        #[arg(long)]
        fixpoint: bool,
        /// Read honors from the honors/awards list instead of skills
        #[arg(long)]
        honors_from_awards: bool,
    },
}

fn init_logging() -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_FILE)
        .with_context(|| format!("Failed to open log file {}", LOG_FILE))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("talent_match=info,rocket::server=off"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn normalize_file(
    raw: Option<PathBuf>,
    linkedin: Option<PathBuf>,
    options: NormalizerOptions,
) -> Result<()> {
    let normalizer = Normalizer::new(options);

    let profile = match (raw, linkedin) {
        (Some(path), _) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let raw: RawTextProfile =
                serde_json::from_str(&content).context("Failed to parse text profile")?;
            normalizer.normalize_raw_text(&raw)
        }
        (None, Some(path)) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let source: SourceProfile =
                serde_json::from_str(&content).context("Failed to parse LinkedIn profile")?;
            normalizer.normalize_structured(&source)
        }
        (None, None) => anyhow::bail!("Pass --raw or --linkedin"),
    };

    let json = serde_json::to_string_pretty(&profile).context("Failed to serialize profile")?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = ConfigManager::load()?;
            info!("Environment: {}", config.environment);
            info!("Server: http://0.0.0.0:{}", config.port);
            start_web_server(config).await
        }
        Command::Normalize {
            raw,
            linkedin,
            fixpoint,
            honors_from_awards,
        } => {
            let options = NormalizerOptions {
                honors_source: if honors_from_awards {
                    HonorsSource::HonorsAwards
                } else {
                    HonorsSource::Skills
                },
                clean_mode: if fixpoint {
                    CleanMode::Fixpoint
                } else {
                    CleanMode::SinglePass
                },
            };
            normalize_file(raw, linkedin, options)
        }
    }
}
