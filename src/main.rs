use anyhow::Result;
use clap::Parser;
use slipok::commands::{self, CheckOptions};
use slipok::{ClientConfig, LogSink, SlipOk};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// slipok - SlipOK slip verification client
///
/// Verify bank-transfer slips and check the remaining quota of a branch.
///
/// Examples:
///   slipok quota
///   slipok check --data 0041000600000101030040220014 --amount 100 --log
///   slipok check --file ./slip.jpg
#[derive(Parser, Debug)]
#[command(author, version = env!("SLIPOK_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API key issued by SlipOK
    #[arg(long, env = "SLIPOK_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Branch ID (digits only)
    #[arg(long, env = "SLIPOK_BRANCH_ID", global = true)]
    branch_id: Option<String>,

    /// API base URL (defaults to https://api.slipok.com/api/line/apikey)
    #[arg(long, env = "SLIPOK_BASE_URL", value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Per-attempt timeout in milliseconds
    #[arg(long, value_name = "MS", global = true)]
    timeout_ms: Option<u64>,

    /// Total attempts per request, including the first
    #[arg(long, value_name = "N", global = true)]
    retries: Option<u32>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show the remaining quota of the branch
    Quota,

    /// Verify a slip
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
struct CheckArgs {
    /// QR payload read from the slip
    #[arg(long)]
    data: Option<String>,

    /// URL of the slip image
    #[arg(long)]
    url: Option<String>,

    /// Slip image to upload
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Expected transfer amount
    #[arg(long)]
    amount: Option<f64>,

    /// Record the slip so repeated submissions are reported as duplicates
    #[arg(long)]
    log: bool,
}

impl From<CheckArgs> for CheckOptions {
    fn from(args: CheckArgs) -> Self {
        CheckOptions {
            data: args.data,
            url: args.url,
            file: args.file,
            amount: args.amount,
            log: args.log,
        }
    }
}

impl Cli {
    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::default().with_logger(Arc::new(LogSink));
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.as_str());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_timeout(Duration::from_millis(timeout_ms));
        }
        if let Some(retries) = self.retries {
            config = config.with_max_attempts(retries);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let client = SlipOk::with_config(
        cli.api_key.clone().unwrap_or_default(),
        cli.branch_id.clone().unwrap_or_default(),
        cli.config(),
    )?;

    let mut stdout = std::io::stdout();
    let accepted = match cli.command {
        Commands::Quota => commands::quota(&client, &mut stdout).await?,
        Commands::Check(args) => commands::check(&client, args.into(), &mut stdout).await?,
    };

    if !accepted {
        stdout.flush()?;
        std::process::exit(1);
    }
    Ok(())
}
