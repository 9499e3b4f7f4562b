use barstr::geocoder::DEFAULT_GEOCODER_URL;
use barstr::http::DEFAULT_USER_AGENT;
use barstr::venues::DEFAULT_VENUES_URL;
use barstr::DEFAULT_LOOKBACK_SECS;
use barstr_bot::Config;
use clap::Parser;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "barstr-bot")]
#[command(version)]
#[command(about = "Replies to #barstr notes on nostr with bitcoin-friendly bars")]
struct Cli {
    /// Secret key (nsec or hex). A random identity is used when unset
    #[arg(long, env = "NOSTR_NSEC", hide_env_values = true)]
    secret_key: Option<String>,

    /// Relay URL (repeatable)
    #[arg(long = "relay", env = "BARSTR_RELAYS", value_delimiter = ',')]
    relays: Vec<String>,

    /// Geocoding search endpoint
    #[arg(long, env = "BARSTR_GEOCODER_URL", default_value = DEFAULT_GEOCODER_URL)]
    geocoder_url: String,

    /// Venue elements endpoint
    #[arg(long, env = "BARSTR_VENUES_URL", default_value = DEFAULT_VENUES_URL)]
    venues_url: String,

    /// User-Agent sent to the providers
    #[arg(long, env = "BARSTR_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Per-request timeout for provider calls
    #[arg(long, env = "BARSTR_HTTP_TIMEOUT_SECS", default_value_t = 10)]
    http_timeout_secs: u64,

    /// How many seconds of past notes the subscriptions cover at startup
    #[arg(long, env = "BARSTR_LOOKBACK_SECS", default_value_t = DEFAULT_LOOKBACK_SECS)]
    lookback_secs: u64,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            secret_key: cli.secret_key,
            relays: cli.relays,
            geocoder_url: cli.geocoder_url,
            venues_url: cli.venues_url,
            user_agent: cli.user_agent,
            http_timeout: Duration::from_secs(cli.http_timeout_secs),
            lookback_secs: cli.lookback_secs,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_logging();

    let config = Config::from(Cli::parse());

    if let Err(e) = barstr_bot::run(config, shutdown_signal()).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Bot stopped by user."),
        Err(e) => {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
