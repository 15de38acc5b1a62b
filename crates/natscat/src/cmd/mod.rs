use clap::Args;
use natscat_bus::{NatsBus, DEFAULT_CLIENT_NAME, DEFAULT_URL};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::{Config, Mode};
use crate::exit::{bus_error, CliError, CliResult, INTERNAL};

pub mod publish;
pub mod subscribe;

#[derive(Args, Debug)]
pub struct CatArgs {
    /// [Required] Subject to publish to or listen on ('*' and '>' wildcards only valid when listening).
    #[arg(short, long)]
    pub subject: Option<String>,
    /// Listen for messages instead of publishing.
    #[arg(short, long)]
    pub listen: bool,
    /// Read/write messages one per line instead of as raw bytes.
    #[arg(short, long)]
    pub buffered: bool,
    /// Message to publish instead of reading stdin.
    #[arg(short, long)]
    pub message: Option<String>,
    /// Verbose logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
    /// NATS server URL(s), comma-separated.
    #[arg(
        short = 'S',
        long,
        env = "NATS",
        value_delimiter = ',',
        default_value = DEFAULT_URL
    )]
    pub server: Vec<String>,
    /// Time allowed for the initial connect (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub connect_timeout: String,
    /// Connection name reported to the server.
    #[arg(long, default_value = DEFAULT_CLIENT_NAME)]
    pub name: String,
    /// Message to publish, joined with spaces (implies --buffered).
    #[arg(value_name = "MESSAGE")]
    pub words: Vec<String>,
}

/// Connect and forward until done (publish) or cancelled (subscribe).
pub async fn run(config: Config, shutdown: CancellationToken) -> CliResult<i32> {
    let bus = NatsBus::connect(&config.connect)
        .await
        .map_err(|err| bus_error("connect failed", err))?;
    info!(
        servers = bus.servers(),
        server = %bus.server_description(),
        "connected"
    );

    match config.mode {
        Mode::Subscribe => {
            install_shutdown_handler(shutdown.clone())?;
            subscribe::run(&bus, &config, std::io::stdout(), shutdown).await
        }
        Mode::Publish => publish::run(&bus, &config, tokio::io::stdin()).await,
    }
}

fn install_shutdown_handler(shutdown: CancellationToken) -> CliResult<()> {
    #[cfg(unix)]
    let mut terminate =
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()).map_err(
            |err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")),
        )?;

    tokio::spawn(async move {
        #[cfg(unix)]
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = terminate.recv() => {}
        }
        #[cfg(not(unix))]
        let _ = tokio::signal::ctrl_c().await;

        debug!("shutdown signal received");
        shutdown.cancel();
    });

    Ok(())
}
