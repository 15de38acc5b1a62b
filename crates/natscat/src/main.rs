mod cmd;
mod config;
mod exit;
mod logging;
mod output;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use crate::cmd::CatArgs;
use crate::config::Config;
use crate::exit::{io_error, CliResult};
use crate::logging::{init_logging, LogFormat, LogLevel};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("NATSCAT_BUILD_TARGET"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "natscat",
    version,
    long_version = LONG_VERSION,
    about = "cat to/from NATS subject",
    override_usage = "natscat [OPTIONS] --subject <SUBJECT> [MESSAGE]..."
)]
struct Cli {
    #[command(flatten)]
    args: CatArgs,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level (stderr). Defaults to warn, or info with --verbose.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,
}

fn main() {
    let cli = Cli::parse();
    let level = cli
        .log_level
        .unwrap_or_else(|| LogLevel::for_verbose(cli.args.verbose));
    init_logging(cli.log_format, level);

    let result = Config::from_args(cli.args).and_then(run);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

fn run(config: Config) -> CliResult<i32> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| io_error("runtime setup failed", err))?;

    runtime.block_on(cmd::run(config, CancellationToken::new()))
}
