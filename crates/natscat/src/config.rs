use std::time::Duration;

use natscat_bus::{has_wildcard, ConnectConfig};
use natscat_frame::Framing;
use tracing::warn;

use crate::cmd::CatArgs;
use crate::exit::{bus_error, CliError, CliResult};

/// Direction of data flow.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// stdin (or a literal message) to the subject.
    Publish,
    /// Subject deliveries to stdout.
    Subscribe,
}

/// Validated, immutable run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub subject: String,
    pub mode: Mode,
    pub framing: Framing,
    /// Literal message to publish instead of reading stdin.
    pub message: Option<String>,
    pub connect: ConnectConfig,
}

impl Config {
    /// Validate parsed arguments. Nothing here touches the network.
    pub fn from_args(args: CatArgs) -> CliResult<Self> {
        let mode = if args.listen {
            Mode::Subscribe
        } else {
            Mode::Publish
        };
        let mut buffered = args.buffered;
        let mut message = args.message;

        match mode {
            Mode::Publish if !args.words.is_empty() => {
                message = Some(args.words.join(" "));
                buffered = true;
            }
            Mode::Subscribe if message.is_some() || !args.words.is_empty() => {
                warn!("message arguments are ignored when listening");
                message = None;
            }
            _ => {}
        }
        // An empty message means "read stdin".
        let message = message.filter(|m| !m.is_empty());

        let subject = args.subject.unwrap_or_default();
        if subject.is_empty() {
            return Err(CliError::usage("must specify subject string (--subject)"));
        }
        if mode == Mode::Publish && has_wildcard(&subject) {
            return Err(CliError::usage(format!(
                "cannot publish to wildcard subject {subject:?}; '*' and '>' are only valid when listening"
            )));
        }

        let connect = ConnectConfig {
            servers: args
                .server
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            timeout: parse_duration(&args.connect_timeout)?,
            name: args.name,
        };
        connect
            .validate()
            .map_err(|err| bus_error("invalid --server", err))?;

        Ok(Self {
            subject,
            mode,
            framing: Framing::from_buffered(buffered),
            message,
            connect,
        })
    }
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::usage("duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::usage(format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::usage("duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}
