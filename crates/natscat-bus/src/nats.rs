use std::str::FromStr;
use std::time::Duration;

use async_nats::{ConnectErrorKind, ServerAddr};
use bytes::Bytes;
use futures::StreamExt;
use tracing::debug;

use crate::error::{BusError, Result};
use crate::traits::{Bus, Message, MessageStream};

/// Server used when neither `--server` nor `NATS` is set.
pub const DEFAULT_URL: &str = "nats://127.0.0.1:4222";

/// Default time allowed for the initial connect.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection name reported to the server.
pub const DEFAULT_CLIENT_NAME: &str = "natscat";

/// Configuration for opening a NATS connection.
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    /// Server addresses, tried in order by the client.
    pub servers: Vec<String>,
    /// Upper bound on the initial connect.
    pub timeout: Duration,
    /// Client name shown in server monitoring.
    pub name: String,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            servers: vec![DEFAULT_URL.to_string()],
            timeout: DEFAULT_CONNECT_TIMEOUT,
            name: DEFAULT_CLIENT_NAME.to_string(),
        }
    }
}

impl ConnectConfig {
    /// Check every configured server address without connecting.
    pub fn validate(&self) -> Result<Vec<ServerAddr>> {
        parse_servers(&self.servers)
    }

    fn display_servers(&self) -> String {
        self.servers.join(",")
    }
}

/// A live NATS connection.
///
/// Dropping the value closes the connection.
pub struct NatsBus {
    client: async_nats::Client,
    servers: String,
}

impl NatsBus {
    /// Connect to the first reachable server in `config`.
    pub async fn connect(config: &ConnectConfig) -> Result<Self> {
        config.validate()?;

        let servers = config.display_servers();
        let client = async_nats::ConnectOptions::new()
            .name(&config.name)
            .connection_timeout(config.timeout)
            .connect(config.servers.as_slice())
            .await
            .map_err(|err| match err.kind() {
                ConnectErrorKind::TimedOut => BusError::ConnectTimeout {
                    servers: servers.clone(),
                    timeout: config.timeout,
                },
                ConnectErrorKind::Authentication | ConnectErrorKind::AuthorizationViolation => {
                    BusError::Authorization(err.to_string())
                }
                _ => BusError::Connect {
                    servers: servers.clone(),
                    reason: err.to_string(),
                },
            })?;

        debug!(servers = %servers, "connected");
        Ok(Self { client, servers })
    }

    /// The server list this connection was opened against.
    pub fn servers(&self) -> &str {
        &self.servers
    }

    /// Short description of the server we ended up on.
    pub fn server_description(&self) -> String {
        let info = self.client.server_info();
        format!(
            "{}:{} ({} {})",
            info.host, info.port, info.server_name, info.version
        )
    }
}

impl Bus for NatsBus {
    async fn publish(&self, subject: &str, payload: Bytes) -> Result<()> {
        self.client
            .publish(subject.to_string(), payload)
            .await
            .map_err(|err| BusError::Publish {
                subject: subject.to_string(),
                reason: err.to_string(),
            })
    }

    async fn subscribe(&self, subject: &str) -> Result<MessageStream> {
        let subscriber = self
            .client
            .subscribe(subject.to_string())
            .await
            .map_err(|err| BusError::Subscribe {
                subject: subject.to_string(),
                reason: err.to_string(),
            })?;

        Ok(subscriber
            .map(|msg| Message {
                subject: msg.subject.to_string(),
                payload: msg.payload,
            })
            .boxed())
    }

    async fn flush(&self) -> Result<()> {
        self.client
            .flush()
            .await
            .map_err(|err| BusError::Flush(err.to_string()))
    }
}

fn parse_servers(servers: &[String]) -> Result<Vec<ServerAddr>> {
    if servers.is_empty() {
        return Err(BusError::NoServers);
    }

    servers
        .iter()
        .map(|addr| {
            ServerAddr::from_str(addr).map_err(|source| BusError::InvalidAddress {
                addr: addr.clone(),
                source,
            })
        })
        .collect()
}
