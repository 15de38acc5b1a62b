use std::io::Write;

use futures::StreamExt;
use natscat_bus::Bus;
use natscat_frame::PayloadWriter;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::Config;
use crate::exit::{bus_error, frame_error, CliResult, SUCCESS};
use crate::output::payload_preview;

/// Forward deliveries to `out` until `shutdown` fires or the bus closes the
/// subscription.
pub async fn run<B, W>(
    bus: &B,
    config: &Config,
    out: W,
    shutdown: CancellationToken,
) -> CliResult<i32>
where
    B: Bus,
    W: Write,
{
    let mut messages = bus
        .subscribe(&config.subject)
        .await
        .map_err(|err| bus_error("subscribe failed", err))?;
    // Make sure the server has registered interest before we report ready.
    bus.flush()
        .await
        .map_err(|err| bus_error("subscribe failed", err))?;
    info!(subject = %config.subject, framing = %config.framing, "listening");

    let mut writer = PayloadWriter::new(out, config.framing);

    loop {
        let message = tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                debug!("shutdown requested");
                break;
            }
            next = messages.next() => match next {
                Some(message) => message,
                None => {
                    debug!("subscription closed by server");
                    break;
                }
            },
        };

        info!(
            subject = %message.subject,
            payload = %payload_preview(&message.payload),
            "received"
        );
        writer
            .write_payload(&message.payload)
            .map_err(|err| frame_error("write stdout failed", err))?;
    }

    info!(received = writer.written(), "stopped listening");
    Ok(SUCCESS)
}
