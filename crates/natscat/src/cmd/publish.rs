use bytes::Bytes;
use natscat_bus::Bus;
use natscat_frame::{Framing, PayloadReader};
use tokio::io::AsyncRead;
use tracing::info;

use crate::config::Config;
use crate::exit::{bus_error, frame_error, CliResult, SUCCESS};

pub async fn run<B, R>(bus: &B, config: &Config, input: R) -> CliResult<i32>
where
    B: Bus,
    R: AsyncRead + Unpin,
{
    let subject = config.subject.as_str();

    if let Some(message) = &config.message {
        publish(bus, subject, Bytes::from(message.clone())).await?;
        info!(subject, message = %message, "wrote message");
    } else {
        info!(subject, framing = %config.framing, "publishing stdin");
        let mut reader = PayloadReader::new(input, config.framing);
        let mut records = 0u64;
        let mut bytes = 0usize;

        while let Some(record) = reader
            .next_record()
            .await
            .map_err(|err| frame_error("read stdin failed", err))?
        {
            bytes = bytes.saturating_add(record.len());
            publish(bus, subject, record).await?;
            records = records.saturating_add(1);
        }

        match config.framing {
            Framing::Lines => info!(subject, lines = records, "wrote lines"),
            Framing::Raw => info!(subject, bytes, "wrote bytes"),
        }
    }

    bus.flush()
        .await
        .map_err(|err| bus_error("publish failed", err))?;

    Ok(SUCCESS)
}

async fn publish<B: Bus>(bus: &B, subject: &str, payload: Bytes) -> CliResult<()> {
    bus.publish(subject, payload)
        .await
        .map_err(|err| bus_error("publish failed", err))
}
