//! Sensor stream consumption
//!
//! Reads newline-delimited JSON events and hands each one to the router
//! before reading the next, so commands go out in event order. Lines that
//! fail to decode are skipped.

use std::future::Future;
use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::device::LightController;
use crate::router::{Event, EventRouter};

/// Counters for one run of the stream consumer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Events decoded and routed
    pub events: usize,
    /// Lines that could not be decoded
    pub skipped: usize,
}

/// Decodes one raw line, or `None` if it is blank or malformed
///
/// Lines that are not valid UTF-8 count as malformed.
pub fn decode_line(line: &[u8]) -> Option<Event> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return None;
    }
    match Event::parse_bytes(line) {
        Ok(event) => Some(event),
        Err(e) => {
            debug!(error = %e, line = %String::from_utf8_lossy(line), "Skipping malformed sensor line");
            None
        }
    }
}

/// Routes every event from `reader` until it reaches end of stream
pub async fn consume<R, C>(reader: R, router: &EventRouter<C>) -> io::Result<StreamStats>
where
    R: AsyncBufRead + Unpin,
    C: LightController,
{
    consume_until(reader, router, std::future::pending()).await
}

/// Routes events from `reader` until end of stream or until `shutdown`
/// completes
///
/// Shutdown is only observed between events; an event that is being routed
/// always finishes its dispatches first.
pub async fn consume_until<R, C, S>(
    mut reader: R,
    router: &EventRouter<C>,
    shutdown: S,
) -> io::Result<StreamStats>
where
    R: AsyncBufRead + Unpin,
    C: LightController,
    S: Future<Output = ()>,
{
    let mut line = Vec::new();
    let mut stats = StreamStats::default();
    tokio::pin!(shutdown);

    loop {
        line.clear();
        let read = tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("Stopping sensor stream");
                break;
            }
            read = reader.read_until(b'\n', &mut line) => read?,
        };

        if read == 0 {
            debug!("Sensor stream closed");
            break;
        }

        if line.trim_ascii().is_empty() {
            continue;
        }

        match decode_line(&line) {
            Some(event) => {
                router.handle_event(&event);
                stats.events += 1;
            }
            None => stats.skipped += 1,
        }
    }

    Ok(stats)
}
