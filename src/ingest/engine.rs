use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::schemas::{DecodeError, Record, StreamItem};
use crate::sink::{RecordSink, SinkError};
use crate::stream::{ItemStream, StreamError};
use crate::summary;

/// Every lane stops after this many stored records.
pub const STREAM_CAP: u32 = 25;

const EVENT_BUFFER: usize = 64;

/// What the run does once one lane reaches [`STREAM_CAP`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapPolicy {
    /// Close the capped lane and keep consuming the others until every
    /// lane is capped.
    DrainRemaining,
    /// End the whole run at the first capped lane.
    StopRun,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{label} stream failed")]
    Stream {
        label: String,
        #[source]
        source: StreamError,
    },
    #[error("could not decode an item from the {label} stream")]
    Decode {
        label: String,
        #[source]
        source: DecodeError,
    },
    #[error("could not store a {label} record in {collection}")]
    Sink {
        label: String,
        collection: String,
        #[source]
        source: SinkError,
    },
}

/// One stream wired to its destination collection.
pub struct Lane<S> {
    pub label: String,
    pub collection: String,
    pub stream: S,
}

#[derive(Debug, Clone)]
pub struct LaneReport {
    pub label: String,
    pub collection: String,
    pub stored: u32,
}

/// Per-lane totals for a run that ended cleanly.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub lanes: Vec<LaneReport>,
}

struct LaneEvent {
    lane: usize,
    payload: Result<StreamItem, StreamError>,
}

struct LaneState {
    label: String,
    collection: String,
    stored: u32,
    capped: bool,
    stop: watch::Sender<bool>,
}

/// Fans every lane into one consumer.
///
/// Each lane gets its own reader task; the consumer decodes, prints and
/// stores items strictly in arrival order. The first fault anywhere
/// ends the run, and every exit path tears all lanes down before
/// returning.
pub struct IngestionLoop<K> {
    sink: K,
    policy: CapPolicy,
    permalink_domain: String,
    use_color: bool,
}

impl<K: RecordSink> IngestionLoop<K> {
    pub fn new(sink: K, policy: CapPolicy, permalink_domain: &str, use_color: bool) -> Self {
        Self {
            sink,
            policy,
            permalink_domain: permalink_domain.to_string(),
            use_color,
        }
    }

    pub async fn run<S>(&self, lanes: Vec<Lane<S>>) -> Result<RunReport, IngestError>
    where
        S: ItemStream + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<LaneEvent>(EVENT_BUFFER);
        let mut states = Vec::with_capacity(lanes.len());
        let mut workers = Vec::with_capacity(lanes.len());
        for (index, lane) in lanes.into_iter().enumerate() {
            let (stop_tx, stop_rx) = watch::channel(false);
            states.push(LaneState {
                label: lane.label.clone(),
                collection: lane.collection,
                stored: 0,
                capped: false,
                stop: stop_tx,
            });
            workers.push(tokio::spawn(pump(
                index,
                lane.label,
                lane.stream,
                tx.clone(),
                stop_rx,
            )));
        }
        // The consumer's recv() ends once every worker is gone.
        drop(tx);

        let outcome = self.consume(&mut rx, &mut states).await;

        for state in &states {
            let _ = state.stop.send(true);
        }
        rx.close();
        for worker in workers {
            let _ = worker.await;
        }

        outcome.map(|()| RunReport {
            lanes: states
                .into_iter()
                .map(|state| LaneReport {
                    label: state.label,
                    collection: state.collection,
                    stored: state.stored,
                })
                .collect(),
        })
    }

    async fn consume(
        &self,
        rx: &mut mpsc::Receiver<LaneEvent>,
        states: &mut [LaneState],
    ) -> Result<(), IngestError> {
        while let Some(event) = rx.recv().await {
            let state = &mut states[event.lane];
            if state.capped {
                // Items the worker had already queued when the cap hit.
                continue;
            }
            let item = match event.payload {
                Ok(item) => item,
                Err(source) => {
                    return Err(IngestError::Stream {
                        label: state.label.clone(),
                        source,
                    });
                }
            };
            let record = Record::from_item(&item).map_err(|source| IngestError::Decode {
                label: state.label.clone(),
                source,
            })?;

            println!(
                "{}",
                summary::format_record(&record, &self.permalink_domain, self.use_color)
            );
            println!();

            self.sink
                .insert(&state.collection, &record)
                .await
                .map_err(|source| IngestError::Sink {
                    label: state.label.clone(),
                    collection: state.collection.clone(),
                    source,
                })?;
            state.stored += 1;
            debug!(lane = %state.label, id = record.id, stored = state.stored, "record stored");

            if state.stored == STREAM_CAP {
                state.capped = true;
                let _ = state.stop.send(true);
                info!(lane = %state.label, stored = state.stored, "stream capped");
                match self.policy {
                    CapPolicy::StopRun => break,
                    CapPolicy::DrainRemaining => {
                        if states.iter().all(|s| s.capped) {
                            break;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

async fn pump<S>(
    lane: usize,
    label: String,
    mut stream: S,
    tx: mpsc::Sender<LaneEvent>,
    mut stop_rx: watch::Receiver<bool>,
) where
    S: ItemStream + 'static,
{
    loop {
        tokio::select! {
            _ = stop_rx.changed() => break,
            payload = stream.next_item() => {
                let failed = payload.is_err();
                if tx.send(LaneEvent { lane, payload }).await.is_err() {
                    break;
                }
                if failed {
                    break;
                }
            }
        }
    }
    if let Err(error) = stream.close().await {
        debug!(lane = %label, %error, "stream close failed");
    }
    debug!(lane = %label, "stream worker stopped");
}
