use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use hashtrack::{
    AppConfig, CapPolicy, CaptureOutcome, IngestionLoop, Lane, Query, StreamChannel, SurrealSink,
    config::DEFAULT_CONFIG_PATH, editor, logging,
};

const SINGLE_COLLECTION: &str = "Tweets";
const QUERY_COLLECTION: &str = "QueryTweets";
const COMPARE_COLLECTION: &str = "CompareTweets";

#[derive(Parser)]
#[command(
    name = "hashtrack",
    version,
    about = "Track one or two live search terms and record every matching item",
    long_about = None
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "HASHTRACK_CONFIG")]
    config: PathBuf,

    /// Capture a second term and track both streams side by side
    #[arg(long)]
    compare: bool,

    /// What happens to the rest of the run when one stream reaches its cap
    #[arg(long = "on-capped", value_enum, default_value = "drain")]
    on_capped: CappedMode,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CappedMode {
    /// Close the capped stream and keep going until every stream caps
    Drain,
    /// End the whole run at the first capped stream
    Stop,
}

impl From<CappedMode> for CapPolicy {
    fn from(mode: CappedMode) -> Self {
        match mode {
            CappedMode::Drain => CapPolicy::DrainRemaining,
            CappedMode::Stop => CapPolicy::StopRun,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli) {
        error!("fatal: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(&cli.config).context("error reading configuration")?;

    let Some(query) = capture_query("Search")? else {
        return Ok(());
    };
    let compare = if cli.compare {
        let Some(second) = capture_query("Compare")? else {
            return Ok(());
        };
        Some(second)
    } else {
        None
    };

    let runtime = tokio::runtime::Runtime::new().context("could not start the async runtime")?;
    runtime.block_on(track(
        config,
        query,
        compare,
        cli.on_capped.into(),
        !cli.no_color,
    ))
}

/// Run one editing session; `None` means there is nothing to track and
/// the program should exit quietly.
fn capture_query(prompt: &str) -> Result<Option<Query>> {
    let outcome = editor::capture(prompt).context("interactive query editor failed")?;
    let raw = match outcome {
        CaptureOutcome::Submitted(raw) => raw,
        CaptureOutcome::Aborted => String::new(),
    };
    match Query::parse(&raw) {
        Some(query) => {
            println!("Searching for: {query}");
            Ok(Some(query))
        }
        None => {
            println!("No query given. Nothing to search for. Program exiting...");
            Ok(None)
        }
    }
}

async fn track(
    config: AppConfig,
    query: Query,
    compare: Option<Query>,
    policy: CapPolicy,
    use_color: bool,
) -> Result<()> {
    let sink = SurrealSink::connect(&config.database)
        .await
        .context("error connecting to the record store")?;
    let channel = StreamChannel::new(&config);

    let mut lanes = Vec::new();
    match &compare {
        Some(second) => {
            lanes.push(Lane {
                label: "query".to_string(),
                collection: QUERY_COLLECTION.to_string(),
                stream: channel
                    .open(query.as_str())
                    .await
                    .context("error opening the query stream")?,
            });
            lanes.push(Lane {
                label: "compare".to_string(),
                collection: COMPARE_COLLECTION.to_string(),
                stream: channel
                    .open(second.as_str())
                    .await
                    .context("error opening the compare stream")?,
            });
        }
        None => {
            lanes.push(Lane {
                label: "query".to_string(),
                collection: SINGLE_COLLECTION.to_string(),
                stream: channel
                    .open(query.as_str())
                    .await
                    .context("error opening the query stream")?,
            });
        }
    }

    let ingestion = IngestionLoop::new(sink, policy, &config.permalink_domain, use_color);
    let report = ingestion.run(lanes).await?;
    for lane in &report.lanes {
        info!(
            lane = %lane.label,
            collection = %lane.collection,
            stored = lane.stored,
            "stream complete"
        );
    }
    Ok(())
}
