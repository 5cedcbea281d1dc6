//! Data loader for fill log files
//!
//! Fill logs are exported from the store either as a JSON array or as JSONL
//! (one fill per line). Files ending in `.jsonl` are streamed line by line;
//! malformed lines are logged and skipped. Anything else is parsed as a
//! single JSON array, and a malformed array is an error.
//!
//! Every loaded fill has its pricing completed (see
//! [`FillEvent::with_completed_pricing`]) before it is handed on, so the
//! analytics engine can rely on `total_cost` whenever a unit price was known.
//!
//! # Examples
//!
//! ```no_run
//! use fueltrack::data_loader::DataLoader;
//! use futures::StreamExt;
//!
//! # async fn example() -> fueltrack::Result<()> {
//! let loader = DataLoader::new("fills.jsonl")?;
//!
//! let fills = loader.load_fill_events();
//! tokio::pin!(fills);
//! while let Some(result) = fills.next().await {
//!     let fill = result?;
//!     println!("{} on {}: {} units", fill.vehicle_id, fill.filled_at, fill.fuel_volume);
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{FueltrackError, Result};
use crate::filters::FillFilter;
use crate::types::FillEvent;
use futures::{StreamExt, TryStreamExt};
use futures::stream::Stream;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

/// Environment variable naming the default fill log
pub const DATA_PATH_ENV: &str = "FUELTRACK_DATA";

/// Loader streaming fill events out of a single fill log file
pub struct DataLoader {
    path: PathBuf,
}

impl DataLoader {
    /// Create a loader for `path`
    ///
    /// # Errors
    ///
    /// Returns [`FueltrackError::NoData`] if the path is not an existing file
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(FueltrackError::NoData(path));
        }

        debug!("Loading fills from {}", path.display());
        Ok(Self { path })
    }

    /// Path of the fill log
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_jsonl(&self) -> bool {
        self.path.extension().and_then(|s| s.to_str()) == Some("jsonl")
    }

    /// Load fill events as an async stream
    pub fn load_fill_events(&self) -> impl Stream<Item = Result<FillEvent>> + '_ {
        async_stream::stream! {
            let inner = if self.is_jsonl() {
                Self::parse_jsonl_stream(self.path.clone()).boxed()
            } else {
                Self::parse_json_array(self.path.clone()).boxed()
            };

            tokio::pin!(inner);
            while let Some(result) = inner.next().await {
                yield result.map(FillEvent::with_completed_pricing);
            }
        }
    }

    /// Load every fill event into memory, stopping at the first error
    pub async fn load_all(&self) -> Result<Vec<FillEvent>> {
        let stream = self.load_fill_events();
        tokio::pin!(stream);

        let mut fills = Vec::new();
        while let Some(result) = stream.next().await {
            fills.push(result?);
        }
        debug!("Loaded {} fills", fills.len());
        Ok(fills)
    }

    /// Load the fills `filter` keeps, stopping at the first error
    pub async fn load_filtered(&self, filter: FillFilter) -> Result<Vec<FillEvent>> {
        let fills: Vec<FillEvent> = filter
            .filter_stream(self.load_fill_events())
            .try_collect()
            .await?;
        debug!("{} fills left after filtering", fills.len());
        Ok(fills)
    }

    /// Parse a JSONL file as a stream, skipping malformed lines
    fn parse_jsonl_stream(path: PathBuf) -> impl Stream<Item = Result<FillEvent>> + Send {
        async_stream::stream! {
            let file = match tokio::fs::File::open(&path).await {
                Ok(f) => f,
                Err(e) => {
                    yield Err(e.into());
                    return;
                }
            };

            let reader = BufReader::new(file);
            let mut lines = reader.lines();
            let mut line_number = 0;

            loop {
                let line = match lines.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        yield Err(e.into());
                        return;
                    }
                };
                line_number += 1;

                if line.trim().is_empty() {
                    continue;
                }

                match serde_json::from_str::<FillEvent>(&line) {
                    Ok(event) => yield Ok(event),
                    Err(e) => {
                        warn!(
                            "Failed to parse line {} in {}: {}",
                            line_number,
                            path.display(),
                            e
                        );
                    }
                }
            }
        }
    }

    /// Parse a file holding a JSON array of fills
    fn parse_json_array(path: PathBuf) -> impl Stream<Item = Result<FillEvent>> + Send {
        async_stream::stream! {
            let contents = match tokio::fs::read_to_string(&path).await {
                Ok(contents) => contents,
                Err(e) => {
                    yield Err(e.into());
                    return;
                }
            };

            match serde_json::from_str::<Vec<FillEvent>>(&contents) {
                Ok(events) => {
                    for event in events {
                        yield Ok(event);
                    }
                }
                Err(e) => yield Err(FueltrackError::Parse {
                    file: path.clone(),
                    error: e.to_string(),
                }),
            }
        }
    }
}
