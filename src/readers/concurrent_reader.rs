use crate::error::Result;
use crate::models::StationRecordTable;
use crate::readers::StationTableReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Outcome of loading one station; a missing or malformed source fails
/// that station only.
pub type StationLoad = (String, Result<StationRecordTable>);

/// Loads many station tables on the blocking pool, `max_workers` at a time.
pub struct ConcurrentReader {
    max_workers: usize,
    reader: Arc<StationTableReader>,
}

impl ConcurrentReader {
    pub fn new(max_workers: usize, reader: StationTableReader) -> Self {
        Self {
            max_workers: max_workers.max(1),
            reader: Arc::new(reader),
        }
    }

    /// Read the tables for `codes`, preserving input order in the output
    pub async fn read_tables(&self, data_dir: &Path, codes: &[String]) -> Result<Vec<StationLoad>> {
        let mut loads = Vec::with_capacity(codes.len());

        for batch in codes.chunks(self.max_workers) {
            let handles: Vec<(String, JoinHandle<Result<StationRecordTable>>)> = batch
                .iter()
                .map(|code| {
                    let reader = Arc::clone(&self.reader);
                    let data_dir: PathBuf = data_dir.to_path_buf();
                    let task_code = code.clone();
                    let handle = tokio::task::spawn_blocking(move || {
                        reader.read_station(&data_dir, &task_code)
                    });
                    (code.clone(), handle)
                })
                .collect();

            for (code, handle) in handles {
                let result = handle.await?;
                if let Err(ref e) = result {
                    warn!(station = %code, error = %e, "station table unavailable");
                }
                loads.push((code, result));
            }
            debug!(loaded = loads.len(), total = codes.len(), "station batch read");
        }

        Ok(loads)
    }
}

impl Default for ConcurrentReader {
    fn default() -> Self {
        Self::new(num_cpus::get(), StationTableReader::new())
    }
}
