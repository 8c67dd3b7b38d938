use jobboard::board::{InMemoryBoardRepository, JobBoardService};
use jobboard::error::AppError;
use jobboard::matching::{MatchScorer, MatchWeights};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type BoardService = JobBoardService<InMemoryBoardRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory board service; records live as long as the process.
pub(crate) fn in_memory_board(weights: MatchWeights) -> Arc<BoardService> {
    let repository = Arc::new(InMemoryBoardRepository::default());
    Arc::new(JobBoardService::new(repository, MatchScorer::new(weights)))
}

pub(crate) fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
