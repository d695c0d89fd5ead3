//! Server state shared by the HTTP handlers.

use std::collections::VecDeque;
use std::sync::Arc;
use axum::body::Bytes;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::ServerConfig;

/// A finished archive kept around so the page can keep offering the download.
#[derive(Debug, Clone)]
pub struct StoredArchive {
    pub id: Uuid,
    pub file_name: String,
    pub bytes: Bytes,
}

/// Bounded FIFO of recent archives. The oldest entry is evicted first.
#[derive(Debug)]
pub struct ResultStore {
    capacity: usize,
    entries: Mutex<VecDeque<StoredArchive>>,
}

impl ResultStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub async fn insert(&self, file_name: String, bytes: Bytes) -> Uuid {
        let id = Uuid::new_v4();
        let mut entries = self.entries.lock().await;
        while entries.len() >= self.capacity {
            if let Some(evicted) = entries.pop_front() {
                debug!("Evicting stored archive {} ({})", evicted.id, evicted.file_name);
            }
        }
        entries.push_back(StoredArchive { id, file_name, bytes });
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<StoredArchive> {
        let entries = self.entries.lock().await;
        entries.iter().find(|entry| entry.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

/// State handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub results: Arc<ResultStore>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let results = Arc::new(ResultStore::new(config.keep_results));
        Self {
            config: Arc::new(config),
            results,
        }
    }
}
