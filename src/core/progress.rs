use serde::{Deserialize, Serialize};

/// Progress message type
#[derive(Debug, Deserialize, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ProgressType {
    Start,
    Progress,
    Error,
    Archiving,
    Complete,
}

/// Progress of one batch, reported to whoever drives the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Progress type (start, progress, error, archiving, complete)
    pub progress_type: ProgressType,
    /// Number of items handed to the codec so far
    pub completed_tasks: usize,
    /// Total number of items in the batch
    pub total_tasks: usize,
    /// Progress percentage (0-100)
    pub progress_percentage: usize,
    /// Current status message
    pub status: String,
    /// Source file the event is about, if any
    #[serde(default)]
    pub file_name: Option<String>,
    /// Error message for failed items
    #[serde(default)]
    pub error: Option<String>,
}

impl Progress {
    /// Create a new Progress instance with basic information
    pub fn new(
        progress_type: ProgressType,
        completed_tasks: usize,
        total_tasks: usize,
        status: impl Into<String>,
    ) -> Self {
        let progress_percentage = if total_tasks > 0 {
            (completed_tasks * 100) / total_tasks
        } else {
            0
        };

        Self {
            progress_type,
            completed_tasks,
            total_tasks,
            progress_percentage,
            status: status.into(),
            file_name: None,
            error: None,
        }
    }

    pub fn start(total_tasks: usize) -> Self {
        Self::new(ProgressType::Start, 0, total_tasks, "Converting files...")
    }

    /// Emitted before item `index` (zero based) is processed.
    pub fn item(index: usize, total_tasks: usize, file_name: &str) -> Self {
        let completed = index + 1;
        let mut progress = Self::new(
            ProgressType::Progress,
            completed,
            total_tasks,
            format!("Processing {file_name} ({completed}/{total_tasks})..."),
        );
        progress.file_name = Some(file_name.to_string());
        progress
    }

    pub fn failed(index: usize, total_tasks: usize, file_name: &str, error: &str) -> Self {
        let mut progress = Self::new(
            ProgressType::Error,
            index + 1,
            total_tasks,
            format!("Failed to convert {file_name}: {error}"),
        );
        progress.file_name = Some(file_name.to_string());
        progress.error = Some(error.to_string());
        progress
    }

    pub fn archiving(total_tasks: usize) -> Self {
        Self::new(ProgressType::Archiving, total_tasks, total_tasks, "Creating zip file...")
    }

    pub fn complete(total_tasks: usize, converted: usize) -> Self {
        Self::new(
            ProgressType::Complete,
            total_tasks,
            total_tasks,
            format!("Conversion complete! {converted} file(s) converted."),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_zero_for_empty_batch() {
        assert_eq!(Progress::start(0).progress_percentage, 0);
        assert_eq!(Progress::archiving(0).progress_percentage, 0);
    }

    #[test]
    fn item_progress_counts_the_current_item() {
        let p = Progress::item(1, 4, "b.heic");
        assert_eq!(p.completed_tasks, 2);
        assert_eq!(p.progress_percentage, 50);
        assert_eq!(p.status, "Processing b.heic (2/4)...");
        assert_eq!(p.file_name.as_deref(), Some("b.heic"));
    }

    #[test]
    fn failure_carries_the_error() {
        let p = Progress::failed(0, 1, "a.heic", "bad data");
        assert_eq!(p.progress_type, ProgressType::Error);
        assert_eq!(p.error.as_deref(), Some("bad data"));
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(Progress::complete(3, 2)).unwrap();
        assert_eq!(json["progressType"], "complete");
        assert_eq!(json["totalTasks"], 3);
        assert_eq!(json["progressPercentage"], 100);
    }
}
