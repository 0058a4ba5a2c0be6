use serde::{Deserialize, Serialize};

/// Overall outcome of a run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Every row was filled and saved
    Success,
    /// The batch ran to the end but at least one row failed
    Partial,
    /// Nothing ran: the source or the target window was unavailable
    Error,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{self:?}").to_lowercase())
    }
}

/// Final report of a run. Row indices are 1-based, in source order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunResult {
    pub status: RunStatus,
    pub processed_rows: Vec<usize>,
    pub failed_rows: Vec<usize>,
    pub total_rows: usize,
    pub message: String,
}

impl RunResult {
    /// A run that stopped before any row was processed
    pub fn error(message: impl Into<String>, total_rows: usize) -> Self {
        Self {
            status: RunStatus::Error,
            processed_rows: Vec::new(),
            failed_rows: Vec::new(),
            total_rows,
            message: message.into(),
        }
    }

    /// A run that went through every row
    pub fn completed(processed_rows: Vec<usize>, failed_rows: Vec<usize>, total_rows: usize) -> Self {
        let status = if failed_rows.is_empty() {
            RunStatus::Success
        } else {
            RunStatus::Partial
        };
        Self {
            status,
            processed_rows,
            failed_rows,
            total_rows,
            message: "Completed form population from Excel.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_follows_failed_rows() {
        assert_eq!(RunResult::completed(vec![1, 2], vec![], 2).status, RunStatus::Success);
        assert_eq!(RunResult::completed(vec![1], vec![2], 2).status, RunStatus::Partial);
        assert_eq!(RunResult::completed(vec![], vec![1], 1).status, RunStatus::Partial);
    }

    #[test]
    fn test_serialized_shape() {
        let result = RunResult::completed(vec![1, 3], vec![2], 3);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "status": "partial",
                "processed_rows": [1, 3],
                "failed_rows": [2],
                "total_rows": 3,
                "message": "Completed form population from Excel."
            })
        );
        assert_eq!(RunStatus::Error.to_string(), "error");
    }
}
