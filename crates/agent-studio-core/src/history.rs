use chrono::{DateTime, Utc};
use serde::Serialize;

/// One entry of the command execution log. Appended exactly once per
/// dispatched execution, never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionRecord {
    pub command: String,
    pub timestamp: DateTime<Utc>,
    pub args: Vec<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionRecord {
    pub fn success(command: impl Into<String>, args: &[String]) -> Self {
        Self::new(command, args, true, None)
    }

    pub fn failure(command: impl Into<String>, args: &[String], error: impl Into<String>) -> Self {
        Self::new(command, args, false, Some(error.into()))
    }

    fn new(
        command: impl Into<String>,
        args: &[String],
        success: bool,
        error: Option<String>,
    ) -> Self {
        Self {
            command: command.into(),
            timestamp: Utc::now(),
            args: args.to_vec(),
            success,
            error,
        }
    }
}

/// Append-only execution log, oldest record first. Readers get the most
/// recent records; nothing is ever removed in place.
#[derive(Debug, Default)]
pub struct ExecutionHistory {
    records: Vec<ExecutionRecord>,
}

impl ExecutionHistory {
    pub fn push(&mut self, record: ExecutionRecord) {
        self.records.push(record);
    }

    /// The most recent `limit` records (all of them when `limit` is `None`),
    /// most recent first.
    pub fn recent(&self, limit: Option<usize>) -> Vec<&ExecutionRecord> {
        let take = limit.unwrap_or(self.records.len());
        self.records.iter().rev().take(take).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn successes(&self) -> usize {
        self.records.iter().filter(|r| r.success).count()
    }

    pub fn failures(&self) -> usize {
        self.records.iter().filter(|r| !r.success).count()
    }
}
