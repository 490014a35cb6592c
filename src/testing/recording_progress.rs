use crate::domain::{PreparedPrompt, ResponseRecord};
use crate::ports::ProgressSink;

/// Collects progress callbacks as readable event strings.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub events: Vec<String>,
}

impl ProgressSink for RecordingProgress {
    fn started(&mut self, position: usize, total: usize, item: &PreparedPrompt) {
        self.events.push(format!("start {}/{} {}", position, total, item.label));
    }

    fn finished(&mut self, position: usize, total: usize, response: &ResponseRecord) {
        let status = if response.outcome.is_success() { "ok" } else { "failed" };
        self.events.push(format!("finish {}/{} {} {}", position, total, response.label, status));
    }
}
