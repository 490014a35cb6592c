use crate::domain::{PreparedPrompt, ResponseRecord};

/// Receives per-item progress while a batch executes.
///
/// `position` is one-based within the selected items.
pub trait ProgressSink {
    fn started(&mut self, position: usize, total: usize, item: &PreparedPrompt);

    fn finished(&mut self, position: usize, total: usize, response: &ResponseRecord);
}

/// Sink that discards progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn started(&mut self, _position: usize, _total: usize, _item: &PreparedPrompt) {}

    fn finished(&mut self, _position: usize, _total: usize, _response: &ResponseRecord) {}
}
