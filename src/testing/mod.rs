mod fake_completion_client;
mod recording_progress;

pub use fake_completion_client::FakeCompletionClient;
pub use recording_progress::RecordingProgress;
