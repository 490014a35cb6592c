mod completion_client;
mod document_encoder;
mod progress_sink;

pub use completion_client::{CompletionClient, MockCompletionClient, complete};
pub use document_encoder::DocumentEncoder;
pub use progress_sink::{NoopProgress, ProgressSink};
