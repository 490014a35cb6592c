mod label;
mod template;

pub use label::{display_name, label_for};
pub use template::{PromptTemplate, substitute};
