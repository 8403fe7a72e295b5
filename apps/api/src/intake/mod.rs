// Intake: document text extraction and resume structuring.
// All model calls go through llm_client.

pub mod document;
pub mod prompts;
pub mod structuring;
