// Criteria mapping: structured resume → per-criterion evidence.

pub mod mapper;
pub mod prompts;
