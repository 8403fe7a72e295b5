// Per-criterion evidence evaluation.

pub mod evaluator;
pub mod prompts;
