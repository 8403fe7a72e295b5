// Full assessment: evaluator fan-out, synthesis, and the HTTP handlers.

pub mod handlers;
pub mod manager;
