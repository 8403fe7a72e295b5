// Synthesis: criterion assessments → final rating and recommendations.

pub mod grading;
pub mod knowledge;
pub mod prompts;
pub mod synthesizer;
