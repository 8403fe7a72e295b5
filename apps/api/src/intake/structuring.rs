//! Resume structuring: raw resume text → `StructuredResume`.
//!
//! Flow: full-schema prompt → (on failure) simplified recovery prompt → (on failure)
//! minimal record carrying the error in `additionalInfo.error`. Never fails.

use serde_json::Value;
use tracing::{info, warn};

use crate::intake::document::preprocess;
use crate::intake::prompts::{
    RESUME_RECOVERY_PROMPT, RESUME_STRUCTURING_PROMPT, RESUME_STRUCTURING_SYSTEM,
};
use crate::llm_client::prompts::{render, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{complete_json, LanguageModel, LlmError};
use crate::models::resume::StructuredResume;

/// Structures raw resume text. Always returns a resume with every section present.
pub async fn structure_resume(raw_text: &str, model: &dyn LanguageModel) -> StructuredResume {
    let text = preprocess(raw_text);
    if text.is_empty() {
        warn!("Resume text is empty; skipping structuring");
        return StructuredResume::failed("resume text is empty");
    }

    let prompt = render(
        RESUME_STRUCTURING_PROMPT,
        &[("json_only", JSON_ONLY_INSTRUCTION), ("raw_text", &text)],
    );

    let error = match complete_json::<Value>(model, &prompt, RESUME_STRUCTURING_SYSTEM).await {
        Ok(value @ Value::Object(_)) => {
            let resume = StructuredResume::from_value(value);
            info!("Structured resume on first attempt");
            return resume;
        }
        Ok(other) => format!("expected a JSON object, got {}", json_kind(&other)),
        Err(e) => e.to_string(),
    };

    warn!("Resume structuring failed ({error}); trying simplified prompt");
    match recover(&text, &error, model).await {
        Ok(resume) => {
            info!("Structured resume with simplified prompt");
            resume
        }
        Err(e) => {
            warn!("Resume structuring recovery failed: {e}");
            StructuredResume::failed(&e.to_string())
        }
    }
}

async fn recover(
    text: &str,
    error: &str,
    model: &dyn LanguageModel,
) -> Result<StructuredResume, LlmError> {
    let prompt = render(
        RESUME_RECOVERY_PROMPT,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("error", error),
            ("raw_text", text),
        ],
    );

    let value: Value = complete_json(model, &prompt, RESUME_STRUCTURING_SYSTEM).await?;
    let Value::Object(mut simplified) = value else {
        return Err(LlmError::EmptyContent);
    };

    // The simplified schema calls the catch-all section "other".
    if let Some(other) = simplified.remove("other") {
        simplified.entry("additionalInfo").or_insert(other);
    }
    Ok(StructuredResume::from_value(Value::Object(simplified)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
