//! Criteria mapping: `StructuredResume` → `CriteriaMapping`.
//!
//! Flow: model mapping → (on failure) section heuristics → fill missing criteria →
//! (if too few Moderate/Strong criteria) one enhancement pass. Never fails.

use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::prompts::{
    render, EVIDENCE_STRENGTH_SCALE, JSON_ONLY_INSTRUCTION, O1A_CRITERIA_OVERVIEW,
};
use crate::llm_client::{complete_json, LanguageModel, LlmError};
use crate::mapping::prompts::{ENHANCE_MAPPING_PROMPT, MAPPING_PROMPT, MAPPING_SYSTEM_TEMPLATE};
use crate::models::criteria::{CriteriaMapping, Criterion, CriterionEvidence, EvidenceStrength};
use crate::models::resume::StructuredResume;

/// Enhancement runs when fewer than this many criteria are Moderate or Strong.
pub const DEFAULT_ENHANCE_THRESHOLD: usize = 3;

/// Maps a structured resume onto the eight criteria. Always returns all eight.
pub async fn map_resume_to_criteria(
    resume: &StructuredResume,
    model: &dyn LanguageModel,
    enhance_threshold: usize,
) -> CriteriaMapping {
    let system = mapping_system_prompt();

    let resume_json = match serde_json::to_string_pretty(resume) {
        Ok(json) => json,
        Err(e) => {
            warn!("Could not serialize resume for mapping: {e}");
            let mut mapping = heuristic_mapping(resume);
            mapping.fill_missing();
            return mapping;
        }
    };

    let mut mapping = match request_mapping(&resume_json, &system, model).await {
        Ok(mapping) => {
            info!("Mapped resume to {} criteria", mapping.len());
            mapping
        }
        Err(e) => {
            warn!("Criteria mapping failed ({e}); falling back to section heuristics");
            heuristic_mapping(resume)
        }
    };
    mapping.fill_missing();

    let qualifying = mapping.qualifying_count();
    if qualifying >= enhance_threshold {
        return mapping;
    }

    info!(
        "Only {qualifying} criteria are Moderate/Strong (threshold {enhance_threshold}); enhancing mapping"
    );
    match enhance(&resume_json, &mapping, &system, model).await {
        Ok(enhanced) => enhanced,
        Err(e) => {
            warn!("Mapping enhancement failed ({e}); keeping original mapping");
            mapping
        }
    }
}

fn mapping_system_prompt() -> String {
    render(
        MAPPING_SYSTEM_TEMPLATE,
        &[
            ("criteria_overview", O1A_CRITERIA_OVERVIEW),
            ("strength_scale", EVIDENCE_STRENGTH_SCALE),
        ],
    )
}

async fn request_mapping(
    resume_json: &str,
    system: &str,
    model: &dyn LanguageModel,
) -> Result<CriteriaMapping, LlmError> {
    let prompt = render(
        MAPPING_PROMPT,
        &[("json_only", JSON_ONLY_INSTRUCTION), ("resume_json", resume_json)],
    );
    let value: Value = complete_json(model, &prompt, system).await?;
    let mapping = CriteriaMapping::from_value(value);
    if mapping.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(mapping)
}

/// One enhancement pass. Criteria the model drops keep their original record.
async fn enhance(
    resume_json: &str,
    mapping: &CriteriaMapping,
    system: &str,
    model: &dyn LanguageModel,
) -> Result<CriteriaMapping, LlmError> {
    let mapping_json = serde_json::to_string_pretty(mapping)?;
    let prompt = render(
        ENHANCE_MAPPING_PROMPT,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("mapping_json", &mapping_json),
            ("resume_json", resume_json),
        ],
    );

    let value: Value = complete_json(model, &prompt, system).await?;
    let mut enhanced = CriteriaMapping::from_value(value);
    if enhanced.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    for criterion in Criterion::ALL {
        if enhanced.get(criterion).is_none() {
            if let Some(original) = mapping.get(criterion) {
                enhanced.insert(criterion, original.clone());
            }
        }
    }
    Ok(enhanced)
}

/// Section-based fallback used when the model mapping cannot be obtained.
///
/// Only the four criteria with an obvious resume section get evidence, all at `Weak`.
pub fn heuristic_mapping(resume: &StructuredResume) -> CriteriaMapping {
    let mut mapping = CriteriaMapping::default();
    for criterion in Criterion::ALL {
        mapping.insert(
            criterion,
            CriterionEvidence::empty(criterion, "Error occurred during mapping"),
        );
    }

    let sections = [
        (Criterion::Awards, &resume.awards, "Awards extracted from resume"),
        (Criterion::Articles, &resume.publications, "Publications extracted from resume"),
        (Criterion::Membership, &resume.memberships, "Memberships extracted from resume"),
        (Criterion::Employment, &resume.work_experience, "Work experience extracted from resume"),
    ];
    for (criterion, items, context) in sections {
        if items.is_empty() {
            continue;
        }
        mapping.insert(
            criterion,
            CriterionEvidence {
                criterion: criterion.display_name().to_string(),
                relevant_items: items.clone(),
                context: context.to_string(),
                potential_strength: EvidenceStrength::Weak,
            },
        );
    }
    mapping
}
