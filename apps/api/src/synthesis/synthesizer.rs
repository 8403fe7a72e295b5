//! Synthesis: turns the criterion assessments into a final rating.
//!
//! Flow: initial analysis → knowledge retrieval → assessment review →
//!       cross-reference → final determination → recommendations.
//!
//! Never fails. A failure in the first three stages stops the analysis and
//! records a threshold-graded fallback, but the final determination and
//! recommendations still run on whatever analyses exist. The fallback stands
//! only if the final determination fails too. A cross-reference failure is
//! logged and skipped.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::prompts::render;
use crate::llm_client::{LanguageModel, LlmError};
use crate::models::assessment::{CriterionAssessment, FinalAssessment, Rating};
use crate::models::criteria::{CriteriaMapping, Criterion, EvidenceStrength};
use crate::models::resume::StructuredResume;
use crate::synthesis::grading::{grade, StrengthTally};
use crate::synthesis::knowledge::{KnowledgeBase, DEFAULT_TOP_K};
use crate::synthesis::prompts::{
    CROSS_REFERENCE_PROMPT, FINAL_DETERMINATION_PROMPT, INITIAL_ANALYSIS_PROMPT,
    RECOMMENDATIONS_PROMPT, REVIEW_ASSESSMENTS_PROMPT, SYNTHESIS_SYSTEM,
};

/// Guidance sections passed to the assessment review.
const REVIEW_GUIDANCE_SECTIONS: usize = 3;
/// Guidance sections passed to the final determination.
const FINAL_GUIDANCE_SECTIONS: usize = 5;

const FALLBACK_RECOMMENDATIONS: &str = "Unable to generate recommendations due to error.";
/// Stands in for an analysis an earlier stage did not produce.
const NOT_AVAILABLE: &str = "Not available";

/// Accepts `OVERALL RATING: HIGH`, `**Overall Rating:** medium`, `Overall rating: *LOW*`.
static RATING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)overall\s+rating[\s*_]*:[\s*_]*(high|medium|low)\b")
        .expect("rating pattern is valid")
});

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Structured resume is missing or empty")]
    MissingResume,

    #[error("Criteria mapping is missing or empty")]
    MissingMapping,

    #[error("Knowledge base returned no guidance")]
    NoGuidance,

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The six synthesis stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    InitialAnalysis,
    RetrieveContext,
    ReviewAssessments,
    CrossReference,
    FinalDetermination,
    Recommendations,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::InitialAnalysis => "initial_analysis",
            Stage::RetrieveContext => "retrieve_context",
            Stage::ReviewAssessments => "analyze_child_assessments",
            Stage::CrossReference => "cross_reference_criteria",
            Stage::FinalDetermination => "final_determination",
            Stage::Recommendations => "generate_recommendations",
        }
    }

    fn error_prefix(self) -> &'static str {
        match self {
            Stage::InitialAnalysis => "Error in initial analysis",
            Stage::RetrieveContext => "Error retrieving context",
            Stage::ReviewAssessments => "Error analyzing child assessments",
            Stage::CrossReference => "Error cross-referencing criteria",
            Stage::FinalDetermination => "Error in final determination",
            Stage::Recommendations => "Error generating recommendations",
        }
    }

    fn describe_error(self, error: &SynthesisError) -> String {
        format!("{}: {error}", self.error_prefix())
    }
}

/// Final assessment plus the last stage error (empty when every stage succeeded).
#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    pub final_assessment: FinalAssessment,
    pub error: String,
}

/// Analyses carried between stages.
#[derive(Debug, Default)]
struct Interim {
    initial_analysis: String,
    guidance: Vec<String>,
    assessment_review: String,
    cross_reference: String,
}

/// Runs the staged synthesis against a `LanguageModel`.
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    knowledge: KnowledgeBase,
}

impl Synthesizer {
    pub async fn synthesize(
        &self,
        resume: &StructuredResume,
        mapping: &CriteriaMapping,
        assessments: &BTreeMap<Criterion, CriterionAssessment>,
        model: &dyn LanguageModel,
    ) -> SynthesisOutcome {
        let summary = criteria_summary(assessments);
        let mut interim = Interim::default();
        let mut error = String::new();

        let analysis = self
            .analyze(resume, mapping, assessments, model, &mut interim)
            .await;
        let fallback = match analysis {
            Ok(()) => {
                match cross_reference(resume, assessments, model).await {
                    Ok(text) => interim.cross_reference = text,
                    Err(e) => {
                        error = Stage::CrossReference.describe_error(&e);
                        warn!("{error}; continuing without cross-reference");
                    }
                }
                None
            }
            Err((stage, e)) => {
                error = stage.describe_error(&e);
                warn!("Synthesis failed at {}: {error}", stage.as_str());
                Some(fallback_assessment(&summary, stage, &error))
            }
        };

        let (rating, justification, error_occurred) =
            match final_determination(&summary, &interim, model).await {
                Ok(text) => {
                    let rating = extract_rating(&text).unwrap_or_else(|| {
                        warn!("Final determination stated no rating; using threshold grade");
                        grade(summary.values().copied())
                    });
                    (rating, text, false)
                }
                Err(e) => {
                    error = Stage::FinalDetermination.describe_error(&e);
                    warn!("{error}");
                    match fallback {
                        Some((rating, justification)) => (rating, justification, true),
                        None => {
                            let tally = threshold(&summary);
                            (
                                tally.rating(),
                                format!("{} Error occurred: {e}", tally.describe()),
                                false,
                            )
                        }
                    }
                }
            };
        info!("Final rating: {}", rating.as_str());

        let recommendations = match recommendations(rating, &summary, model).await {
            Ok(text) => text,
            Err(e) => {
                error = Stage::Recommendations.describe_error(&e);
                warn!("{error}");
                if error_occurred {
                    FALLBACK_RECOMMENDATIONS.to_string()
                } else {
                    basic_recommendations(&summary)
                }
            }
        };

        SynthesisOutcome {
            final_assessment: FinalAssessment {
                rating,
                justification,
                criteria_summary: summary,
                recommendations,
                error_occurred,
            },
            error,
        }
    }

    /// Stages 1 through 3. A failure stops the analysis and reports the failing stage;
    /// whatever was produced before it stays in `interim`.
    async fn analyze(
        &self,
        resume: &StructuredResume,
        mapping: &CriteriaMapping,
        assessments: &BTreeMap<Criterion, CriterionAssessment>,
        model: &dyn LanguageModel,
        interim: &mut Interim,
    ) -> Result<(), (Stage, SynthesisError)> {
        let stage = Stage::InitialAnalysis;
        if resume.is_empty() {
            return Err((stage, SynthesisError::MissingResume));
        }
        if mapping.is_empty() {
            return Err((stage, SynthesisError::MissingMapping));
        }
        let resume_json = serde_json::to_string_pretty(resume)
            .map_err(|e| (stage, SynthesisError::from(e)))?;
        let prompt = render(INITIAL_ANALYSIS_PROMPT, &[("resume_json", &resume_json)]);
        interim.initial_analysis = ask(model, &prompt).await.map_err(|e| (stage, e))?;

        let stage = Stage::RetrieveContext;
        interim.guidance = self
            .knowledge
            .retrieve_for(&interim.initial_analysis, DEFAULT_TOP_K);
        if interim.guidance.is_empty() {
            return Err((stage, SynthesisError::NoGuidance));
        }
        info!("Retrieved {} guidance sections", interim.guidance.len());

        let stage = Stage::ReviewAssessments;
        let assessments_json = serde_json::to_string_pretty(assessments)
            .map_err(|e| (stage, SynthesisError::from(e)))?;
        let guidance = join_guidance(&interim.guidance, REVIEW_GUIDANCE_SECTIONS);
        let prompt = render(
            REVIEW_ASSESSMENTS_PROMPT,
            &[("guidance", &guidance), ("assessments_json", &assessments_json)],
        );
        interim.assessment_review = ask(model, &prompt).await.map_err(|e| (stage, e))?;

        Ok(())
    }
}

/// Stage 4. Its failure is logged and the determination proceeds without it.
async fn cross_reference(
    resume: &StructuredResume,
    assessments: &BTreeMap<Criterion, CriterionAssessment>,
    model: &dyn LanguageModel,
) -> Result<String, SynthesisError> {
    let resume_json = serde_json::to_string_pretty(resume)?;
    let assessments_json = serde_json::to_string_pretty(assessments)?;
    let prompt = render(
        CROSS_REFERENCE_PROMPT,
        &[
            ("assessments_json", &assessments_json),
            ("resume_json", &resume_json),
        ],
    );
    ask(model, &prompt).await
}

async fn final_determination(
    summary: &BTreeMap<Criterion, EvidenceStrength>,
    interim: &Interim,
    model: &dyn LanguageModel,
) -> Result<String, SynthesisError> {
    let summary_json = serde_json::to_string_pretty(summary)?;
    let guidance = join_guidance(&interim.guidance, FINAL_GUIDANCE_SECTIONS);
    let prompt = render(
        FINAL_DETERMINATION_PROMPT,
        &[
            ("summary_json", &summary_json),
            ("guidance", &guidance),
            ("initial_analysis", or_unavailable(&interim.initial_analysis)),
            ("assessment_review", or_unavailable(&interim.assessment_review)),
            ("cross_reference", or_unavailable(&interim.cross_reference)),
        ],
    );
    ask(model, &prompt).await
}

async fn recommendations(
    rating: Rating,
    summary: &BTreeMap<Criterion, EvidenceStrength>,
    model: &dyn LanguageModel,
) -> Result<String, SynthesisError> {
    let summary_json = serde_json::to_string_pretty(summary)?;
    let prompt = render(
        RECOMMENDATIONS_PROMPT,
        &[("summary_json", &summary_json), ("rating", rating.as_str())],
    );
    ask(model, &prompt).await
}

fn or_unavailable(analysis: &str) -> &str {
    if analysis.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        analysis
    }
}

/// Free-text stage call. A blank reply counts as a failure.
async fn ask(model: &dyn LanguageModel, prompt: &str) -> Result<String, SynthesisError> {
    let text = model.complete(prompt, SYNTHESIS_SYSTEM).await?;
    if text.trim().is_empty() {
        return Err(LlmError::EmptyContent.into());
    }
    Ok(text)
}

fn join_guidance(guidance: &[String], limit: usize) -> String {
    guidance
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Criterion → evidence strength of its assessment.
pub fn criteria_summary(
    assessments: &BTreeMap<Criterion, CriterionAssessment>,
) -> BTreeMap<Criterion, EvidenceStrength> {
    assessments
        .iter()
        .map(|(criterion, a)| (*criterion, a.evidence_strength))
        .collect()
}

fn threshold(summary: &BTreeMap<Criterion, EvidenceStrength>) -> StrengthTally {
    StrengthTally::from_strengths(summary.values().copied())
}

/// Reads the rating the model stated, if any.
pub fn extract_rating(text: &str) -> Option<Rating> {
    let captures = RATING_LINE.captures(text)?;
    match captures[1].to_ascii_uppercase().as_str() {
        "HIGH" => Some(Rating::High),
        "MEDIUM" => Some(Rating::Medium),
        "LOW" => Some(Rating::Low),
        _ => None,
    }
}

/// Threshold rating and justification kept when the final determination cannot
/// recover from an earlier stage failure.
fn fallback_assessment(
    summary: &BTreeMap<Criterion, EvidenceStrength>,
    stage: Stage,
    error: &str,
) -> (Rating, String) {
    let tally = threshold(summary);
    (
        tally.rating(),
        format!(
            "{} Error occurred during {}: {error}",
            tally.describe(),
            stage.as_str()
        ),
    )
}

fn basic_recommendations(summary: &BTreeMap<Criterion, EvidenceStrength>) -> String {
    let weak: Vec<&str> = summary
        .iter()
        .filter(|(_, strength)| !strength.is_qualifying())
        .map(|(criterion, _)| criterion.key())
        .collect();
    format!("Consider strengthening evidence for: {}", weak.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use serde_json::json;

    const INITIAL: &str = "initial analysis of this structured resume";
    const REVIEW: &str = "Analyze the following assessments";
    const CROSS: &str = "cross-referencing analysis";
    const FINAL: &str = "Make a final determination";
    const RECOMMEND: &str = "generate specific recommendations";

    fn resume() -> StructuredResume {
        StructuredResume::from_value(json!({
            "personalInfo": {"name": "Grace Hopper"},
            "workExperience": [{"company": "US Navy", "title": "Rear Admiral"}]
        }))
    }

    fn mapping() -> CriteriaMapping {
        let mut mapping = CriteriaMapping::default();
        mapping.fill_missing();
        mapping
    }

    fn assessments(strengths: &[(Criterion, EvidenceStrength)]) -> BTreeMap<Criterion, CriterionAssessment> {
        Criterion::ALL
            .into_iter()
            .map(|c| {
                let strength = strengths
                    .iter()
                    .find(|(k, _)| *k == c)
                    .map(|(_, s)| *s)
                    .unwrap_or_default();
                let mut a = CriterionAssessment::from_value(c, json!({}));
                a.evidence_strength = strength;
                (c, a)
            })
            .collect()
    }

    fn three_strong() -> BTreeMap<Criterion, CriterionAssessment> {
        assessments(&[
            (Criterion::Awards, EvidenceStrength::Strong),
            (Criterion::Contributions, EvidenceStrength::Strong),
            (Criterion::Employment, EvidenceStrength::Strong),
        ])
    }

    fn happy_model(final_text: &str) -> ScriptedModel {
        ScriptedModel::new()
            .when(INITIAL, "Field: computer science research and software.")
            .when(REVIEW, "Assessments are well supported.")
            .when(CROSS, "Compiler work supports contributions and employment.")
            .when(FINAL, final_text)
            .when(RECOMMEND, "Gather expert letters.")
    }

    #[tokio::test]
    async fn test_full_synthesis_uses_stated_rating() {
        let model = happy_model("Analysis...\n**Overall Rating:** Medium\nReasons.");
        let outcome = Synthesizer::default()
            .synthesize(&resume(), &mapping(), &three_strong(), &model)
            .await;

        let fa = &outcome.final_assessment;
        assert_eq!(fa.rating, Rating::Medium);
        assert!(fa.justification.contains("Overall Rating"));
        assert_eq!(fa.recommendations, "Gather expert letters.");
        assert!(!fa.error_occurred);
        assert!(outcome.error.is_empty());
        assert_eq!(model.call_count(), 5);
    }

    #[tokio::test]
    async fn test_criteria_summary_reads_child_strengths() {
        let model = happy_model("OVERALL RATING: HIGH");
        let outcome = Synthesizer::default()
            .synthesize(&resume(), &mapping(), &three_strong(), &model)
            .await;

        let summary = &outcome.final_assessment.criteria_summary;
        assert_eq!(summary.len(), 8);
        assert_eq!(summary[&Criterion::Awards], EvidenceStrength::Strong);
        assert_eq!(summary[&Criterion::Press], EvidenceStrength::None);
    }

    #[tokio::test]
    async fn test_missing_rating_falls_back_to_threshold() {
        let model = happy_model("The applicant is impressive.");
        let outcome = Synthesizer::default()
            .synthesize(&resume(), &mapping(), &three_strong(), &model)
            .await;
        assert_eq!(outcome.final_assessment.rating, Rating::High);
        assert!(outcome.error.is_empty());
    }

    #[tokio::test]
    async fn test_review_prompt_carries_guidance() {
        let model = happy_model("OVERALL RATING: LOW");
        Synthesizer::default()
            .synthesize(&resume(), &mapping(), &three_strong(), &model)
            .await;

        let prompts = model.prompts();
        let review = prompts.iter().find(|p| p.contains(REVIEW)).unwrap();
        assert!(review.contains("O-1A Requirements for Scientists and Researchers")
            || review.contains("Core O-1A Visa Requirements"));
        assert!(review.contains("\"evidence_strength\": \"Strong\""));
    }

    #[tokio::test]
    async fn test_early_failure_still_reaches_final_determination() {
        let model = ScriptedModel::new()
            .when(INITIAL, "Field: business.")
            .fail_when(REVIEW, "overloaded")
            .when(FINAL, "OVERALL RATING: MEDIUM")
            .when(RECOMMEND, "Gather expert letters.");
        let outcome = Synthesizer::default()
            .synthesize(&resume(), &mapping(), &three_strong(), &model)
            .await;

        let fa = &outcome.final_assessment;
        assert_eq!(fa.rating, Rating::Medium);
        assert_eq!(fa.justification, "OVERALL RATING: MEDIUM");
        assert_eq!(fa.recommendations, "Gather expert letters.");
        assert!(!fa.error_occurred);
        assert!(outcome.error.starts_with("Error analyzing child assessments:"));

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 4);
        assert!(!prompts.iter().any(|p| p.contains(CROSS)));
        let final_prompt = prompts.iter().find(|p| p.contains(FINAL)).unwrap();
        assert!(final_prompt.contains("Initial Analysis:\nField: business."));
        assert!(final_prompt.contains("Criterion Assessment Review:\nNot available"));
        assert!(final_prompt.contains("Cross-Reference Analysis:\nNot available"));
    }

    #[tokio::test]
    async fn test_fallback_stands_when_final_determination_also_fails() {
        let model = ScriptedModel::new()
            .when(INITIAL, "Field: business.")
            .fail_when(REVIEW, "overloaded")
            .fail_when(FINAL, "overloaded")
            .fail_when(RECOMMEND, "overloaded");
        let outcome = Synthesizer::default()
            .synthesize(&resume(), &mapping(), &three_strong(), &model)
            .await;

        let fa = &outcome.final_assessment;
        assert!(fa.error_occurred);
        assert_eq!(fa.rating, Rating::High);
        assert_eq!(fa.recommendations, FALLBACK_RECOMMENDATIONS);
        assert!(fa.justification.starts_with(
            "Rating based on 3 strong and 0 moderate criteria. Error occurred during analyze_child_assessments: Error analyzing child assessments:"
        ));
        assert!(outcome.error.starts_with("Error generating recommendations:"));
        assert_eq!(model.call_count(), 4);
    }

    #[tokio::test]
    async fn test_cross_reference_failure_is_not_fatal() {
        let model = ScriptedModel::new()
            .fail_when(CROSS, "timeout")
            .when(INITIAL, "Field: tech.")
            .when(REVIEW, "ok")
            .when(FINAL, "OVERALL RATING: LOW")
            .when(RECOMMEND, "Publish more.");
        let outcome = Synthesizer::default()
            .synthesize(&resume(), &mapping(), &three_strong(), &model)
            .await;

        let fa = &outcome.final_assessment;
        assert_eq!(fa.rating, Rating::Low);
        assert!(!fa.error_occurred);
        assert_eq!(fa.recommendations, "Publish more.");
        assert!(outcome.error.starts_with("Error cross-referencing criteria:"));
        assert_eq!(model.call_count(), 5);

        let prompts = model.prompts();
        let final_prompt = prompts.iter().find(|p| p.contains(FINAL)).unwrap();
        assert!(final_prompt.contains("Cross-Reference Analysis:\nNot available"));
    }

    #[tokio::test]
    async fn test_placeholder_text_in_assessments_is_not_expanded() {
        let mut children = three_strong();
        for assessment in children.values_mut() {
            assessment.justification = "see {resume_json}".to_string();
        }
        let model = happy_model("OVERALL RATING: HIGH");
        Synthesizer::default()
            .synthesize(&resume(), &mapping(), &children, &model)
            .await;

        let prompts = model.prompts();
        let cross = prompts.iter().find(|p| p.contains(CROSS)).unwrap();
        assert_eq!(cross.matches("Grace Hopper").count(), 1);
        assert_eq!(cross.matches("see {resume_json}").count(), 8);
    }

    #[tokio::test]
    async fn test_empty_mapping_skips_analysis() {
        let model = ScriptedModel::new();
        let outcome = Synthesizer::default()
            .synthesize(&resume(), &CriteriaMapping::default(), &three_strong(), &model)
            .await;

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains(FINAL));
        assert!(prompts[1].contains(RECOMMEND));

        let fa = &outcome.final_assessment;
        assert!(fa.error_occurred);
        assert!(fa.justification.ends_with(
            "Error occurred during initial_analysis: Error in initial analysis: Criteria mapping is missing or empty"
        ));
        assert_eq!(fa.recommendations, FALLBACK_RECOMMENDATIONS);
    }

    #[tokio::test]
    async fn test_final_determination_failure_uses_threshold_then_recommends() {
        let model = ScriptedModel::new()
            .fail_when(FINAL, "timeout")
            .when(INITIAL, "Field: tech.")
            .when(REVIEW, "ok")
            .when(CROSS, "ok")
            .when(RECOMMEND, "Publish more.");

        let outcome = Synthesizer::default()
            .synthesize(&resume(), &mapping(), &three_strong(), &model)
            .await;

        let fa = &outcome.final_assessment;
        assert_eq!(fa.rating, Rating::High);
        assert!(fa
            .justification
            .starts_with("Rating based on 3 strong and 0 moderate criteria. Error occurred:"));
        assert_eq!(fa.recommendations, "Publish more.");
        assert!(!fa.error_occurred);
        assert!(outcome.error.starts_with("Error in final determination:"));
    }

    #[tokio::test]
    async fn test_recommendation_failure_lists_weak_criteria() {
        let model = ScriptedModel::new()
            .fail_when(RECOMMEND, "timeout")
            .when(INITIAL, "Field: tech.")
            .when(REVIEW, "ok")
            .when(CROSS, "ok")
            .when(FINAL, "OVERALL RATING: HIGH");
        let outcome = Synthesizer::default()
            .synthesize(&resume(), &mapping(), &three_strong(), &model)
            .await;

        assert_eq!(
            outcome.final_assessment.recommendations,
            "Consider strengthening evidence for: membership, press, judging, articles, remuneration"
        );
        assert!(outcome.error.starts_with("Error generating recommendations:"));
    }

    #[test]
    fn test_extract_rating_variants() {
        assert_eq!(extract_rating("OVERALL RATING: HIGH"), Some(Rating::High));
        assert_eq!(extract_rating("overall rating:medium"), Some(Rating::Medium));
        assert_eq!(extract_rating("**Overall Rating:** *Low*"), Some(Rating::Low));
        assert_eq!(extract_rating("Overall Rating**: HIGH"), Some(Rating::High));
        assert_eq!(extract_rating("Rating: HIGH"), None);
        assert_eq!(extract_rating("Overall rating: highly uncertain"), None);
    }
}
