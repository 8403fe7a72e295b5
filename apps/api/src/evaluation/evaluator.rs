//! Criterion evaluators: one model call per criterion, each rating its evidence strength.

use serde_json::Value;
use tracing::{info, warn};

use crate::evaluation::prompts::{evaluator_system_prompt, EVALUATION_PROMPT};
use crate::llm_client::prompts::{render, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{complete_json, LanguageModel, LlmError};
use crate::models::assessment::CriterionAssessment;
use crate::models::criteria::{Criterion, CriterionEvidence};
use crate::models::resume::StructuredResume;

/// Evaluates the resume against a single criterion.
#[derive(Debug, Clone, Copy)]
pub struct CriterionEvaluator {
    criterion: Criterion,
}

impl CriterionEvaluator {
    pub fn new(criterion: Criterion) -> Self {
        Self { criterion }
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Runs the evaluation. Failures become the default assessment rather than an error.
    pub async fn evaluate(
        &self,
        resume: &StructuredResume,
        mapping: Option<&CriterionEvidence>,
        model: &dyn LanguageModel,
    ) -> CriterionAssessment {
        match self.try_evaluate(resume, mapping, model).await {
            Ok(assessment) => {
                info!(
                    "{} evaluator rated evidence {}",
                    self.criterion,
                    assessment.evidence_strength.as_str()
                );
                assessment
            }
            Err(e) => {
                warn!("{} evaluator failed: {e}", self.criterion);
                CriterionAssessment::failed(
                    self.criterion,
                    &format!("Error analyzing {}: {e}", self.criterion),
                )
            }
        }
    }

    async fn try_evaluate(
        &self,
        resume: &StructuredResume,
        mapping: Option<&CriterionEvidence>,
        model: &dyn LanguageModel,
    ) -> Result<CriterionAssessment, LlmError> {
        let resume_json = serde_json::to_string_pretty(resume)?;
        let mapping_json = match mapping {
            Some(evidence) => serde_json::to_string_pretty(evidence)?,
            None => "{}".to_string(),
        };

        let prompt = render(
            EVALUATION_PROMPT,
            &[
                ("json_only", JSON_ONLY_INSTRUCTION),
                ("criterion", self.criterion.key()),
                ("mapping_json", &mapping_json),
                ("resume_json", &resume_json),
            ],
        );

        let value: Value =
            complete_json(model, &prompt, evaluator_system_prompt(self.criterion)).await?;
        Ok(CriterionAssessment::from_value(self.criterion, value))
    }
}

/// One evaluator per criterion, in canonical order.
pub fn all_evaluators() -> Vec<CriterionEvaluator> {
    Criterion::ALL.into_iter().map(CriterionEvaluator::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::models::criteria::EvidenceStrength;
    use serde_json::json;

    fn resume() -> StructuredResume {
        StructuredResume::from_value(json!({
            "judgingExperience": [{"role": "Program committee", "organization": "ICML"}]
        }))
    }

    #[tokio::test]
    async fn test_evaluate_parses_reply() {
        let model = ScriptedModel::new().then_ok(
            r#"Here you go:
```json
{"criterion": "judging", "evidence_items": [{"description": "ICML program committee", "source": "judgingExperience", "strength": "Moderate"}], "evidence_strength": "Moderate", "justification": "Recognized venue."}
```"#,
        );
        let evaluator = CriterionEvaluator::new(Criterion::Judging);
        let assessment = evaluator.evaluate(&resume(), None, &model).await;

        assert_eq!(assessment.evidence_strength, EvidenceStrength::Moderate);
        assert_eq!(assessment.evidence_items.len(), 1);
        assert_eq!(assessment.justification, "Recognized venue.");
    }

    #[tokio::test]
    async fn test_prompt_names_criterion_and_mapping() {
        let model = ScriptedModel::new().then_ok("{}");
        let evidence = CriterionEvidence::empty(Criterion::Judging, "Reviewer roles found");
        CriterionEvaluator::new(Criterion::Judging)
            .evaluate(&resume(), Some(&evidence), &model)
            .await;

        let prompt = &model.prompts()[0];
        assert!(prompt.contains("evidence of the judging criterion"));
        assert!(prompt.contains("Reviewer roles found"));
        assert!(prompt.contains("Program committee"));
    }

    #[tokio::test]
    async fn test_failure_yields_default_assessment() {
        let model = ScriptedModel::new().then_err("timeout");
        let assessment = CriterionEvaluator::new(Criterion::Press)
            .evaluate(&resume(), None, &model)
            .await;

        assert_eq!(assessment.criterion, "press");
        assert_eq!(assessment.evidence_strength, EvidenceStrength::None);
        assert!(assessment
            .justification
            .starts_with("Error occurred during assessment: Error analyzing press:"));
    }

    #[test]
    fn test_all_evaluators_cover_every_criterion() {
        let criteria: Vec<_> = all_evaluators().iter().map(|e| e.criterion()).collect();
        assert_eq!(criteria, Criterion::ALL.to_vec());
    }
}
