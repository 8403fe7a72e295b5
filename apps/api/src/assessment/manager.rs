//! Assessment Manager: fans out the criterion evaluators, then runs synthesis.
//!
//! Flow: 8 evaluators in parallel (JoinSet) → collect, defaulting any that
//!       did not finish → synthesizer → AssessmentResult.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{error, info};
use uuid::Uuid;

use crate::evaluation::evaluator::{all_evaluators, CriterionEvaluator};
use crate::llm_client::LanguageModel;
use crate::models::assessment::{AssessmentResult, CriterionAssessment};
use crate::models::criteria::{CriteriaMapping, Criterion};
use crate::models::resume::StructuredResume;
use crate::synthesis::synthesizer::Synthesizer;

pub const LOADED: &str = "loaded";

pub struct AssessmentManager {
    model: Arc<dyn LanguageModel>,
    evaluators: Vec<CriterionEvaluator>,
    synthesizer: Synthesizer,
}

impl AssessmentManager {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            evaluators: all_evaluators(),
            synthesizer: Synthesizer::default(),
        }
    }

    /// Runs every criterion evaluator and the synthesis stage. Never fails:
    /// stage errors are folded into the result.
    pub async fn coordinate_assessment(
        &self,
        resume: &StructuredResume,
        mapping: &CriteriaMapping,
    ) -> AssessmentResult {
        let assessment_id = Uuid::new_v4();
        info!("Assessment {assessment_id}: evaluating {} criteria", self.evaluators.len());

        let child_assessments = self.evaluate_all(resume, mapping).await;

        info!("Assessment {assessment_id}: criterion evaluations complete, synthesizing");
        let outcome = self
            .synthesizer
            .synthesize(resume, mapping, &child_assessments, self.model.as_ref())
            .await;
        info!(
            "Assessment {assessment_id}: rated {}",
            outcome.final_assessment.rating.as_str()
        );

        AssessmentResult {
            assessment_id,
            assessed_at: Utc::now(),
            child_assessments,
            final_assessment: outcome.final_assessment,
            error: outcome.error,
        }
    }

    async fn evaluate_all(
        &self,
        resume: &StructuredResume,
        mapping: &CriteriaMapping,
    ) -> BTreeMap<Criterion, CriterionAssessment> {
        let resume = Arc::new(resume.clone());
        let mut tasks = JoinSet::new();

        for evaluator in self.evaluators.iter().copied() {
            let resume = Arc::clone(&resume);
            let model = Arc::clone(&self.model);
            let evidence = mapping.get(evaluator.criterion()).cloned();
            tasks.spawn(async move {
                let assessment = evaluator
                    .evaluate(&resume, evidence.as_ref(), model.as_ref())
                    .await;
                (evaluator.criterion(), assessment)
            });
        }

        let mut assessments = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((criterion, assessment)) => {
                    assessments.insert(criterion, assessment);
                }
                Err(e) => error!("Criterion evaluator task failed: {e}"),
            }
        }

        for evaluator in &self.evaluators {
            let criterion = evaluator.criterion();
            assessments.entry(criterion).or_insert_with(|| {
                CriterionAssessment::failed(
                    criterion,
                    &format!("{criterion} evaluator did not complete"),
                )
            });
        }
        assessments
    }

    /// Criterion key (plus `parent`) → load state.
    pub fn agent_status(&self) -> BTreeMap<String, &'static str> {
        let mut status: BTreeMap<String, &'static str> = self
            .evaluators
            .iter()
            .map(|e| (e.criterion().key().to_string(), LOADED))
            .collect();
        status.insert("parent".to_string(), LOADED);
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::llm_client::LlmError;
    use crate::models::assessment::Rating;
    use async_trait::async_trait;
    use crate::models::criteria::EvidenceStrength;
    use serde_json::json;

    fn resume() -> StructuredResume {
        StructuredResume::from_value(json!({
            "personalInfo": {"name": "Jennifer Doudna"},
            "awards": [{"name": "Nobel Prize in Chemistry", "year": "2020"}]
        }))
    }

    fn mapping() -> CriteriaMapping {
        let mut mapping = CriteriaMapping::default();
        mapping.fill_missing();
        mapping
    }

    fn evaluator_reply(strength: &str) -> String {
        json!({"evidence_strength": strength, "justification": "checked"}).to_string()
    }

    #[tokio::test]
    async fn test_coordinates_all_criteria_and_synthesis() {
        let model = ScriptedModel::new()
            .when("initial analysis", "Field: science research.")
            .when("Analyze the following assessments", "ok")
            .when("cross-referencing analysis", "ok")
            .when("Make a final determination", "OVERALL RATING: HIGH")
            .when("generate specific recommendations", "Keep publishing.")
            .when("evidence of the awards criterion", &evaluator_reply("Strong"))
            .when("evidence of the articles criterion", &evaluator_reply("Strong"))
            .when("evidence of the contributions criterion", &evaluator_reply("Strong"))
            .when("RESUME DATA:", &evaluator_reply("Weak"));
        let manager = AssessmentManager::new(Arc::new(model));

        let result = manager.coordinate_assessment(&resume(), &mapping()).await;

        assert_eq!(result.child_assessments.len(), 8);
        assert_eq!(
            result.child_assessments[&Criterion::Awards].evidence_strength,
            EvidenceStrength::Strong
        );
        assert_eq!(
            result.child_assessments[&Criterion::Press].evidence_strength,
            EvidenceStrength::Weak
        );
        assert_eq!(result.final_assessment.rating, Rating::High);
        assert_eq!(result.final_assessment.recommendations, "Keep publishing.");
        assert!(result.error.is_empty());
    }

    #[tokio::test]
    async fn test_model_outage_still_produces_result() {
        let manager = AssessmentManager::new(Arc::new(ScriptedModel::new()));
        let result = manager.coordinate_assessment(&resume(), &mapping()).await;

        assert_eq!(result.child_assessments.len(), 8);
        assert!(result
            .child_assessments
            .values()
            .all(|a| a.evidence_strength == EvidenceStrength::None));
        let fa = &result.final_assessment;
        assert!(fa.error_occurred);
        assert_eq!(fa.rating, Rating::Low);
        assert!(fa
            .justification
            .contains("Error occurred during initial_analysis: Error in initial analysis:"));
        assert_eq!(
            fa.recommendations,
            "Unable to generate recommendations due to error."
        );
        assert!(result.error.starts_with("Error generating recommendations:"));
    }

    /// Panics on prompts containing `needle`, otherwise defers to the script.
    struct PanicsOn {
        needle: &'static str,
        script: ScriptedModel,
    }

    #[async_trait]
    impl LanguageModel for PanicsOn {
        async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
            if prompt.contains(self.needle) {
                panic!("model crashed on {}", self.needle);
            }
            self.script.complete(prompt, system).await
        }
    }

    #[tokio::test]
    async fn test_panicked_evaluator_gets_default_assessment() {
        let model = PanicsOn {
            needle: "evidence of the press criterion",
            script: ScriptedModel::new()
                .when("initial analysis", "Field: science research.")
                .when("Analyze the following assessments", "ok")
                .when("cross-referencing analysis", "ok")
                .when("Make a final determination", "OVERALL RATING: MEDIUM")
                .when("generate specific recommendations", "Keep publishing.")
                .when("RESUME DATA:", &evaluator_reply("Moderate")),
        };
        let manager = AssessmentManager::new(Arc::new(model));

        let result = manager.coordinate_assessment(&resume(), &mapping()).await;

        assert_eq!(result.child_assessments.len(), 8);
        let press = &result.child_assessments[&Criterion::Press];
        assert_eq!(press.evidence_strength, EvidenceStrength::None);
        assert_eq!(
            press.justification,
            "Error occurred during assessment: press evaluator did not complete"
        );
        assert_eq!(
            result.child_assessments[&Criterion::Judging].evidence_strength,
            EvidenceStrength::Moderate
        );
        assert_eq!(result.final_assessment.rating, Rating::Medium);
    }

    #[test]
    fn test_agent_status_lists_every_agent() {
        let manager = AssessmentManager::new(Arc::new(ScriptedModel::new()));
        let status = manager.agent_status();
        assert_eq!(status.len(), 9);
        assert_eq!(status["parent"], LOADED);
        assert_eq!(status["remuneration"], LOADED);
    }
}
