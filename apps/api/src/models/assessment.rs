use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::coerce_list;
use crate::models::criteria::{Criterion, EvidenceStrength};

/// One piece of evidence an evaluator cited for its criterion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub description: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub strength: EvidenceStrength,
}

impl EvidenceItem {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(description) if !description.trim().is_empty() => Some(Self {
                description,
                ..Self::default()
            }),
            Value::Object(mut map) => {
                let mut text = |key: &str| {
                    map.remove(key)
                        .and_then(|v| v.as_str().map(str::to_owned))
                        .unwrap_or_default()
                };
                let description = text("description");
                let source = text("source");
                let strength = EvidenceStrength::from_label(&text("strength"));
                Some(Self {
                    description,
                    source,
                    strength,
                })
            }
            _ => None,
        }
    }
}

/// Per-criterion verdict produced by a criterion evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionAssessment {
    pub criterion: String,
    pub evidence_items: Vec<EvidenceItem>,
    pub evidence_strength: EvidenceStrength,
    pub justification: String,
}

impl CriterionAssessment {
    /// Assessment substituted when the evaluator call fails.
    pub fn failed(criterion: Criterion, error: &str) -> Self {
        Self {
            criterion: criterion.key().to_string(),
            evidence_items: Vec::new(),
            evidence_strength: EvidenceStrength::None,
            justification: format!("Error occurred during assessment: {error}"),
        }
    }

    /// Builds an assessment from a model reply, filling every missing field.
    pub fn from_value(criterion: Criterion, value: Value) -> Self {
        let mut map = match value {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };

        let justification = map
            .remove("justification")
            .and_then(|v| v.as_str().map(str::to_owned))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| {
                format!("No detailed justification provided for {}.", criterion.key())
            });

        Self {
            criterion: map
                .remove("criterion")
                .and_then(|v| v.as_str().map(str::to_owned))
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| criterion.key().to_string()),
            evidence_items: coerce_list(map.remove("evidence_items"))
                .into_iter()
                .filter_map(EvidenceItem::from_value)
                .collect(),
            evidence_strength: map
                .remove("evidence_strength")
                .and_then(|v| v.as_str().map(EvidenceStrength::from_label))
                .unwrap_or_default(),
            justification,
        }
    }
}

/// Overall qualification grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rating {
    High,
    Medium,
    #[default]
    Low,
}

impl Rating {
    pub fn as_str(self) -> &'static str {
        match self {
            Rating::High => "HIGH",
            Rating::Medium => "MEDIUM",
            Rating::Low => "LOW",
        }
    }
}

/// The synthesis stage's decision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalAssessment {
    pub rating: Rating,
    pub justification: String,
    pub criteria_summary: BTreeMap<Criterion, EvidenceStrength>,
    pub recommendations: String,
    #[serde(default)]
    pub error_occurred: bool,
}

/// Everything a full assessment returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub assessment_id: Uuid,
    pub assessed_at: DateTime<Utc>,
    pub child_assessments: BTreeMap<Criterion, CriterionAssessment>,
    pub final_assessment: FinalAssessment,
    /// Empty when every stage succeeded; otherwise the last stage error.
    pub error: String,
}
