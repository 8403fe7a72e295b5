use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::coerce_list;

/// The eight O-1A evidentiary criteria. Declaration order is the canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Awards,
    Membership,
    Press,
    Judging,
    Contributions,
    Articles,
    Employment,
    Remuneration,
}

impl Criterion {
    pub const ALL: [Criterion; 8] = [
        Criterion::Awards,
        Criterion::Membership,
        Criterion::Press,
        Criterion::Judging,
        Criterion::Contributions,
        Criterion::Articles,
        Criterion::Employment,
        Criterion::Remuneration,
    ];

    /// Key used in JSON payloads and prompts.
    pub fn key(self) -> &'static str {
        match self {
            Criterion::Awards => "awards",
            Criterion::Membership => "membership",
            Criterion::Press => "press",
            Criterion::Judging => "judging",
            Criterion::Contributions => "contributions",
            Criterion::Articles => "articles",
            Criterion::Employment => "employment",
            Criterion::Remuneration => "remuneration",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Criterion::Awards => "Awards",
            Criterion::Membership => "Membership",
            Criterion::Press => "Press",
            Criterion::Judging => "Judging",
            Criterion::Contributions => "Contributions",
            Criterion::Articles => "Articles",
            Criterion::Employment => "Employment",
            Criterion::Remuneration => "Remuneration",
        }
    }

    /// Case-insensitive lookup by key.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Qualitative strength of the evidence for one criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EvidenceStrength {
    #[default]
    None,
    Weak,
    Moderate,
    Strong,
}

impl EvidenceStrength {
    /// Parses a model-supplied label. Unknown labels map to `None`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "weak" => EvidenceStrength::Weak,
            "moderate" => EvidenceStrength::Moderate,
            "strong" => EvidenceStrength::Strong,
            _ => EvidenceStrength::None,
        }
    }

    /// Moderate or Strong evidence counts toward meeting a criterion.
    pub fn is_qualifying(self) -> bool {
        matches!(self, EvidenceStrength::Moderate | EvidenceStrength::Strong)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EvidenceStrength::None => "None",
            EvidenceStrength::Weak => "Weak",
            EvidenceStrength::Moderate => "Moderate",
            EvidenceStrength::Strong => "Strong",
        }
    }
}

impl<'de> Deserialize<'de> for EvidenceStrength {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(raw
            .as_str()
            .map(EvidenceStrength::from_label)
            .unwrap_or_default())
    }
}

/// Evidence the mapping stage associated with one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionEvidence {
    pub criterion: String,
    #[serde(default)]
    pub relevant_items: Vec<Value>,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub potential_strength: EvidenceStrength,
}

impl CriterionEvidence {
    pub fn empty(criterion: Criterion, context: &str) -> Self {
        Self {
            criterion: criterion.display_name().to_string(),
            relevant_items: Vec::new(),
            context: context.to_string(),
            potential_strength: EvidenceStrength::None,
        }
    }

    fn from_value(criterion: Criterion, value: Value) -> Self {
        let mut map = match value {
            Value::Object(map) => map,
            _ => return Self::empty(criterion, "No relevant evidence found"),
        };
        Self {
            criterion: map
                .remove("criterion")
                .and_then(|v| v.as_str().map(str::to_owned))
                .unwrap_or_else(|| criterion.display_name().to_string()),
            relevant_items: coerce_list(map.remove("relevantItems")),
            context: map
                .remove("context")
                .and_then(|v| v.as_str().map(str::to_owned))
                .unwrap_or_default(),
            potential_strength: map
                .remove("potentialStrength")
                .and_then(|v| v.as_str().map(EvidenceStrength::from_label))
                .unwrap_or_default(),
        }
    }
}

/// Criterion → evidence mapping. Serializes as a JSON object keyed by criterion key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriteriaMapping(pub BTreeMap<Criterion, CriterionEvidence>);

impl CriteriaMapping {
    /// Builds a mapping from a model reply, ignoring keys that are not criteria.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(entries) = value else {
            return Self::default();
        };
        let mapping = entries
            .into_iter()
            .filter_map(|(key, evidence)| {
                Criterion::from_key(&key).map(|c| (c, CriterionEvidence::from_value(c, evidence)))
            })
            .collect();
        Self(mapping)
    }

    pub fn get(&self, criterion: Criterion) -> Option<&CriterionEvidence> {
        self.0.get(&criterion)
    }

    pub fn insert(&mut self, criterion: Criterion, evidence: CriterionEvidence) {
        self.0.insert(criterion, evidence);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Adds an empty `None` record for every criterion the mapping lacks.
    pub fn fill_missing(&mut self) {
        for criterion in Criterion::ALL {
            self.0
                .entry(criterion)
                .or_insert_with(|| CriterionEvidence::empty(criterion, "No relevant evidence found"));
        }
    }

    /// Number of criteria with Moderate or Strong potential strength.
    pub fn qualifying_count(&self) -> usize {
        self.0
            .values()
            .filter(|e| e.potential_strength.is_qualifying())
            .count()
    }
}
