use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{coerce_list, coerce_object};

/// Free-form structured resume. Every section defaults to empty when the model omits it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredResume {
    pub personal_info: Map<String, Value>,
    pub education: Vec<Value>,
    pub work_experience: Vec<Value>,
    pub publications: Vec<Value>,
    pub awards: Vec<Value>,
    pub memberships: Vec<Value>,
    pub press_and_media: Vec<Value>,
    pub judging_experience: Vec<Value>,
    pub contributions: Vec<Value>,
    pub skills: Vec<Value>,
    pub additional_info: Map<String, Value>,
}

impl StructuredResume {
    /// Coerces an arbitrary JSON value into a resume, defaulting anything missing or misshapen.
    ///
    /// List sections accept a bare object or string as a single item. Object sections
    /// keep a non-object value under a `value` key rather than dropping it.
    pub fn from_value(value: Value) -> Self {
        let mut root = match value {
            Value::Object(map) => map,
            _ => return Self::default(),
        };
        let mut list = |key: &str| coerce_list(root.remove(key));

        let education = list("education");
        let work_experience = list("workExperience");
        let publications = list("publications");
        let awards = list("awards");
        let memberships = list("memberships");
        let press_and_media = list("pressAndMedia");
        let judging_experience = list("judgingExperience");
        let contributions = list("contributions");
        let skills = list("skills");

        Self {
            personal_info: coerce_object(root.remove("personalInfo")),
            education,
            work_experience,
            publications,
            awards,
            memberships,
            press_and_media,
            judging_experience,
            contributions,
            skills,
            additional_info: coerce_object(root.remove("additionalInfo")),
        }
    }

    /// Resume returned when structuring fails outright.
    pub fn failed(reason: &str) -> Self {
        let mut additional_info = Map::new();
        additional_info.insert(
            "error".to_string(),
            Value::String(format!("Failed to structure resume: {reason}")),
        );
        Self {
            additional_info,
            ..Self::default()
        }
    }

    /// True when no section carries any content.
    pub fn is_empty(&self) -> bool {
        self.personal_info.is_empty()
            && self.additional_info.is_empty()
            && [
                &self.education,
                &self.work_experience,
                &self.publications,
                &self.awards,
                &self.memberships,
                &self.press_and_media,
                &self.judging_experience,
                &self.contributions,
                &self.skills,
            ]
            .iter()
            .all(|section| section.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_sections_default_to_empty() {
        let resume = StructuredResume::from_value(json!({
            "personalInfo": {"name": "Ada Lovelace"},
            "awards": [{"name": "Royal Medal"}]
        }));
        assert_eq!(resume.personal_info["name"], "Ada Lovelace");
        assert_eq!(resume.awards.len(), 1);
        assert!(resume.publications.is_empty());
        assert!(resume.additional_info.is_empty());
    }

    #[test]
    fn test_single_object_section_becomes_list() {
        let resume = StructuredResume::from_value(json!({
            "workExperience": {"company": "Analytical Engines Ltd", "title": "Engineer"}
        }));
        assert_eq!(resume.work_experience.len(), 1);
        assert_eq!(resume.work_experience[0]["company"], "Analytical Engines Ltd");
    }

    #[test]
    fn test_non_object_personal_info_is_preserved() {
        let resume = StructuredResume::from_value(json!({"personalInfo": "Ada, London"}));
        assert_eq!(resume.personal_info["value"], "Ada, London");
    }

    #[test]
    fn test_non_object_root_yields_default() {
        let resume = StructuredResume::from_value(json!(["not", "a", "resume"]));
        assert!(resume.is_empty());
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(StructuredResume::default()).unwrap();
        for key in [
            "personalInfo",
            "education",
            "workExperience",
            "publications",
            "awards",
            "memberships",
            "pressAndMedia",
            "judgingExperience",
            "contributions",
            "skills",
            "additionalInfo",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn test_failed_resume_records_reason() {
        let resume = StructuredResume::failed("model unavailable");
        assert_eq!(
            resume.additional_info["error"],
            "Failed to structure resume: model unavailable"
        );
        assert!(resume.education.is_empty());
        assert!(!resume.is_empty());
    }
}
