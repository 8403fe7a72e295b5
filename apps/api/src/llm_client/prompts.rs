// Shared prompt fragments.
// Each pipeline stage defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Instruction appended to every prompt whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Return ONLY the JSON object. \
    Do NOT include markdown, code fences, explanations or apologies.";

/// Describes the eight O-1A criteria. Shared by the mapping and synthesis stages.
pub const O1A_CRITERIA_OVERVIEW: &str = "\
THE 8 O-1A CRITERIA:
1. Awards: National or international prizes/awards for excellence
2. Membership: Membership in associations requiring outstanding achievement
3. Press: Published material about the applicant in professional/major media
4. Judging: Evidence of judging the work of others in the field
5. Contributions: Original scientific, scholarly, or business contributions
6. Articles: Authorship of scholarly articles in professional publications
7. Employment: Employment in a critical capacity at distinguished organizations
8. Remuneration: Evidence of high salary or remuneration";

/// Strength scale every stage uses when grading evidence.
pub const EVIDENCE_STRENGTH_SCALE: &str = "\
EVIDENCE STRENGTH DEFINITIONS:
- NONE: No evidence found for this criterion
- WEAK: Limited evidence with minimal significance or recognition
- MODERATE: Reasonable evidence with some significance or recognition
- STRONG: Substantial evidence with significant recognition or impact";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

/// Fills `{name}` placeholders in one pass over the template.
/// Substituted text is never rescanned; unknown placeholders are left as written.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}
