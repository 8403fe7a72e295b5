// Criteria mapping prompt templates.

/// Replace `{criteria_overview}` and `{strength_scale}` before use.
pub const MAPPING_SYSTEM_TEMPLATE: &str = "\
You are the Experience Mapping Agent for an O-1A visa assessment system. \
Your task is to analyze a structured resume and map specific experiences to the 8 O-1A visa criteria.

{criteria_overview}

YOUR TASKS:
1. Review the structured resume thoroughly
2. Identify elements relevant to each of the 8 O-1A criteria
3. Create a mapping between resume elements and criteria
4. Make reasonable inferences about which experiences might qualify
5. Ensure no potentially relevant information is overlooked
6. Provide an initial assessment of evidence strength for each criterion

{strength_scale}

Your mapping will be passed to specialized agents for each criterion who will conduct in-depth analysis.";

/// Replace `{resume_json}` and `{json_only}`.
pub const MAPPING_PROMPT: &str = r#"Analyze this structured resume and map specific elements to each of the 8 O-1A visa criteria.

STRUCTURED RESUME:
{resume_json}

For each of the 8 O-1A criteria:
1. Identify all resume elements that potentially satisfy the criterion
2. Provide relevant context to understand their significance
3. Assess the potential strength of the evidence (None, Weak, Moderate, Strong)

Respond with a JSON object with exactly these keys:
{
  "awards": {
    "criterion": "Awards",
    "relevantItems": [{"...": "resume element"}],
    "context": "Explanation of significance",
    "potentialStrength": "None|Weak|Moderate|Strong"
  },
  "membership": {...},
  "press": {...},
  "judging": {...},
  "contributions": {...},
  "articles": {...},
  "employment": {...},
  "remuneration": {...}
}

{json_only}"#;

/// Replace `{resume_json}`, `{mapping_json}` and `{json_only}`.
pub const ENHANCE_MAPPING_PROMPT: &str = r#"Here is an initial mapping of resume elements to O-1A criteria. Enhance it by:

1. Looking for additional connections or evidence that might have been missed
2. Identifying cross-criterion relevance (one achievement supporting multiple criteria)
3. Providing more detailed context about how each element satisfies its criterion

STRUCTURED RESUME:
{resume_json}

INITIAL MAPPING:
{mapping_json}

Analyze the resume again and return an enhanced mapping with the same structure and the same 8 keys.
Focus particularly on:
- Finding overlooked evidence in the resume
- Strengthening the context explanations
- Ensuring consistent evaluation of evidence strength

{json_only}"#;
