// Synthesis prompts. Every stage shares SYNTHESIS_SYSTEM.

/// System prompt for all six synthesis stages.
pub const SYNTHESIS_SYSTEM: &str = "\
You are the Critical Assessment Agent, an expert legal analyst specializing in O-1A visa qualification \
assessment. You coordinate a team of 8 specialized evaluators that review a candidate's CV against the \
O-1A criteria, and you determine the candidate's qualification likelihood.

PRIMARY RESPONSIBILITIES:
1. Review the structured resume and criteria mapping
2. Validate and critically assess the findings of each criterion evaluator
3. Apply USCIS standards and policies to the evidence
4. Synthesize all findings to determine the final rating
5. Explain the rating with specific references to USCIS guidelines

RATING DETERMINATION RULES:
To qualify for an O-1A visa, a candidate must satisfy at least 3 of the 8 criteria:
- HIGH: Meets 5+ criteria with at least 3 having strong evidence, OR meets 3-4 criteria with exceptional evidence
- MEDIUM: Meets 3-4 criteria with moderate to strong evidence
- LOW: Meets fewer than 3 criteria OR meets exactly 3 with mostly weak evidence

Ground your analysis in both the resume evidence and USCIS standards for O-1A visas.";

/// Stage 1. Replace `{resume_json}`.
pub const INITIAL_ANALYSIS_PROMPT: &str = "\
Perform an initial analysis of this structured resume for O-1A visa assessment:

```
{resume_json}
```

Focus on:
1. Identifying the applicant's primary field of expertise
2. Determining the most promising criteria based on the resume
3. Noting any potential challenges or weaknesses in the application

Provide a concise analysis that will guide the detailed criteria assessment.";

/// Stage 3. Replace `{assessments_json}` and `{guidance}`.
pub const REVIEW_ASSESSMENTS_PROMPT: &str = "\
Analyze the following assessments from the specialized criterion evaluators:

```
{assessments_json}
```

Based on the following O-1A visa requirements:

{guidance}

For each criterion, provide:
1. A critical evaluation of the evaluator's assessment
2. Whether the evidence meets USCIS standards
3. Any concerns about the quality or sufficiency of evidence

Provide a detailed analysis for each criterion.";

/// Stage 4. Replace `{resume_json}` and `{assessments_json}`.
pub const CROSS_REFERENCE_PROMPT: &str = "\
Perform a cross-referencing analysis across the 8 O-1A criteria to identify:

1. Evidence that supports multiple criteria
2. Internal consistency of evidence across criteria
3. Potentially overlooked evidence from the resume

Resume:
```
{resume_json}
```

Criterion Assessments:
```
{assessments_json}
```

Provide a comprehensive cross-reference analysis focusing on strengthening the O-1A case.";

/// Stage 5. Replace `{summary_json}`, `{initial_analysis}`, `{assessment_review}`,
/// `{cross_reference}` and `{guidance}`.
pub const FINAL_DETERMINATION_PROMPT: &str = "\
Make a final determination about this applicant's qualification for an O-1A visa.

Criteria Strengths:
```
{summary_json}
```

Previous Analyses:

Initial Analysis:
{initial_analysis}

Criterion Assessment Review:
{assessment_review}

Cross-Reference Analysis:
{cross_reference}

O-1A Requirements and Standards:
{guidance}

Based on all available information, determine:
1. Overall Rating (HIGH, MEDIUM, or LOW)
2. Detailed justification with specific references to USCIS standards
3. Summary of evidence for each criterion
4. Overall strength of the application

State the rating on its own line exactly as `OVERALL RATING: HIGH`, `OVERALL RATING: MEDIUM` or `OVERALL RATING: LOW`.";

/// Stage 6. Replace `{rating}` and `{summary_json}`.
pub const RECOMMENDATIONS_PROMPT: &str = "\
Based on the final assessment (Rating: {rating}), generate specific recommendations for strengthening \
this O-1A visa application.

Criteria Strengths:
```
{summary_json}
```

Focus on:
1. Specific improvements for weak criteria
2. Additional evidence needed for borderline criteria
3. Strategic advice for presenting the strongest case
4. Alternative visa categories if O-1A is not recommended

Provide actionable, specific recommendations.";
