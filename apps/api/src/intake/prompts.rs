// Resume structuring prompt templates.

pub const RESUME_STRUCTURING_SYSTEM: &str = "\
You are the Resume Structuring Agent for an O-1A visa assessment system. \
Your task is to transform raw text extracted from a resume into a clean, well-structured JSON object.

YOUR TASKS:
1. Organize raw resume text into standard resume sections
2. Normalize dates, titles, and organization names
3. Identify and structure accomplishments within each role or position
4. Extract key skills, technologies, and domain expertise
5. Preserve all relevant information while removing formatting artifacts
6. Handle incomplete or ambiguous information conservatively

Pay special attention to information relevant to O-1A criteria: awards, professional memberships, \
media coverage about the candidate, judging or reviewer roles, original contributions, \
publications, critical roles at organizations, and compensation.";

/// Full structuring prompt. Replace `{raw_text}` and `{json_only}` before sending.
pub const RESUME_STRUCTURING_PROMPT: &str = r#"Convert the following resume text into a structured JSON object matching the schema below.
Extract all relevant information and organize it into the appropriate sections.

RESUME TEXT:
{raw_text}

OUTPUT SCHEMA:
{
  "personalInfo": {"name": "string", "email": "string", "phone": "string", "location": "string", "links": ["string"]},
  "education": [{"institution": "string", "degree": "string", "field": "string", "startDate": "string", "endDate": "string", "description": "string"}],
  "workExperience": [{"company": "string", "title": "string", "startDate": "string", "endDate": "string", "description": "string", "achievements": ["string"]}],
  "publications": [{"title": "string", "venue": "string", "date": "string", "authors": ["string"], "citations": 0}],
  "awards": [{"name": "string", "issuer": "string", "date": "string", "description": "string"}],
  "memberships": [{"organization": "string", "role": "string", "startDate": "string", "endDate": "string", "description": "string"}],
  "pressAndMedia": [{"publication": "string", "title": "string", "date": "string", "description": "string"}],
  "judgingExperience": [{"role": "string", "organization": "string", "date": "string", "description": "string"}],
  "contributions": [{"title": "string", "description": "string", "impact": "string", "date": "string"}],
  "skills": ["string"],
  "additionalInfo": {}
}

Use an empty array or object for sections the resume does not mention.
{json_only}"#;

/// Simplified recovery prompt. Replace `{error}`, `{raw_text}` and `{json_only}`.
pub const RESUME_RECOVERY_PROMPT: &str = r#"A previous attempt to structure this resume failed: {error}

Convert the following resume text into a simpler JSON object with these fields:
- personalInfo (object with name, contact details, etc.)
- education (array of education items)
- workExperience (array of work items)
- publications (array of publications)
- awards (array of awards)
- skills (array of strings)
- other (object with any other relevant information)

RESUME TEXT:
{raw_text}

{json_only}"#;
