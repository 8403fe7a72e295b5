//! Static O-1A guidance and term-overlap retrieval over it.

use std::collections::HashSet;

/// Sections returned per query.
pub const DEFAULT_TOP_K: usize = 3;

const BASE_QUERIES: [&str; 3] = [
    "O-1A visa requirements and standards",
    "Evidence evaluation for O-1A visa applications",
    "USCIS policy on extraordinary ability",
];

/// Field-specific queries, added when any trigger word appears in the initial analysis.
const FIELD_QUERIES: [(&[&str], &str); 3] = [
    (
        &["science", "research"],
        "O-1A requirements for scientists and researchers",
    ),
    (
        &["business", "entrepreneur"],
        "O-1A requirements for business professionals and entrepreneurs",
    ),
    (
        &["tech", "software"],
        "O-1A requirements for technology professionals",
    ),
];

const O1A_GUIDANCE: &str = r#"# O-1A Visa Requirements

## Core O-1A Visa Requirements
The O-1A nonimmigrant visa is for individuals with extraordinary ability in the sciences, education, business, or athletics. Extraordinary ability means a level of expertise indicating the person is one of the small percentage who have risen to the very top of the field. Applicants must demonstrate sustained national or international acclaim by meeting at least 3 of the 8 evidentiary criteria, or by a one-time major internationally recognized award.

## The Eight O-1A Criteria
1. Receipt of nationally or internationally recognized prizes or awards for excellence in the field.
2. Membership in associations in the field which require outstanding achievements of their members, as judged by recognized national or international experts.
3. Published material in professional or major trade publications or major media about the beneficiary and their work.
4. Participation, on a panel or individually, as a judge of the work of others in the same or an allied field.
5. Original scientific, scholarly, or business-related contributions of major significance in the field.
6. Authorship of scholarly articles in the field, in professional journals or other major media.
7. Employment in a critical or essential capacity for organizations and establishments that have a distinguished reputation.
8. A high salary or other significantly high remuneration for services, in relation to others in the field.

## Evidence Evaluation Standards
USCIS evaluates evidence in two steps. First, each piece of evidence is checked against the plain language of a criterion. Second, in a final merits determination, all evidence is weighed together to decide whether the applicant has sustained acclaim and is among the small percentage at the top of the field. Quality matters more than quantity: strong evidence across multiple criteria increases the chances of approval, while many weak items rarely substitute for recognized achievements.

## USCIS Policy on Extraordinary Ability
Policy guidance requires the acclaim to be sustained, not a single moment of recognition. Officers consider the prestige of awards, the selectivity of memberships, the reach of media coverage, and independent corroboration from experts. If a criterion does not readily apply to the occupation, comparable evidence may be submitted to establish eligibility.

## Awards, Memberships and Judging
Awards should be recognized beyond the issuing institution and granted for excellence, not participation. Memberships qualify only when admission requires outstanding achievement judged by recognized experts; paid or open memberships do not. Judging includes peer review for journals and conferences, grant panels, competition juries, and thesis committees outside the applicant's own institution.

## Press Coverage and Scholarly Articles
Published material must be about the applicant and their work, appear in professional, major trade, or major media outlets, and include title, date, and author. Scholarly articles are typically peer reviewed with footnotes and bibliographies; citation counts, journal impact, and invited talks help show their significance to the field.

## Original Contributions and Critical Employment
Contributions must be original and of major significance, shown through widespread adoption, patents licensed or commercialized, citations, or expert letters describing impact on the field. Critical employment requires a leading or essential role, evidenced by organization charts, letters, and outcomes tied to the applicant, at organizations or divisions with a distinguished reputation.

## High Remuneration
Remuneration is compared against others in the same field and location, using salary surveys, offer letters, tax records, or equity valuations. Bonuses, equity, and consulting fees count toward total compensation.

## O-1A Requirements for Scientists and Researchers
Scientists and researchers typically rely on scholarly articles, citation records, peer review and grant panel service, research awards, and original contributions evidenced by independent citations and adoption of methods. Fellowships from competitive national programs and invited keynote talks support sustained acclaim.

## O-1A Requirements for Business Professionals and Entrepreneurs
Business professionals and entrepreneurs commonly show critical roles at distinguished companies, high remuneration, original business contributions such as new products or revenue growth, press coverage of the company and founder, and venture funding from reputable investors. Startup founders may use investment, accelerator selection, and revenue metrics as comparable evidence.

## O-1A Requirements for Technology Professionals
Technology professionals such as software engineers often show original contributions through widely used open-source projects, patents, or products with large user bases. Critical roles on key engineering teams, technical publications, conference talks, hackathon or industry awards, and compensation well above market rates for the role strengthen the case.
"#;

/// One heading-delimited block of guidance.
#[derive(Debug, Clone)]
struct Section {
    text: String,
    terms: HashSet<String>,
}

/// In-memory guidance store.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    sections: Vec<Section>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::from_markdown(O1A_GUIDANCE)
    }
}

impl KnowledgeBase {
    /// Splits markdown into sections at each `## ` heading. Text before the first heading is dropped.
    pub fn from_markdown(markdown: &str) -> Self {
        let mut sections = Vec::new();
        let mut current: Option<String> = None;

        for line in markdown.lines() {
            if line.starts_with("## ") {
                if let Some(text) = current.take() {
                    sections.push(text);
                }
                current = Some(line.trim_start_matches("## ").to_string());
            } else if let Some(text) = current.as_mut() {
                if !line.trim().is_empty() {
                    text.push('\n');
                    text.push_str(line.trim());
                }
            }
        }
        if let Some(text) = current {
            sections.push(text);
        }

        Self {
            sections: sections
                .into_iter()
                .map(|text| Section {
                    terms: terms(&text),
                    text,
                })
                .collect(),
        }
    }

    /// Top `k` sections sharing at least one term with the query, best first.
    /// Ties keep document order.
    pub fn query(&self, query: &str, k: usize) -> Vec<&str> {
        let query_terms = terms(query);
        let mut scored: Vec<(usize, &Section)> = self
            .sections
            .iter()
            .map(|s| (s.terms.intersection(&query_terms).count(), s))
            .filter(|(score, _)| *score > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(k)
            .map(|(_, s)| s.text.as_str())
            .collect()
    }

    /// Runs the base and field-specific queries, deduplicating in first-seen order.
    pub fn retrieve_for(&self, initial_analysis: &str, k: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        retrieval_queries(initial_analysis)
            .into_iter()
            .flat_map(|q| self.query(q, k))
            .filter(|text| seen.insert(*text))
            .map(str::to_owned)
            .collect()
    }
}

/// Base queries plus any field queries triggered by the analysis text.
pub fn retrieval_queries(initial_analysis: &str) -> Vec<&'static str> {
    let lowered = initial_analysis.to_lowercase();
    let mut queries = BASE_QUERIES.to_vec();
    for (triggers, query) in FIELD_QUERIES {
        if triggers.iter().any(|t| lowered.contains(t)) {
            queries.push(query);
        }
    }
    queries
}

const STOPWORDS: [&str; 12] = [
    "and", "the", "for", "with", "that", "this", "from", "are", "its", "not", "who", "their",
];

fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|t| t.len() > 2 && !STOPWORDS.contains(&t.as_str()))
        .collect()
}
