// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for the structured-JSON variant.
pub const RESUME_JSON_SYSTEM: &str = "You are a senior resume writer. \
    Return only valid JSON (no markdown). \
    Keep tone concise, metrics-driven, ATS-friendly.";

/// System prompt for the heading-delimited variant.
pub const RESUME_SECTIONED_SYSTEM: &str = "You are a senior professional resume writer. \
    Return plain text only (no markdown). \
    Keep tone concise, metrics-driven, ATS-friendly.";

/// Target schema embedded in JSON-variant prompts.
pub const RESUME_SCHEMA: &str = r#"{
  "header": {"fullName": "string", "headline": "string", "location": "string", "email": "string", "phone": "string", "links": [{"label": "string", "url": "string"}]},
  "summary": "string",
  "experiences": [
    {"role": "string", "company": "string", "location": "string", "start": "string", "end": "string", "current": "boolean", "bullets": ["string"], "tech": ["string"]}
  ],
  "education": [{"degree": "string", "university": "string", "years": "string", "details": "string"}],
  "skills": ["string"],
  "projects": [{"name": "string", "description": "string", "link": "string", "technologies": ["string"]}]
}"#;

/// Enumerated style rules. Rendered as a numbered list in every first-attempt prompt.
pub const FORMAT_RULES: &[&str] = &[
    "Use 1-5 bullets per experience; prioritize impact.",
    "Start every bullet with an action verb.",
    "Include metrics where reasonable; never fabricate numbers the highlights do not support.",
    "Avoid extraneous adjectives; be specific and outcome-focused.",
    "Keep the summary to 3-4 sentences.",
    "The resume must fill one full page: not two pages, not half a page.",
    "Keep it ATS-friendly: plain wording and standard section names.",
    "Return every section: summary, skills, and one entry per experience in the same order as the input.",
    "Do NOT use first person.",
];

/// JSON-variant generation prompt.
/// Replace: {voice_instruction}, {facts_instruction}, {full_name}, {target_role}, {style},
///          {style_rule}, {format_rules}, {schema}, {candidate_json}
pub const RESUME_JSON_PROMPT_TEMPLATE: &str = r#"Create a resume for {full_name}. Think like a professional resume writer hiring for the target role.

Target role: {target_role}
Style: {style} ({style_rule})

{voice_instruction}

{facts_instruction}

FORMAT RULES:
{format_rules}

Return a single JSON object matching this schema exactly. Do NOT wrap it in markdown code fences:
{schema}

CANDIDATE INPUT (source of truth):
{candidate_json}"#;

/// Stricter JSON-variant prompt used once after an unparseable first answer.
/// Replace: {schema}, {candidate_json}
pub const STRICT_JSON_PROMPT_TEMPLATE: &str = r#"Return ONLY valid JSON that matches the schema exactly. Do not include any explanations or markdown. The first character of your answer must be "{" and the last must be "}".

Schema: {schema}

Input: {candidate_json}"#;

/// Heading-delimited generation prompt.
/// Replace: {voice_instruction}, {facts_instruction}, {target_role}, {style}, {style_rule},
///          {candidate_text}, {format_rules}, {output_contract}
pub const RESUME_SECTIONED_PROMPT_TEMPLATE: &str = r#"You are a senior professional resume writer.

Target role: {target_role}
Style: {style} ({style_rule})

{candidate_text}

{voice_instruction}

{facts_instruction}

Rules:
{format_rules}

{output_contract}"#;

/// Stricter heading-delimited prompt used once after an unparseable first answer.
/// Replace: {candidate_text}, {output_contract}
pub const STRICT_SECTIONED_PROMPT_TEMPLATE: &str = r#"Your previous answer could not be read. Follow the output format EXACTLY. No markdown, no commentary, no text before the first heading.

{output_contract}

{candidate_text}"#;

/// Output contract for the heading-delimited variant.
/// Replace: {experience_lines}
pub const SECTIONED_OUTPUT_CONTRACT: &str = r#"OUTPUT FORMAT: plain text with exactly these headings, each alone on its own line:
SUMMARY
SKILLS
EXPERIENCE

Under SUMMARY: the rewritten professional summary, 3-4 sentences.
Under SKILLS: one comma-separated line of skills.
Under EXPERIENCE: for each role below, in this exact order, a line "Role | Company" followed by 1-5 bullet lines that start with "- ":
{experience_lines}"#;
