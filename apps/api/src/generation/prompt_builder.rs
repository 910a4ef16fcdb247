//! Prompt construction: a deterministic, pure mapping from `CandidateInput` to prompt text.
//!
//! Same input → same bytes. No secrets, no timestamps, no randomness.

use crate::generation::parser::ParserStrategy;
use crate::generation::prompts::{
    FORMAT_RULES, RESUME_JSON_PROMPT_TEMPLATE, RESUME_JSON_SYSTEM, RESUME_SCHEMA,
    RESUME_SECTIONED_PROMPT_TEMPLATE, RESUME_SECTIONED_SYSTEM, SECTIONED_OUTPUT_CONTRACT,
    STRICT_JSON_PROMPT_TEMPLATE, STRICT_SECTIONED_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{
    FACTS_INSTRUCTION, JSON_ONLY_SYSTEM, PLAIN_TEXT_SYSTEM, VOICE_INSTRUCTION,
};
use crate::models::candidate::{CandidateInput, ResumeStyle};

/// A prompt plus the system message it must be sent with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPrompt {
    pub system: &'static str,
    pub prompt: String,
}

/// First-attempt prompt for the given parser strategy.
pub fn build_prompt(candidate: &CandidateInput, strategy: ParserStrategy) -> BuiltPrompt {
    match strategy {
        ParserStrategy::Json => BuiltPrompt {
            system: RESUME_JSON_SYSTEM,
            prompt: RESUME_JSON_PROMPT_TEMPLATE
                .replace("{voice_instruction}", VOICE_INSTRUCTION)
                .replace("{facts_instruction}", FACTS_INSTRUCTION)
                .replace("{full_name}", &candidate.full_name)
                .replace("{target_role}", &candidate.target_role)
                .replace("{style}", candidate.style.as_str())
                .replace("{style_rule}", style_rule(candidate.style))
                .replace("{format_rules}", &numbered_rules())
                .replace("{schema}", RESUME_SCHEMA)
                .replace("{candidate_json}", &candidate_json(candidate)),
        },
        ParserStrategy::Sectioned => BuiltPrompt {
            system: RESUME_SECTIONED_SYSTEM,
            prompt: RESUME_SECTIONED_PROMPT_TEMPLATE
                .replace("{voice_instruction}", VOICE_INSTRUCTION)
                .replace("{facts_instruction}", FACTS_INSTRUCTION)
                .replace("{target_role}", &candidate.target_role)
                .replace("{style}", candidate.style.as_str())
                .replace("{style_rule}", style_rule(candidate.style))
                .replace("{format_rules}", &numbered_rules())
                .replace("{output_contract}", &output_contract(candidate))
                .replace("{candidate_text}", &candidate_text(candidate)),
        },
    }
}

/// Stricter re-prompt used once when the first answer could not be parsed.
pub fn build_strict_prompt(candidate: &CandidateInput, strategy: ParserStrategy) -> BuiltPrompt {
    match strategy {
        ParserStrategy::Json => BuiltPrompt {
            system: JSON_ONLY_SYSTEM,
            prompt: STRICT_JSON_PROMPT_TEMPLATE
                .replace("{schema}", RESUME_SCHEMA)
                .replace("{candidate_json}", &candidate_json(candidate)),
        },
        ParserStrategy::Sectioned => BuiltPrompt {
            system: PLAIN_TEXT_SYSTEM,
            prompt: STRICT_SECTIONED_PROMPT_TEMPLATE
                .replace("{output_contract}", &output_contract(candidate))
                .replace("{candidate_text}", &candidate_text(candidate)),
        },
    }
}

fn style_rule(style: ResumeStyle) -> &'static str {
    match style {
        ResumeStyle::Modern => "contemporary and energetic: lead with impact and current tooling",
        ResumeStyle::Minimal => "simple and plain: the fewest words that carry each point",
        ResumeStyle::Classic => "traditional and formal: conservative, understated wording",
    }
}

fn numbered_rules() -> String {
    FORMAT_RULES
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{}. {rule}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Candidate as pretty JSON; struct field order keeps this stable.
fn candidate_json(candidate: &CandidateInput) -> String {
    serde_json::to_string_pretty(candidate).unwrap_or_else(|_| candidate_text(candidate))
}

fn candidate_text(candidate: &CandidateInput) -> String {
    let mut out = String::new();

    out.push_str("Candidate:\n");
    out.push_str(&format!("Name: {}\n", candidate.full_name));
    out.push_str(&format!("Location: {}\n", candidate.location));
    out.push_str(&format!("Headline: {}\n", candidate.headline));

    out.push_str("\nSummary (rewrite professionally):\n");
    out.push_str(&candidate.summary);
    out.push('\n');

    out.push_str("\nSkills:\n");
    out.push_str(&candidate.skills.join(", "));
    out.push('\n');

    out.push_str("\nExperience:\n");
    for exp in &candidate.experiences {
        out.push_str(&format!(
            "- {} at {} ({} – {})\n",
            exp.role,
            exp.company,
            exp.start_date,
            exp.resolved_end()
        ));
        out.push_str(&format!("  Highlights: {}\n", exp.highlights.join("; ")));
    }

    out.push_str("\nEducation:\n");
    for edu in &candidate.education {
        out.push_str(&format!(
            "- {}, {} ({})\n",
            edu.degree, edu.university, edu.years
        ));
    }

    if !candidate.projects().is_empty() {
        out.push_str("\nProjects:\n");
        for project in candidate.projects() {
            out.push_str(&format!("- {}: {}\n", project.name, project.description));
        }
    }

    out
}

fn output_contract(candidate: &CandidateInput) -> String {
    let experience_lines = candidate
        .experiences
        .iter()
        .map(|exp| format!("{} | {}", exp.role, exp.company))
        .collect::<Vec<_>>()
        .join("\n");
    SECTIONED_OUTPUT_CONTRACT.replace("{experience_lines}", &experience_lines)
}
