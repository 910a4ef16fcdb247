//! Normalization: coerces a parsed draft into the final `GeneratedResume`.
//!
//! The model only has authority over prose: summary, experience bullets and the
//! skill list. Everything factual (contact block, roles, companies, dates,
//! education, projects) comes from the candidate's own input. Every path
//! produces a complete resume; missing or mistyped model fields fall back to
//! the input value.

use std::collections::HashSet;

use serde_json::Value;

use crate::generation::fallback;
use crate::generation::parser::ResumeDraft;
use crate::models::candidate::CandidateInput;
use crate::models::resume::GeneratedResume;

/// The prose fields the model may contribute, already type-checked.
#[derive(Debug, Default, PartialEq)]
struct ModelProse {
    summary: Option<String>,
    skills: Vec<String>,
    /// Bullets per experience, by position.
    bullets: Vec<Vec<String>>,
}

pub fn normalize(draft: &ResumeDraft, original: &CandidateInput) -> GeneratedResume {
    let prose = match draft {
        ResumeDraft::Json(value) => prose_from_json(value),
        ResumeDraft::Sections(sections) => ModelProse {
            summary: non_blank(&sections.summary),
            skills: sections.skills.clone(),
            bullets: sections
                .experience_blocks
                .iter()
                .map(|block| block.bullets.clone())
                .collect(),
        },
    };

    let mut resume = fallback::assemble(original);

    if let Some(summary) = prose.summary {
        resume.summary = summary;
    }

    let skills = dedup_case_insensitive(prose.skills);
    if !skills.is_empty() {
        resume.skills = skills;
    }

    for (experience, bullets) in resume.experiences.iter_mut().zip(prose.bullets) {
        if !bullets.is_empty() {
            experience.bullets = bullets;
        }
    }

    resume
}

fn prose_from_json(value: &Value) -> ModelProse {
    ModelProse {
        summary: value.get("summary").and_then(Value::as_str).and_then(non_blank),
        skills: string_list(value.get("skills")),
        bullets: value
            .get("experiences")
            .and_then(Value::as_array)
            .map(|experiences| {
                experiences
                    .iter()
                    .map(|exp| string_list(exp.get("bullets")))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Strings from a JSON array: non-arrays become empty, non-strings are skipped,
/// items are trimmed and blanks dropped.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter_map(non_blank)
                .collect()
        })
        .unwrap_or_default()
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn dedup_case_insensitive(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}
