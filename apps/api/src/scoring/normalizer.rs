//! Score normalization: coerces the model's loosely-shaped JSON into a
//! `ResumeScoreResult`. Total: once the text parsed as JSON, this never fails.

use serde_json::Value;

use crate::generation::normalizer::string_list;
use crate::models::score::{
    ImprovementGroup, ImprovementItem, ImprovementSection, ResumeScoreResult, ScoreCategories,
};

const MAX_SCORE: f64 = 100.0;

pub fn normalize_result(raw: &Value) -> ResumeScoreResult {
    let categories = raw.get("categories");
    // Category scores are read from `categories.<key>`, then from a top-level `<key>`.
    let category = |key: &str| {
        clamp_score(
            categories
                .and_then(|c| c.get(key))
                .filter(|v| !v.is_null())
                .or_else(|| raw.get(key)),
        )
    };

    ResumeScoreResult {
        overall_score: clamp_score(raw.get("overallScore")),
        categories: ScoreCategories {
            ats_compatibility: category("atsCompatibility"),
            impact_and_metrics: category("impactAndMetrics"),
            skills_relevance: category("skillsRelevance"),
            clarity_and_structure: category("clarityAndStructure"),
        },
        strengths: string_list(raw.get("strengths")),
        weaknesses: string_list(raw.get("weaknesses")),
        missing_skills: string_list(raw.get("missingSkills")),
        improvements: raw
            .get("improvements")
            .and_then(Value::as_array)
            .map(|groups| groups.iter().map(improvement_group).collect())
            .unwrap_or_default(),
    }
}

/// Numbers and numeric strings are rounded and clamped to 0–100.
/// Everything else (missing, null, bool, non-numeric text, non-finite) scores 0.
pub fn clamp_score(value: Option<&Value>) -> u8 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => n.round().clamp(0.0, MAX_SCORE) as u8,
        _ => 0,
    }
}

/// Exact (trimmed, case-sensitive) match against the known sections, else `Other`.
pub fn section_name(value: Option<&Value>) -> ImprovementSection {
    let Some(name) = value.and_then(Value::as_str).map(str::trim) else {
        return ImprovementSection::Other;
    };
    ImprovementSection::ALL
        .into_iter()
        .find(|section| section.as_str() == name)
        .unwrap_or(ImprovementSection::Other)
}

fn improvement_group(group: &Value) -> ImprovementGroup {
    ImprovementGroup {
        section: section_name(group.get("section")),
        items: group
            .get("items")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(improvement_item).collect())
            .unwrap_or_default(),
    }
}

fn improvement_item(item: &Value) -> Option<ImprovementItem> {
    let issue = trimmed(item.get("issue"))?;
    let suggestion = trimmed(item.get("suggestion"))?;
    if issue.is_empty() || suggestion.is_empty() {
        return None;
    }
    Some(ImprovementItem {
        issue,
        suggestion,
        apply_action: trimmed(item.get("applyAction")),
    })
}

fn trimmed(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
}
