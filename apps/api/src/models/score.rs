use serde::{Deserialize, Serialize};

/// Sections an improvement suggestion may target. Anything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImprovementSection {
    Summary,
    Experience,
    Skills,
    Education,
    Projects,
    Other,
}

impl ImprovementSection {
    pub const ALL: [ImprovementSection; 6] = [
        ImprovementSection::Summary,
        ImprovementSection::Experience,
        ImprovementSection::Skills,
        ImprovementSection::Education,
        ImprovementSection::Projects,
        ImprovementSection::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImprovementSection::Summary => "Summary",
            ImprovementSection::Experience => "Experience",
            ImprovementSection::Skills => "Skills",
            ImprovementSection::Education => "Education",
            ImprovementSection::Projects => "Projects",
            ImprovementSection::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCategories {
    pub ats_compatibility: u8,
    pub impact_and_metrics: u8,
    pub skills_relevance: u8,
    pub clarity_and_structure: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementItem {
    pub issue: String,
    pub suggestion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementGroup {
    pub section: ImprovementSection,
    pub items: Vec<ImprovementItem>,
}

/// Normalized rubric result for an uploaded resume. All scores are in 0–100.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeScoreResult {
    pub overall_score: u8,
    pub categories: ScoreCategories,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub missing_skills: Vec<String>,
    pub improvements: Vec<ImprovementGroup>,
}
