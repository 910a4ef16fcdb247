use serde::{Deserialize, Serialize};

use crate::models::candidate::ResumeLink;

/// Final resume shape handed to the template-rendering layer.
///
/// Every array is always present (possibly empty); optional scalars are
/// flattened to empty strings so templates never see nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResume {
    pub header: ResumeHeader,
    pub summary: String,
    pub experiences: Vec<ResumeExperience>,
    pub education: Vec<ResumeEducation>,
    pub skills: Vec<String>,
    pub projects: Vec<ResumeProject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeHeader {
    pub full_name: String,
    pub headline: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub links: Vec<ResumeLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeExperience {
    pub role: String,
    pub company: String,
    pub location: String,
    pub start: String,
    /// "Present" when `current` is set.
    pub end: String,
    pub current: bool,
    pub bullets: Vec<String>,
    pub tech: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeEducation {
    pub degree: String,
    pub university: String,
    pub years: String,
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeProject {
    pub name: String,
    pub description: String,
    pub link: String,
    pub technologies: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_resume_serializes_every_array() {
        let value = serde_json::to_value(GeneratedResume::default()).unwrap();
        for key in ["experiences", "education", "skills", "projects"] {
            assert!(value[key].is_array(), "{key} must serialize as an array");
        }
        assert!(value["header"]["links"].is_array());
        assert!(value["header"].get("fullName").is_some());
    }
}
