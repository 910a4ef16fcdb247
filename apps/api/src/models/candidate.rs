use serde::{Deserialize, Deserializer, Serialize};

/// Form payloads send `null` for untouched fields; read those as the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Visual style requested by the candidate. Drives tone rules in the prompt only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeStyle {
    #[default]
    Modern,
    Minimal,
    Classic,
}

impl ResumeStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeStyle::Modern => "modern",
            ResumeStyle::Minimal => "minimal",
            ResumeStyle::Classic => "classic",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeLink {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceInput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub technologies: Option<Vec<String>>,
}

impl ExperienceInput {
    pub fn is_current(&self) -> bool {
        self.current.unwrap_or(false)
    }

    /// Display end date: "Present" for current roles, otherwise the end date or "".
    pub fn resolved_end(&self) -> String {
        if self.is_current() {
            "Present".to_string()
        } else {
            self.end_date.clone().unwrap_or_default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationInput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub university: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub years: String,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub technologies: Option<Vec<String>>,
}

/// Candidate data as collected by the multi-step form.
///
/// Arrives pre-validated; every collection defaults to empty when absent so the
/// pipeline never has to special-case missing keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateInput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headline: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<ResumeLink>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experiences: Vec<ExperienceInput>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<EducationInput>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Option<Vec<ProjectInput>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub style: ResumeStyle,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_role: String,
}

impl CandidateInput {
    pub fn projects(&self) -> &[ProjectInput] {
        self.projects.as_deref().unwrap_or(&[])
    }
}
