//! Fallback assembly: maps `CandidateInput` straight into `GeneratedResume`.
//!
//! Total and pure: no model, no I/O. Used when both generation attempts fail to
//! parse (or the invoker is exhausted and the fallback policy allows it), and as
//! the trusted base the normalizer overlays model prose onto.

use crate::models::candidate::{CandidateInput, EducationInput, ExperienceInput, ProjectInput};
use crate::models::resume::{
    GeneratedResume, ResumeEducation, ResumeExperience, ResumeHeader, ResumeProject,
};

pub fn assemble(original: &CandidateInput) -> GeneratedResume {
    GeneratedResume {
        header: header(original),
        summary: original.summary.clone(),
        experiences: original.experiences.iter().map(experience).collect(),
        education: original.education.iter().map(education).collect(),
        skills: original.skills.clone(),
        projects: original.projects().iter().map(project).collect(),
    }
}

/// Contact block. Always the candidate's own values.
pub fn header(original: &CandidateInput) -> ResumeHeader {
    ResumeHeader {
        full_name: original.full_name.clone(),
        headline: original.headline.clone(),
        location: original.location.clone(),
        email: original.email.clone(),
        phone: original.phone.clone(),
        links: original.links.clone(),
    }
}

fn experience(exp: &ExperienceInput) -> ResumeExperience {
    ResumeExperience {
        role: exp.role.clone(),
        company: exp.company.clone(),
        location: exp.location.clone().unwrap_or_default(),
        start: exp.start_date.clone(),
        end: exp.resolved_end(),
        current: exp.is_current(),
        bullets: exp.highlights.clone(),
        tech: exp.technologies.clone().unwrap_or_default(),
    }
}

fn education(edu: &EducationInput) -> ResumeEducation {
    ResumeEducation {
        degree: edu.degree.clone(),
        university: edu.university.clone(),
        years: edu.years.clone(),
        details: edu.details.clone().unwrap_or_default(),
    }
}

fn project(p: &ProjectInput) -> ResumeProject {
    ResumeProject {
        name: p.name.clone(),
        description: p.description.clone(),
        link: p.link.clone().unwrap_or_default(),
        technologies: p.technologies.clone().unwrap_or_default(),
    }
}
