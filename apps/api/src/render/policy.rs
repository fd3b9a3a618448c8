//! Section visibility policy shared by both renderers.
//!
//! A section's heading and body appear only when its backing field is
//! non-empty (summary: non-empty string; the rest: non-empty sequence),
//! and sections always appear in the fixed order below. Renderers never
//! sort entries within a section; display order is insertion order.

use serde::Serialize;

use crate::schema::ResumeContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Summary,
    Experience,
    Skills,
    Education,
    Projects,
}

pub const SECTION_ORDER: [Section; 5] = [
    Section::Summary,
    Section::Experience,
    Section::Skills,
    Section::Education,
    Section::Projects,
];

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Summary => "Professional Summary",
            Section::Experience => "Experience",
            Section::Skills => "Skills",
            Section::Education => "Education",
            Section::Projects => "Projects",
        }
    }

    pub fn is_populated(&self, content: &ResumeContent) -> bool {
        match self {
            Section::Summary => !content.personal_details.summary.is_empty(),
            Section::Experience => !content.work_experience.is_empty(),
            Section::Skills => !content.skills.is_empty(),
            Section::Education => !content.education.is_empty(),
            Section::Projects => !content.projects.is_empty(),
        }
    }
}

/// The sections both renderers will draw, in display order.
pub fn visible_sections(content: &ResumeContent) -> Vec<Section> {
    SECTION_ORDER
        .into_iter()
        .filter(|s| s.is_populated(content))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EducationEntry, PersonalDetails, ProjectEntry, WorkExperienceEntry};

    fn content() -> ResumeContent {
        ResumeContent {
            personal_details: PersonalDetails {
                full_name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: "1".to_string(),
                location: "London".to_string(),
                summary: String::new(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_all_sections_hidden_for_empty_content() {
        assert!(visible_sections(&content()).is_empty());
    }

    #[test]
    fn test_each_section_appears_only_when_populated() {
        let mut c = content();
        c.personal_details.summary = "A summary.".to_string();
        assert_eq!(visible_sections(&c), vec![Section::Summary]);

        c.skills.push("Rust".to_string());
        assert_eq!(visible_sections(&c), vec![Section::Summary, Section::Skills]);

        c.projects.push(ProjectEntry {
            title: "P".to_string(),
            description: "D".to_string(),
            technologies: vec![],
            link: None,
        });
        assert_eq!(
            visible_sections(&c),
            vec![Section::Summary, Section::Skills, Section::Projects]
        );
    }

    #[test]
    fn test_sections_keep_fixed_order_regardless_of_insertion() {
        let mut c = content();
        c.projects.push(ProjectEntry {
            title: "P".to_string(),
            description: "D".to_string(),
            technologies: vec![],
            link: None,
        });
        c.education.push(EducationEntry {
            degree: "BSc".to_string(),
            institution: "MIT".to_string(),
            location: "Cambridge".to_string(),
            graduation_year: "2001".to_string(),
        });
        c.work_experience.push(WorkExperienceEntry::default());
        assert_eq!(
            visible_sections(&c),
            vec![Section::Experience, Section::Education, Section::Projects]
        );
    }
}
