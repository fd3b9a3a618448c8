//! Canonical résumé content model — the single source of truth for shape.
//!
//! Field names serialize in camelCase; the serialized form is the durable,
//! externally visible representation and must round-trip losslessly through
//! storage. Validation rules live in [`super::validate`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// Inline image as a self-describing data URL (`data:<mime>;base64,<payload>`).
    /// The 5 MB decoded-size cap is enforced by the form editor, not here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub summary: String,
}

/// One position in the work history. Dates are opaque text, conventionally
/// "YYYY-MM". Entries render in insertion order and are never sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub graduation_year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// The validated aggregate. Every sequence may be empty; an empty sequence
/// suppresses its section in both renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeContent {
    pub personal_details: PersonalDetails,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub projects: Vec<ProjectEntry>,
}

/// Treats an optional string field as present only when it is non-empty.
/// An empty string behaves like an absent value everywhere content is
/// rendered, matching the stored form's use of `""` for "not provided".
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_serializes_camel_case() {
        let content = ResumeContent {
            personal_details: PersonalDetails {
                full_name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let json = serde_json::to_value(&content).unwrap();
        assert!(json.get("personalDetails").is_some());
        assert_eq!(
            json["personalDetails"]["fullName"],
            serde_json::json!("Ada Lovelace")
        );
        assert!(json.get("workExperience").is_some());
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let content = ResumeContent::default();
        let json = serde_json::to_value(&content).unwrap();
        assert!(json["personalDetails"].get("linkedin").is_none());
        assert!(json["personalDetails"].get("profilePicture").is_none());
    }

    #[test]
    fn test_content_round_trips_through_json() {
        let content = ResumeContent {
            personal_details: PersonalDetails {
                full_name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "+44 1".to_string(),
                location: "London".to_string(),
                linkedin: Some("linkedin.com/in/ada".to_string()),
                profile_picture: None,
                summary: "First programmer.".to_string(),
            },
            work_experience: vec![WorkExperienceEntry {
                title: "Analyst".to_string(),
                company: "Analytical Engines Ltd".to_string(),
                location: "London".to_string(),
                start_date: "1842-01".to_string(),
                end_date: "1843-12".to_string(),
                description: "Wrote the first published program.".to_string(),
            }],
            education: vec![],
            skills: vec!["Mathematics".to_string()],
            projects: vec![ProjectEntry {
                title: "Note G".to_string(),
                description: "Bernoulli number computation.".to_string(),
                technologies: vec!["Analytical Engine".to_string()],
                link: None,
            }],
        };
        let json = serde_json::to_value(&content).unwrap();
        let back: ResumeContent = serde_json::from_value(json).unwrap();
        assert_eq!(back, content);
    }

    #[test]
    fn test_present_filters_empty_strings() {
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&Some("x".to_string())), Some("x"));
    }
}
