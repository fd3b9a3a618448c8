//! Form editor — the bidirectional controller between raw user input and a
//! content structure candidate.
//!
//! A draft mirrors the résumé content shape but tolerates any intermediate
//! state (blank required fields, half-typed emails). Nothing is checked
//! until `submit`, which runs the full schema validation and either yields
//! a validated `ResumeContent` or the complete set of field errors.
//!
//! The one guard that runs eagerly is the profile picture cap: an image
//! whose decoded size exceeds 5 MB is rejected before it ever enters the
//! candidate, leaving the previously attached picture untouched.
#![allow(dead_code)]

use base64::Engine;
use mime::Mime;
use serde_json::{json, Value};
use thiserror::Error;

use crate::schema::{validate, FieldErrors, ResumeContent};

/// Maximum decoded profile picture size.
pub const MAX_PICTURE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum ImageError {
    #[error("profile picture must be a data URL (data:<mime>;base64,<payload>)")]
    MalformedDataUrl,

    #[error("unsupported media type '{0}', expected an image")]
    NotAnImage(String),

    #[error("invalid base64 image payload")]
    InvalidPayload,

    #[error("image is {actual} bytes decoded, over the {limit} byte limit")]
    Oversize { actual: usize, limit: usize },
}

/// Checks a self-describing inline image (`data:<mime>;base64,<payload>`)
/// against the media-type allowlist and the decoded-size cap.
pub fn check_profile_picture(data_url: &str) -> Result<(), ImageError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or(ImageError::MalformedDataUrl)?;
    let (media_type, payload) = rest
        .split_once(";base64,")
        .ok_or(ImageError::MalformedDataUrl)?;

    let mime: Mime = media_type.parse().map_err(|_| ImageError::MalformedDataUrl)?;
    if mime.type_() != mime::IMAGE {
        return Err(ImageError::NotAnImage(mime.to_string()));
    }

    // Size-check the encoded form first so a grossly oversized payload is
    // rejected without decoding it.
    let estimated = payload.len() / 4 * 3;
    if estimated > MAX_PICTURE_BYTES + 3 {
        return Err(ImageError::Oversize {
            actual: estimated,
            limit: MAX_PICTURE_BYTES,
        });
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| ImageError::InvalidPayload)?;
    if bytes.len() > MAX_PICTURE_BYTES {
        return Err(ImageError::Oversize {
            actual: bytes.len(),
            limit: MAX_PICTURE_BYTES,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftPersonalDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub profile_picture: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftExperience {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftEducation {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub graduation_year: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftProject {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: String,
}

/// The in-progress candidate. Entry sequences are plain ordered values:
/// append adds at the end, removal by index renumbers what follows but
/// never reorders the retained entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentDraft {
    pub personal_details: DraftPersonalDetails,
    pub work_experience: Vec<DraftExperience>,
    pub education: Vec<DraftEducation>,
    pub skills: Vec<String>,
    pub projects: Vec<DraftProject>,
}

impl ContentDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a draft from stored content for the edit flow.
    pub fn from_content(content: &ResumeContent) -> Self {
        Self {
            personal_details: DraftPersonalDetails {
                full_name: content.personal_details.full_name.clone(),
                email: content.personal_details.email.clone(),
                phone: content.personal_details.phone.clone(),
                location: content.personal_details.location.clone(),
                linkedin: content.personal_details.linkedin.clone().unwrap_or_default(),
                profile_picture: content
                    .personal_details
                    .profile_picture
                    .clone()
                    .unwrap_or_default(),
                summary: content.personal_details.summary.clone(),
            },
            work_experience: content
                .work_experience
                .iter()
                .map(|e| DraftExperience {
                    title: e.title.clone(),
                    company: e.company.clone(),
                    location: e.location.clone(),
                    start_date: e.start_date.clone(),
                    end_date: e.end_date.clone(),
                    description: e.description.clone(),
                })
                .collect(),
            education: content
                .education
                .iter()
                .map(|e| DraftEducation {
                    degree: e.degree.clone(),
                    institution: e.institution.clone(),
                    location: e.location.clone(),
                    graduation_year: e.graduation_year.clone(),
                })
                .collect(),
            skills: content.skills.clone(),
            projects: content
                .projects
                .iter()
                .map(|p| DraftProject {
                    title: p.title.clone(),
                    description: p.description.clone(),
                    technologies: p.technologies.clone(),
                    link: p.link.clone().unwrap_or_default(),
                })
                .collect(),
        }
    }

    /// Appends a blank entry and returns its index — the key the form
    /// layer uses for the new row.
    pub fn add_experience(&mut self) -> usize {
        self.work_experience.push(DraftExperience::default());
        self.work_experience.len() - 1
    }

    pub fn remove_experience(&mut self, index: usize) -> bool {
        remove_at(&mut self.work_experience, index)
    }

    pub fn add_education(&mut self) -> usize {
        self.education.push(DraftEducation::default());
        self.education.len() - 1
    }

    pub fn remove_education(&mut self, index: usize) -> bool {
        remove_at(&mut self.education, index)
    }

    pub fn add_skill(&mut self, skill: impl Into<String>) {
        self.skills.push(skill.into());
    }

    pub fn remove_skill(&mut self, index: usize) -> bool {
        remove_at(&mut self.skills, index)
    }

    pub fn add_project(&mut self) -> usize {
        self.projects.push(DraftProject::default());
        self.projects.len() - 1
    }

    pub fn remove_project(&mut self, index: usize) -> bool {
        remove_at(&mut self.projects, index)
    }

    /// Attaches an inline image after running the media-type and size
    /// checks. On failure the previously attached picture is unchanged.
    pub fn set_profile_picture(&mut self, data_url: &str) -> Result<(), ImageError> {
        check_profile_picture(data_url)?;
        self.personal_details.profile_picture = data_url.to_string();
        Ok(())
    }

    pub fn clear_profile_picture(&mut self) {
        self.personal_details.profile_picture.clear();
    }

    /// The candidate value in its durable JSON shape. Empty optional fields
    /// are omitted rather than sent as empty strings.
    pub fn candidate(&self) -> Value {
        let d = &self.personal_details;
        let mut personal = json!({
            "fullName": d.full_name,
            "email": d.email,
            "phone": d.phone,
            "location": d.location,
            "summary": d.summary,
        });
        if !d.linkedin.is_empty() {
            personal["linkedin"] = json!(d.linkedin);
        }
        if !d.profile_picture.is_empty() {
            personal["profilePicture"] = json!(d.profile_picture);
        }

        json!({
            "personalDetails": personal,
            "workExperience": self.work_experience.iter().map(|e| json!({
                "title": e.title,
                "company": e.company,
                "location": e.location,
                "startDate": e.start_date,
                "endDate": e.end_date,
                "description": e.description,
            })).collect::<Vec<_>>(),
            "education": self.education.iter().map(|e| json!({
                "degree": e.degree,
                "institution": e.institution,
                "location": e.location,
                "graduationYear": e.graduation_year,
            })).collect::<Vec<_>>(),
            "skills": self.skills,
            "projects": self.projects.iter().map(|p| {
                let mut project = json!({
                    "title": p.title,
                    "description": p.description,
                    "technologies": p.technologies,
                });
                if !p.link.is_empty() {
                    project["link"] = json!(p.link);
                }
                project
            }).collect::<Vec<_>>(),
        })
    }

    /// Explicit submission: validates the candidate in full. Field errors
    /// are keyed by the same dotted paths the draft's indices use, so the
    /// form can attach each message to its input.
    pub fn submit(&self) -> Result<ResumeContent, FieldErrors> {
        validate(&self.candidate())
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) -> bool {
    if index < items.len() {
        items.remove(index);
        true
    } else {
        false
    }
}
