//! Structural validation of candidate résumé content.
//!
//! `validate` is total and pure: it never mutates the candidate and it
//! collects every violation it finds, so a form can surface all errors from
//! a single submission. Paths are dotted and indexed
//! (`personalDetails.email`, `workExperience.2.title`) so the form layer can
//! highlight the exact offending field.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::schema::content::ResumeContent;

/// Map from a dotted/indexed field path to a human-readable message.
/// Never empty on a failed validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, m)| (p.as_str(), m.as_str()))
    }

    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_insert_with(|| message.into());
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (path, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{path}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Checks a candidate value against the résumé content schema.
///
/// On success the returned structure is deep-equal to the candidate — no
/// field is trimmed, dropped, or coerced. JSON `null` on an optional field
/// is treated as absent; `null` on a required field is a violation.
pub fn validate(candidate: &Value) -> Result<ResumeContent, FieldErrors> {
    let mut errors = FieldErrors::default();

    let Some(root) = candidate.as_object() else {
        errors.push("", "content must be a JSON object");
        return Err(errors);
    };

    check_personal_details(root.get("personalDetails"), &mut errors);
    check_work_experience(root.get("workExperience"), &mut errors);
    check_education(root.get("education"), &mut errors);
    check_skills(root.get("skills"), &mut errors);
    check_projects(root.get("projects"), &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value(candidate.clone()).map_err(|e| {
        let mut errors = FieldErrors::default();
        errors.push("", format!("content does not match the résumé schema: {e}"));
        errors
    })
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    })
}

/// `None` and `Value::Null` both count as absent.
fn field<'a>(obj: &'a serde_json::Map<String, Value>, name: &str) -> Option<&'a Value> {
    obj.get(name).filter(|v| !v.is_null())
}

/// Required field that must be a string; blank (empty after whitespace
/// trimming) is a violation.
fn required_text(
    obj: &serde_json::Map<String, Value>,
    prefix: &str,
    name: &str,
    errors: &mut FieldErrors,
) {
    let path = format!("{prefix}.{name}");
    match field(obj, name) {
        None => errors.push(path, "is required"),
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                errors.push(path, "must not be blank");
            }
        }
        Some(_) => errors.push(path, "must be a string"),
    }
}

/// The email field carries a format check on top of the required-text rules.
fn check_email(obj: &serde_json::Map<String, Value>, errors: &mut FieldErrors) {
    let path = "personalDetails.email";
    match field(obj, "email") {
        None => errors.push(path, "is required"),
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                errors.push(path, "must not be blank");
            } else if !email_regex().is_match(s) {
                errors.push(path, "must be a valid email address");
            }
        }
        Some(_) => errors.push(path, "must be a string"),
    }
}

/// Required field that must be a string; blank is allowed (opaque text).
fn required_string(
    obj: &serde_json::Map<String, Value>,
    prefix: &str,
    name: &str,
    errors: &mut FieldErrors,
) {
    let path = format!("{prefix}.{name}");
    match field(obj, name) {
        None => errors.push(path, "is required"),
        Some(Value::String(_)) => {}
        Some(_) => errors.push(path, "must be a string"),
    }
}

/// Optional field: absent and `null` are fine, anything present must be a string.
fn optional_string(
    obj: &serde_json::Map<String, Value>,
    prefix: &str,
    name: &str,
    errors: &mut FieldErrors,
) {
    if let Some(value) = field(obj, name) {
        if !value.is_string() {
            errors.push(format!("{prefix}.{name}"), "must be a string");
        }
    }
}

fn check_personal_details(value: Option<&Value>, errors: &mut FieldErrors) {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        errors.push("personalDetails", "is required");
        return;
    };
    let Some(obj) = value.as_object() else {
        errors.push("personalDetails", "must be an object");
        return;
    };

    required_text(obj, "personalDetails", "fullName", errors);
    check_email(obj, errors);
    required_text(obj, "personalDetails", "phone", errors);
    required_text(obj, "personalDetails", "location", errors);
    required_text(obj, "personalDetails", "summary", errors);
    optional_string(obj, "personalDetails", "linkedin", errors);
    optional_string(obj, "personalDetails", "profilePicture", errors);
}

/// Returns the section's items when the value is an array, recording a
/// violation otherwise. Sections are required but may be empty.
fn section_items<'a>(
    value: Option<&'a Value>,
    path: &str,
    errors: &mut FieldErrors,
) -> Option<&'a [Value]> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        errors.push(path.to_string(), "is required");
        return None;
    };
    match value.as_array() {
        Some(items) => Some(items.as_slice()),
        None => {
            errors.push(path.to_string(), "must be an array");
            None
        }
    }
}

fn check_work_experience(value: Option<&Value>, errors: &mut FieldErrors) {
    let Some(items) = section_items(value, "workExperience", errors) else {
        return;
    };
    for (i, item) in items.iter().enumerate() {
        let prefix = format!("workExperience.{i}");
        let Some(obj) = item.as_object() else {
            errors.push(prefix, "must be an object");
            continue;
        };
        // Dates and descriptions are opaque text; presence is required but
        // blank values are legal mid-edit states the form may submit.
        for name in ["title", "company", "location", "startDate", "endDate", "description"] {
            required_string(obj, &prefix, name, errors);
        }
    }
}

fn check_education(value: Option<&Value>, errors: &mut FieldErrors) {
    let Some(items) = section_items(value, "education", errors) else {
        return;
    };
    for (i, item) in items.iter().enumerate() {
        let prefix = format!("education.{i}");
        let Some(obj) = item.as_object() else {
            errors.push(prefix, "must be an object");
            continue;
        };
        for name in ["degree", "institution", "location", "graduationYear"] {
            required_text(obj, &prefix, name, errors);
        }
    }
}

fn check_skills(value: Option<&Value>, errors: &mut FieldErrors) {
    let Some(items) = section_items(value, "skills", errors) else {
        return;
    };
    for (i, item) in items.iter().enumerate() {
        if !item.is_string() {
            errors.push(format!("skills.{i}"), "must be a string");
        }
    }
}

fn check_projects(value: Option<&Value>, errors: &mut FieldErrors) {
    let Some(items) = section_items(value, "projects", errors) else {
        return;
    };
    for (i, item) in items.iter().enumerate() {
        let prefix = format!("projects.{i}");
        let Some(obj) = item.as_object() else {
            errors.push(prefix, "must be an object");
            continue;
        };
        required_text(obj, &prefix, "title", errors);
        required_text(obj, &prefix, "description", errors);
        optional_string(obj, &prefix, "link", errors);

        let tech_path = format!("{prefix}.technologies");
        match field(obj, "technologies") {
            None => errors.push(tech_path, "is required"),
            Some(Value::Array(techs)) => {
                for (j, tech) in techs.iter().enumerate() {
                    if !tech.is_string() {
                        errors.push(format!("{tech_path}.{j}"), "must be a string");
                    }
                }
            }
            Some(_) => errors.push(tech_path, "must be an array"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_candidate() -> Value {
        json!({
            "personalDetails": {
                "fullName": "Grace Hopper",
                "email": "grace@example.com",
                "phone": "+1 555 0100",
                "location": "Arlington, VA",
                "linkedin": "linkedin.com/in/grace",
                "summary": "Rear admiral and compiler pioneer."
            },
            "workExperience": [{
                "title": "Engineer",
                "company": "Acme",
                "location": "Remote",
                "startDate": "2020-01",
                "endDate": "2022-06",
                "description": "Built things"
            }],
            "education": [{
                "degree": "PhD Mathematics",
                "institution": "Yale",
                "location": "New Haven, CT",
                "graduationYear": "1934"
            }],
            "skills": ["COBOL", "Compilers"],
            "projects": [{
                "title": "FLOW-MATIC",
                "description": "English-like data processing language.",
                "technologies": ["UNIVAC"],
                "link": "https://example.com/flow-matic"
            }]
        })
    }

    #[test]
    fn test_valid_candidate_passes_and_round_trips() {
        let candidate = valid_candidate();
        let content = validate(&candidate).expect("candidate should validate");
        assert_eq!(serde_json::to_value(&content).unwrap(), candidate);
    }

    #[test]
    fn test_validate_does_not_mutate_candidate() {
        let candidate = valid_candidate();
        let snapshot = candidate.clone();
        let _ = validate(&candidate);
        assert_eq!(candidate, snapshot);
    }

    #[test]
    fn test_missing_required_field_keyed_at_exact_path() {
        let mut candidate = valid_candidate();
        candidate["personalDetails"]
            .as_object_mut()
            .unwrap()
            .remove("email");
        let errors = validate(&candidate).unwrap_err();
        assert!(!errors.is_empty());
        assert_eq!(errors.get("personalDetails.email"), Some("is required"));
    }

    #[test]
    fn test_invalid_email_reports_at_email_path() {
        let mut candidate = valid_candidate();
        candidate["personalDetails"]["email"] = json!("not-an-email");
        let errors = validate(&candidate).unwrap_err();
        assert_eq!(
            errors.get("personalDetails.email"),
            Some("must be a valid email address")
        );
    }

    #[test]
    fn test_blank_required_field_is_a_violation() {
        let mut candidate = valid_candidate();
        candidate["personalDetails"]["fullName"] = json!("   ");
        let errors = validate(&candidate).unwrap_err();
        assert_eq!(
            errors.get("personalDetails.fullName"),
            Some("must not be blank")
        );
    }

    #[test]
    fn test_all_violations_collected_on_one_pass() {
        let mut candidate = valid_candidate();
        candidate["personalDetails"]["email"] = json!("nope");
        candidate["personalDetails"]["phone"] = json!("");
        candidate["education"][0]
            .as_object_mut()
            .unwrap()
            .remove("degree");
        let errors = validate(&candidate).unwrap_err();
        assert!(errors.len() >= 3, "expected 3+ errors, got {errors}");
        assert!(errors.get("personalDetails.email").is_some());
        assert!(errors.get("personalDetails.phone").is_some());
        assert!(errors.get("education.0.degree").is_some());
    }

    #[test]
    fn test_indexed_path_into_work_experience() {
        let mut candidate = valid_candidate();
        let entries = candidate["workExperience"].as_array_mut().unwrap();
        entries.push(json!({
            "title": "Lead",
            "company": 42,
            "location": "Remote",
            "startDate": "2023-01",
            "endDate": "2024-01",
            "description": "Led"
        }));
        let errors = validate(&candidate).unwrap_err();
        assert_eq!(errors.get("workExperience.1.company"), Some("must be a string"));
    }

    #[test]
    fn test_blank_work_experience_dates_are_allowed() {
        let mut candidate = valid_candidate();
        candidate["workExperience"][0]["endDate"] = json!("");
        assert!(validate(&candidate).is_ok());
    }

    #[test]
    fn test_technologies_elements_checked_by_index() {
        let mut candidate = valid_candidate();
        candidate["projects"][0]["technologies"] = json!(["UNIVAC", 7]);
        let errors = validate(&candidate).unwrap_err();
        assert_eq!(
            errors.get("projects.0.technologies.1"),
            Some("must be a string")
        );
    }

    #[test]
    fn test_null_optional_field_treated_as_absent() {
        let mut candidate = valid_candidate();
        candidate["personalDetails"]["linkedin"] = json!(null);
        let content = validate(&candidate).expect("null linkedin should be absent");
        assert_eq!(content.personal_details.linkedin, None);
    }

    #[test]
    fn test_missing_section_array_is_required() {
        let mut candidate = valid_candidate();
        candidate.as_object_mut().unwrap().remove("skills");
        let errors = validate(&candidate).unwrap_err();
        assert_eq!(errors.get("skills"), Some("is required"));
    }

    #[test]
    fn test_empty_sequences_are_valid() {
        let mut candidate = valid_candidate();
        candidate["workExperience"] = json!([]);
        candidate["education"] = json!([]);
        candidate["skills"] = json!([]);
        candidate["projects"] = json!([]);
        assert!(validate(&candidate).is_ok());
    }

    #[test]
    fn test_non_object_root_rejected() {
        let errors = validate(&json!([1, 2, 3])).unwrap_err();
        assert!(!errors.is_empty());
    }
}
