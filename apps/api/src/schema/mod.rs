pub mod content;
pub mod validate;

pub use content::{
    EducationEntry, PersonalDetails, ProjectEntry, ResumeContent, WorkExperienceEntry,
};
pub use validate::{validate, FieldErrors};
