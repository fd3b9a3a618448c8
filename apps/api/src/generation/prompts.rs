use crate::generation::GenerateResumeRequest;

pub const GENERATION_SYSTEM: &str = "You are a professional resume writer. \
You produce realistic, well-written resume content as JSON. \
Respond with a single JSON object and nothing else — no prose, no markdown fences.";

/// Builds the user prompt for one-click generation. The JSON shape spelled
/// out here must stay in lockstep with the content schema.
pub fn build_generation_prompt(request: &GenerateResumeRequest) -> String {
    format!(
        r#"Draft complete resume content for this candidate:

- Target role: {job_title}
- Years of experience: {years}
- Industry: {industry}
- Key skills: {skills}

Invent plausible names, employers, institutions, and dates consistent with
the seniority above. Write the summary in first person without pronouns.

Return JSON with exactly this shape:
{{
  "personalDetails": {{
    "fullName": string, "email": string, "phone": string,
    "location": string, "linkedin": string, "summary": string
  }},
  "workExperience": [{{
    "title": string, "company": string, "location": string,
    "startDate": "YYYY-MM", "endDate": "YYYY-MM", "description": string
  }}],
  "education": [{{
    "degree": string, "institution": string, "location": string,
    "graduationYear": string
  }}],
  "skills": [string],
  "projects": [{{
    "title": string, "description": string,
    "technologies": [string], "link": string
  }}]
}}"#,
        job_title = request.job_title,
        years = request.years_of_experience,
        industry = request.industry,
        skills = request.skills.join(", "),
    )
}
