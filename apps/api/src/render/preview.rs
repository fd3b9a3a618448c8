//! Interactive preview — a continuously scrollable HTML view of one
//! validated content structure. Deterministic and pure; all user text is
//! escaped before it reaches the markup.

use crate::render::policy::{visible_sections, Section};
use crate::schema::content::present;
use crate::schema::{ResumeContent, WorkExperienceEntry};

const PREVIEW_STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:52rem;margin:0 auto;padding:2rem;color:#1f2937}\
header{text-align:center;margin-bottom:2rem}\
header h1{margin:0 0 .5rem}\
header p{margin:.15rem 0;color:#4b5563}\
.portrait{width:8rem;height:8rem;border-radius:50%;object-fit:cover;margin-bottom:1rem}\
section{margin-bottom:2rem}\
section h2{border-bottom:1px solid #e5e7eb;padding-bottom:.5rem}\
section h3{margin:.75rem 0 .15rem}\
.dates{color:#6b7280;font-size:.875rem}\
.muted{color:#4b5563}\
.skill{display:inline-block;background:#f3f4f6;border-radius:9999px;padding:.25rem .75rem;margin:.15rem}";

/// Renders the on-screen preview for one content structure.
pub fn render_preview(content: &ResumeContent) -> String {
    let mut html = String::with_capacity(4096);
    let details = &content.personal_details;

    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>");
    html.push_str(&escape(&details.full_name));
    html.push_str("</title><style>");
    html.push_str(PREVIEW_STYLE);
    html.push_str("</style></head><body>");

    html.push_str("<header>");
    if let Some(picture) = present(&details.profile_picture) {
        html.push_str(&format!(
            "<img class=\"portrait\" src=\"{}\" alt=\"Profile\">",
            escape(picture)
        ));
    }
    html.push_str(&format!("<h1>{}</h1>", escape(&details.full_name)));
    for line in [&details.email, &details.phone, &details.location] {
        html.push_str(&format!("<p>{}</p>", escape(line)));
    }
    if let Some(linkedin) = present(&details.linkedin) {
        html.push_str(&format!("<p>{}</p>", escape(linkedin)));
    }
    html.push_str("</header>");

    for section in visible_sections(content) {
        html.push_str("<section>");
        html.push_str(&format!("<h2>{}</h2>", section.title()));
        match section {
            Section::Summary => {
                html.push_str(&format!("<p>{}</p>", escape(&details.summary)));
            }
            Section::Experience => {
                for entry in &content.work_experience {
                    push_experience(&mut html, entry);
                }
            }
            Section::Skills => {
                for skill in &content.skills {
                    html.push_str(&format!("<span class=\"skill\">{}</span>", escape(skill)));
                }
            }
            Section::Education => {
                for entry in &content.education {
                    html.push_str(&format!("<h3>{}</h3>", escape(&entry.degree)));
                    html.push_str(&format!(
                        "<p class=\"muted\">{} &bull; {}</p>",
                        escape(&entry.institution),
                        escape(&entry.location)
                    ));
                    html.push_str(&format!(
                        "<p class=\"dates\">{}</p>",
                        escape(&entry.graduation_year)
                    ));
                }
            }
            Section::Projects => {
                for project in &content.projects {
                    html.push_str(&format!("<h3>{}</h3>", escape(&project.title)));
                    html.push_str(&format!("<p>{}</p>", escape(&project.description)));
                    if !project.technologies.is_empty() {
                        html.push_str(&format!(
                            "<p class=\"muted\">Technologies: {}</p>",
                            escape(&project.technologies.join(", "))
                        ));
                    }
                    if let Some(link) = present(&project.link) {
                        html.push_str(&format!(
                            "<p><a href=\"{0}\" target=\"_blank\" rel=\"noopener noreferrer\">View Project</a></p>",
                            escape(link)
                        ));
                    }
                }
            }
        }
        html.push_str("</section>");
    }

    html.push_str("</body></html>");
    html
}

fn push_experience(html: &mut String, entry: &WorkExperienceEntry) {
    html.push_str(&format!("<h3>{}</h3>", escape(&entry.title)));
    html.push_str(&format!(
        "<p class=\"muted\">{} &bull; {}</p>",
        escape(&entry.company),
        escape(&entry.location)
    ));
    html.push_str(&format!(
        "<p class=\"dates\">{} - {}</p>",
        escape(&entry.start_date),
        escape(&entry.end_date)
    ));
    html.push_str(&format!("<p>{}</p>", escape(&entry.description)));
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
