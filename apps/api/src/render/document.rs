//! Paginated document renderer — the export view.
//!
//! Maps one validated content structure onto fixed A4 pages: blocks are
//! measured with the font metrics, flowed top to bottom, and carried onto
//! the next page when they no longer fit. A block taller than a whole page
//! is split line by line. Content is never clipped or dropped, and a
//! section heading is never stranded at the bottom of a page.
//!
//! Section visibility and ordering come from [`crate::render::policy`] —
//! the same function the preview consumes.
#![allow(dead_code)]

use serde::Serialize;

use crate::render::font_metrics::{wrap_text, PageConfig};
use crate::render::policy::{visible_sections, Section};
use crate::schema::content::present;
use crate::schema::ResumeContent;

/// Vertical space reserved for the circular portrait in the header.
const PORTRAIT_LINES: u16 = 8;
/// Body lines a section heading must keep with it on the same page.
const HEADING_KEEP_LINES: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Header,
    SectionHeading,
    SummaryParagraph,
    ExperienceItem,
    SkillList,
    EducationItem,
    ProjectItem,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBlock {
    pub kind: BlockKind,
    pub lines: Vec<String>,
    /// Line slots the block occupies: text lines plus portrait allowance
    /// and trailing spacing.
    pub height_lines: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl LayoutBlock {
    fn new(kind: BlockKind, lines: Vec<String>) -> Self {
        let height_lines = lines.len() as u16 + 1;
        Self {
            kind,
            lines,
            height_lines,
            image: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPage {
    /// 1-based page number.
    pub number: u16,
    pub blocks: Vec<LayoutBlock>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedDocument {
    pub config: PageConfig,
    pub pages: Vec<DocumentPage>,
}

impl PaginatedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

pub struct DocumentRenderer {
    config: PageConfig,
}

impl DocumentRenderer {
    pub fn new(config: PageConfig) -> Self {
        Self { config }
    }

    /// Deterministic, pure function of the content.
    pub fn render(&self, content: &ResumeContent) -> PaginatedDocument {
        let blocks = self.build_blocks(content);
        let pages = flow(blocks, self.config.usable_height_lines);
        PaginatedDocument {
            config: self.config.clone(),
            pages,
        }
    }

    fn wrap(&self, text: &str) -> Vec<String> {
        wrap_text(self.config.font, text, self.config.text_width_em)
    }

    fn build_blocks(&self, content: &ResumeContent) -> Vec<LayoutBlock> {
        let details = &content.personal_details;
        let mut blocks = Vec::new();

        let mut header_lines = vec![
            details.full_name.clone(),
            details.email.clone(),
            details.phone.clone(),
            details.location.clone(),
        ];
        if let Some(linkedin) = present(&details.linkedin) {
            header_lines.push(linkedin.to_string());
        }
        let mut header = LayoutBlock::new(BlockKind::Header, header_lines);
        if let Some(picture) = present(&details.profile_picture) {
            header.image = Some(picture.to_string());
            header.height_lines += PORTRAIT_LINES;
        }
        blocks.push(header);

        for section in visible_sections(content) {
            blocks.push(LayoutBlock::new(
                BlockKind::SectionHeading,
                vec![section.title().to_string()],
            ));
            match section {
                Section::Summary => {
                    blocks.push(LayoutBlock::new(
                        BlockKind::SummaryParagraph,
                        self.wrap(&details.summary),
                    ));
                }
                Section::Experience => {
                    for entry in &content.work_experience {
                        let mut lines = vec![
                            entry.title.clone(),
                            format!("{} • {}", entry.company, entry.location),
                            format!("{} - {}", entry.start_date, entry.end_date),
                        ];
                        lines.extend(self.wrap(&entry.description));
                        blocks.push(LayoutBlock::new(BlockKind::ExperienceItem, lines));
                    }
                }
                Section::Skills => {
                    let mut lines = Vec::with_capacity(content.skills.len());
                    for skill in &content.skills {
                        let wrapped = self.wrap(skill);
                        if wrapped.is_empty() {
                            lines.push(skill.clone());
                        } else {
                            lines.extend(wrapped);
                        }
                    }
                    blocks.push(LayoutBlock::new(BlockKind::SkillList, lines));
                }
                Section::Education => {
                    for entry in &content.education {
                        blocks.push(LayoutBlock::new(
                            BlockKind::EducationItem,
                            vec![
                                entry.degree.clone(),
                                format!("{} • {}", entry.institution, entry.location),
                                entry.graduation_year.clone(),
                            ],
                        ));
                    }
                }
                Section::Projects => {
                    for project in &content.projects {
                        let mut lines = vec![project.title.clone()];
                        lines.extend(self.wrap(&project.description));
                        if !project.technologies.is_empty() {
                            let joined =
                                format!("Technologies: {}", project.technologies.join(", "));
                            lines.extend(self.wrap(&joined));
                        }
                        if let Some(link) = present(&project.link) {
                            lines.push(format!("Link: {link}"));
                        }
                        blocks.push(LayoutBlock::new(BlockKind::ProjectItem, lines));
                    }
                }
            }
        }

        blocks
    }
}

/// Flows blocks onto pages of `capacity` line slots.
///
/// Page breaks carry a trailing section heading over to the next page so a
/// heading always sits above at least part of its body. Blocks taller than
/// a whole page are split line by line across as many pages as they need.
fn flow(blocks: Vec<LayoutBlock>, capacity: u16) -> Vec<DocumentPage> {
    let mut pages: Vec<DocumentPage> = Vec::new();
    let mut current: Vec<LayoutBlock> = Vec::new();
    let mut used: u16 = 0;

    let close_page = |pages: &mut Vec<DocumentPage>, current: &mut Vec<LayoutBlock>| {
        if !current.is_empty() {
            pages.push(DocumentPage {
                number: pages.len() as u16 + 1,
                blocks: std::mem::take(current),
            });
        }
    };

    let mut iter = blocks.into_iter().peekable();
    while let Some(block) = iter.next() {
        // A heading must bring the start of its body along.
        let keep_with_next = if block.kind == BlockKind::SectionHeading {
            iter.peek()
                .map(|next| next.height_lines.min(HEADING_KEEP_LINES))
                .unwrap_or(0)
        } else {
            0
        };

        if block.height_lines + keep_with_next <= capacity - used {
            used += block.height_lines;
            current.push(block);
            continue;
        }

        // Page break. A heading left at the bottom of the page moves along
        // with the block that forced the break.
        let carried = if current.last().map(|b| b.kind) == Some(BlockKind::SectionHeading) {
            current.pop()
        } else {
            None
        };
        close_page(&mut pages, &mut current);
        used = 0;
        if let Some(heading) = carried {
            used = heading.height_lines;
            current.push(heading);
        }

        if block.height_lines <= capacity - used {
            used += block.height_lines;
            current.push(block);
            continue;
        }

        // Taller than the remaining page: split line by line.
        let mut remaining = block.lines;
        while !remaining.is_empty() {
            let available = (capacity - used) as usize;
            if remaining.len() + 1 <= available {
                let tail = LayoutBlock::new(block.kind, remaining);
                used += tail.height_lines;
                current.push(tail);
                break;
            }
            let take = available.min(remaining.len());
            let chunk: Vec<String> = remaining.drain(..take).collect();
            current.push(LayoutBlock {
                kind: block.kind,
                lines: chunk,
                height_lines: take as u16,
                image: None,
            });
            close_page(&mut pages, &mut current);
            used = 0;
        }
    }
    close_page(&mut pages, &mut current);

    pages
}
