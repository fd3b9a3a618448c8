//! Approximate text metrics for the paginated document.
//!
//! Widths are in em units relative to the font size. A class-based
//! approximation (narrow / regular / wide glyph buckets, scaled per font
//! family) is deliberate: pagination needs to know where lines and pages
//! break to within a word or two, not to the glyph. Real export engines
//! re-measure with exact metrics; the page flow computed here stays valid
//! because every block carries its own text and can reflow.

use serde::Serialize;

use crate::models::resume::TemplateChoice;

/// Document font families, one per template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Professional template — transitional serif.
    Charter,
    /// Modern template — humanist sans-serif.
    Inter,
    /// Minimal template — neo-grotesque sans-serif.
    Helvetica,
}

impl FontFamily {
    /// Horizontal scale relative to the reference sans face.
    fn scale(&self) -> f32 {
        match self {
            FontFamily::Charter => 0.93,
            FontFamily::Inter => 1.0,
            FontFamily::Helvetica => 1.04,
        }
    }
}

/// Fixed page geometry for the exported document: A4, 0.75" margins, 10pt
/// body text. Heights are counted in line slots (1.4 × font size).
#[derive(Debug, Clone, Serialize)]
pub struct PageConfig {
    pub font: FontFamily,
    pub font_size_pt: u8,
    /// Usable text width in em units at the configured font size.
    pub text_width_em: f32,
    /// Line slots available on one page.
    pub usable_height_lines: u16,
}

/// A4 is 8.27" × 11.69"; with 0.75" margins and 10pt text that leaves
/// 6.77" × 72.27pt/in ÷ 10pt ≈ 48.9em of width and
/// 10.19" × 72.27pt/in ÷ 14pt ≈ 52 line slots of height.
pub fn page_config_for(template: TemplateChoice) -> PageConfig {
    let font = match template {
        TemplateChoice::Professional => FontFamily::Charter,
        TemplateChoice::Modern => FontFamily::Inter,
        TemplateChoice::Minimal => FontFamily::Helvetica,
    };
    PageConfig {
        font,
        font_size_pt: 10,
        text_width_em: 48.9,
        usable_height_lines: 52,
    }
}

/// Reference width of one character in em units, before family scaling.
fn base_char_width(c: char) -> f32 {
    match c {
        ' ' => 0.25,
        'i' | 'j' | 'l' | '\'' | '!' => 0.23,
        '.' | ',' | ':' | ';' | '|' => 0.27,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' | '/' => 0.33,
        'm' | 'w' => 0.80,
        'I' => 0.27,
        'M' | 'W' => 0.86,
        '@' => 0.98,
        '0'..='9' => 0.56,
        'A'..='Z' => 0.66,
        'a'..='z' => 0.52,
        _ if c.is_ascii_graphic() => 0.55,
        _ => 0.58,
    }
}

/// Measures the rendered width of a string in em units for one family.
pub fn measure_str(font: FontFamily, text: &str) -> f32 {
    text.chars().map(base_char_width).sum::<f32>() * font.scale()
}

/// Greedy word-wrap: breaks `text` into the lines it occupies at
/// `max_width_em`. A word wider than a whole line gets a line of its own
/// rather than being clipped. Empty input yields no lines.
pub fn wrap_text(font: FontFamily, text: &str, max_width_em: f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;
    let space_width = measure_str(font, " ");

    for word in text.split_whitespace() {
        let word_width = measure_str(font, word);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space_width + word_width > max_width_em {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_width + word_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
