//! Converts raw AI-generated text into an ordered sequence of typed sections.
//!
//! AI resume text is unstructured prose with faint structural signals:
//! all-caps headings, whitespace-aligned date columns, comma lists. A
//! line-oriented scan recovers sections from the heading vocabulary, and a
//! five-rule classifier cascade formats each content line. The cascade is
//! order-sensitive: a line can match several rules and the first match
//! wins, so the priority below is part of the contract.
//!
//! 1. bullet lines (`•`, `-`, `*`)
//! 2. title + date-range rows (two+ spaces before a date-shaped right run)
//! 3. tech-stack lines (short comma lists without sentence punctuation)
//! 4. `Category: values` lines
//! 5. plain text

use regex::Regex;

use crate::document::html::escape;
use crate::document::section::{heading_kind, is_heading, DocumentKind, Section, SectionKind};

/// Physical lines at the top of a CV that may hold name/contact details
/// before the first heading.
const HEADER_LINE_WINDOW: usize = 8;

/// Tech-stack heuristics: a short comma list reads as a technology line,
/// not prose.
const STACK_MIN_LEN: usize = 5;
const STACK_MAX_LEN: usize = 120;
const STACK_MIN_TOKENS: usize = 3;

/// Classification of one content line, in cascade priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Leading bullet glyph stripped.
    Bullet(String),
    /// Left text run and date-shaped right run of an aligned row.
    TitleDate { left: String, right: String },
    Stack(String),
    Category { name: String, rest: String },
    Plain(String),
}

/// Compiled line patterns. Build once per parse or export pass.
pub struct LineClassifier {
    aligned_row: Regex,
    date_range: Regex,
    category: Regex,
}

impl LineClassifier {
    pub fn new() -> Self {
        LineClassifier {
            // Greedy left run, so the split lands on the LAST 2+-space gap.
            aligned_row: Regex::new(r"^(?P<left>.*\S)\s{2,}(?P<right>\S.*)$")
                .expect("aligned-row pattern is valid"),
            date_range: Regex::new(
                r"(?i)^(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{4}|\d{4})(?:\s*[-–—]\s*(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{4}|\d{4}|present|current))?$",
            )
            .expect("date-range pattern is valid"),
            category: Regex::new(r"^(?P<name>[^:]+):\s+(?P<rest>.+)$")
                .expect("category pattern is valid"),
        }
    }

    /// First matching rule wins; swapping the order changes rendering for
    /// ambiguous lines.
    pub fn classify(&self, line: &str) -> LineClass {
        let trimmed = line.trim();

        if let Some(stripped) = strip_bullet_glyph(trimmed) {
            return LineClass::Bullet(stripped.to_string());
        }

        if let Some(caps) = self.aligned_row.captures(trimmed) {
            let right = &caps["right"];
            if self.date_range.is_match(right) {
                return LineClass::TitleDate {
                    left: caps["left"].to_string(),
                    right: right.to_string(),
                };
            }
        }

        if is_stack_line(trimmed) {
            return LineClass::Stack(trimmed.to_string());
        }

        if let Some(caps) = self.category.captures(trimmed) {
            return LineClass::Category {
                name: caps["name"].to_string(),
                rest: caps["rest"].to_string(),
            };
        }

        LineClass::Plain(trimmed.to_string())
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_bullet_glyph(line: &str) -> Option<&str> {
    for glyph in ['•', '-', '*'] {
        if let Some(rest) = line.strip_prefix(glyph) {
            return Some(rest.trim_start());
        }
    }
    None
}

fn is_stack_line(line: &str) -> bool {
    if line.len() < STACK_MIN_LEN || line.len() >= STACK_MAX_LEN {
        return false;
    }
    if line.ends_with('.') || line.ends_with('!') || line.ends_with('?') {
        return false;
    }
    let tokens = line.split(',').filter(|t| !t.trim().is_empty()).count();
    tokens >= STACK_MIN_TOKENS
}

/// Renders one classified line as an HTML fragment. Text is escaped first,
/// markup wrapped around the escaped form, never the reverse.
pub fn format_content_line(class: &LineClass) -> String {
    match class {
        LineClass::Bullet(text) => format!("<li>{}</li>", escape(text)),
        LineClass::TitleDate { left, right } => format!(
            r#"<p class="entry-row"><strong>{}</strong>    <span class="dates">{}</span></p>"#,
            escape(left),
            escape(right)
        ),
        LineClass::Stack(text) => format!(r#"<p class="stack"><em>{}</em></p>"#, escape(text)),
        LineClass::Category { name, rest } => format!(
            "<p><strong>{}:</strong> {}</p>",
            escape(name),
            escape(rest)
        ),
        LineClass::Plain(text) => format!("{}<br/>", escape(text)),
    }
}

/// Parses a raw AI text blob into ordered sections.
pub fn parse_document(raw: &str, kind: DocumentKind) -> Vec<Section> {
    match kind {
        DocumentKind::CoverLetter => parse_cover_letter(raw),
        DocumentKind::Cv => parse_cv(raw),
    }
}

fn parse_cover_letter(raw: &str) -> Vec<Section> {
    let content: String = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("<p>{}</p>", escape(line.trim())))
        .collect();
    vec![Section::new(SectionKind::Generic, "Cover Letter", content)]
}

fn parse_cv(raw: &str) -> Vec<Section> {
    let classifier = LineClassifier::new();
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;
    let mut header_lines: Vec<String> = Vec::new();

    for (index, line) in raw.lines().enumerate() {
        let trimmed = line.trim();

        if is_heading(trimmed) {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            current = Some(Section::new(
                heading_kind(trimmed),
                trimmed.to_uppercase(),
                String::new(),
            ));
        } else if let Some(section) = current.as_mut() {
            if trimmed.is_empty() {
                // Paragraph break, not dropped.
                section.content.push_str("<br/>");
            } else {
                section
                    .content
                    .push_str(&format_content_line(&classifier.classify(line)));
            }
        } else if !trimmed.is_empty() && index < HEADER_LINE_WINDOW {
            header_lines.push(trimmed.to_string());
        }
    }
    if let Some(section) = current.take() {
        sections.push(section);
    }

    // No recognizable headings at all: one generic section with the whole
    // text, newlines converted to line breaks.
    if sections.is_empty() {
        let content: String = raw
            .lines()
            .map(|line| format!("{}<br/>", escape(line.trim_end())))
            .collect();
        return vec![Section::new(
            SectionKind::Generic,
            "Curriculum Vitae",
            content,
        )];
    }

    if !header_lines.is_empty() {
        let content: String = header_lines
            .iter()
            .map(|line| format!("<p>{}</p>", escape(line)))
            .collect();
        sections.insert(0, Section::new(SectionKind::Header, "", content));
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::html::section_plain_lines;

    fn classify(line: &str) -> LineClass {
        LineClassifier::new().classify(line)
    }

    // ── classifier cascade ──────────────────────────────────────────────────

    #[test]
    fn test_bullet_glyphs_are_stripped() {
        assert_eq!(classify("• Did X"), LineClass::Bullet("Did X".into()));
        assert_eq!(classify("- Did Y"), LineClass::Bullet("Did Y".into()));
        assert_eq!(classify("* Did Z"), LineClass::Bullet("Did Z".into()));
    }

    #[test]
    fn test_title_date_row_with_month_range() {
        let class = classify("Engineer: Acme    Jan 2020 - Dec 2021");
        assert_eq!(
            class,
            LineClass::TitleDate {
                left: "Engineer: Acme".into(),
                right: "Jan 2020 - Dec 2021".into(),
            }
        );
    }

    #[test]
    fn test_title_date_row_with_bare_years_and_present() {
        assert!(matches!(
            classify("Acme Corp  2020 - 2023"),
            LineClass::TitleDate { .. }
        ));
        assert!(matches!(
            classify("Senior Engineer — Initech   Jul 2025 - Present"),
            LineClass::TitleDate { .. }
        ));
        assert!(matches!(
            classify("Hackathon Winner    2024"),
            LineClass::TitleDate { .. }
        ));
    }

    #[test]
    fn test_aligned_row_without_date_is_not_title_date() {
        assert!(!matches!(
            classify("Left column    right column"),
            LineClass::TitleDate { .. }
        ));
    }

    #[test]
    fn test_stack_line_detection() {
        assert_eq!(
            classify("Python, Rust, PostgreSQL, Docker"),
            LineClass::Stack("Python, Rust, PostgreSQL, Docker".into())
        );
    }

    #[test]
    fn test_sentence_with_commas_is_not_stack() {
        // Terminal punctuation marks prose, however comma-heavy.
        assert!(matches!(
            classify("Built APIs, dashboards, and pipelines for clients."),
            LineClass::Plain(_)
        ));
    }

    #[test]
    fn test_overlong_comma_list_is_not_stack() {
        let long = format!("{}, tail, end", "x".repeat(120));
        assert!(!matches!(classify(&long), LineClass::Stack(_)));
    }

    #[test]
    fn test_category_line_detection() {
        assert_eq!(
            classify("Programming Languages: Python, Java"),
            LineClass::Category {
                name: "Programming Languages".into(),
                rest: "Python, Java".into(),
            }
        );
    }

    #[test]
    fn test_cascade_priority_title_date_beats_stack() {
        // Comma list on the left AND an aligned date on the right: rule 2
        // outranks rule 3.
        let class = classify("Python, Rust, Docker    Jan 2020 - Dec 2021");
        assert!(matches!(class, LineClass::TitleDate { .. }));
    }

    #[test]
    fn test_cascade_priority_bullet_beats_category() {
        assert_eq!(
            classify("- Skills: many"),
            LineClass::Bullet("Skills: many".into())
        );
    }

    #[test]
    fn test_plain_line_fallback() {
        assert_eq!(
            classify("Built things for the web"),
            LineClass::Plain("Built things for the web".into())
        );
    }

    // ── formatting ──────────────────────────────────────────────────────────

    #[test]
    fn test_formatting_escapes_before_wrapping() {
        let html = format_content_line(&LineClass::Bullet("used <Rust> & C".into()));
        assert_eq!(html, "<li>used &lt;Rust&gt; &amp; C</li>");
    }

    // ── CV parsing ──────────────────────────────────────────────────────────

    const SAMPLE_CV: &str = "SUMMARY\nBuilt things.\n\nEXPERIENCE\nEngineer: Acme    Jan 2020 - Dec 2021\n• Did X";

    #[test]
    fn test_parse_cv_sections_and_kinds() {
        let sections = parse_document(SAMPLE_CV, DocumentKind::Cv);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].kind, SectionKind::Summary);
        assert_eq!(sections[0].title, "SUMMARY");
        assert!(sections[0].content.contains("Built things."));
        assert_eq!(sections[1].kind, SectionKind::Experience);
        assert!(sections[1].content.contains(r#"class="entry-row""#));
        assert!(sections[1].content.contains("<li>Did X</li>"));
    }

    #[test]
    fn test_blank_line_becomes_paragraph_break() {
        let sections = parse_document(SAMPLE_CV, DocumentKind::Cv);
        assert!(sections[0].content.contains("<br/>"));
    }

    #[test]
    fn test_header_lines_collected_before_first_heading() {
        let raw = "Jane Doe\njane@example.com | +27 82 000 0000\n\nSUMMARY\nBuilds systems.";
        let sections = parse_document(raw, DocumentKind::Cv);
        assert_eq!(sections[0].kind, SectionKind::Header);
        assert_eq!(sections[0].title, "");
        assert!(sections[0].content.contains("Jane Doe"));
        assert!(sections[0].content.contains("jane@example.com"));
        assert_eq!(sections[1].kind, SectionKind::Summary);
    }

    #[test]
    fn test_header_window_is_first_eight_lines() {
        let mut lines = vec![""; 8]; // blank padding pushes the name to line 9
        lines.push("Jane Doe");
        lines.push("SUMMARY");
        lines.push("Builds systems.");
        let raw = lines.join("\n");
        let sections = parse_document(&raw, DocumentKind::Cv);
        assert_eq!(
            sections[0].kind,
            SectionKind::Summary,
            "line 9 must not be collected as a header line"
        );
    }

    #[test]
    fn test_unstructured_input_falls_back_to_single_generic() {
        let raw = "Just a paragraph of prose about a career with no headings at all.";
        let sections = parse_document(raw, DocumentKind::Cv);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, SectionKind::Generic);
        assert_eq!(sections[0].title, "Curriculum Vitae");
        assert!(sections[0].content.contains("no headings"));
    }

    #[test]
    fn test_uppercase_title_from_mixed_case_heading() {
        let sections = parse_document("Professional Experience\nDid things.", DocumentKind::Cv);
        assert_eq!(sections[0].title, "PROFESSIONAL EXPERIENCE");
    }

    // ── cover letter ────────────────────────────────────────────────────────

    #[test]
    fn test_cover_letter_is_single_generic_section() {
        let raw = "Dear Hiring Manager,\n\nI am excited to apply.\n\nRegards,\nJane";
        let sections = parse_document(raw, DocumentKind::CoverLetter);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, SectionKind::Generic);
        assert_eq!(sections[0].title, "Cover Letter");
        assert_eq!(
            sections[0].content.matches("<p>").count(),
            4,
            "each non-blank line becomes its own paragraph"
        );
    }

    #[test]
    fn test_cover_letter_escapes_content() {
        let sections = parse_document("a <b> & c", DocumentKind::CoverLetter);
        assert!(sections[0].content.contains("a &lt;b&gt; &amp; c"));
    }

    #[test]
    fn test_cover_letter_round_trips_to_plain_lines() {
        let raw = "Dear Hiring Manager,\n\nI am excited to apply.\n\nRegards,\nJane";
        let sections = parse_document(raw, DocumentKind::CoverLetter);
        let lines = section_plain_lines(&sections[0].content);
        let expected: Vec<&str> = raw.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines, expected);
    }
}
