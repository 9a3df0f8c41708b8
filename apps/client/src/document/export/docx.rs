//! Word-processor export: sections → DOCX bytes via `docx-rs`.
//!
//! The paragraph sequence is built as plain specs first so the structure is
//! testable without unzipping OOXML: the header section becomes a bold name
//! paragraph plus smaller contact paragraphs; every other section becomes a
//! bold/upper-case/underlined heading paragraph followed by one paragraph
//! per content line, with bullet lines emitted as list items (glyph
//! stripped).

use docx_rs::{
    AbstractNumbering, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat, Numbering,
    NumberingId, Paragraph, Run, RunFonts, Start,
};

use crate::document::export::{artifact_file_name, ExportArtifact};
use crate::document::html::section_plain_lines;
use crate::document::section::{DocumentKind, Section, SectionKind};
use crate::errors::AppError;

const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const SERIF_FONT: &str = "Times New Roman";

// Half-point sizes, Word-style.
const NAME_SIZE: usize = 32;
const CONTACT_SIZE: usize = 20;
const HEADING_SIZE: usize = 24;
const BODY_SIZE: usize = 22;

const BULLET_NUMBERING: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphRole {
    Name,
    Contact,
    Heading,
    ListItem,
    Body,
}

/// One planned output paragraph. Pure data; assembly happens afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphSpec {
    pub role: ParagraphRole,
    pub text: String,
}

fn strip_leading_glyph(line: &str) -> Option<&str> {
    for glyph in ['•', '-', '*'] {
        if let Some(rest) = line.strip_prefix(glyph) {
            return Some(rest.trim_start());
        }
    }
    None
}

/// Plans the paragraphs for one section.
pub fn section_paragraphs(section: &Section) -> Vec<ParagraphSpec> {
    let lines = section_plain_lines(&section.content);
    let mut specs = Vec::new();

    if section.kind == SectionKind::Header {
        for (index, line) in lines.iter().enumerate() {
            specs.push(ParagraphSpec {
                role: if index == 0 {
                    ParagraphRole::Name
                } else {
                    ParagraphRole::Contact
                },
                text: line.clone(),
            });
        }
        return specs;
    }

    specs.push(ParagraphSpec {
        role: ParagraphRole::Heading,
        text: section.title.to_uppercase(),
    });
    for line in &lines {
        match strip_leading_glyph(line) {
            Some(rest) => specs.push(ParagraphSpec {
                role: ParagraphRole::ListItem,
                text: rest.to_string(),
            }),
            None => specs.push(ParagraphSpec {
                role: ParagraphRole::Body,
                text: line.clone(),
            }),
        }
    }
    specs
}

/// Plans the whole document in section list order.
pub fn document_paragraphs(sections: &[Section]) -> Vec<ParagraphSpec> {
    sections.iter().flat_map(section_paragraphs).collect()
}

fn serif_run(text: &str, size: usize) -> Run {
    Run::new()
        .add_text(text)
        .size(size)
        .fonts(RunFonts::new().ascii(SERIF_FONT))
}

fn build_paragraph(spec: &ParagraphSpec) -> Paragraph {
    match spec.role {
        ParagraphRole::Name => {
            Paragraph::new().add_run(serif_run(&spec.text, NAME_SIZE).bold())
        }
        ParagraphRole::Contact => Paragraph::new().add_run(serif_run(&spec.text, CONTACT_SIZE)),
        ParagraphRole::Heading => Paragraph::new()
            .add_run(serif_run(&spec.text, HEADING_SIZE).bold().underline("single")),
        ParagraphRole::ListItem => Paragraph::new()
            .add_run(serif_run(&spec.text, BODY_SIZE))
            .numbering(
                NumberingId::new(BULLET_NUMBERING),
                IndentLevel::new(0),
            ),
        ParagraphRole::Body => Paragraph::new().add_run(serif_run(&spec.text, BODY_SIZE)),
    }
}

/// Renders the sections, in list order, into a downloadable DOCX artifact.
pub fn to_word_document(
    sections: &[Section],
    kind: DocumentKind,
) -> Result<ExportArtifact, AppError> {
    let mut docx = Docx::new()
        .add_abstract_numbering(AbstractNumbering::new(BULLET_NUMBERING).add_level(Level::new(
            0,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new("•"),
            LevelJc::new("left"),
        )))
        .add_numbering(Numbering::new(BULLET_NUMBERING, BULLET_NUMBERING));

    for spec in document_paragraphs(sections) {
        docx = docx.add_paragraph(build_paragraph(&spec));
    }

    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| AppError::Export(format!("pack docx: {e}")))?;

    Ok(ExportArtifact {
        file_name: artifact_file_name(kind, "docx"),
        mime_type: DOCX_MIME.to_string(),
        bytes: cursor.into_inner().into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_document;

    fn make_sections() -> Vec<Section> {
        parse_document(
            "Jane Doe\njane@example.com\n\nSUMMARY\nBuilds reliable systems.\n\nEXPERIENCE\nEngineer: Acme    Jan 2020 - Dec 2021\n• Did X\n• Did Y",
            DocumentKind::Cv,
        )
    }

    #[test]
    fn test_one_heading_per_non_header_section() {
        let sections = make_sections();
        let specs = document_paragraphs(&sections);
        let headings: Vec<_> = specs
            .iter()
            .filter(|s| s.role == ParagraphRole::Heading)
            .collect();
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].text, "SUMMARY");
        assert_eq!(headings[1].text, "EXPERIENCE");
    }

    #[test]
    fn test_header_section_becomes_name_then_contacts() {
        let sections = make_sections();
        let specs = document_paragraphs(&sections);
        assert_eq!(specs[0].role, ParagraphRole::Name);
        assert_eq!(specs[0].text, "Jane Doe");
        assert_eq!(specs[1].role, ParagraphRole::Contact);
        assert_eq!(specs[1].text, "jane@example.com");
    }

    #[test]
    fn test_bullet_lines_become_list_items_without_glyph() {
        let sections = make_sections();
        let specs = document_paragraphs(&sections);
        let items: Vec<_> = specs
            .iter()
            .filter(|s| s.role == ParagraphRole::ListItem)
            .collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "Did X");
        assert!(!items[0].text.contains('•'));
    }

    #[test]
    fn test_every_non_empty_content_line_gets_a_paragraph() {
        let sections = make_sections();
        let specs = document_paragraphs(&sections);
        // name + contact + 2 headings + summary line + date row + 2 bullets
        assert_eq!(specs.len(), 8);
    }

    #[test]
    fn test_paragraph_plan_is_deterministic() {
        let sections = make_sections();
        assert_eq!(document_paragraphs(&sections), document_paragraphs(&sections));
    }

    #[test]
    fn test_export_produces_docx_artifact() {
        let artifact = to_word_document(&make_sections(), DocumentKind::Cv).unwrap();
        // OOXML containers start with the zip local-file-header magic.
        assert!(artifact.bytes.starts_with(b"PK"));
        assert_eq!(artifact.mime_type, DOCX_MIME);
        assert!(artifact.file_name.starts_with("cv-"));
        assert!(artifact.file_name.ends_with(".docx"));
    }

    #[test]
    fn test_export_does_not_mutate_sections() {
        let sections = make_sections();
        let before = sections.clone();
        let _ = to_word_document(&sections, DocumentKind::Cv).unwrap();
        assert_eq!(sections, before);
    }
}
