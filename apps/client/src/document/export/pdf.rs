//! Paginated (print-style) export: placed lines → PDF bytes via `lopdf`.
//!
//! Uses the built-in Times Type1 fonts, one content stream per page, and no
//! creation date, so the same section list always produces the same bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::document::export::layout::{
    a4_page_config, layout_pages, FontStyle, PageLayout, PlacedRule, PlacedText,
};
use crate::document::export::{artifact_file_name, ExportArtifact};
use crate::document::section::{DocumentKind, Section};
use crate::errors::AppError;

const PDF_MIME: &str = "application/pdf";

/// Renders the sections, in list order, into a downloadable PDF artifact.
pub fn to_paginated_document(
    sections: &[Section],
    kind: DocumentKind,
) -> Result<ExportArtifact, AppError> {
    let pages = layout_pages(sections);
    let bytes = render_pdf(&pages)?;
    Ok(ExportArtifact {
        file_name: artifact_file_name(kind, "pdf"),
        mime_type: PDF_MIME.to_string(),
        bytes: bytes.into(),
    })
}

fn font_resource(style: FontStyle) -> &'static str {
    match style {
        FontStyle::Roman => "F1",
        FontStyle::Bold => "F2",
        FontStyle::Italic => "F3",
    }
}

/// The built-in Times fonts only cover Latin-1; anything beyond is shown
/// as `?` rather than producing a broken string.
fn pdf_text(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) < 256 { c } else { '?' })
        .collect()
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

fn page_operations(page: &PageLayout) -> Vec<Operation> {
    let mut ops = Vec::new();

    for PlacedRule { x1_pt, x2_pt, y_pt } in &page.rules {
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("w", vec![real(0.7)]));
        ops.push(Operation::new("G", vec![real(0.55)]));
        ops.push(Operation::new("m", vec![real(*x1_pt), real(*y_pt)]));
        ops.push(Operation::new("l", vec![real(*x2_pt), real(*y_pt)]));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    for PlacedText {
        text,
        x_pt,
        baseline_pt,
        style,
        size_pt,
        gray,
    } in &page.texts
    {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("g", vec![real(*gray)]));
        ops.push(Operation::new(
            "Tf",
            vec![font_resource(*style).into(), real(*size_pt)],
        ));
        ops.push(Operation::new("Td", vec![real(*x_pt), real(*baseline_pt)]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(pdf_text(text))],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    ops
}

fn render_pdf(pages: &[PageLayout]) -> Result<Vec<u8>, AppError> {
    let config = a4_page_config();
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let roman_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Roman",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Bold",
    });
    let italic_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Italic",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => roman_id,
            "F2" => bold_id,
            "F3" => italic_id,
        },
    });

    let mut page_ids: Vec<Object> = Vec::new();
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content
            .encode()
            .map_err(|e| AppError::Export(format!("encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                real(config.page_width_pt),
                real(config.page_height_pt),
            ],
        });
        page_ids.push(page_id.into());
    }

    let page_count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| AppError::Export(format!("serialize pdf: {e}")))?;
    Ok(bytes)
}
