//! Print layout engine for the paginated export.
//!
//! Character widths are in em units (relative to font size), taken from the
//! Times-Roman metric set; bold/italic reuse the roman widths, which is
//! within the tolerance the page margins absorb. The table covers ASCII
//! 0x20..=0x7E; other characters fall back to an average width.
//!
//! Pagination is a pure function from sections to placed lines so it can be
//! tested without decoding PDF bytes.

use serde::{Deserialize, Serialize};

use crate::document::html::section_plain_lines;
use crate::document::parser::{LineClass, LineClassifier};
use crate::document::section::{Section, SectionKind};

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Fixed A4 geometry and type scale for the print-style document. Margins
/// and sizes are constants so output always matches the on-screen preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_pt: f32,
    pub name_size_pt: f32,
    pub contact_size_pt: f32,
    pub heading_size_pt: f32,
    pub body_size_pt: f32,
    pub stack_size_pt: f32,
    /// Line height as a multiple of font size.
    pub leading: f32,
}

/// A4 paper (210 × 297 mm) with 0.5" margins.
pub fn a4_page_config() -> PageConfig {
    PageConfig {
        page_width_pt: 595.28,
        page_height_pt: 841.89,
        margin_pt: 36.0,
        name_size_pt: 17.0,
        contact_size_pt: 9.5,
        heading_size_pt: 12.0,
        body_size_pt: 10.5,
        stack_size_pt: 9.5,
        leading: 1.4,
    }
}

impl PageConfig {
    pub fn text_width_pt(&self) -> f32 {
        self.page_width_pt - 2.0 * self.margin_pt
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Serif font metrics
// ────────────────────────────────────────────────────────────────────────────

pub struct SerifMetrics {
    widths: [f32; 95],
    average_char_width: f32,
    pub space_width: f32,
}

impl SerifMetrics {
    /// Rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Rendered width in points at the given font size.
    pub fn width_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }
}

/// Times-Roman metric table (widths from the Adobe core AFM set).
static TIMES_TABLE: SerifMetrics = SerifMetrics {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    average_char_width: 0.50,
    space_width: 0.250,
};

pub fn serif_metrics() -> &'static SerifMetrics {
    &TIMES_TABLE
}

/// Greedy word-wrap: splits `text` into segments that each fit
/// `max_width_pt` at `size_pt`. A single over-long word gets its own line.
pub fn wrap_words(
    text: &str,
    metrics: &SerifMetrics,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![];
    }

    let mut segments: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in words {
        let word_w = metrics.width_pt(word, size_pt);
        let space_w = if current.is_empty() {
            0.0
        } else {
            metrics.space_width * size_pt
        };

        if !current.is_empty() && current_width + space_w + word_w > max_width_pt {
            segments.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }
    segments.push(current);
    segments
}

// ────────────────────────────────────────────────────────────────────────────
// Placed output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Roman,
    Bold,
    Italic,
}

/// One run of text at an absolute position. `baseline_pt` is measured from
/// the page bottom, PDF-style.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x_pt: f32,
    pub baseline_pt: f32,
    pub style: FontStyle,
    pub size_pt: f32,
    /// 0.0 (black) to 1.0 (white); muted lines use a mid gray.
    pub gray: f32,
}

/// A horizontal rule (section heading underline).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRule {
    pub x1_pt: f32,
    pub x2_pt: f32,
    pub y_pt: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub texts: Vec<PlacedText>,
    pub rules: Vec<PlacedRule>,
}

struct LayoutCursor {
    config: PageConfig,
    pages: Vec<PageLayout>,
    current: PageLayout,
    /// Consumed height from the page top, in points.
    y_top: f32,
}

impl LayoutCursor {
    fn new(config: PageConfig) -> Self {
        let y_top = config.margin_pt;
        LayoutCursor {
            config,
            pages: Vec::new(),
            current: PageLayout::default(),
            y_top,
        }
    }

    /// Reserves one line band of the given height and returns its baseline,
    /// breaking to a new page when the band would cross the bottom margin.
    fn take_line(&mut self, height_pt: f32) -> f32 {
        if self.y_top + height_pt > self.config.page_height_pt - self.config.margin_pt {
            self.pages.push(std::mem::take(&mut self.current));
            self.y_top = self.config.margin_pt;
        }
        let baseline = self.config.page_height_pt - (self.y_top + height_pt);
        self.y_top += height_pt;
        baseline
    }

    fn gap(&mut self, height_pt: f32) {
        self.y_top += height_pt;
    }

    fn finish(mut self) -> Vec<PageLayout> {
        if !self.current.texts.is_empty() || !self.current.rules.is_empty() || self.pages.is_empty()
        {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// Lays the sections out onto A4 pages in list order. Pure; never mutates
/// the input.
pub fn layout_pages(sections: &[Section]) -> Vec<PageLayout> {
    layout_pages_with(sections, a4_page_config())
}

pub fn layout_pages_with(sections: &[Section], config: PageConfig) -> Vec<PageLayout> {
    let metrics = serif_metrics();
    let classifier = LineClassifier::new();
    let mut cursor = LayoutCursor::new(config.clone());

    for section in sections {
        let lines = section_plain_lines(&section.content);

        if section.kind == SectionKind::Header {
            layout_header(&mut cursor, &config, metrics, &lines);
            cursor.gap(10.0);
            continue;
        }

        if !section.title.is_empty() {
            let size = config.heading_size_pt;
            let baseline = cursor.take_line(size * config.leading);
            cursor.current.texts.push(PlacedText {
                text: section.title.to_uppercase(),
                x_pt: config.margin_pt,
                baseline_pt: baseline,
                style: FontStyle::Bold,
                size_pt: size,
                gray: 0.0,
            });
            cursor.current.rules.push(PlacedRule {
                x1_pt: config.margin_pt,
                x2_pt: config.page_width_pt - config.margin_pt,
                y_pt: baseline - 3.0,
            });
            cursor.gap(4.0);
        }

        for line in &lines {
            layout_content_line(&mut cursor, &config, metrics, &classifier, line);
        }
        cursor.gap(8.0);
    }

    cursor.finish()
}

fn layout_header(
    cursor: &mut LayoutCursor,
    config: &PageConfig,
    metrics: &SerifMetrics,
    lines: &[String],
) {
    for (index, line) in lines.iter().enumerate() {
        let (size, style) = if index == 0 {
            (config.name_size_pt, FontStyle::Bold)
        } else {
            (config.contact_size_pt, FontStyle::Roman)
        };
        let width = metrics.width_pt(line, size);
        let x = ((config.page_width_pt - width) / 2.0).max(config.margin_pt);
        let baseline = cursor.take_line(size * config.leading);
        cursor.current.texts.push(PlacedText {
            text: line.clone(),
            x_pt: x,
            baseline_pt: baseline,
            style,
            size_pt: size,
            gray: if index == 0 { 0.0 } else { 0.25 },
        });
    }
}

fn layout_content_line(
    cursor: &mut LayoutCursor,
    config: &PageConfig,
    metrics: &SerifMetrics,
    classifier: &LineClassifier,
    line: &str,
) {
    let max_width = config.text_width_pt();
    match classifier.classify(line) {
        LineClass::Bullet(text) => {
            let full = format!("• {text}");
            for segment in wrap_words(&full, metrics, config.body_size_pt, max_width) {
                push_plain(cursor, config, segment, FontStyle::Roman, config.body_size_pt, 0.0);
            }
        }
        LineClass::TitleDate { left, right } => {
            let size = config.body_size_pt;
            let right_width = metrics.width_pt(&right, size);
            let segments = wrap_words(&left, metrics, size, max_width - right_width - 12.0);
            for (index, segment) in segments.iter().enumerate() {
                let baseline = cursor.take_line(size * config.leading);
                cursor.current.texts.push(PlacedText {
                    text: segment.clone(),
                    x_pt: config.margin_pt,
                    baseline_pt: baseline,
                    style: FontStyle::Bold,
                    size_pt: size,
                    gray: 0.0,
                });
                if index == 0 {
                    cursor.current.texts.push(PlacedText {
                        text: right.clone(),
                        x_pt: config.page_width_pt - config.margin_pt - right_width,
                        baseline_pt: baseline,
                        style: FontStyle::Bold,
                        size_pt: size,
                        gray: 0.0,
                    });
                }
            }
        }
        LineClass::Stack(text) => {
            for segment in wrap_words(&text, metrics, config.stack_size_pt, max_width) {
                push_plain(
                    cursor,
                    config,
                    segment,
                    FontStyle::Italic,
                    config.stack_size_pt,
                    0.45,
                );
            }
        }
        LineClass::Category { name, rest } => {
            let size = config.body_size_pt;
            let label = format!("{name}:");
            let label_width = metrics.width_pt(&label, size) + metrics.space_width * size;
            let combined = format!("{label} {rest}");
            if metrics.width_pt(&combined, size) <= max_width {
                let baseline = cursor.take_line(size * config.leading);
                cursor.current.texts.push(PlacedText {
                    text: label,
                    x_pt: config.margin_pt,
                    baseline_pt: baseline,
                    style: FontStyle::Bold,
                    size_pt: size,
                    gray: 0.0,
                });
                cursor.current.texts.push(PlacedText {
                    text: rest,
                    x_pt: config.margin_pt + label_width,
                    baseline_pt: baseline,
                    style: FontStyle::Roman,
                    size_pt: size,
                    gray: 0.0,
                });
            } else {
                for segment in wrap_words(&combined, metrics, size, max_width) {
                    push_plain(cursor, config, segment, FontStyle::Roman, size, 0.0);
                }
            }
        }
        LineClass::Plain(text) => {
            for segment in wrap_words(&text, metrics, config.body_size_pt, max_width) {
                push_plain(cursor, config, segment, FontStyle::Roman, config.body_size_pt, 0.0);
            }
        }
    }
}

fn push_plain(
    cursor: &mut LayoutCursor,
    config: &PageConfig,
    text: String,
    style: FontStyle,
    size_pt: f32,
    gray: f32,
) {
    let baseline = cursor.take_line(size_pt * config.leading);
    cursor.current.texts.push(PlacedText {
        text,
        x_pt: config.margin_pt,
        baseline_pt: baseline,
        style,
        size_pt,
        gray,
    });
}
