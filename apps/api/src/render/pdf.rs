//! PDF sink. Serializes draw commands into a PDF 1.7 document with `lopdf`.
//!
//! Only the standard Type1 fonts are referenced (nothing is embedded), text is
//! encoded as WinAnsi, and each page's content stream is Flate-compressed.
//! The only non-deterministic bytes are the `/Info` entries taken from
//! `DocumentInfo`, which the caller stamps.

use std::io::Write;

use chrono::{DateTime, Utc};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::render::flow::PageGeometry;
use crate::render::metrics::{Font, ASCENT_EM, PHONE_GLYPH};
use crate::render::sink::{DrawCommand, RenderingSink};
use crate::render::RenderError;

/// Resource name of the ZapfDingbats font used for symbol glyphs.
const DINGBATS_RESOURCE: &str = "F3";
/// ZapfDingbats code for the black telephone glyph.
const DINGBATS_TELEPHONE: u8 = 0x25;
/// Bézier control-point factor for quarter-circle arcs.
const KAPPA: f32 = 0.552_284_8;
const PRODUCER: &str = "Vitae";

/// Document metadata written to the PDF `/Info` dictionary.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub created_at: DateTime<Utc>,
}

pub struct PdfSink {
    page: PageGeometry,
    info: DocumentInfo,
    finished_pages: Vec<Content>,
    current: Content,
}

impl PdfSink {
    pub fn new(page: PageGeometry, info: DocumentInfo) -> Self {
        PdfSink {
            page,
            info,
            finished_pages: Vec::new(),
            current: Content { operations: vec![] },
        }
    }

    /// Serializes every page drawn so far into PDF bytes.
    pub fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        let last = std::mem::replace(&mut self.current, Content { operations: vec![] });
        self.finished_pages.push(last);

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let regular_id = standard_font(&mut doc, Font::Helvetica.base_font());
        let bold_id = standard_font(&mut doc, Font::HelveticaBold.base_font());
        let dingbats_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "ZapfDingbats",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                Font::Helvetica.resource_name() => regular_id,
                Font::HelveticaBold.resource_name() => bold_id,
                DINGBATS_RESOURCE => dingbats_id,
            },
        });

        let media_box: Vec<Object> = vec![
            0_i64.into(),
            0_i64.into(),
            self.page.width.into(),
            self.page.height.into(),
        ];

        let mut page_ids: Vec<ObjectId> = Vec::with_capacity(self.finished_pages.len());
        for content in &self.finished_pages {
            let content_id = doc.add_object(compressed_stream(content)?);
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => media_box.clone(),
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            page_ids.push(page_id);
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().copied().map(Object::Reference).collect::<Vec<_>>(),
            "Count" => page_ids.len() as i64,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(to_win_ansi(&self.info.title), StringFormat::Literal),
            "Producer" => Object::String(PRODUCER.as_bytes().to_vec(), StringFormat::Literal),
            "CreationDate" => Object::String(pdf_date(&self.info.created_at).into_bytes(), StringFormat::Literal),
        });
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Converts a top-left `y` to PDF user space (origin bottom-left).
    fn flip(&self, y: f32) -> f32 {
        self.page.height - y
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.current.operations.push(Operation::new(operator, operands));
    }

    fn draw_text(&mut self, x: f32, y: f32, font: Font, size: f32, word_spacing: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        let baseline = self.flip(y + ASCENT_EM * size);
        self.push("BT", vec![]);
        self.push("Tw", vec![word_spacing.into()]);
        self.push("Td", vec![x.into(), baseline.into()]);
        for run in split_runs(text) {
            match run {
                TextRun::Plain(s) => {
                    self.push("Tf", vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()]);
                    self.push("Tj", vec![Object::String(to_win_ansi(&s), StringFormat::Literal)]);
                }
                TextRun::Telephone => {
                    self.push("Tf", vec![Object::Name(DINGBATS_RESOURCE.as_bytes().to_vec()), size.into()]);
                    self.push("Tj", vec![Object::String(vec![DINGBATS_TELEPHONE], StringFormat::Literal)]);
                }
            }
        }
        self.push("ET", vec![]);
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32) {
        let (y1, y2) = (self.flip(from.1), self.flip(to.1));
        self.push("w", vec![width.into()]);
        self.push("m", vec![from.0.into(), y1.into()]);
        self.push("l", vec![to.0.into(), y2.into()]);
        self.push("S", vec![]);
    }

    fn draw_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, r: f32) {
        let r = r.min(w / 2.0).min(h / 2.0);
        let k = r * KAPPA;
        let bottom = self.flip(y + h);
        let top = bottom + h;
        let right = x + w;

        self.push("w", vec![1_i64.into()]);
        self.push("m", vec![(x + r).into(), bottom.into()]);
        self.push("l", vec![(right - r).into(), bottom.into()]);
        self.curve((right - r + k, bottom), (right, bottom + r - k), (right, bottom + r));
        self.push("l", vec![right.into(), (top - r).into()]);
        self.curve((right, top - r + k), (right - r + k, top), (right - r, top));
        self.push("l", vec![(x + r).into(), top.into()]);
        self.curve((x + r - k, top), (x, top - r + k), (x, top - r));
        self.push("l", vec![x.into(), (bottom + r).into()]);
        self.curve((x, bottom + r - k), (x + r - k, bottom), (x + r, bottom));
        self.push("h", vec![]);
        self.push("S", vec![]);
    }

    fn curve(&mut self, c1: (f32, f32), c2: (f32, f32), end: (f32, f32)) {
        self.push(
            "c",
            vec![
                c1.0.into(),
                c1.1.into(),
                c2.0.into(),
                c2.1.into(),
                end.0.into(),
                end.1.into(),
            ],
        );
    }
}

impl RenderingSink for PdfSink {
    fn draw(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Text {
                x,
                y,
                font,
                size,
                word_spacing,
                text,
            } => self.draw_text(x, y, font, size, word_spacing, &text),
            DrawCommand::Line { from, to, width } => self.draw_line(from, to, width),
            DrawCommand::RoundedRect {
                x,
                y,
                width,
                height,
                radius,
            } => self.draw_rounded_rect(x, y, width, height, radius),
            DrawCommand::NewPage => {
                let done = std::mem::replace(&mut self.current, Content { operations: vec![] });
                self.finished_pages.push(done);
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn standard_font(doc: &mut Document, base_font: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    })
}

fn compressed_stream(content: &Content) -> Result<Stream, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&content.encode()?)?;
    let compressed = encoder.finish()?;
    Ok(Stream::new(
        dictionary! { "Filter" => "FlateDecode" },
        compressed,
    ))
}

#[derive(Debug, PartialEq)]
enum TextRun {
    Plain(String),
    Telephone,
}

/// Splits text into runs drawn with the text font and glyphs drawn from ZapfDingbats.
fn split_runs(text: &str) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut plain = String::new();
    for c in text.chars() {
        if c == PHONE_GLYPH {
            if !plain.is_empty() {
                runs.push(TextRun::Plain(std::mem::take(&mut plain)));
            }
            runs.push(TextRun::Telephone);
        } else {
            plain.push(c);
        }
    }
    if !plain.is_empty() {
        runs.push(TextRun::Plain(plain));
    }
    runs
}

/// Encodes text as WinAnsi (CP1252). Characters outside the code page become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
            '\t' => b' ',
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            _ => b'?',
        })
        .collect()
}

fn pdf_date(at: &DateTime<Utc>) -> String {
    at.format("D:%Y%m%d%H%M%SZ").to_string()
}
