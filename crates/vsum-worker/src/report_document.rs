//! PDF summary report.
//!
//! A report is a sequence of blocks, one per summarized segment: the
//! segment's thumbnail at full text width, then the summary text wrapped
//! to that width, then a fixed gap. Pages are A4 portrait and a new page is
//! started whenever the next image or line does not fit.

use image::{ColorType, GenericImageView, ImageFormat};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{WorkerError, WorkerResult};

/// Points per millimetre.
const MM: f32 = 72.0 / 25.4;

const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 10.0 * MM;
/// Text and image width (190 mm).
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
/// Inner padding on each side of a text line.
const CELL_PADDING: f32 = 1.0 * MM;
const LINE_HEIGHT: f32 = 10.0 * MM;
const BLOCK_GAP: f32 = 10.0 * MM;
const FONT_SIZE: f32 = 12.0;
const FONT_NAME: &str = "F1";

/// Helvetica advance widths for ' '..='~', in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];
const DEFAULT_WIDTH: u16 = 556;

#[derive(Debug, Default)]
struct Page {
    operations: Vec<Operation>,
    images: Vec<(String, ObjectId)>,
}

/// An in-progress report. Build one per invocation.
#[derive(Debug)]
pub struct ReportDocument {
    doc: Document,
    pages_id: ObjectId,
    font_id: ObjectId,
    pages: Vec<Page>,
    /// Distance from the page bottom to the top of the next element.
    cursor_y: f32,
    block_count: usize,
    image_count: usize,
}

impl Default for ReportDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportDocument {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });

        Self {
            doc,
            pages_id,
            font_id,
            pages: Vec::new(),
            cursor_y: 0.0,
            block_count: 0,
            image_count: 0,
        }
    }

    /// Number of blocks appended so far.
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append one thumbnail/summary block.
    ///
    /// The image is decoded before anything is laid out, so an undecodable
    /// thumbnail leaves the document untouched.
    pub fn add_block(&mut self, thumbnail: &[u8], summary: &str) -> WorkerResult<()> {
        let image = EmbeddedImage::decode(thumbnail)?;

        if self.pages.is_empty() {
            self.add_page();
        }

        let usable_height = PAGE_HEIGHT - 2.0 * MARGIN;
        let mut width = CONTENT_WIDTH;
        let mut height = width * image.height as f32 / image.width as f32;
        if height > usable_height {
            width *= usable_height / height;
            height = usable_height;
        }
        if self.cursor_y - height < MARGIN {
            self.add_page();
        }

        let image_id = self.doc.add_object(image.into_stream());
        self.image_count += 1;
        let name = format!("Im{}", self.image_count);
        let bottom = self.cursor_y - height;

        let page = self.current_page();
        page.images.push((name.clone(), image_id));
        page.operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width.into(),
                    0.0f32.into(),
                    0.0f32.into(),
                    height.into(),
                    MARGIN.into(),
                    bottom.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(name.into_bytes())]),
            Operation::new("Q", vec![]),
        ]);
        self.cursor_y = bottom;

        for line in wrap_text(summary, CONTENT_WIDTH - 2.0 * CELL_PADDING) {
            if self.cursor_y - LINE_HEIGHT < MARGIN {
                self.add_page();
            }
            let baseline = self.cursor_y - LINE_HEIGHT / 2.0 - FONT_SIZE * 0.3;
            if !line.is_empty() {
                self.current_page().operations.extend([
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec![FONT_NAME.into(), FONT_SIZE.into()]),
                    Operation::new(
                        "Td",
                        vec![(MARGIN + CELL_PADDING).into(), baseline.into()],
                    ),
                    Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(&line))]),
                    Operation::new("ET", vec![]),
                ]);
            }
            self.cursor_y -= LINE_HEIGHT;
        }

        self.cursor_y -= BLOCK_GAP;
        self.block_count += 1;
        Ok(())
    }

    /// Serialize the document.
    ///
    /// An empty report still renders as a single blank page.
    pub fn render(mut self) -> WorkerResult<Vec<u8>> {
        if self.pages.is_empty() {
            self.add_page();
        }

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in std::mem::take(&mut self.pages) {
            let content = Content {
                operations: page.operations,
            };
            let encoded = content
                .encode()
                .map_err(|e| WorkerError::report_failed(e.to_string()))?;
            let content_id = self.doc.add_object(Stream::new(dictionary! {}, encoded));

            let mut xobjects = Dictionary::new();
            for (name, id) in page.images {
                xobjects.set(name, Object::Reference(id));
            }

            let page_id = self.doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { FONT_NAME => self.font_id },
                    "XObject" => xobjects,
                },
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![
                    0.0f32.into(),
                    0.0f32.into(),
                    PAGE_WIDTH.into(),
                    PAGE_HEIGHT.into(),
                ],
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();

        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|e| WorkerError::report_failed(e.to_string()))?;
        Ok(buffer)
    }

    fn add_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor_y = PAGE_HEIGHT - MARGIN;
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.add_page();
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

/// Image data ready to embed as an XObject.
struct EmbeddedImage {
    width: u32,
    height: u32,
    color_space: &'static str,
    filter: Option<&'static str>,
    data: Vec<u8>,
}

impl EmbeddedImage {
    /// Baseline JPEGs are embedded as-is; anything else is re-encoded as RGB.
    fn decode(bytes: &[u8]) -> WorkerResult<Self> {
        let format =
            image::guess_format(bytes).map_err(|e| WorkerError::InvalidImage(e.to_string()))?;
        let decoded =
            image::load_from_memory(bytes).map_err(|e| WorkerError::InvalidImage(e.to_string()))?;
        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(WorkerError::InvalidImage("image has no pixels".to_string()));
        }

        let passthrough = match (format, decoded.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => Some("DeviceRGB"),
            (ImageFormat::Jpeg, ColorType::L8) => Some("DeviceGray"),
            _ => None,
        };

        Ok(match passthrough {
            Some(color_space) => Self {
                width,
                height,
                color_space,
                filter: Some("DCTDecode"),
                data: bytes.to_vec(),
            },
            None => Self {
                width,
                height,
                color_space: "DeviceRGB",
                filter: None,
                data: decoded.to_rgb8().into_raw(),
            },
        })
    }

    fn into_stream(self) -> Stream {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => self.width as i64,
            "Height" => self.height as i64,
            "ColorSpace" => self.color_space,
            "BitsPerComponent" => 8,
        };
        match self.filter {
            Some(filter) => {
                dict.set("Filter", filter);
                Stream::new(dict, self.data).with_compression(false)
            }
            None => Stream::new(dict, self.data),
        }
    }
}

fn char_width(c: char) -> f32 {
    let units = match c {
        ' '..='~' => HELVETICA_WIDTHS[c as usize - ' ' as usize],
        _ => DEFAULT_WIDTH,
    };
    units as f32 * FONT_SIZE / 1000.0
}

fn text_width(text: &str) -> f32 {
    text.chars().map(char_width).sum()
}

/// Greedy word wrap to `max_width` points.
///
/// Explicit newlines start a new line; words wider than a line are split.
pub(crate) fn wrap_text(text: &str, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.trim().lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if text_width(&candidate) <= max_width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            for c in word.chars() {
                if !line.is_empty() && text_width(&line) + char_width(c) > max_width {
                    lines.push(std::mem::take(&mut line));
                }
                line.push(c);
            }
        }
        lines.push(line);
    }

    lines
}

/// Encode text for a WinAnsi-encoded standard font; unmappable characters become `?`.
pub(crate) fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\t' => b' ',
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageOutputFormat::Jpeg(80)).unwrap();
        out.into_inner()
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([10, 200, 10]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageOutputFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_blocks_render_to_pdf() {
        let mut report = ReportDocument::new();
        report.add_block(&jpeg(64, 36), "First shot summary.").unwrap();
        report.add_block(&png(64, 36), "Second shot summary.").unwrap();
        assert_eq!(report.block_count(), 2);

        let pdf = report.render().unwrap();
        assert!(pdf.starts_with(b"%PDF-1.5"));

        let parsed = Document::load_mem(&pdf).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);
    }

    #[test]
    fn test_undecodable_thumbnail_leaves_document_untouched() {
        let mut report = ReportDocument::new();
        let err = report.add_block(b"not an image", "text").unwrap_err();
        assert!(matches!(err, WorkerError::InvalidImage(_)));
        assert_eq!(report.block_count(), 0);
        assert_eq!(report.page_count(), 0);
    }

    #[test]
    fn test_blocks_flow_onto_new_pages() {
        let mut report = ReportDocument::new();
        for _ in 0..4 {
            report.add_block(&jpeg(160, 90), "A summary.").unwrap();
        }
        assert!(report.page_count() >= 2);

        let pdf = report.render().unwrap();
        let parsed = Document::load_mem(&pdf).unwrap();
        assert!(parsed.get_pages().len() >= 2);
    }

    #[test]
    fn test_empty_report_has_one_page() {
        let pdf = ReportDocument::new().render().unwrap();
        let parsed = Document::load_mem(&pdf).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "word ".repeat(200);
        let max = CONTENT_WIDTH - 2.0 * CELL_PADDING;
        let lines = wrap_text(&text, max);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| text_width(l) <= max));
        assert_eq!(
            lines.iter().map(|l| l.split_whitespace().count()).sum::<usize>(),
            200
        );
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let word = "x".repeat(400);
        let lines = wrap_text(&word, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_wrap_keeps_paragraphs() {
        let lines = wrap_text("one\n\ntwo", 500.0);
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("café “ok”"), b"caf\xe9 \x93ok\x94".to_vec());
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }
}
