//! PDF encoding for a recorded [`DisplayList`].
//!
//! Uses only base-14 fonts, so no font files are embedded: Helvetica and
//! Helvetica-Bold with WinAnsi encoding for text, ZapfDingbats for markers.
//! Characters outside WinAnsi are written as `?`.

use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Content, Finish, Name, Pdf, Rect as PdfRect, Ref, Str};

use crate::layout::canvas::{DisplayList, DrawOp, RenderError, Rgb};
use crate::layout::font_metrics::{FontFamily, FontSpec, FontWeight, MM_PER_PT};

const FONT_REGULAR: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");
const FONT_SYMBOLS: Name<'static> = Name(b"F3");

/// Encodes the display list into a complete PDF file.
pub fn encode_pdf(list: &DisplayList) -> Result<Vec<u8>, RenderError> {
    if list.pages.is_empty() {
        return Err(RenderError::Encode("document has no pages".to_string()));
    }

    let mut pdf = Pdf::new();
    let mut next = 1;
    let mut alloc = || {
        let r = Ref::new(next);
        next += 1;
        r
    };

    let catalog_id = alloc();
    let tree_id = alloc();
    let regular_id = alloc();
    let bold_id = alloc();
    let symbols_id = alloc();

    pdf.catalog(catalog_id).pages(tree_id);
    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(symbols_id).base_font(Name(b"ZapfDingbats"));

    let width_pt = list.width_mm / MM_PER_PT;
    let height_pt = list.height_mm / MM_PER_PT;
    let to_pt = |mm: f32| mm / MM_PER_PT;
    let flip = |y_mm: f32| height_pt - y_mm / MM_PER_PT;

    let mut page_ids = Vec::with_capacity(list.pages.len());
    for page_ops in &list.pages {
        let page_id = alloc();
        let content_id = alloc();
        page_ids.push(page_id);

        let mut content = Content::new();
        let mut links: Vec<(PdfRect, &str)> = Vec::new();

        for op in &page_ops.ops {
            match op {
                DrawOp::Text {
                    x,
                    y,
                    text,
                    font,
                    color,
                } => {
                    let (name, bytes) = encode_text(text, font);
                    set_fill(&mut content, *color);
                    content.begin_text();
                    content.set_font(name, font.size_pt);
                    content.next_line(to_pt(*x), flip(*y));
                    content.show(Str(&bytes));
                    content.end_text();
                }
                DrawOp::FillRect { rect, color } => {
                    set_fill(&mut content, *color);
                    content.rect(
                        to_pt(rect.x),
                        flip(rect.y + rect.h),
                        to_pt(rect.w),
                        to_pt(rect.h),
                    );
                    content.fill_nonzero();
                }
                DrawOp::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    stroke,
                } => {
                    let Rgb(r, g, b) = stroke.color;
                    content.set_stroke_rgb(unit(r), unit(g), unit(b));
                    content.set_line_width(to_pt(stroke.width_mm));
                    content.move_to(to_pt(*x1), flip(*y1));
                    content.line_to(to_pt(*x2), flip(*y2));
                    content.stroke();
                }
                DrawOp::Link { rect, uri } => {
                    links.push((
                        PdfRect::new(
                            to_pt(rect.x),
                            flip(rect.y + rect.h),
                            to_pt(rect.x + rect.w),
                            flip(rect.y),
                        ),
                        uri.as_str(),
                    ));
                }
            }
        }

        pdf.stream(content_id, &content.finish());

        let mut page = pdf.page(page_id);
        page.media_box(PdfRect::new(0.0, 0.0, width_pt, height_pt));
        page.parent(tree_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(FONT_REGULAR, regular_id);
            fonts.pair(FONT_BOLD, bold_id);
            fonts.pair(FONT_SYMBOLS, symbols_id);
        }
        if !links.is_empty() {
            let mut annotations = page.annotations();
            for (rect, uri) in links {
                let mut annotation = annotations.push();
                annotation.subtype(AnnotationType::Link).rect(rect);
                annotation
                    .action()
                    .action_type(ActionType::Uri)
                    .uri(Str(uri.as_bytes()));
            }
        }
        page.finish();
    }

    let count = page_ids.len() as i32;
    pdf.pages(tree_id).kids(page_ids).count(count);

    Ok(pdf.finish())
}

fn unit(channel: u8) -> f32 {
    channel as f32 / 255.0
}

fn set_fill(content: &mut Content, color: Rgb) {
    let Rgb(r, g, b) = color;
    content.set_fill_rgb(unit(r), unit(g), unit(b));
}

/// Picks the font resource for `font` and encodes `text` for it.
fn encode_text(text: &str, font: &FontSpec) -> (Name<'static>, Vec<u8>) {
    match (font.family, font.weight) {
        (FontFamily::Symbols, _) => (FONT_SYMBOLS, text.chars().map(dingbat_code).collect()),
        (FontFamily::Sans, FontWeight::Regular) => (FONT_REGULAR, win_ansi(text)),
        (FontFamily::Sans, _) => (FONT_BOLD, win_ansi(text)),
    }
}

/// Maps marker characters to their ZapfDingbats codes.
fn dingbat_code(c: char) -> u8 {
    match c {
        '☑' | '✔' | '✓' => 0x34,
        '■' | '▪' => 0x6E,
        '★' => 0x48,
        _ => 0x6C, // ● filled circle
    }
}

/// Encodes text in WinAnsi (cp1252).
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}
