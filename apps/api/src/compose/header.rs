use tracing::debug;

use crate::compose::segment::normalize;
use crate::compose::{body_width, BODY_LINE_H, BODY_X, BRAND, LEFT_MARGIN, RIGHT_MARGIN, ROW_H};
use crate::layout::{Align, Canvas, CellOptions, FontSpec, LayoutCursor, RenderError, Rgb};
use crate::models::cv::PersonalInfo;

/// Height of the colored band behind the name and contact rows.
pub const BAND_H: f32 = 40.0;

const MISSING_LABEL: &str = "None";

/// Name band plus two contact rows.
pub fn compose_header<C: Canvas>(
    cursor: &mut LayoutCursor<C>,
    personal: &PersonalInfo,
    fallback_website: Option<&str>,
) -> Result<(), RenderError> {
    let page_w = cursor.page_width();
    cursor.set_fill_color(BRAND);
    cursor.fill_rect(0.0, 0.0, page_w, BAND_H)?;

    // Name
    cursor.set_font(FontSpec::bold(18.0));
    cursor.set_text_color(Rgb::WHITE);
    cursor.cell(page_w, 4.0, "", CellOptions::left().then_break())?;
    cursor.advance_x(5.0);
    let name = personal.name.trim();
    let name_w = cursor.measure(name) + 2.0;
    cursor.cell(name_w, 13.0, name, CellOptions::left().then_break())?;

    cursor.set_line_width(0.3);
    cursor.set_draw_color(Rgb::WHITE);
    let y = cursor.y();
    cursor.line(LEFT_MARGIN, y, page_w - RIGHT_MARGIN, y)?;

    cursor.cell(page_w, 2.0, "", CellOptions::left().then_break())?;

    // Row 1: birthplace, phone, email
    cursor.advance_x(5.0);
    label_pair(cursor, "Place of Birth:", personal.birthplace.trim(), None)?;
    separator(cursor)?;
    label_pair(cursor, "Phone:", personal.phone.trim(), None)?;
    separator(cursor)?;
    label_pair(cursor, "Email:", personal.email.trim(), None)?;
    cursor.ln(ROW_H);

    // Row 2: website and profile links
    cursor.advance_x(5.0);
    match personal.website.as_deref().map(str::trim).filter(|w| !w.is_empty()) {
        Some(site) => label_pair(cursor, "Website:", site, Some(site))?,
        None => label_pair(cursor, "Website:", MISSING_LABEL, fallback_website)?,
    }
    separator(cursor)?;
    match personal.linkedin.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        Some(profile) => label_pair(cursor, "Linkedin:", "View Profile", Some(profile))?,
        None => label_pair(cursor, "Linkedin:", MISSING_LABEL, None)?,
    }
    cursor.ln(ROW_H);
    Ok(())
}

/// The free-text summary under the "about" heading.
pub fn compose_summary<C: Canvas>(
    cursor: &mut LayoutCursor<C>,
    summary: &str,
) -> Result<(), RenderError> {
    let text = normalize(summary);
    if text.is_empty() {
        debug!("summary is empty; skipping block");
        return Ok(());
    }
    cursor.set_font(FontSpec::regular(10.0));
    cursor.set_xy(BODY_X, cursor.y() - 1.0);
    let width = body_width(cursor.page_width());
    cursor.multi_cell(width, BODY_LINE_H, &text, Align::Left)?;
    Ok(())
}

/// Bold label followed by its regular value, each sized to its own text.
fn label_pair<C: Canvas>(
    cursor: &mut LayoutCursor<C>,
    label: &str,
    value: &str,
    link: Option<&str>,
) -> Result<(), RenderError> {
    cursor.set_font(FontSpec::semibold(10.0));
    let label_w = cursor.measure(label) + 2.0;
    cursor.cell(label_w, ROW_H, label, CellOptions::left())?;

    cursor.set_font(FontSpec::regular(10.0));
    let value_w = cursor.measure(value) + 2.0;
    let opts = match link {
        Some(uri) => CellOptions::left().linked(uri),
        None => CellOptions::left(),
    };
    cursor.cell(value_w, ROW_H, value, opts)
}

fn separator<C: Canvas>(cursor: &mut LayoutCursor<C>) -> Result<(), RenderError> {
    cursor.set_font(FontSpec::regular(10.0));
    cursor.cell(6.0, ROW_H, "-", CellOptions::centered())
}
