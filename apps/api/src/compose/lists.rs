use tracing::debug;

use crate::compose::segment::normalize;
use crate::compose::{body_width, BODY_LINE_H, BODY_X, ENTRY_X, ROW_H};
use crate::layout::{Align, Canvas, CellOptions, FontSpec, LayoutCursor, RenderError};

const BULLET: &str = "\u{2022}";

/// One "• item" line per label, indented by `indent` from the left margin.
pub fn compose_bullet_list<C: Canvas>(
    cursor: &mut LayoutCursor<C>,
    items: &[&str],
    indent: f32,
) -> Result<(), RenderError> {
    cursor.set_font(FontSpec::regular(12.0));
    cursor.set_y(cursor.y() + 2.0);
    for item in items {
        let line = format!("{BULLET} {item}");
        cursor.advance_x(indent);
        let w = cursor.measure(&line) + 1.0;
        cursor.cell(w, ROW_H, &line, CellOptions::left().then_break())?;
    }
    Ok(())
}

/// One project description as a wrapped body block. Returns whether anything
/// was drawn.
pub fn compose_project<C: Canvas>(
    cursor: &mut LayoutCursor<C>,
    description: &str,
) -> Result<bool, RenderError> {
    let text = normalize(description);
    if text.is_empty() {
        debug!("project description is empty; skipping");
        return Ok(false);
    }
    cursor.set_font(FontSpec::regular(12.0));
    cursor.set_x(BODY_X);
    let width = body_width(cursor.page_width());
    cursor.multi_cell(width, BODY_LINE_H, &text, Align::Left)?;
    Ok(true)
}

/// "Link: <url>" with the url clickable.
pub fn compose_link<C: Canvas>(
    cursor: &mut LayoutCursor<C>,
    url: &str,
) -> Result<(), RenderError> {
    let url = url.trim();
    cursor.advance_x(ENTRY_X);
    cursor.set_font(FontSpec::semibold(12.0));
    let label = "Link: ";
    let label_w = cursor.measure(label) + 1.0;
    cursor.cell(label_w, ROW_H, label, CellOptions::left())?;

    cursor.set_font(FontSpec::regular(12.0));
    let url_w = cursor.measure(url) + 2.0;
    cursor.cell(url_w, ROW_H, url, CellOptions::left().linked(url).then_break())
}
