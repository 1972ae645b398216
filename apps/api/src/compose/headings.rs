use crate::compose::{BRAND, CONTENT_X, ENTRY_X, INK, RIGHT_MARGIN, ROW_H, SECTION_MARKER};
use crate::layout::{Canvas, CellOptions, FontSpec, LayoutCursor, RenderError, Rgb};

/// Top-level section title: marker glyph, bold title, full-width rule.
///
/// `gap_before` moves the cursor down before the title (negative pulls it
/// up); the rule is drawn `rule_rise` above the line following the title.
pub fn section_heading<C: Canvas>(
    cursor: &mut LayoutCursor<C>,
    title: &str,
    gap_before: f32,
    rule_rise: f32,
) -> Result<(), RenderError> {
    cursor.ln(gap_before);
    cursor.advance_x(5.0);

    cursor.set_text_color(Rgb::BLACK);
    cursor.set_font(FontSpec::symbols(12.0));
    cursor.cell(6.5, ROW_H * 2.0, SECTION_MARKER, CellOptions::left())?;
    cursor.set_font(FontSpec::bold(12.0));
    cursor.cell(0.0, ROW_H * 2.0, title, CellOptions::left().then_break())?;

    cursor.set_line_width(0.8);
    cursor.set_draw_color(BRAND);
    let y = cursor.y() - rule_rise;
    let right = cursor.page_width() - RIGHT_MARGIN;
    cursor.line(CONTENT_X, y, right, y)
}

/// Second-level title inside a section, with a thinner rule at
/// `cursor.y() + rule_offset` once the title line is done.
pub fn sub_heading<C: Canvas>(
    cursor: &mut LayoutCursor<C>,
    title: &str,
    row_h: f32,
    rule_offset: f32,
) -> Result<(), RenderError> {
    cursor.set_font(FontSpec::semibold(12.0));
    cursor.set_text_color(INK);
    cursor.advance_x(ENTRY_X);
    cursor.cell(0.0, row_h, title, CellOptions::left().then_break())?;

    cursor.set_line_width(0.5);
    cursor.set_draw_color(BRAND);
    let y = cursor.y() + rule_offset;
    let right = cursor.page_width() - RIGHT_MARGIN;
    cursor.line(CONTENT_X, y, right, y)
}
