//! Experience and education entry composers.
//!
//! Both follow the same template: heading cells sized to their own measured
//! text, an underline that runs from the first heading glyph to the last one,
//! then the segmented description as one wrapped block.

use tracing::debug;

use crate::compose::segment::normalize;
use crate::compose::{body_width, BODY_LINE_H, BODY_X, BRAND, ENTRY_MARKER, ENTRY_X, INK, ROW_H};
use crate::layout::cursor::CELL_PADDING;
use crate::layout::{Align, Canvas, CellOptions, FontSpec, LayoutCursor, RenderError, Rgb};
use crate::models::cv::{end_date_label, EducationEntry, ExperienceEntry};

/// Gap kept after label cells so adjacent labels never touch.
const LABEL_GAP: f32 = 2.0;

pub fn compose_experience<C: Canvas>(
    cursor: &mut LayoutCursor<C>,
    entry: &ExperienceEntry,
) -> Result<(), RenderError> {
    cursor.advance_x(ENTRY_X);
    cursor.set_xy(cursor.x(), cursor.y() + 2.5);

    // Organization and location
    let organization = format!("{} -   ", entry.organization.to_uppercase());
    let location = entry.location.to_uppercase();

    cursor.set_font(FontSpec::symbols(12.0));
    cursor.cell(6.0, ROW_H, ENTRY_MARKER, CellOptions::left())?;
    cursor.set_font(FontSpec::semibold(12.0));
    let org_w = cursor.measure(&organization) + LABEL_GAP;
    cursor.cell(org_w, ROW_H, &organization, CellOptions::left())?;
    cursor.set_font(FontSpec::regular(12.0));
    let loc_w = cursor.measure(&location) + LABEL_GAP;
    cursor.cell(loc_w, ROW_H, &location, CellOptions::left().then_break())?;

    // Role and date range
    cursor.set_x(ENTRY_X);
    let role = format!("{}  - ", entry.role.to_uppercase());
    let range = format!("{}  -  ", entry.start_date.trim());
    let end = end_date_label(entry.end_date.as_deref());

    cursor.set_font(FontSpec::semibold(12.0));
    let role_w = cursor.measure(&role) + LABEL_GAP;
    cursor.set_font(FontSpec::regular(12.0));
    let range_w = cursor.measure(&range);
    let end_w = cursor.measure(end);

    let rule_start = cursor.x() + CELL_PADDING;
    cursor.set_font(FontSpec::semibold(12.0));
    cursor.cell(role_w, ROW_H, &role, CellOptions::left())?;
    cursor.set_font(FontSpec::regular(12.0));
    cursor.cell(range_w, ROW_H, &range, CellOptions::left())?;
    cursor.cell(end_w, ROW_H, end, CellOptions::left().then_break())?;

    cursor.set_line_width(0.3);
    cursor.set_draw_color(INK);
    let rule_y = cursor.y() - 1.0;
    cursor.line(
        rule_start,
        rule_y,
        rule_start + role_w + range_w + end_w,
        rule_y,
    )?;

    // Description
    let description = normalize(&entry.description);
    if description.is_empty() {
        debug!(organization = %entry.organization, "experience entry has no description");
        return Ok(());
    }
    cursor.set_font(FontSpec::regular(10.0));
    cursor.set_xy(BODY_X, cursor.y() + 1.0);
    let width = body_width(cursor.page_width());
    cursor.multi_cell(width, BODY_LINE_H, &description, Align::Left)?;
    Ok(())
}

pub fn compose_education<C: Canvas>(
    cursor: &mut LayoutCursor<C>,
    entry: &EducationEntry,
) -> Result<(), RenderError> {
    cursor.advance_x(ENTRY_X);
    cursor.set_xy(cursor.x(), cursor.y() + 3.0);
    cursor.set_text_color(Rgb::BLACK);

    // Dates and location
    cursor.set_font(FontSpec::regular(10.0));
    let duration = format!(
        "{} - {} | {}",
        entry.start_date.trim(),
        end_date_label(entry.end_date.as_deref()),
        entry.location.trim()
    );
    let duration_w = cursor.measure(&duration) + LABEL_GAP;
    cursor.cell(duration_w, ROW_H, &duration, CellOptions::left().then_break())?;

    // Degree and institute
    cursor.advance_x(ENTRY_X);
    let degree = entry.degree.to_uppercase();
    let institute = format!(" {}", entry.institute.trim());

    cursor.set_font(FontSpec::semibold(12.0));
    let degree_w = cursor.measure(&degree);
    cursor.set_font(FontSpec::regular(12.0));
    let institute_w = cursor.measure(&institute);

    let rule_start = cursor.x() + CELL_PADDING;
    cursor.set_font(FontSpec::semibold(12.0));
    cursor.cell(degree_w, ROW_H, &degree, CellOptions::left())?;
    cursor.set_font(FontSpec::regular(12.0));
    cursor.cell(institute_w, ROW_H, &institute, CellOptions::left().then_break())?;

    cursor.set_line_width(0.6);
    cursor.set_draw_color(BRAND);
    let rule_y = cursor.y();
    cursor.line(rule_start, rule_y, rule_start + degree_w + institute_w, rule_y)?;

    // Modules
    let modules = normalize(&entry.modules);
    if modules.is_empty() {
        debug!(institute = %entry.institute, "education entry has no module text; skipping block");
    } else {
        cursor.set_font(FontSpec::regular(10.0));
        cursor.set_xy(BODY_X, cursor.y() + 2.0);
        let width = body_width(cursor.page_width());
        cursor.multi_cell(width, BODY_LINE_H, &modules, Align::Left)?;
    }

    // Final grade
    cursor.set_xy(BODY_X, cursor.y() + 1.0);
    let label = "Final Grade: ";
    cursor.set_font(FontSpec::semibold(12.0));
    let label_w = cursor.measure(label);
    cursor.cell(label_w, ROW_H, label, CellOptions::left())?;
    cursor.set_font(FontSpec::regular(12.0));
    let grade = entry.final_grade.trim();
    let grade_w = cursor.measure(grade) + LABEL_GAP;
    cursor.cell(grade_w, ROW_H, grade, CellOptions::left().then_break())
}
