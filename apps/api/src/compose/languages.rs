//! Language section: the mother-tongue label and one skill table per language.
//!
//! Each table is a fixed six-column grid across the printable width:
//!
//! ```text
//! |          |     UNDERSTANDING     |        SPEAKING         | WRITING |
//! |          | Listening |  Reading  | Spoken prod.| Spoken inter.|         |
//! |----------------------------------------------------------------------|
//! | GERMAN   |    C1     |    B2     |     B1      |     B2      |   B1    |
//! |----------------------------------------------------------------------|
//! ```
//!
//! The horizontal borders are ruled lines, not per-cell borders, so the table
//! edge is one unbroken stroke.

use crate::compose::proficiency::writing_for;
use crate::compose::{BRAND, CONTENT_X, ENTRY_X, RIGHT_MARGIN, ROW_H, TABLE_FILL};
use crate::layout::{Canvas, CellOptions, FontSpec, LayoutCursor, RenderError};
use crate::models::cv::LanguageSkill;

pub const TABLE_COLUMNS: usize = 6;
const TABLE_ROW_H: f32 = 8.0;

/// Splits `total` into six equal column widths.
pub fn column_widths(total: f32) -> [f32; TABLE_COLUMNS] {
    [total / TABLE_COLUMNS as f32; TABLE_COLUMNS]
}

/// Printable table width for a page.
pub fn table_width(page_width: f32) -> f32 {
    page_width - RIGHT_MARGIN - CONTENT_X
}

/// "Mother Tongue(s): X" and, when other languages follow, their lead-in label.
pub fn compose_mother_tongue<C: Canvas>(
    cursor: &mut LayoutCursor<C>,
    mother_tongue: &str,
    has_other_languages: bool,
) -> Result<(), RenderError> {
    let mother_tongue = mother_tongue.trim();
    if !mother_tongue.is_empty() {
        cursor.set_font(FontSpec::regular(13.0));
        cursor.advance_x(ENTRY_X);
        let label = "Mother Tongue(s): ";
        let label_w = cursor.measure(label);
        cursor.cell(label_w, ROW_H, label, CellOptions::left())?;

        let language = mother_tongue.to_uppercase();
        cursor.set_font(FontSpec::semibold(12.0));
        let language_w = cursor.measure(&language) + 2.0;
        cursor.cell(language_w, ROW_H, &language, CellOptions::left().then_break())?;
    }

    if has_other_languages {
        cursor.advance_x(ENTRY_X);
        cursor.set_font(FontSpec::regular(12.0));
        let label = "Other Language(s):";
        let label_w = cursor.measure(label) + 2.0;
        cursor.cell(label_w, ROW_H, label, CellOptions::left())?;
        cursor.ln(TABLE_ROW_H);
    }
    Ok(())
}

pub fn compose_language_table<C: Canvas>(
    cursor: &mut LayoutCursor<C>,
    skill: &LanguageSkill,
) -> Result<(), RenderError> {
    cursor.set_fill_color(TABLE_FILL);
    cursor.set_draw_color(BRAND);
    cursor.set_line_width(0.6);

    let start_x = CONTENT_X;
    let total = table_width(cursor.page_width());
    let cols = column_widths(total);
    let h = TABLE_ROW_H;

    // Category headers
    cursor.set_xy(start_x, cursor.y());
    cursor.set_font(FontSpec::semibold(12.0));
    cursor.cell(cols[0], h * 2.0, "", CellOptions::left())?;
    cursor.cell(cols[1] + cols[2], h, "UNDERSTANDING", CellOptions::centered())?;
    cursor.cell(cols[3] + cols[4], h, "SPEAKING", CellOptions::centered())?;
    cursor.cell(cols[5], h, "WRITING", CellOptions::centered())?;
    cursor.ln(h);

    // Sub headers
    cursor.set_x(start_x + cols[0]);
    cursor.set_font(FontSpec::regular(12.0));
    for (width, title) in cols[1..5]
        .iter()
        .zip(["Listening", "Reading", "Spoken prod.", "Spoken inter."])
    {
        cursor.cell(*width, h, title, CellOptions::centered())?;
    }
    cursor.ln(h);

    let top = cursor.y();
    cursor.line(start_x, top, start_x + total, top)?;

    // Data row
    cursor.set_x(start_x);
    cursor.set_font(FontSpec::semibold(12.0));
    let language = skill.language.trim().to_uppercase();
    cursor.cell(cols[0], h, &language, CellOptions::centered().filled())?;

    cursor.set_font(FontSpec::regular(12.0));
    let writing = writing_for(skill);
    let ratings = [
        skill.listening,
        skill.reading,
        skill.spoken_production,
        skill.spoken_interaction,
        writing,
    ];
    for (width, rating) in cols[1..].iter().zip(ratings) {
        cursor.cell(*width, h, rating.as_str(), CellOptions::centered().filled())?;
    }
    cursor.ln(h);

    let bottom = cursor.y();
    cursor.line(start_x, bottom, start_x + total, bottom)?;

    cursor.ln(2.0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::canvas::{DisplayList, DrawOp};
    use crate::layout::default_page_setup;
    use crate::models::cv::CefrLevel;

    fn german() -> LanguageSkill {
        LanguageSkill {
            language: "German".to_string(),
            listening: CefrLevel::C1,
            reading: CefrLevel::C1,
            spoken_production: CefrLevel::B1,
            spoken_interaction: CefrLevel::B2,
        }
    }

    fn render(skills: &[LanguageSkill]) -> DisplayList {
        let setup = default_page_setup();
        let mut cursor = LayoutCursor::new(DisplayList::new(&setup), setup);
        cursor.add_page().unwrap();
        cursor.set_y(50.0);
        for skill in skills {
            compose_language_table(&mut cursor, skill).unwrap();
        }
        cursor.finish()
    }

    #[test]
    fn test_six_equal_columns_sum_to_total() {
        let total = table_width(210.0);
        let cols = column_widths(total);
        assert_eq!(cols.len(), 6);
        for w in cols {
            assert!((w - total / 6.0).abs() < 1e-4);
        }
        let sum: f32 = cols.iter().sum();
        assert!((sum - total).abs() < 1e-3);
    }

    #[test]
    fn test_data_row_cells_use_column_widths_and_fill() {
        let list = render(&[german()]);
        let total = table_width(210.0);
        let fills: Vec<(f32, f32)> = list
            .ops()
            .filter_map(|op| match op {
                DrawOp::FillRect { rect, color } if *color == TABLE_FILL => Some((rect.x, rect.w)),
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), 6);
        for (i, (x, w)) in fills.iter().enumerate() {
            assert!((w - total / 6.0).abs() < 1e-4);
            assert!((x - (CONTENT_X + i as f32 * total / 6.0)).abs() < 1e-3);
        }
        let drawn: f32 = fills.iter().map(|(_, w)| w).sum();
        assert!((drawn - total).abs() < 1e-3);
    }

    #[test]
    fn test_borders_are_two_full_width_rules() {
        let list = render(&[german()]);
        let total = table_width(210.0);
        let rules: Vec<(f32, f32, f32)> = list
            .ops()
            .filter_map(|op| match op {
                DrawOp::Line { x1, y1, x2, .. } => Some((*x1, *x2, *y1)),
                _ => None,
            })
            .collect();
        assert_eq!(rules.len(), 2);
        for (x1, x2, _) in &rules {
            assert_eq!(*x1, CONTENT_X);
            assert!((x2 - x1 - total).abs() < 1e-3);
        }
        assert!((rules[1].2 - rules[0].2 - TABLE_ROW_H).abs() < 1e-4);
    }

    #[test]
    fn test_row_shows_language_ratings_and_derived_writing() {
        let list = render(&[german()]);
        let texts: Vec<&str> = list.texts().collect();
        let row_start = texts.iter().position(|t| *t == "GERMAN").unwrap();
        assert_eq!(
            &texts[row_start..],
            &["GERMAN", "C1", "C1", "B1", "B2", "B2"]
        );
        for header in ["UNDERSTANDING", "SPEAKING", "WRITING", "Listening", "Spoken inter."] {
            assert!(texts.contains(&header));
        }
    }

    #[test]
    fn test_one_table_per_language() {
        let mut french = german();
        french.language = "French".to_string();
        let list = render(&[german(), french]);
        let headers = list.texts().filter(|t| *t == "UNDERSTANDING").count();
        assert_eq!(headers, 2);
        let rules = list
            .ops()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count();
        assert_eq!(rules, 4);
    }

    #[test]
    fn test_mother_tongue_is_plain_label() {
        let setup = default_page_setup();
        let mut cursor = LayoutCursor::new(DisplayList::new(&setup), setup);
        cursor.add_page().unwrap();
        compose_mother_tongue(&mut cursor, "urdu", false).unwrap();
        let list = cursor.finish();
        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts, vec!["Mother Tongue(s): ", "URDU"]);
        assert!(!list.ops().any(|op| matches!(op, DrawOp::FillRect { .. })));
    }
}
