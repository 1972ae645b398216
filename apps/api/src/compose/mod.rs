// CV composition: text segmentation, section composers and the document orchestrator.
// Composers only draw through LayoutCursor; none of them keeps state between calls.

pub mod document;
pub mod entries;
pub mod handlers;
pub mod header;
pub mod headings;
pub mod languages;
pub mod lists;
pub mod proficiency;
pub mod segment;

pub use document::{compose_cv, ComposeError, ComposeOptions, CvArtifact, SectionCounts};

use crate::layout::Rgb;

/// Header band and section rules.
pub const BRAND: Rgb = Rgb(0, 75, 128);
/// Entry text inside the experience section.
pub const INK: Rgb = Rgb(0, 0, 50);
/// Data-row shading of the language tables.
pub const TABLE_FILL: Rgb = Rgb(240, 245, 255);

pub const LEFT_MARGIN: f32 = 6.0;
pub const RIGHT_MARGIN: f32 = 6.0;
/// Left edge of section rules and tables.
pub const CONTENT_X: f32 = LEFT_MARGIN + 7.0;
/// Left edge of indented body blocks.
pub const BODY_X: f32 = LEFT_MARGIN + 6.5;
/// Left edge of entry headings.
pub const ENTRY_X: f32 = 12.0;
pub const ROW_H: f32 = 7.0;
pub const BODY_LINE_H: f32 = 6.0;

pub const SECTION_MARKER: &str = "◉";
pub const ENTRY_MARKER: &str = "☑";

/// Width available to indented body blocks.
pub fn body_width(page_width: f32) -> f32 {
    page_width - CONTENT_X - RIGHT_MARGIN
}
