//! Static font-metric tables for the fonts the CV canvas can draw with.
//!
//! Character widths are in em units (relative to font size), taken from the
//! PDF base-14 AFM files the encoder references. No kerning, no ligatures:
//! a string's width is the plain sum of its glyph advances.
//!
//! All text tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

/// Millimetres per typographic point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Font selection
// ────────────────────────────────────────────────────────────────────────────

/// Typeface families available to the composers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Body and heading text (Helvetica in the PDF output).
    Sans,
    /// Marker glyphs drawn in front of headings and entries (ZapfDingbats).
    Symbols,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Regular,
    SemiBold,
    Bold,
}

/// A fully specified font: family, weight and size in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: FontFamily,
    pub weight: FontWeight,
    pub size_pt: f32,
}

impl FontSpec {
    pub const fn regular(size_pt: f32) -> Self {
        Self {
            family: FontFamily::Sans,
            weight: FontWeight::Regular,
            size_pt,
        }
    }

    pub const fn semibold(size_pt: f32) -> Self {
        Self {
            family: FontFamily::Sans,
            weight: FontWeight::SemiBold,
            size_pt,
        }
    }

    pub const fn bold(size_pt: f32) -> Self {
        Self {
            family: FontFamily::Sans,
            weight: FontWeight::Bold,
            size_pt,
        }
    }

    pub const fn symbols(size_pt: f32) -> Self {
        Self {
            family: FontFamily::Symbols,
            weight: FontWeight::Regular,
            size_pt,
        }
    }

    /// Font size converted to millimetres.
    pub fn size_mm(&self) -> f32 {
        self.size_pt * MM_PER_PT
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page setup
// ────────────────────────────────────────────────────────────────────────────

/// Physical page parameters for one CV document. All values in millimetres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSetup {
    pub width_mm: f32,
    pub height_mm: f32,
    pub left_margin_mm: f32,
    pub top_margin_mm: f32,
    /// Distance from the bottom edge at which cells trigger a new page.
    pub break_margin_mm: f32,
}

impl PageSetup {
    /// The y coordinate past which a cell no longer fits on the current page.
    pub fn break_trigger(&self) -> f32 {
        self.height_mm - self.break_margin_mm
    }
}

/// A4 portrait with no side margins and a 20 mm bottom break margin.
pub fn default_page_setup() -> PageSetup {
    PageSetup {
        width_mm: 210.0,
        height_mm: 297.0,
        left_margin_mm: 0.0,
        top_margin_mm: 0.0,
        break_margin_mm: 20.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one font face.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in em units.
/// An empty `widths` slice means the face is monospaced at `average_char_width`.
pub struct FontMetricTable {
    pub base_font: &'static str,
    widths: &'static [f32],
    /// Fallback width for characters outside the table.
    pub average_char_width: f32,
}

impl FontMetricTable {
    /// Width of a single character in em units.
    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) && !self.widths.is_empty() {
            return self.widths[code - 32];
        }
        match c {
            '•' => 0.35,
            '–' => 0.556,
            '—' => 1.0,
            '‘' | '’' => 0.222,
            '“' | '”' => 0.333,
            _ => self.average_char_width,
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Measures a string in millimetres at the given point size.
    pub fn measure_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt * MM_PER_PT
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    base_font: "Helvetica",
    #[rustfmt::skip]
    widths: &[
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    base_font: "Helvetica-Bold",
    #[rustfmt::skip]
    widths: &[
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.611,
};

/// Marker glyphs are drawn one at a time; a flat advance is close enough.
static DINGBATS_TABLE: FontMetricTable = FontMetricTable {
    base_font: "ZapfDingbats",
    widths: &[],
    average_char_width: 0.788,
};

/// Returns the static metric table for a font.
pub fn get_metrics(font: &FontSpec) -> &'static FontMetricTable {
    match (font.family, font.weight) {
        (FontFamily::Symbols, _) => &DINGBATS_TABLE,
        (FontFamily::Sans, FontWeight::Regular) => &HELVETICA_TABLE,
        (FontFamily::Sans, FontWeight::SemiBold | FontWeight::Bold) => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(&FontSpec::regular(10.0));
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_single_space() {
        let metrics = get_metrics(&FontSpec::regular(10.0));
        let width = metrics.measure_str(" ");
        assert!(
            (width - 0.278).abs() < 1e-4,
            "space width should be 0.278, got {width}"
        );
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(&FontSpec::regular(10.0));
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!(
            (width - 2.056).abs() < 1e-3,
            "Rust width should be ~2.056, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(&FontSpec::regular(10.0));
        let width = metrics.measure_str("é");
        assert!(
            (width - metrics.average_char_width).abs() < 1e-4,
            "non-ASCII should use average_char_width"
        );
    }

    #[test]
    fn test_bullet_glyph_has_own_width() {
        let metrics = get_metrics(&FontSpec::regular(10.0));
        assert!((metrics.measure_str("•") - 0.35).abs() < 1e-4);
    }

    #[test]
    fn test_measure_mm_scales_with_size() {
        let metrics = get_metrics(&FontSpec::regular(10.0));
        let small = metrics.measure_mm("Experience", 10.0);
        let large = metrics.measure_mm("Experience", 20.0);
        assert!((large - 2.0 * small).abs() < 1e-4);
        // 10pt "M" = 0.833em * 10pt * 0.3528mm/pt ≈ 2.94mm
        let m = metrics.measure_mm("M", 10.0);
        assert!((m - 2.938).abs() < 1e-2, "10pt M should be ~2.94mm, got {m}");
    }

    #[test]
    fn test_bold_wider_than_regular() {
        let text = "Software Engineer";
        let regular = get_metrics(&FontSpec::regular(12.0)).measure_str(text);
        let bold = get_metrics(&FontSpec::bold(12.0)).measure_str(text);
        assert!(bold > regular, "bold should measure wider than regular");
    }

    #[test]
    fn test_semibold_shares_bold_table() {
        let a = get_metrics(&FontSpec::semibold(12.0));
        let b = get_metrics(&FontSpec::bold(12.0));
        assert_eq!(a.base_font, b.base_font);
    }

    #[test]
    fn test_symbols_are_flat_width() {
        let metrics = get_metrics(&FontSpec::symbols(12.0));
        assert_eq!(metrics.base_font, "ZapfDingbats");
        assert!((metrics.measure_str("◉") - metrics.measure_str("☑")).abs() < 1e-6);
    }

    #[test]
    fn test_default_page_setup_sanity() {
        let page = default_page_setup();
        assert_eq!(page.width_mm, 210.0);
        assert_eq!(page.height_mm, 297.0);
        assert!((page.break_trigger() - 277.0).abs() < 1e-4);
    }
}
