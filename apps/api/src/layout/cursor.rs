//! Layout cursor: stateful 2D drawing position over a [`Canvas`].
//!
//! The cursor owns the canvas for the duration of one build and is passed to
//! composers by `&mut`. It tracks position, active font and colors, and turns
//! cell-level requests into absolutely positioned canvas calls:
//!
//! - `cell` draws one box of text and either advances right or breaks the line.
//! - `multi_cell` wraps text into consecutive full-width cells.
//! - A cell whose bottom edge would cross the page break trigger opens a new
//!   page first and keeps the current x.
//!
//! Sizing is always two-phase: composers `measure` their text, then pass the
//! measured width to `cell`.

use crate::layout::canvas::{Canvas, Rect, RenderError, Rgb, Stroke};
use crate::layout::font_metrics::{FontSpec, PageSetup};

/// Horizontal padding between a cell edge and its text, in millimetres.
pub const CELL_PADDING: f32 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Per-call options for [`LayoutCursor::cell`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CellOptions<'a> {
    pub align: Align,
    pub border: bool,
    pub fill: bool,
    /// Move to the left margin of the next line after drawing.
    pub break_line: bool,
    pub link: Option<&'a str>,
}

impl<'a> CellOptions<'a> {
    pub fn left() -> Self {
        Self::default()
    }

    pub fn centered() -> Self {
        Self {
            align: Align::Center,
            ..Self::default()
        }
    }

    pub fn filled(mut self) -> Self {
        self.fill = true;
        self
    }

    pub fn bordered(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn then_break(mut self) -> Self {
        self.break_line = true;
        self
    }

    pub fn linked(mut self, uri: &'a str) -> Self {
        self.link = Some(uri);
        self
    }
}

pub struct LayoutCursor<C: Canvas> {
    canvas: C,
    setup: PageSetup,
    x: f32,
    y: f32,
    font: FontSpec,
    text_color: Rgb,
    draw_color: Rgb,
    fill_color: Rgb,
    line_width: f32,
    page_count: usize,
}

impl<C: Canvas> LayoutCursor<C> {
    pub fn new(canvas: C, setup: PageSetup) -> Self {
        let x = setup.left_margin_mm;
        let y = setup.top_margin_mm;
        Self {
            canvas,
            setup,
            x,
            y,
            font: FontSpec::regular(12.0),
            text_color: Rgb::BLACK,
            draw_color: Rgb::BLACK,
            fill_color: Rgb::WHITE,
            line_width: 0.2,
            page_count: 0,
        }
    }

    /// Starts a new page and moves to its top-left margin corner.
    pub fn add_page(&mut self) -> Result<(), RenderError> {
        self.canvas.begin_page(&self.setup)?;
        self.page_count += 1;
        self.x = self.setup.left_margin_mm;
        self.y = self.setup.top_margin_mm;
        Ok(())
    }

    /// Releases the canvas once the build is done.
    pub fn finish(self) -> C {
        self.canvas
    }

    // ── position ───────────────────────────────────────────────────────────

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page_width(&self) -> f32 {
        self.setup.width_mm
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn set_xy(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    /// Moves to `y` and back to the left margin.
    pub fn set_y(&mut self, y: f32) {
        self.x = self.setup.left_margin_mm;
        self.y = y;
    }

    /// Line break: back to the left margin, `h` millimetres lower.
    pub fn ln(&mut self, h: f32) {
        self.x = self.setup.left_margin_mm;
        self.y += h;
    }

    /// Moves right without drawing.
    pub fn advance_x(&mut self, w: f32) {
        self.x += w;
    }

    // ── style ──────────────────────────────────────────────────────────────

    pub fn set_font(&mut self, font: FontSpec) {
        self.font = font;
    }

    pub fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    pub fn set_draw_color(&mut self, color: Rgb) {
        self.draw_color = color;
    }

    pub fn set_fill_color(&mut self, color: Rgb) {
        self.fill_color = color;
    }

    pub fn set_line_width(&mut self, width_mm: f32) {
        self.line_width = width_mm;
    }

    // ── drawing ────────────────────────────────────────────────────────────

    /// Width of `text` in the active font, in millimetres.
    pub fn measure(&self, text: &str) -> f32 {
        self.canvas.measure(text, &self.font)
    }

    /// Draws a ruled line with the active draw color and line width.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), RenderError> {
        let stroke = self.stroke();
        self.canvas.line(x1, y1, x2, y2, stroke)
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<(), RenderError> {
        self.canvas.fill_rect(Rect { x, y, w, h }, self.fill_color)
    }

    /// Draws one cell at the cursor. A width of `0` extends the cell to the
    /// right page edge.
    pub fn cell(
        &mut self,
        w: f32,
        h: f32,
        text: &str,
        opts: CellOptions<'_>,
    ) -> Result<(), RenderError> {
        if h > 0.0 && self.y + h > self.setup.break_trigger() {
            let x = self.x;
            self.add_page()?;
            self.x = x;
        }

        let w = if w == 0.0 {
            self.setup.width_mm - self.x
        } else {
            w
        };
        let rect = Rect {
            x: self.x,
            y: self.y,
            w,
            h,
        };

        if opts.fill {
            self.canvas.fill_rect(rect, self.fill_color)?;
        }
        if opts.border {
            self.outline(rect)?;
        }
        if !text.is_empty() {
            let text_w = self.measure(text);
            let text_x = match opts.align {
                Align::Left => self.x + CELL_PADDING,
                Align::Center => self.x + (w - text_w) / 2.0,
                Align::Right => self.x + w - CELL_PADDING - text_w,
            };
            let baseline = self.y + 0.5 * h + 0.3 * self.font.size_mm();
            self.canvas
                .text(text_x, baseline, text, &self.font, self.text_color)?;
            if let Some(uri) = opts.link {
                self.canvas.link(rect, uri)?;
            }
        }

        if opts.break_line {
            self.ln(h);
        } else {
            self.x += w;
        }
        Ok(())
    }

    /// Draws `text` as a wrapped block of `line_h` high lines, `w` wide,
    /// starting at the cursor. Returns the number of lines drawn.
    pub fn multi_cell(
        &mut self,
        w: f32,
        line_h: f32,
        text: &str,
        align: Align,
    ) -> Result<usize, RenderError> {
        let w = if w == 0.0 {
            self.setup.width_mm - self.x
        } else {
            w
        };
        let start_x = self.x;
        let lines = self.wrap_lines(text, w - 2.0 * CELL_PADDING);
        for line in &lines {
            self.x = start_x;
            let opts = CellOptions {
                align,
                ..CellOptions::default()
            };
            self.cell(w, line_h, line, opts)?;
            self.y += line_h;
        }
        self.x = self.setup.left_margin_mm;
        Ok(lines.len())
    }

    /// Greedy word wrap of `text` at `max_w` millimetres in the active font.
    ///
    /// Embedded newlines are hard breaks (an empty source line stays an empty
    /// output line). Words wider than a whole line are split by character.
    pub fn wrap_lines(&self, text: &str, max_w: f32) -> Vec<String> {
        let space_w = self.measure(" ");
        let mut out = Vec::new();

        for source_line in text.split('\n') {
            let source_line = source_line.trim_end_matches('\r');
            let mut current = String::new();
            let mut current_w = 0.0_f32;

            for word in source_line.split_whitespace() {
                let word_w = self.measure(word);
                let gap = if current.is_empty() { 0.0 } else { space_w };

                if current_w + gap + word_w <= max_w {
                    if !current.is_empty() {
                        current.push(' ');
                    }
                    current.push_str(word);
                    current_w += gap + word_w;
                    continue;
                }

                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                    current_w = 0.0;
                }

                if word_w <= max_w {
                    current.push_str(word);
                    current_w = word_w;
                    continue;
                }

                // Oversized word: hard split by character.
                for c in word.chars() {
                    let cw = self.measure(c.encode_utf8(&mut [0u8; 4]));
                    if !current.is_empty() && current_w + cw > max_w {
                        out.push(std::mem::take(&mut current));
                        current_w = 0.0;
                    }
                    current.push(c);
                    current_w += cw;
                }
            }
            out.push(current);
        }
        out
    }

    fn stroke(&self) -> Stroke {
        Stroke {
            width_mm: self.line_width,
            color: self.draw_color,
        }
    }

    fn outline(&mut self, r: Rect) -> Result<(), RenderError> {
        let stroke = self.stroke();
        self.canvas.line(r.x, r.y, r.x + r.w, r.y, stroke)?;
        self.canvas
            .line(r.x + r.w, r.y, r.x + r.w, r.y + r.h, stroke)?;
        self.canvas
            .line(r.x + r.w, r.y + r.h, r.x, r.y + r.h, stroke)?;
        self.canvas.line(r.x, r.y + r.h, r.x, r.y, stroke)
    }
}
