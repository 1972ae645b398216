//! Canvas: the drawing surface the layout cursor renders onto.
//!
//! Coordinates are millimetres with the origin at the top-left corner of the
//! page; `y` grows downwards. A canvas never moves a cursor itself, it only
//! receives absolutely positioned operations.
//!
//! `DisplayList` is the in-memory canvas used for every build: it records the
//! operations page by page so the result can be inspected as JSON or handed to
//! the PDF encoder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::font_metrics::{get_metrics, FontSpec, PageSetup};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("canvas error: {0}")]
    Canvas(String),

    #[error("encode error: {0}")]
    Encode(String),
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Stroke parameters for ruled lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width_mm: f32,
    pub color: Rgb,
}

/// The primitive surface consumed by the layout cursor.
pub trait Canvas {
    fn begin_page(&mut self, setup: &PageSetup) -> Result<(), RenderError>;

    /// Draws `text` with its left edge at `x` and its baseline at `baseline_y`.
    fn text(
        &mut self,
        x: f32,
        baseline_y: f32,
        text: &str,
        font: &FontSpec,
        color: Rgb,
    ) -> Result<(), RenderError>;

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<(), RenderError>;

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: Stroke)
        -> Result<(), RenderError>;

    /// Marks `rect` on the current page as a hyperlink to `uri`.
    fn link(&mut self, rect: Rect, uri: &str) -> Result<(), RenderError>;

    /// Width of `text` in millimetres when set in `font`.
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        get_metrics(font).measure_mm(text, font.size_pt)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Display list
// ────────────────────────────────────────────────────────────────────────────

/// One recorded draw operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        font: FontSpec,
        color: Rgb,
    },
    FillRect {
        rect: Rect,
        color: Rgb,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Stroke,
    },
    Link {
        rect: Rect,
        uri: String,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageOps {
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayList {
    pub width_mm: f32,
    pub height_mm: f32,
    pub pages: Vec<PageOps>,
}

impl DisplayList {
    pub fn new(setup: &PageSetup) -> Self {
        Self {
            width_mm: setup.width_mm,
            height_mm: setup.height_mm,
            pages: Vec::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All operations across pages, in drawing order.
    pub fn ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.pages.iter().flat_map(|p| p.ops.iter())
    }

    /// Every text run, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    fn push(&mut self, op: DrawOp) -> Result<(), RenderError> {
        let page = self
            .pages
            .last_mut()
            .ok_or_else(|| RenderError::Canvas("draw call before the first page".to_string()))?;
        page.ops.push(op);
        Ok(())
    }
}

impl Canvas for DisplayList {
    fn begin_page(&mut self, setup: &PageSetup) -> Result<(), RenderError> {
        self.width_mm = setup.width_mm;
        self.height_mm = setup.height_mm;
        self.pages.push(PageOps::default());
        Ok(())
    }

    fn text(
        &mut self,
        x: f32,
        baseline_y: f32,
        text: &str,
        font: &FontSpec,
        color: Rgb,
    ) -> Result<(), RenderError> {
        if text.is_empty() {
            return Ok(());
        }
        self.push(DrawOp::Text {
            x,
            y: baseline_y,
            text: text.to_string(),
            font: *font,
            color,
        })
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<(), RenderError> {
        self.push(DrawOp::FillRect { rect, color })
    }

    fn line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Stroke,
    ) -> Result<(), RenderError> {
        self.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        })
    }

    fn link(&mut self, rect: Rect, uri: &str) -> Result<(), RenderError> {
        self.push(DrawOp::Link {
            rect,
            uri: uri.to_string(),
        })
    }
}
