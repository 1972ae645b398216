// Layout: font metrics, the canvas surface, the drawing cursor and PDF encoding.
// Everything here is synchronous; builds run inside tokio::task::spawn_blocking.

pub mod canvas;
pub mod cursor;
pub mod font_metrics;
pub mod pdf;

pub use canvas::{Canvas, DisplayList, RenderError, Rgb};
pub use cursor::{Align, CellOptions, LayoutCursor};
pub use font_metrics::{default_page_setup, FontSpec, PageSetup};
