//! Text segmentation: turns free-form multi-line text into paragraph and
//! bullet blocks.
//!
//! Lines are trimmed and walked in order. Bullet-looking lines stand alone;
//! consecutive prose lines collapse into one paragraph (joined by a single
//! space) until a bullet or a blank line ends it. Joining the blocks one per
//! line (adjacent paragraphs separated by an empty line) gives the text handed
//! to the canvas, and segmenting that text again yields the same blocks.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Bullet markers: glyph runs, `1.` / `1)`, `a.` / `a)`, roman `iv.` / `iv)`.
/// The marker must be followed by whitespace or end the line.
static BULLET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:[-*•‣‧▪◦●■►➤➢–]+|\d+[.)]|[a-z][.)]|[ivxlcdm]+[.)])(?:\s+|$)")
        .expect("bullet pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Block {
    Paragraph(String),
    Bullet(String),
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Paragraph(t) | Block::Bullet(t) => t,
        }
    }
}

pub fn is_bullet_line(line: &str) -> bool {
    BULLET_PATTERN.is_match(line)
}

/// Splits `raw` into ordered blocks. Blank input yields no blocks.
pub fn segment(raw: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            flush(&mut paragraph, &mut blocks);
        } else if is_bullet_line(line) {
            flush(&mut paragraph, &mut blocks);
            blocks.push(Block::Bullet(line.to_string()));
        } else {
            paragraph.push(line);
        }
    }
    flush(&mut paragraph, &mut blocks);
    blocks
}

fn flush(paragraph: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(paragraph.join(" ")));
        paragraph.clear();
    }
}

/// Renders blocks as canvas text: one block per line, with an empty line
/// between two paragraphs so they stay apart when segmented again.
pub fn join_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    let mut previous: Option<&Block> = None;
    for block in blocks {
        match (previous, block) {
            (None, _) => {}
            (Some(Block::Paragraph(_)), Block::Paragraph(_)) => out.push_str("\n\n"),
            (Some(_), _) => out.push('\n'),
        }
        out.push_str(block.text());
        previous = Some(block);
    }
    out
}

/// `segment` followed by `join_blocks`.
pub fn normalize(raw: &str) -> String {
    join_blocks(&segment(raw))
}
