//! Shared boundary types for drawing a scene.
//!
//! This module defines the two data contracts of the drawing side:
//! - Engine → Renderer: `ResolvedScene` containing `DrawOp`s
//! - Renderer → Player: `Frame`s of cells, full or diffed

// ---------------------------------------------------------------------------
// Shared style primitives
// ---------------------------------------------------------------------------

/// A 24-bit terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Style {
    pub const fn on(color: Color, bg: Color) -> Self {
        Style {
            fg: Some(color),
            bg: Some(bg),
            bold: false,
        }
    }
}

pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color { r, g, b }
}

// ---------------------------------------------------------------------------
// Engine → Renderer boundary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DrawOp {
    pub x: u16,
    pub y: u16,
    pub ch: char,
    pub style: Style,
    pub z_order: i32,
}

#[derive(Debug, Clone)]
pub struct ResolvedScene {
    pub width: u16,
    pub height: u16,
    pub ops: Vec<DrawOp>,
}

// ---------------------------------------------------------------------------
// Renderer → Player boundary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalContract {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            style: Style::default(),
        }
    }
}

pub type Grid = Vec<Vec<Cell>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChange {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

#[derive(Debug, Clone)]
pub enum Frame {
    Full { cells: Grid },
    Diff { changes: Vec<CellChange> },
}
