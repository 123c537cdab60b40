//! Backend canvas boundary.
//!
//! The engine draws through the `Canvas` trait and nothing else. Any
//! retained-mode 2D surface that can create ovals, rectangles and text,
//! move/resize/recolor them by handle, and estimate a text width satisfies
//! the contract. Two implementations ship in-tree: [`term::TermCanvas`]
//! (crossterm cell grid) and [`headless::HeadlessCanvas`] (in-memory, for
//! tests and display-less hosts).

pub mod headless;
pub mod term;

use crate::types::{Bounds, Color, FontSpec, Justify};

/// Opaque handle to an item allocated on a backend canvas.
///
/// Handles are only meaningful on the canvas that issued them. Allocation
/// order doubles as draw order: later items paint over earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub(crate) usize);

pub trait Canvas {
    /// Allocate an oval inscribed in `bounds`.
    fn create_oval(&mut self, bounds: Bounds, fill: Color, outline: Color) -> ItemId;

    /// Allocate a rectangle covering `bounds`.
    fn create_rectangle(&mut self, bounds: Bounds, fill: Color, outline: Color) -> ItemId;

    /// Allocate a text item anchored at its top-left corner.
    fn create_text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        font: &FontSpec,
        fill: Color,
        justify: Justify,
        width: f64,
    ) -> ItemId;

    /// Move and/or resize an item. For text items only the top-left corner
    /// is honored.
    fn set_bounds(&mut self, item: ItemId, bounds: Bounds);

    /// Recolor an item's fill. Outlines are fixed at creation.
    fn set_fill(&mut self, item: ItemId, fill: Color);

    /// Replace the string of a text item. No-op for shapes.
    fn set_text(&mut self, item: ItemId, text: &str);

    /// Replace the font of a text item. No-op for shapes.
    fn set_font(&mut self, item: ItemId, font: &FontSpec);

    /// Estimate the rendered pixel width of `text` in `font`.
    fn measure_text(&self, font: &FontSpec, text: &str) -> f64;
}

/// Average-advance width estimate shared by the in-tree backends.
///
/// Neither backend rasterizes real glyphs, so both answer measurement
/// queries with the same linear model: ~0.6em per character.
pub(crate) fn approx_text_width(font: &FontSpec, text: &str) -> f64 {
    text.chars().count() as f64 * f64::from(font.size) * 0.6
}
