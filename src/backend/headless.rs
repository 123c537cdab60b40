//! In-memory canvas backend.
//!
//! Records every item's current state without drawing anything. Tests
//! assert against it directly; hosts can also use it to run a scene with
//! no display attached (e.g. stepping a replay to a known frame before
//! switching on real output).

use crate::types::{Bounds, Color, FontSpec, Justify};

use super::{approx_text_width, Canvas, ItemId};

#[derive(Debug, Clone, PartialEq)]
pub enum ItemShape {
    Oval,
    Rectangle,
    Text {
        text: String,
        font: FontSpec,
        justify: Justify,
        width: f64,
    },
}

#[derive(Debug, Clone)]
pub struct Item {
    pub shape: ItemShape,
    pub bounds: Bounds,
    pub fill: Color,
    pub outline: Color,
}

#[derive(Debug, Default)]
pub struct HeadlessCanvas {
    items: Vec<Item>,
}

impl HeadlessCanvas {
    pub fn new() -> Self {
        HeadlessCanvas::default()
    }

    pub fn item(&self, id: ItemId) -> &Item {
        &self.items[id.0]
    }

    /// Items in allocation order (which is also draw order).
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// The string of a text item, panicking on shapes. Test convenience.
    pub fn text_of(&self, id: ItemId) -> &str {
        match &self.items[id.0].shape {
            ItemShape::Text { text, .. } => text,
            other => panic!("item {id:?} is not text: {other:?}"),
        }
    }

    /// The font of a text item, panicking on shapes. Test convenience.
    pub fn font_of(&self, id: ItemId) -> &FontSpec {
        match &self.items[id.0].shape {
            ItemShape::Text { font, .. } => font,
            other => panic!("item {id:?} is not text: {other:?}"),
        }
    }

    fn push(&mut self, item: Item) -> ItemId {
        self.items.push(item);
        ItemId(self.items.len() - 1)
    }
}

impl Canvas for HeadlessCanvas {
    fn create_oval(&mut self, bounds: Bounds, fill: Color, outline: Color) -> ItemId {
        self.push(Item {
            shape: ItemShape::Oval,
            bounds,
            fill,
            outline,
        })
    }

    fn create_rectangle(&mut self, bounds: Bounds, fill: Color, outline: Color) -> ItemId {
        self.push(Item {
            shape: ItemShape::Rectangle,
            bounds,
            fill,
            outline,
        })
    }

    fn create_text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        font: &FontSpec,
        fill: Color,
        justify: Justify,
        width: f64,
    ) -> ItemId {
        self.push(Item {
            shape: ItemShape::Text {
                text: text.to_string(),
                font: font.clone(),
                justify,
                width,
            },
            bounds: Bounds::new(x, y, x + width, y + f64::from(font.size)),
            fill,
            outline: fill,
        })
    }

    fn set_bounds(&mut self, item: ItemId, bounds: Bounds) {
        self.items[item.0].bounds = bounds;
    }

    fn set_fill(&mut self, item: ItemId, fill: Color) {
        self.items[item.0].fill = fill;
    }

    fn set_text(&mut self, item: ItemId, new_text: &str) {
        if let ItemShape::Text { text, .. } = &mut self.items[item.0].shape {
            *text = new_text.to_string();
        }
    }

    fn set_font(&mut self, item: ItemId, new_font: &FontSpec) {
        if let ItemShape::Text { font, .. } = &mut self.items[item.0].shape {
            *font = new_font.clone();
        }
    }

    fn measure_text(&self, font: &FontSpec, text: &str) -> f64 {
        approx_text_width(font, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_creation_and_mutation() {
        let mut canvas = HeadlessCanvas::new();
        let oval = canvas.create_oval(Bounds::around(50.0, 50.0, 10.0), Color::WHITE, Color::WHITE);
        let label = canvas.create_text(
            100.0,
            150.0,
            "hi",
            &FontSpec::default(),
            Color::BLACK,
            Justify::Left,
            200.0,
        );

        assert_eq!(canvas.item_count(), 2);
        assert_eq!(canvas.item(oval).bounds.left, 40.0);

        canvas.set_bounds(oval, Bounds::around(60.0, 50.0, 10.0));
        canvas.set_fill(oval, Color::BLACK);
        assert_eq!(canvas.item(oval).bounds.left, 50.0);
        assert_eq!(canvas.item(oval).fill, Color::BLACK);

        canvas.set_text(label, "hello");
        canvas.set_font(label, &FontSpec::new("Calibri", 12));
        assert_eq!(canvas.text_of(label), "hello");
        assert_eq!(canvas.font_of(label).size, 12);

        // Shape items ignore text mutations.
        canvas.set_text(oval, "nope");
        assert_eq!(canvas.item(oval).shape, ItemShape::Oval);
    }
}
