//! Terminal canvas backend.
//!
//! Retains every allocated item, rasterizes the whole scene onto a cell
//! grid once per `present`, and repaints only the cells that changed since
//! the previous frame. Engine pixel space is mapped linearly onto the
//! terminal cell grid, so hosts keep authoring in pixels.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{cursor, execute, queue, style, terminal};

use crate::types::{Bounds, Color, FontSpec, Justify, NamedColor};

use super::{approx_text_width, Canvas, ItemId};

#[derive(Debug, Clone, PartialEq)]
struct Cell {
    ch: char,
    fg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Cell { ch: ' ', fg: None }
    }
}

#[derive(Debug, Clone)]
enum ItemKind {
    Oval {
        bounds: Bounds,
    },
    Rect {
        bounds: Bounds,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        justify: Justify,
        width: f64,
    },
}

#[derive(Debug, Clone)]
struct Item {
    kind: ItemKind,
    fill: Color,
    outline: Color,
}

pub struct TermCanvas {
    cols: u16,
    rows: u16,
    // Pixel-space → cell-space scale factors.
    sx: f64,
    sy: f64,
    items: Vec<Item>,
    prev: Option<Vec<Vec<Cell>>>,
    entered: bool,
}

impl TermCanvas {
    /// A canvas covering `cols`×`rows` terminal cells onto which the
    /// `px_width`×`px_height` pixel space is scaled.
    pub fn new(px_width: f64, px_height: f64, cols: u16, rows: u16) -> Self {
        TermCanvas {
            cols,
            rows,
            sx: f64::from(cols) / px_width,
            sy: f64::from(rows) / px_height,
            items: Vec::new(),
            prev: None,
            entered: false,
        }
    }

    /// Size the canvas to the current terminal.
    pub fn fit_terminal(px_width: f64, px_height: f64) -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(TermCanvas::new(px_width, px_height, cols, rows))
    }

    /// Enter raw mode and the alternate screen. Always paired with
    /// [`leave`], which [`Drop`] also runs as a fallback.
    ///
    /// [`leave`]: TermCanvas::leave
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;
        self.entered = true;
        Ok(())
    }

    /// Restore the terminal. Safe to call when not entered.
    pub fn leave(&mut self) -> Result<()> {
        if self.entered {
            self.entered = false;
            execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen)?;
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    /// Rasterize all items and repaint the cells that changed.
    pub fn present(&mut self) -> Result<()> {
        let grid = self.rasterize();
        let mut stdout = io::stdout();

        match &self.prev {
            None => {
                for (row, cells) in grid.iter().enumerate() {
                    queue!(stdout, cursor::MoveTo(0, row as u16))?;
                    for cell in cells {
                        Self::queue_cell(&mut stdout, cell)?;
                    }
                }
            }
            Some(prev) => {
                for (row, (old, new)) in prev.iter().zip(grid.iter()).enumerate() {
                    for (col, (o, n)) in old.iter().zip(new.iter()).enumerate() {
                        if o != n {
                            queue!(stdout, cursor::MoveTo(col as u16, row as u16))?;
                            Self::queue_cell(&mut stdout, n)?;
                        }
                    }
                }
            }
        }
        stdout.flush()?;
        self.prev = Some(grid);
        Ok(())
    }

    /// Map a terminal cell coordinate back into engine pixel space, for
    /// forwarding mouse clicks.
    pub fn to_pixel(&self, col: u16, row: u16) -> (f64, f64) {
        (f64::from(col) / self.sx, f64::from(row) / self.sy)
    }

    fn queue_cell(stdout: &mut io::Stdout, cell: &Cell) -> Result<()> {
        match cell.fg {
            Some(color) => queue!(
                stdout,
                style::SetForegroundColor(to_ct_color(color)),
                style::Print(cell.ch),
                style::ResetColor,
            )?,
            None => queue!(stdout, style::Print(cell.ch))?,
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Rasterization
    // -----------------------------------------------------------------------

    fn rasterize(&self) -> Vec<Vec<Cell>> {
        let mut grid = vec![vec![Cell::default(); self.cols as usize]; self.rows as usize];
        // Item order is draw order: later items paint over earlier ones.
        for item in &self.items {
            match &item.kind {
                ItemKind::Oval { bounds } => self.raster_oval(&mut grid, bounds, item),
                ItemKind::Rect { bounds } => self.raster_rect(&mut grid, bounds, item),
                ItemKind::Text {
                    x,
                    y,
                    text,
                    justify,
                    width,
                } => self.raster_text(&mut grid, *x, *y, text, *justify, *width, item.fill),
            }
        }
        grid
    }

    fn plot(&self, grid: &mut [Vec<Cell>], col: i64, row: i64, ch: char, fg: Color) {
        if col >= 0 && row >= 0 && col < i64::from(self.cols) && row < i64::from(self.rows) {
            grid[row as usize][col as usize] = Cell { ch, fg: Some(fg) };
        }
    }

    fn raster_oval(&self, grid: &mut [Vec<Cell>], bounds: &Bounds, item: &Item) {
        let cx = (bounds.left + bounds.right) / 2.0 * self.sx;
        let cy = (bounds.top + bounds.bottom) / 2.0 * self.sy;
        let rx = (bounds.width() / 2.0 * self.sx).max(0.5);
        let ry = (bounds.height() / 2.0 * self.sy).max(0.5);

        let (c0, c1) = ((cx - rx).floor() as i64, (cx + rx).ceil() as i64);
        let (r0, r1) = ((cy - ry).floor() as i64, (cy + ry).ceil() as i64);
        // Width of the outline band in normalized units, roughly one cell.
        let band = 1.0 - (1.0 / rx.max(ry)).min(1.0);

        for row in r0..=r1 {
            for col in c0..=c1 {
                let nx = (col as f64 + 0.5 - cx) / rx;
                let ny = (row as f64 + 0.5 - cy) / ry;
                let norm = nx * nx + ny * ny;
                if norm <= 1.0 {
                    let color = if norm >= band * band {
                        item.outline
                    } else {
                        item.fill
                    };
                    self.plot(grid, col, row, '█', color);
                }
            }
        }
    }

    fn raster_rect(&self, grid: &mut [Vec<Cell>], bounds: &Bounds, item: &Item) {
        let c0 = (bounds.left * self.sx).round() as i64;
        let r0 = (bounds.top * self.sy).round() as i64;
        let c1 = ((bounds.right * self.sx).round() as i64).max(c0);
        let r1 = ((bounds.bottom * self.sy).round() as i64).max(r0);

        for row in r0..=r1 {
            for col in c0..=c1 {
                self.plot(grid, col, row, '█', item.fill);
            }
        }
        if c1 > c0 && r1 > r0 {
            self.plot(grid, c0, r0, '┌', item.outline);
            self.plot(grid, c1, r0, '┐', item.outline);
            self.plot(grid, c0, r1, '└', item.outline);
            self.plot(grid, c1, r1, '┘', item.outline);
            for col in c0 + 1..c1 {
                self.plot(grid, col, r0, '─', item.outline);
                self.plot(grid, col, r1, '─', item.outline);
            }
            for row in r0 + 1..r1 {
                self.plot(grid, c0, row, '│', item.outline);
                self.plot(grid, c1, row, '│', item.outline);
            }
        }
    }

    fn raster_text(
        &self,
        grid: &mut [Vec<Cell>],
        x: f64,
        y: f64,
        text: &str,
        justify: Justify,
        width: f64,
        fill: Color,
    ) {
        let row = (y * self.sy).round() as i64;
        let box_cols = (width * self.sx).round() as i64;

        for (line_no, line) in text.split('\n').enumerate() {
            let len = line.chars().count() as i64;
            let offset = match justify {
                Justify::Left => 0,
                Justify::Center => (box_cols - len) / 2,
                Justify::Right => box_cols - len,
            };
            let col0 = (x * self.sx).round() as i64 + offset.max(0);
            for (i, ch) in line.chars().enumerate() {
                self.plot(grid, col0 + i as i64, row + line_no as i64, ch, fill);
            }
        }
    }
}

impl Canvas for TermCanvas {
    fn create_oval(&mut self, bounds: Bounds, fill: Color, outline: Color) -> ItemId {
        self.items.push(Item {
            kind: ItemKind::Oval { bounds },
            fill,
            outline,
        });
        ItemId(self.items.len() - 1)
    }

    fn create_rectangle(&mut self, bounds: Bounds, fill: Color, outline: Color) -> ItemId {
        self.items.push(Item {
            kind: ItemKind::Rect { bounds },
            fill,
            outline,
        });
        ItemId(self.items.len() - 1)
    }

    fn create_text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        _font: &FontSpec,
        fill: Color,
        justify: Justify,
        width: f64,
    ) -> ItemId {
        self.items.push(Item {
            kind: ItemKind::Text {
                x,
                y,
                text: text.to_string(),
                justify,
                width,
            },
            fill,
            outline: fill,
        });
        ItemId(self.items.len() - 1)
    }

    fn set_bounds(&mut self, item: ItemId, new: Bounds) {
        match &mut self.items[item.0].kind {
            ItemKind::Oval { bounds } | ItemKind::Rect { bounds } => *bounds = new,
            ItemKind::Text { x, y, .. } => {
                *x = new.left;
                *y = new.top;
            }
        }
    }

    fn set_fill(&mut self, item: ItemId, fill: Color) {
        self.items[item.0].fill = fill;
    }

    fn set_text(&mut self, item: ItemId, new_text: &str) {
        if let ItemKind::Text { text, .. } = &mut self.items[item.0].kind {
            *text = new_text.to_string();
        }
    }

    fn set_font(&mut self, _item: ItemId, _font: &FontSpec) {
        // Terminal glyphs are fixed-size; font changes only affect
        // measurement, which reads the FontSpec passed per query.
    }

    fn measure_text(&self, font: &FontSpec, text: &str) -> f64 {
        approx_text_width(font, text)
    }
}

impl Drop for TermCanvas {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

/// Translate a crossterm key code into the key-name strings the scene's
/// capture machinery consumes (tk keysym style). Returns `None` for keys
/// with no name in that vocabulary.
pub fn key_name(code: crossterm::event::KeyCode) -> Option<String> {
    use crossterm::event::KeyCode::*;
    Some(match code {
        Char(c) => c.to_string(),
        Backspace => "backspace".to_string(),
        Delete => "delete".to_string(),
        Esc => "escape".to_string(),
        Enter => "return".to_string(),
        Tab => "tab".to_string(),
        Left => "left".to_string(),
        Right => "right".to_string(),
        Up => "up".to_string(),
        Down => "down".to_string(),
        _ => return None,
    })
}

fn to_ct_color(c: Color) -> style::Color {
    match c {
        Color::Named(n) => match n {
            NamedColor::Black => style::Color::Black,
            NamedColor::Red => style::Color::Red,
            NamedColor::Green => style::Color::Green,
            NamedColor::Yellow => style::Color::Yellow,
            NamedColor::Blue => style::Color::Blue,
            NamedColor::Magenta => style::Color::Magenta,
            NamedColor::Cyan => style::Color::Cyan,
            NamedColor::White => style::Color::White,
        },
        Color::Rgb { r, g, b } => style::Color::Rgb { r, g, b },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_canvas() -> TermCanvas {
        // 1:1 pixel-to-cell mapping keeps the assertions readable.
        TermCanvas::new(40.0, 20.0, 40, 20)
    }

    fn glyph(grid: &[Vec<Cell>], col: usize, row: usize) -> char {
        grid[row][col].ch
    }

    #[test]
    fn rect_draws_border_and_fill() {
        let mut canvas = cell_canvas();
        canvas.create_rectangle(
            Bounds::new(2.0, 2.0, 8.0, 6.0),
            Color::Named(NamedColor::Blue),
            Color::WHITE,
        );
        let grid = canvas.rasterize();
        assert_eq!(glyph(&grid, 2, 2), '┌');
        assert_eq!(glyph(&grid, 8, 2), '┐');
        assert_eq!(glyph(&grid, 2, 6), '└');
        assert_eq!(glyph(&grid, 5, 4), '█');
        assert_eq!(grid[4][5].fg, Some(Color::Named(NamedColor::Blue)));
    }

    #[test]
    fn oval_fills_its_center() {
        let mut canvas = cell_canvas();
        canvas.create_oval(Bounds::around(10.0, 10.0, 5.0), Color::WHITE, Color::WHITE);
        let grid = canvas.rasterize();
        assert_eq!(glyph(&grid, 10, 10), '█');
        // Well outside the radius stays empty.
        assert_eq!(glyph(&grid, 20, 10), ' ');
    }

    #[test]
    fn text_justifies_within_its_box() {
        let mut canvas = cell_canvas();
        let font = FontSpec::default();
        canvas.create_text(0.0, 0.0, "ab", &font, Color::WHITE, Justify::Center, 10.0);
        canvas.create_text(0.0, 2.0, "ab", &font, Color::WHITE, Justify::Left, 10.0);
        canvas.create_text(0.0, 4.0, "ab", &font, Color::WHITE, Justify::Right, 10.0);
        let grid = canvas.rasterize();
        assert_eq!(glyph(&grid, 4, 0), 'a');
        assert_eq!(glyph(&grid, 0, 2), 'a');
        assert_eq!(glyph(&grid, 8, 4), 'a');
    }

    #[test]
    fn items_clip_at_grid_edges() {
        let mut canvas = cell_canvas();
        let id = canvas.create_rectangle(Bounds::new(35.0, 15.0, 60.0, 40.0), Color::WHITE, Color::WHITE);
        canvas.set_bounds(id, Bounds::new(-5.0, -5.0, 3.0, 3.0));
        // Must not panic in either position.
        let grid = canvas.rasterize();
        assert_eq!(glyph(&grid, 0, 0), '█');
    }

    #[test]
    fn moving_an_item_moves_its_cells() {
        let mut canvas = cell_canvas();
        let id = canvas.create_oval(Bounds::around(5.0, 5.0, 2.0), Color::WHITE, Color::WHITE);
        canvas.set_bounds(id, Bounds::around(30.0, 10.0, 2.0));
        let grid = canvas.rasterize();
        assert_eq!(glyph(&grid, 5, 5), ' ');
        assert_eq!(glyph(&grid, 30, 10), '█');
    }
}
