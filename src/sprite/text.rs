//! Text sprite — a positioned text box with a type-out/erase tween and
//! best-effort auto-fit.
//!
//! Text shares the position-tween semantics of the shapes but carries no
//! velocity or gravity. When auto-fit is on, the font size is recomputed
//! after every text mutation — including every tick of a reveal animation,
//! so the size tracks the currently displayed substring.

use std::num::NonZeroU32;

use crate::backend::{Canvas, ItemId};
use crate::types::{Bounds, Color, FontSpec, Justify};

use super::Motion;

#[derive(Debug, Clone)]
pub struct Text {
    motion: Motion,
    text: String,
    box_width: f64,
    font: FontSpec,
    max_size: u32,
    fill: Color,
    justify: Justify,
    auto_size: bool,

    // Reveal tween: characters per tick, accumulated fractionally. While
    // `deleting`, `char_idx` counts down over the old string; afterwards it
    // counts up over `target_text`.
    d_chars: f64,
    target_text: String,
    deleting: bool,
    char_idx: f64,

    item: Option<ItemId>,
}

impl Text {
    /// A black, centered, auto-sized text box (max font size 100).
    pub fn new(text: impl Into<String>, box_width: f64, x: f64, y: f64) -> Self {
        Text {
            motion: Motion::new(x, y, 0.0),
            text: text.into(),
            box_width,
            font: FontSpec::default(),
            max_size: 100,
            fill: Color::BLACK,
            justify: Justify::Center,
            auto_size: true,
            d_chars: 0.0,
            target_text: String::new(),
            deleting: true,
            char_idx: 0.0,
            item: None,
        }
    }

    pub fn with_font(mut self, family: impl Into<String>) -> Self {
        self.font.family = family.into();
        self
    }

    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font.size = size;
        self
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    pub fn with_auto_size(mut self, auto_size: bool) -> Self {
        self.auto_size = auto_size;
        self
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn position(&self) -> (f64, f64) {
        (self.motion.x, self.motion.y)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    /// True while an erase/type reveal is still running.
    pub fn is_revealing(&self) -> bool {
        self.d_chars != 0.0
    }

    /// Bounding box estimate: the configured box width by one line of the
    /// current font size.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.motion.x,
            self.motion.y,
            self.motion.x + self.box_width,
            self.motion.y + f64::from(self.font.size),
        )
    }

    pub(crate) fn initialize(&mut self, canvas: &mut dyn Canvas) {
        if self.item.is_none() {
            self.item = Some(canvas.create_text(
                self.motion.x,
                self.motion.y,
                &self.text,
                &self.font,
                self.fill,
                self.justify,
                self.box_width,
            ));
            // Initial fit for the supplied text, now that a backend can
            // answer measurement queries.
            self.auto_fit(canvas);
        }
    }

    pub fn delay(&mut self, frames: u32) {
        if self.item.is_none() {
            return;
        }
        self.motion.delay(frames);
    }

    pub fn change_pos(&mut self, canvas: &mut dyn Canvas, x: f64, y: f64, duration: u32) {
        let Some(item) = self.item else { return };
        match NonZeroU32::new(duration) {
            None => {
                self.motion.place(x, y);
                canvas.set_bounds(item, self.bounds());
            }
            Some(d) => self.motion.glide_to(x, y, d),
        }
    }

    /// Replace the text, immediately (`duration == 0`) or via an
    /// erase-then-type animation spread over `duration` ticks.
    ///
    /// The per-tick character delta is `(len(old) + len(new)) / duration`
    /// and may be fractional (one character over several ticks). Calling
    /// again mid-animation restarts the erase phase from whatever substring
    /// is currently showing.
    pub fn change_text(&mut self, canvas: &mut dyn Canvas, new_text: &str, duration: u32) {
        let Some(item) = self.item else { return };
        match NonZeroU32::new(duration) {
            None => {
                self.text = new_text.to_string();
                canvas.set_text(item, new_text);
            }
            Some(d) => {
                let old_len = self.text.chars().count();
                let new_len = new_text.chars().count();
                self.d_chars = (old_len + new_len) as f64 / f64::from(d.get());
                self.target_text = new_text.to_string();
                self.deleting = true;
                self.char_idx = old_len as f64;
            }
        }
        self.auto_fit(canvas);
    }

    pub fn change_color(&mut self, canvas: &mut dyn Canvas, color: Color) {
        let Some(item) = self.item else { return };
        self.fill = color;
        canvas.set_fill(item, color);
    }

    pub fn change_font_family(&mut self, canvas: &mut dyn Canvas, family: impl Into<String>) {
        let Some(item) = self.item else { return };
        self.font.family = family.into();
        canvas.set_font(item, &self.font);
    }

    pub fn change_font_size(&mut self, canvas: &mut dyn Canvas, size: u32) {
        let Some(item) = self.item else { return };
        self.font.size = size;
        canvas.set_font(item, &self.font);
    }

    /// Recompute the font size so the current text fits the box width:
    /// `min(max_size, round(size * box_width / measured_width))`.
    /// Skipped when auto-fit is off or the text is empty.
    fn auto_fit(&mut self, canvas: &mut dyn Canvas) {
        if !self.auto_size || self.text.is_empty() {
            return;
        }
        let measured = canvas.measure_text(&self.font, &self.text);
        if measured <= 0.0 {
            return;
        }
        let scaled = (f64::from(self.font.size) * self.box_width / measured).round();
        let fitted = (scaled as u32).min(self.max_size);
        self.change_font_size(canvas, fitted);
    }

    fn show_now(&mut self, canvas: &mut dyn Canvas, text: String) {
        let Some(item) = self.item else { return };
        self.text = text;
        canvas.set_text(item, &self.text);
        self.auto_fit(canvas);
    }

    pub(crate) fn tick(&mut self, canvas: &mut dyn Canvas) {
        let Some(item) = self.item else { return };

        let adv = self.motion.tick();
        if adv.moved {
            canvas.set_bounds(item, self.bounds());
        }
        if adv.waited {
            return;
        }

        if self.d_chars != 0.0 {
            if self.deleting {
                let shown = self.text.chars().count() as f64;
                if shown <= self.d_chars {
                    self.deleting = false;
                    self.show_now(canvas, String::new());
                } else {
                    self.char_idx -= self.d_chars;
                    let keep = self.char_idx.max(0.0) as usize;
                    let partial: String = self.text.chars().take(keep).collect();
                    self.show_now(canvas, partial);
                }
            } else {
                self.char_idx += self.d_chars;
                let target_len = self.target_text.chars().count();
                if self.char_idx >= target_len as f64 {
                    self.d_chars = 0.0;
                    let full = self.target_text.clone();
                    self.show_now(canvas, full);
                } else {
                    let partial: String =
                        self.target_text.chars().take(self.char_idx as usize).collect();
                    self.show_now(canvas, partial);
                }
            }
        }
    }
}
