//! Rect sprite — a filled rectangle addressed by its top-left corner.

use std::num::NonZeroU32;

use crate::backend::{Canvas, ItemId};
use crate::types::{Bounds, Color};

use super::tween::Glide;
use super::Motion;

#[derive(Debug, Clone)]
pub struct Rect {
    motion: Motion,
    w: f64,
    h: f64,
    fill: Color,
    outline: Color,
    // Width and height glide independently; both use the same snap rule.
    w_tween: Option<Glide>,
    h_tween: Option<Glide>,
    item: Option<ItemId>,
}

impl Rect {
    /// A white rectangle with top-left corner `(x, y)`, no gravity.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect {
            motion: Motion::new(x, y, 0.0),
            w,
            h,
            fill: Color::WHITE,
            outline: Color::WHITE,
            w_tween: None,
            h_tween: None,
            item: None,
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_outline(mut self, outline: Color) -> Self {
        self.outline = outline;
        self
    }

    pub fn with_gravity(mut self, scale: f64) -> Self {
        self.motion = Motion::new(self.motion.x, self.motion.y, scale);
        self
    }

    pub fn position(&self) -> (f64, f64) {
        (self.motion.x, self.motion.y)
    }

    pub fn size(&self) -> (f64, f64) {
        (self.w, self.h)
    }

    pub fn velocity(&self) -> (f64, f64) {
        self.motion.velocity()
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.motion.x,
            self.motion.y,
            self.motion.x + self.w,
            self.motion.y + self.h,
        )
    }

    pub(crate) fn initialize(&mut self, canvas: &mut dyn Canvas) {
        if self.item.is_none() {
            self.item = Some(canvas.create_rectangle(self.bounds(), self.fill, self.outline));
        }
    }

    pub fn delay(&mut self, frames: u32) {
        if self.item.is_none() {
            return;
        }
        self.motion.delay(frames);
    }

    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        if self.item.is_none() {
            return;
        }
        self.motion.set_velocity(vx, vy);
    }

    pub fn add_velocity(&mut self, vx: f64, vy: f64) {
        if self.item.is_none() {
            return;
        }
        self.motion.add_velocity(vx, vy);
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

    pub fn change_size(&mut self, canvas: &mut dyn Canvas, w: f64, h: f64, duration: u32) {
        let Some(item) = self.item else { return };
        match NonZeroU32::new(duration) {
            None => {
                self.w = w;
                self.h = h;
                canvas.set_bounds(item, self.bounds());
            }
            Some(d) => {
                self.w_tween = Some(Glide::new(self.w, w, d));
                self.h_tween = Some(Glide::new(self.h, h, d));
            }
        }
    }

    pub fn change_color(&mut self, canvas: &mut dyn Canvas, color: Color) {
        let Some(item) = self.item else { return };
        self.fill = color;
        canvas.set_fill(item, color);
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

        let mut resized = false;
        if let Some(mut glide) = self.w_tween {
            let (w, done) = glide.step(self.w);
            self.w = w;
            self.w_tween = if done { None } else { Some(glide) };
            resized = true;
        }
        if let Some(mut glide) = self.h_tween {
            let (h, done) = glide.step(self.h);
            self.h = h;
            self.h_tween = if done { None } else { Some(glide) };
            resized = true;
        }
        if resized {
            canvas.set_bounds(item, self.bounds());
        }
    }
}
