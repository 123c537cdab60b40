//! Dot sprite — a filled oval addressed by its center.

use std::num::NonZeroU32;

use crate::backend::{Canvas, ItemId};
use crate::types::{Bounds, Color};

use super::tween::Glide;
use super::Motion;

#[derive(Debug, Clone)]
pub struct Dot {
    motion: Motion,
    r: f64,
    fill: Color,
    outline: Color,
    size_tween: Option<Glide>,
    item: Option<ItemId>,
}

impl Dot {
    /// A white dot centered on `(x, y)` with radius `r`, no gravity.
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Dot {
            motion: Motion::new(x, y, 0.0),
            r,
            fill: Color::WHITE,
            outline: Color::WHITE,
            size_tween: None,
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

    /// Gravity in pixels/tick² added to the vertical velocity each tick.
    pub fn with_gravity(mut self, scale: f64) -> Self {
        self.motion = Motion::new(self.motion.x, self.motion.y, scale);
        self
    }

    pub fn position(&self) -> (f64, f64) {
        (self.motion.x, self.motion.y)
    }

    pub fn radius(&self) -> f64 {
        self.r
    }

    pub fn velocity(&self) -> (f64, f64) {
        self.motion.velocity()
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::around(self.motion.x, self.motion.y, self.r)
    }

    pub(crate) fn initialize(&mut self, canvas: &mut dyn Canvas) {
        if self.item.is_none() {
            self.item = Some(canvas.create_oval(self.bounds(), self.fill, self.outline));
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

    pub fn change_size(&mut self, canvas: &mut dyn Canvas, r: f64, duration: u32) {
        let Some(item) = self.item else { return };
        match NonZeroU32::new(duration) {
            None => {
                self.r = r;
                canvas.set_bounds(item, self.bounds());
            }
            Some(d) => self.size_tween = Some(Glide::new(self.r, r, d)),
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

        if let Some(mut glide) = self.size_tween {
            let (r, done) = glide.step(self.r);
            self.r = r;
            self.size_tween = if done { None } else { Some(glide) };
            canvas.set_bounds(item, self.bounds());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::HeadlessCanvas;

    fn attached(x: f64, y: f64, r: f64) -> (Dot, HeadlessCanvas, ItemId) {
        let mut canvas = HeadlessCanvas::new();
        let mut dot = Dot::new(x, y, r);
        dot.initialize(&mut canvas);
        let item = dot.item.unwrap();
        (dot, canvas, item)
    }

    #[test]
    fn mutators_noop_before_attach() {
        let mut canvas = HeadlessCanvas::new();
        let mut dot = Dot::new(0.0, 0.0, 5.0);
        dot.change_pos(&mut canvas, 50.0, 50.0, 0);
        dot.change_size(&mut canvas, 10.0, 0);
        dot.set_velocity(1.0, 1.0);
        dot.delay(3);
        assert_eq!(dot.position(), (0.0, 0.0));
        assert_eq!(dot.radius(), 5.0);
        assert_eq!(canvas.item_count(), 0);
    }

    #[test]
    fn initialize_is_idempotent() {
        let (mut dot, mut canvas, item) = attached(10.0, 10.0, 5.0);
        dot.initialize(&mut canvas);
        assert_eq!(dot.item, Some(item));
        assert_eq!(canvas.item_count(), 1);
    }

    #[test]
    fn immediate_move_updates_backend_at_once() {
        let (mut dot, mut canvas, item) = attached(0.0, 0.0, 5.0);
        dot.change_pos(&mut canvas, 40.0, 30.0, 0);
        assert_eq!(dot.position(), (40.0, 30.0));
        assert_eq!(canvas.item(item).bounds, Bounds::around(40.0, 30.0, 5.0));
    }

    #[test]
    fn tweened_move_lands_after_duration() {
        let (mut dot, mut canvas, item) = attached(0.0, 0.0, 5.0);
        dot.change_pos(&mut canvas, 30.0, 15.0, 30);
        // Backend untouched until the first tick.
        assert_eq!(canvas.item(item).bounds, Bounds::around(0.0, 0.0, 5.0));
        for _ in 0..30 {
            dot.tick(&mut canvas);
        }
        assert_eq!(dot.position(), (30.0, 15.0));
        assert_eq!(canvas.item(item).bounds, Bounds::around(30.0, 15.0, 5.0));
    }

    #[test]
    fn radius_glide_snaps_onto_target() {
        let (mut dot, mut canvas, _) = attached(0.0, 0.0, 5.0);
        dot.change_size(&mut canvas, 20.0, 5);
        let mut seen = Vec::new();
        for _ in 0..10 {
            dot.tick(&mut canvas);
            seen.push(dot.radius());
        }
        assert_eq!(&seen[..4], &[8.0, 11.0, 14.0, 20.0]);
        // Settled: further ticks change nothing.
        assert!(seen[4..].iter().all(|&r| r == 20.0));
    }

    #[test]
    fn change_color_is_immediate_fill_only() {
        let (mut dot, mut canvas, item) = attached(0.0, 0.0, 5.0);
        dot.change_color(&mut canvas, Color::BLACK);
        assert_eq!(canvas.item(item).fill, Color::BLACK);
        assert_eq!(canvas.item(item).outline, Color::WHITE);
    }
}
