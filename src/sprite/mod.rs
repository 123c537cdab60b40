//! Sprites — the drawable, tweened entities a scene owns.
//!
//! One shared [`Motion`] value carries everything position-related
//! (velocity, gravity, wait counter, in-flight position tween); the closed
//! [`Sprite`] enum dispatches shape-specific behavior across the three
//! variants. Shape-specific size tweening lives with each variant.

mod dot;
mod rect;
mod text;
pub mod tween;

pub use self::dot::Dot;
pub use self::rect::Rect;
pub use self::text::Text;

use std::num::NonZeroU32;

use crate::backend::Canvas;
use crate::types::{Bounds, Color};

use self::tween::PosTween;

/// Outcome of advancing a [`Motion`] one tick.
#[derive(Debug, Clone, Copy)]
pub struct Advance {
    /// The tick was consumed by a pending delay; all animation was skipped.
    pub waited: bool,
    /// The position changed and the backend item needs a move.
    pub moved: bool,
}

/// The tweened transform shared by every sprite variant.
///
/// Positions are real-valued pixels. Velocity is applied every non-waiting
/// tick, then any active tween steps, then gravity accrues onto `vy`
/// (cumulative and unbounded; there is no ground).
#[derive(Debug, Clone)]
pub struct Motion {
    pub x: f64,
    pub y: f64,
    vx: f64,
    vy: f64,
    gravity_scale: f64,
    wait: u32,
    tween: Option<PosTween>,
}

impl Motion {
    pub fn new(x: f64, y: f64, gravity_scale: f64) -> Self {
        Motion {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            gravity_scale,
            wait: 0,
            tween: None,
        }
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }

    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        self.vx = vx;
        self.vy = vy;
    }

    pub fn add_velocity(&mut self, vx: f64, vy: f64) {
        self.vx += vx;
        self.vy += vy;
    }

    pub fn delay(&mut self, frames: u32) {
        self.wait = frames;
    }

    pub fn has_tween(&self) -> bool {
        self.tween.is_some()
    }

    /// Jump straight to `(x, y)`, discarding any in-flight tween.
    pub fn place(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.tween = None;
    }

    /// Start (or overwrite) a tween toward `(x, y)` over `duration` ticks.
    pub fn glide_to(&mut self, x: f64, y: f64, duration: NonZeroU32) {
        self.tween = Some(PosTween::new((self.x, self.y), (x, y), duration));
    }

    /// Advance one tick. A pending delay consumes the tick whole: the tween
    /// keeps its remaining duration, so motion time is preserved, and
    /// gravity does not accrue.
    pub fn tick(&mut self) -> Advance {
        if self.wait > 0 {
            self.wait -= 1;
            return Advance {
                waited: true,
                moved: false,
            };
        }

        let mut moved = false;
        if self.vx != 0.0 || self.vy != 0.0 {
            self.x += self.vx;
            self.y += self.vy;
            moved = true;
        }
        if let Some(tween) = &mut self.tween {
            let (nx, ny, done) = tween.step(self.x, self.y);
            self.x = nx;
            self.y = ny;
            moved = true;
            if done {
                self.tween = None;
            }
        }
        self.vy += self.gravity_scale;

        Advance {
            waited: false,
            moved,
        }
    }
}

/// A drawable entity. Constructed detached (pure data); attached to exactly
/// one scene, once, which allocates its backend item. Mutators on a
/// detached sprite are silent no-ops.
#[derive(Debug, Clone)]
pub enum Sprite {
    Dot(Dot),
    Rect(Rect),
    Text(Text),
}

impl Sprite {
    pub(crate) fn initialize(&mut self, canvas: &mut dyn Canvas) {
        match self {
            Sprite::Dot(s) => s.initialize(canvas),
            Sprite::Rect(s) => s.initialize(canvas),
            Sprite::Text(s) => s.initialize(canvas),
        }
    }

    pub(crate) fn tick(&mut self, canvas: &mut dyn Canvas) {
        match self {
            Sprite::Dot(s) => s.tick(canvas),
            Sprite::Rect(s) => s.tick(canvas),
            Sprite::Text(s) => s.tick(canvas),
        }
    }

    pub fn delay(&mut self, frames: u32) {
        match self {
            Sprite::Dot(s) => s.delay(frames),
            Sprite::Rect(s) => s.delay(frames),
            Sprite::Text(s) => s.delay(frames),
        }
    }

    pub fn change_pos(&mut self, canvas: &mut dyn Canvas, x: f64, y: f64, duration: u32) {
        match self {
            Sprite::Dot(s) => s.change_pos(canvas, x, y, duration),
            Sprite::Rect(s) => s.change_pos(canvas, x, y, duration),
            Sprite::Text(s) => s.change_pos(canvas, x, y, duration),
        }
    }

    pub fn change_color(&mut self, canvas: &mut dyn Canvas, color: Color) {
        match self {
            Sprite::Dot(s) => s.change_color(canvas, color),
            Sprite::Rect(s) => s.change_color(canvas, color),
            Sprite::Text(s) => s.change_color(canvas, color),
        }
    }

    /// Text sprites carry no velocity; this is a no-op for them.
    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        match self {
            Sprite::Dot(s) => s.set_velocity(vx, vy),
            Sprite::Rect(s) => s.set_velocity(vx, vy),
            Sprite::Text(_) => {}
        }
    }

    /// Text sprites carry no velocity; this is a no-op for them.
    pub fn add_velocity(&mut self, vx: f64, vy: f64) {
        match self {
            Sprite::Dot(s) => s.add_velocity(vx, vy),
            Sprite::Rect(s) => s.add_velocity(vx, vy),
            Sprite::Text(_) => {}
        }
    }

    pub fn position(&self) -> (f64, f64) {
        match self {
            Sprite::Dot(s) => s.position(),
            Sprite::Rect(s) => s.position(),
            Sprite::Text(s) => s.position(),
        }
    }

    /// Current axis-aligned bounding box, used for button hit-testing.
    pub fn bounds(&self) -> Bounds {
        match self {
            Sprite::Dot(s) => s.bounds(),
            Sprite::Rect(s) => s.bounds(),
            Sprite::Text(s) => s.bounds(),
        }
    }

    pub fn as_dot_mut(&mut self) -> Option<&mut Dot> {
        match self {
            Sprite::Dot(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_rect_mut(&mut self) -> Option<&mut Rect> {
        match self {
            Sprite::Rect(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Sprite::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Dot> for Sprite {
    fn from(s: Dot) -> Self {
        Sprite::Dot(s)
    }
}

impl From<Rect> for Sprite {
    fn from(s: Rect) -> Self {
        Sprite::Rect(s)
    }
}

impl From<Text> for Sprite {
    fn from(s: Text) -> Self {
        Sprite::Text(s)
    }
}
