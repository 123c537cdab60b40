//! Scene — the canvas-owning sprite collection.
//!
//! A [`VisCanvas`] owns the backend canvas and every attached sprite,
//! advances all animated state once per externally driven [`tick`], and
//! routes host input: keyboard text capture and click dispatch against
//! registered buttons.
//!
//! Everything is single-threaded and cooperative. Nothing here blocks; the
//! host's timer decides the cadence (30 FPS is the reference calibration
//! for tick-denominated durations).
//!
//! [`tick`]: VisCanvas::tick

pub mod input;

use std::collections::HashMap;

use log::{debug, trace};
use thiserror::Error;

use crate::backend::Canvas;
use crate::sprite::Sprite;
use crate::types::Bounds;

use self::input::{Captured, TextCapture};

#[derive(Debug, Error)]
pub enum SceneError {
    /// Tag lookups fail loudly: an empty result and a never-registered tag
    /// are different situations.
    #[error("no sprite was ever tagged {0:?}")]
    UnknownTag(String),
}

/// Handle to a sprite owned by a [`VisCanvas`]. Indices are stable: sprites
/// live as long as their scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(usize);

#[derive(Debug)]
struct Button {
    name: String,
    sprite: SpriteId,
}

/// Mutable access to one sprite together with the backend it draws on.
/// Sprite mutators need both halves, and the borrow checker will not hand
/// them out separately through `&mut VisCanvas`.
pub struct Staged<'a, C> {
    pub sprite: &'a mut Sprite,
    pub canvas: &'a mut C,
}

pub struct VisCanvas<C> {
    canvas: C,
    width: f64,
    height: f64,
    frames_passed: u64,
    sprites: Vec<Sprite>,
    tags: HashMap<String, Vec<SpriteId>>,
    buttons: Vec<Button>,
    paused: bool,
    capture: TextCapture,
}

impl<C: Canvas> VisCanvas<C> {
    pub fn new(canvas: C, width: f64, height: f64) -> Self {
        VisCanvas {
            canvas,
            width,
            height,
            frames_passed: 0,
            sprites: Vec::new(),
            tags: HashMap::new(),
            buttons: Vec::new(),
            paused: false,
            capture: TextCapture::default(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn frames_passed(&self) -> u64 {
        self.frames_passed
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Attach a sprite: allocate its backend item, append it to the draw
    /// order (later sprites draw on top), and index it under each tag.
    /// Tags are created lazily on first use.
    pub fn add_sprite(&mut self, sprite: impl Into<Sprite>, tags: &[&str]) -> SpriteId {
        let mut sprite = sprite.into();
        sprite.initialize(&mut self.canvas);
        let id = SpriteId(self.sprites.len());
        self.sprites.push(sprite);
        for tag in tags {
            self.tags.entry((*tag).to_string()).or_default().push(id);
        }
        debug!("added sprite {} with tags {tags:?}", id.0);
        id
    }

    /// Attach a sprite and register its bounding box as a clickable button
    /// reported under `name` by [`update_mouse_click`].
    ///
    /// [`update_mouse_click`]: VisCanvas::update_mouse_click
    pub fn add_button_and_sprite(&mut self, sprite: impl Into<Sprite>, name: &str) -> SpriteId {
        let id = self.add_sprite(sprite, &[]);
        self.add_button(id, name);
        id
    }

    /// Register an already-attached sprite as a clickable button.
    pub fn add_button(&mut self, id: SpriteId, name: &str) {
        self.buttons.push(Button {
            name: name.to_string(),
            sprite: id,
        });
        debug!("registered button {name:?} on sprite {}", id.0);
    }

    /// All sprites added under `tag`, in registration order. Fails for a
    /// tag no sprite was ever added with.
    pub fn get_sprites_with_tag(&self, tag: &str) -> Result<&[SpriteId], SceneError> {
        self.tags
            .get(tag)
            .map(Vec::as_slice)
            .ok_or_else(|| SceneError::UnknownTag(tag.to_string()))
    }

    pub fn sprite(&self, id: SpriteId) -> &Sprite {
        &self.sprites[id.0]
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Staged<'_, C> {
        Staged {
            sprite: &mut self.sprites[id.0],
            canvas: &mut self.canvas,
        }
    }

    // -----------------------------------------------------------------------
    // Ticking
    // -----------------------------------------------------------------------

    /// Advance one frame: a complete no-op while paused, otherwise bumps the
    /// frame counter and steps every sprite in registration order.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.frames_passed += 1;
        for sprite in &mut self.sprites {
            sprite.tick(&mut self.canvas);
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // -----------------------------------------------------------------------
    // Keyboard capture
    // -----------------------------------------------------------------------

    /// Begin accumulating keystrokes. With `pause`, ticking is suspended
    /// until capture ends — unless the scene was already paused, in which
    /// case that pause is left alone and capture will not lift it either.
    /// With `end_on_exit_key`, escape/enter/return terminate the capture.
    pub fn start_text_input(&mut self, pause: bool, end_on_exit_key: bool) {
        let owns_pause = pause && !self.paused;
        if pause {
            self.paused = true;
        }
        self.capture.start(owns_pause, end_on_exit_key);
        debug!("text capture started (pause: {pause}, end_on_exit_key: {end_on_exit_key})");
    }

    /// End capture. Unpauses only if capture was what paused the scene.
    pub fn stop_text_input(&mut self) {
        if self.capture.stop() {
            self.paused = false;
        }
        debug!("text capture stopped with {:?}", self.capture.buffer());
    }

    /// Forward one raw key name. Does nothing when not capturing.
    pub fn update_keyboard_input(&mut self, key: &str) {
        if !self.capture.is_capturing() {
            return;
        }
        if self.capture.feed(key) == Captured::ExitRequested {
            self.stop_text_input();
        }
    }

    pub fn get_text_input(&self) -> &str {
        self.capture.buffer()
    }

    pub fn is_capturing_text(&self) -> bool {
        self.capture.is_capturing()
    }

    // -----------------------------------------------------------------------
    // Click dispatch
    // -----------------------------------------------------------------------

    /// Names of every registered button whose sprite bounding box contains
    /// the click, in button registration order. Boxes are computed from the
    /// sprite's current state, so moving buttons stay clickable.
    pub fn update_mouse_click(&self, x: f64, y: f64) -> Vec<String> {
        let mut hits = Vec::new();
        for button in &self.buttons {
            if self.sprites[button.sprite.0].bounds().contains(x, y) {
                trace!("click ({x}, {y}) hit button {:?}", button.name);
                hits.push(button.name.clone());
            }
        }
        hits
    }
}

/// Corner-containment overlap test between two boxes. A toy check for host
/// game logic, not a solver: boxes that cross without containing a corner
/// of each other are not detected.
pub fn check_collision(a: &Bounds, b: &Bounds) -> bool {
    (a.left > b.left && a.left < b.right && a.top > b.top && a.top < b.bottom)
        || (b.left > a.left && b.left < a.right && b.top > a.top && b.top < a.bottom)
}
