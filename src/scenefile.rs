//! Scene files — the JSON-authored description a host can play back.
//!
//! A scene file declares the pixel-space stage, the sprites on it (with
//! their tags and optional button names), and a list of frame-stamped cues
//! that fire sprite operations as the frame counter passes them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::backend::Canvas;
use crate::scene::{SpriteId, VisCanvas};
use crate::sprite::{Dot, Rect, Sprite, Text};
use crate::types::{Color, Justify};

fn default_fps() -> u32 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_fps")]
    pub fps: u32,
    pub sprites: Vec<SpriteDef>,
    #[serde(default)]
    pub cues: Vec<Cue>,
}

impl SceneFile {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse scene file")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteDef {
    #[serde(flatten)]
    pub shape: ShapeDef,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Registers the sprite as a clickable button under this name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDef {
    Dot {
        x: f64,
        y: f64,
        r: f64,
        #[serde(default)]
        fill: Color,
        #[serde(default)]
        outline: Color,
        #[serde(default)]
        gravity: f64,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        #[serde(default)]
        fill: Color,
        #[serde(default)]
        outline: Color,
        #[serde(default)]
        gravity: f64,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        width: f64,
        #[serde(default)]
        fill: Color,
        #[serde(default)]
        justify: Justify,
        #[serde(default)]
        font_size: Option<u32>,
        #[serde(default)]
        auto_size: Option<bool>,
    },
}

impl ShapeDef {
    fn build(&self) -> Sprite {
        match self {
            ShapeDef::Dot {
                x,
                y,
                r,
                fill,
                outline,
                gravity,
            } => Dot::new(*x, *y, *r)
                .with_fill(*fill)
                .with_outline(*outline)
                .with_gravity(*gravity)
                .into(),
            ShapeDef::Rect {
                x,
                y,
                w,
                h,
                fill,
                outline,
                gravity,
            } => Rect::new(*x, *y, *w, *h)
                .with_fill(*fill)
                .with_outline(*outline)
                .with_gravity(*gravity)
                .into(),
            ShapeDef::Text {
                x,
                y,
                text,
                width,
                fill,
                justify,
                font_size,
                auto_size,
            } => {
                let mut t = Text::new(text.clone(), *width, *x, *y)
                    .with_fill(*fill)
                    .with_justify(*justify);
                if let Some(size) = font_size {
                    t = t.with_font_size(*size);
                }
                if let Some(auto) = auto_size {
                    t = t.with_auto_size(*auto);
                }
                t.into()
            }
        }
    }
}

/// One scripted operation, fired when the frame counter reaches `frame`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cue {
    pub frame: u64,
    /// Index into the scene file's sprite list.
    pub sprite: usize,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    ChangePos {
        x: f64,
        y: f64,
        #[serde(default)]
        duration: u32,
    },
    ChangeSize {
        #[serde(default)]
        r: Option<f64>,
        #[serde(default)]
        w: Option<f64>,
        #[serde(default)]
        h: Option<f64>,
        #[serde(default)]
        duration: u32,
    },
    ChangeText {
        text: String,
        #[serde(default)]
        duration: u32,
    },
    ChangeColor {
        color: Color,
    },
    SetVelocity {
        vx: f64,
        vy: f64,
    },
    Delay {
        frames: u32,
    },
}

/// A scene built from a [`SceneFile`], with its cue schedule.
pub struct LoadedScene<C: Canvas> {
    pub scene: VisCanvas<C>,
    ids: Vec<SpriteId>,
    cues: Vec<Cue>,
    next_cue: usize,
}

impl<C: Canvas> LoadedScene<C> {
    /// Instantiate every sprite of `file` onto `canvas`. Cues are sorted by
    /// frame so playback can fire them in a single forward pass.
    pub fn build(file: &SceneFile, canvas: C) -> Result<Self> {
        let mut scene = VisCanvas::new(canvas, file.width, file.height);
        let mut ids = Vec::with_capacity(file.sprites.len());
        for def in &file.sprites {
            let tags: Vec<&str> = def.tags.iter().map(String::as_str).collect();
            let id = scene.add_sprite(def.shape.build(), &tags);
            if let Some(name) = &def.button {
                scene.add_button(id, name);
            }
            ids.push(id);
        }

        let mut cues = file.cues.clone();
        cues.sort_by_key(|c| c.frame);
        for cue in &cues {
            anyhow::ensure!(
                cue.sprite < ids.len(),
                "cue at frame {} targets sprite {} but only {} exist",
                cue.frame,
                cue.sprite,
                ids.len(),
            );
        }

        Ok(LoadedScene {
            scene,
            ids,
            cues,
            next_cue: 0,
        })
    }

    /// Fire every cue due at the current frame, then tick the scene.
    pub fn step(&mut self) {
        let frame = self.scene.frames_passed();
        while self.next_cue < self.cues.len() && self.cues[self.next_cue].frame <= frame {
            let cue = self.cues[self.next_cue].clone();
            self.next_cue += 1;
            self.apply(&cue);
        }
        self.scene.tick();
    }

    pub fn finished_cues(&self) -> bool {
        self.next_cue >= self.cues.len()
    }

    fn apply(&mut self, cue: &Cue) {
        let staged = self.scene.sprite_mut(self.ids[cue.sprite]);
        let (sprite, canvas) = (staged.sprite, staged.canvas);
        match &cue.action {
            Action::ChangePos { x, y, duration } => sprite.change_pos(canvas, *x, *y, *duration),
            Action::ChangeSize { r, w, h, duration } => match sprite {
                Sprite::Dot(dot) => {
                    if let Some(r) = r {
                        dot.change_size(canvas, *r, *duration);
                    }
                }
                Sprite::Rect(rect) => {
                    let (cur_w, cur_h) = rect.size();
                    rect.change_size(
                        canvas,
                        w.unwrap_or(cur_w),
                        h.unwrap_or(cur_h),
                        *duration,
                    );
                }
                Sprite::Text(_) => {}
            },
            Action::ChangeText { text, duration } => {
                if let Some(t) = sprite.as_text_mut() {
                    t.change_text(canvas, text, *duration);
                }
            }
            Action::ChangeColor { color } => sprite.change_color(canvas, *color),
            Action::SetVelocity { vx, vy } => sprite.set_velocity(*vx, *vy),
            Action::Delay { frames } => sprite.delay(*frames),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::HeadlessCanvas;

    const SCENE: &str = r#"{
        "width": 800,
        "height": 400,
        "sprites": [
            {"type": "dot", "x": 50, "y": 50, "r": 10, "tags": ["car"]},
            {"type": "rect", "x": 10, "y": 10, "w": 100, "h": 50, "button": "start"},
            {"type": "text", "x": 100, "y": 300, "text": "P1", "width": 200,
             "fill": "red", "auto_size": false}
        ],
        "cues": [
            {"frame": 5, "sprite": 0, "action": "change_pos", "x": 250, "y": 150, "duration": 10},
            {"frame": 0, "sprite": 2, "action": "change_text", "text": "P2"}
        ]
    }"#;

    #[test]
    fn parses_and_builds() {
        let file = SceneFile::from_json(SCENE).unwrap();
        assert_eq!(file.fps, 30);
        assert_eq!(file.sprites.len(), 3);

        let loaded = LoadedScene::build(&file, HeadlessCanvas::new()).unwrap();
        assert_eq!(loaded.scene.canvas().item_count(), 3);
        assert!(loaded.scene.get_sprites_with_tag("car").is_ok());
        assert_eq!(loaded.scene.update_mouse_click(20.0, 20.0), vec!["start"]);
    }

    #[test]
    fn cues_fire_in_frame_order() {
        let file = SceneFile::from_json(SCENE).unwrap();
        let mut loaded = LoadedScene::build(&file, HeadlessCanvas::new()).unwrap();

        // Frame-0 cue fires on the first step.
        loaded.step();
        let car = loaded.scene.get_sprites_with_tag("car").unwrap()[0];
        if let Sprite::Text(t) = loaded.scene.sprite(loaded.ids[2]) {
            assert_eq!(t.text(), "P2");
        } else {
            panic!("sprite 2 should be text");
        }

        // The frame-5 cue starts a 10-tick glide; finished by frame 15.
        for _ in 0..20 {
            loaded.step();
        }
        assert!(loaded.finished_cues());
        assert_eq!(loaded.scene.sprite(car).position(), (250.0, 150.0));
    }

    #[test]
    fn cue_out_of_range_is_rejected() {
        let mut file = SceneFile::from_json(SCENE).unwrap();
        file.cues.push(Cue {
            frame: 0,
            sprite: 99,
            action: Action::Delay { frames: 1 },
        });
        assert!(LoadedScene::build(&file, HeadlessCanvas::new()).is_err());
    }

    #[test]
    fn color_roundtrips_named_and_rgb() {
        let json = r#"{"r": 170, "g": 170, "b": 170}"#;
        let c: Color = serde_json::from_str(json).unwrap();
        assert_eq!(c, Color::Rgb { r: 170, g: 170, b: 170 });
        let named: Color = serde_json::from_str("\"cyan\"").unwrap();
        assert!(matches!(named, Color::Named(_)));
    }
}
