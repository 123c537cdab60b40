//! Minimal boilerplate demo — builds a scene programmatically and animates
//! a falling dot, a gliding rectangle, and a typed-out caption.
//!
//! Run with: cargo run --example bounce

use std::time::{Duration, Instant};
use std::thread;

use crossterm::event::{self, Event, KeyCode};

use viscanvas::backend::term::TermCanvas;
use viscanvas::scene::VisCanvas;
use viscanvas::sprite::{Dot, Rect, Text};
use viscanvas::types::{Color, NamedColor};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const FPS: u64 = 30;

fn main() -> anyhow::Result<()> {
    let canvas = TermCanvas::fit_terminal(WIDTH, HEIGHT)?;
    let mut cv = VisCanvas::new(canvas, WIDTH, HEIGHT);

    let dot = cv.add_sprite(
        Dot::new(100.0, 50.0, 12.0)
            .with_fill(Color::Named(NamedColor::Yellow))
            .with_gravity(0.5),
        &["ball"],
    );
    let rect = cv.add_sprite(
        Rect::new(500.0, 300.0, 120.0, 60.0)
            .with_fill(Color::Named(NamedColor::Blue))
            .with_outline(Color::WHITE),
        &["panel"],
    );
    let caption = cv.add_sprite(
        Text::new("", 400.0, 200.0, 30.0)
            .with_fill(Color::WHITE)
            .with_auto_size(false)
            .with_font_size(16),
        &["caption"],
    );

    // Kick everything off: a sideways shove for the ball, a slow glide for
    // the panel, and a one-second type-out for the caption.
    {
        let s = cv.sprite_mut(dot);
        s.sprite.set_velocity(3.0, -6.0);
    }
    {
        let s = cv.sprite_mut(rect);
        s.sprite.change_pos(s.canvas, 100.0, 100.0, 90);
    }
    {
        let s = cv.sprite_mut(caption);
        if let Some(t) = s.sprite.as_text_mut() {
            t.change_text(s.canvas, "tween demo - press q to quit", 30);
        }
    }

    cv.canvas_mut().enter()?;
    let result = run(&mut cv);
    let _ = cv.canvas_mut().leave();
    result
}

fn run(cv: &mut VisCanvas<TermCanvas>) -> anyhow::Result<()> {
    let frame = Duration::from_millis(1000 / FPS);
    loop {
        let deadline = Instant::now() + frame;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(());
                }
            }
        }

        cv.tick();

        // Wrap the ball around once it falls off the stage.
        let ball = cv.get_sprites_with_tag("ball")?[0];
        if cv.sprite(ball).position().1 > cv.height() {
            let s = cv.sprite_mut(ball);
            s.sprite.change_pos(s.canvas, 100.0, 50.0, 0);
            s.sprite.set_velocity(3.0, -6.0);
        }

        cv.canvas_mut().present()?;
        let now = Instant::now();
        if now < deadline {
            thread::sleep(deadline - now);
        }
    }
}
