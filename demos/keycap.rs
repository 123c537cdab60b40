//! Input demo — keyboard text capture and a clickable button.
//!
//! Type to fill the entry line (backspace edits, Enter finishes), click
//! the grey button to flash it, press Esc after capture ends to quit.
//!
//! Run with: cargo run --example keycap

use std::time::{Duration, Instant};
use std::thread;

use crossterm::event::{self, Event, KeyCode, MouseButton, MouseEventKind};
use crossterm::execute;

use viscanvas::backend::term::{key_name, TermCanvas};
use viscanvas::scene::VisCanvas;
use viscanvas::sprite::{Rect, Text};
use viscanvas::types::{Color, NamedColor};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const FPS: u64 = 30;

fn main() -> anyhow::Result<()> {
    let canvas = TermCanvas::fit_terminal(WIDTH, HEIGHT)?;
    let mut cv = VisCanvas::new(canvas, WIDTH, HEIGHT);

    cv.add_sprite(
        Text::new("type something:", 300.0, 50.0, 60.0)
            .with_fill(Color::WHITE)
            .with_auto_size(false)
            .with_font_size(16),
        &["label"],
    );
    let entry = cv.add_sprite(
        Text::new("", 600.0, 50.0, 120.0)
            .with_fill(Color::Named(NamedColor::Green))
            .with_auto_size(false)
            .with_font_size(16),
        &["entry"],
    );
    let button = cv.add_button_and_sprite(
        Rect::new(50.0, 250.0, 150.0, 80.0)
            .with_fill(Color::Rgb {
                r: 170,
                g: 170,
                b: 170,
            })
            .with_outline(Color::WHITE),
        "flash",
    );

    cv.start_text_input(false, true);

    cv.canvas_mut().enter()?;
    execute!(std::io::stdout(), event::EnableMouseCapture)?;
    let result = run(&mut cv, entry, button);
    let _ = execute!(std::io::stdout(), event::DisableMouseCapture);
    let _ = cv.canvas_mut().leave();
    result
}

fn run(
    cv: &mut VisCanvas<TermCanvas>,
    entry: viscanvas::scene::SpriteId,
    button: viscanvas::scene::SpriteId,
) -> anyhow::Result<()> {
    let frame = Duration::from_millis(1000 / FPS);
    let mut flash_until = 0u64;

    loop {
        let deadline = Instant::now() + frame;
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if cv.is_capturing_text() {
                        if let Some(name) = key_name(key.code) {
                            cv.update_keyboard_input(&name);
                        }
                        let typed = cv.get_text_input().to_string();
                        let s = cv.sprite_mut(entry);
                        if let Some(t) = s.sprite.as_text_mut() {
                            t.change_text(s.canvas, &typed, 0);
                        }
                    } else if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        let (x, y) = cv.canvas().to_pixel(mouse.column, mouse.row);
                        if cv.update_mouse_click(x, y).into_iter().any(|n| n == "flash") {
                            let s = cv.sprite_mut(button);
                            s.sprite
                                .change_color(s.canvas, Color::Named(NamedColor::Red));
                            flash_until = cv.frames_passed() + 15;
                        }
                    }
                }
                _ => {}
            }
        }

        cv.tick();
        if flash_until != 0 && cv.frames_passed() >= flash_until {
            flash_until = 0;
            let s = cv.sprite_mut(button);
            s.sprite.change_color(
                s.canvas,
                Color::Rgb {
                    r: 170,
                    g: 170,
                    b: 170,
                },
            );
        }

        cv.canvas_mut().present()?;
        let now = Instant::now();
        if now < deadline {
            thread::sleep(deadline - now);
        }
    }
}
