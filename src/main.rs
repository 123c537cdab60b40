use std::time::{Duration, Instant};
use std::{fs, process, thread};

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyCode, MouseButton, MouseEventKind};
use crossterm::execute;

use viscanvas::backend::term::{key_name, TermCanvas};
use viscanvas::scenefile::{LoadedScene, SceneFile};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const PLAY_USAGE: &str = "viscanvas play <scene.json>";

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("play") => {
            let path = args.next().context(PLAY_USAGE)?;
            play(&path)
        }
        _ => bail!("viscanvas — frame-driven sprite animation player\n\nUsage:\n  {PLAY_USAGE}"),
    }
}

fn play(path: &str) -> Result<()> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let file = SceneFile::from_json(&json).with_context(|| format!("Failed to parse {path}"))?;

    let canvas = TermCanvas::fit_terminal(file.width, file.height)?;
    let frame = Duration::from_millis(1000 / u64::from(file.fps.max(1)));
    let mut loaded = LoadedScene::build(&file, canvas)?;

    loaded.scene.canvas_mut().enter()?;
    execute!(std::io::stdout(), event::EnableMouseCapture)?;

    let result = run_loop(&mut loaded, frame);

    // Always restore terminal state.
    let _ = execute!(std::io::stdout(), event::DisableMouseCapture);
    let _ = loaded.scene.canvas_mut().leave();

    result
}

fn run_loop(loaded: &mut LoadedScene<TermCanvas>, frame: Duration) -> Result<()> {
    loop {
        let deadline = Instant::now() + frame;

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    // While capturing, every key belongs to the scene;
                    // otherwise q / Esc quit playback.
                    if loaded.scene.is_capturing_text() {
                        if let Some(name) = key_name(key.code) {
                            loaded.scene.update_keyboard_input(&name);
                        }
                    } else if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        let (x, y) = loaded
                            .scene
                            .canvas()
                            .to_pixel(mouse.column, mouse.row);
                        let hits = loaded.scene.update_mouse_click(x, y);
                        for name in hits {
                            log::debug!("button activated: {name}");
                        }
                    }
                }
                _ => {}
            }
        }

        loaded.step();
        loaded.scene.canvas_mut().present()?;

        let now = Instant::now();
        if now < deadline {
            thread::sleep(deadline - now);
        }
    }
}
