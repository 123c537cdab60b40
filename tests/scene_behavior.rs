//! End-to-end behavior of a scene over a headless backend: every property
//! a host relies on when scripting animations against tick counts.

use viscanvas::backend::headless::{HeadlessCanvas, ItemShape};
use viscanvas::scene::{SceneError, VisCanvas};
use viscanvas::sprite::{Dot, Rect, Sprite, Text};
use viscanvas::types::Color;

fn scene() -> VisCanvas<HeadlessCanvas> {
    VisCanvas::new(HeadlessCanvas::new(), 800.0, 400.0)
}

#[test]
fn immediate_and_tweened_moves_are_equivalent() {
    let mut cv = scene();
    let a = cv.add_sprite(Dot::new(0.0, 0.0, 5.0), &[]);
    let b = cv.add_sprite(Dot::new(0.0, 0.0, 5.0), &[]);

    {
        let s = cv.sprite_mut(a);
        s.sprite.change_pos(s.canvas, 120.0, 80.0, 0);
    }
    {
        let s = cv.sprite_mut(b);
        s.sprite.change_pos(s.canvas, 120.0, 80.0, 40);
    }

    // The immediate move has landed before any tick.
    assert_eq!(cv.sprite(a).position(), (120.0, 80.0));

    for i in 1..=40 {
        cv.tick();
        if i < 40 {
            assert_ne!(cv.sprite(b).position(), (120.0, 80.0), "tick {i}");
        }
    }
    assert_eq!(cv.sprite(b).position(), (120.0, 80.0));

    // No residual tween: further ticks change nothing.
    cv.tick();
    assert_eq!(cv.sprite(a).position(), (120.0, 80.0));
    assert_eq!(cv.sprite(b).position(), (120.0, 80.0));
}

#[test]
fn delay_shifts_arrival_without_shortening_motion() {
    let (k, d) = (7u64, 12u64);
    let mut cv = scene();
    let id = cv.add_sprite(Rect::new(0.0, 0.0, 10.0, 10.0), &[]);
    {
        let s = cv.sprite_mut(id);
        s.sprite.delay(k as u32);
        s.sprite.change_pos(s.canvas, 60.0, 0.0, d as u32);
    }

    for tick in 1..=(k + d) {
        cv.tick();
        let arrived = cv.sprite(id).position() == (60.0, 0.0);
        assert_eq!(arrived, tick == k + d, "tick {tick}");
    }
}

#[test]
fn gravity_accumulates_linearly_in_velocity_and_quadratically_in_position() {
    let g = 0.5;
    let n = 24u64;
    let mut cv = scene();
    let id = cv.add_sprite(Dot::new(0.0, 0.0, 5.0).with_gravity(g), &[]);
    for _ in 0..n {
        cv.tick();
    }
    let Sprite::Dot(dot) = cv.sprite(id) else {
        panic!("expected a dot");
    };
    assert_eq!(dot.velocity().1, g * n as f64);
    assert_eq!(dot.position().1, g * (n * (n - 1)) as f64 / 2.0);
}

#[test]
fn size_tween_snaps_instead_of_overshooting() {
    let mut cv = scene();
    let id = cv.add_sprite(Dot::new(0.0, 0.0, 3.0), &[]);
    {
        let s = cv.sprite_mut(id);
        if let Some(dot) = s.sprite.as_dot_mut() {
            dot.change_size(s.canvas, 30.0, 7);
        }
    }
    let mut prev = 3.0;
    for _ in 0..30 {
        cv.tick();
        let Sprite::Dot(dot) = cv.sprite(id) else {
            unreachable!()
        };
        let r = dot.radius();
        assert!(r <= 30.0, "radius overshot: {r}");
        assert!(r >= prev, "radius oscillated: {prev} -> {r}");
        prev = r;
    }
    let Sprite::Dot(dot) = cv.sprite(id) else {
        unreachable!()
    };
    assert_eq!(dot.radius(), 30.0);
}

#[test]
fn text_reveal_round_trip() {
    let mut cv = scene();
    let id = cv.add_sprite(Text::new("", 500.0, 0.0, 0.0).with_auto_size(false), &[]);
    {
        let s = cv.sprite_mut(id);
        if let Some(t) = s.sprite.as_text_mut() {
            t.change_text(s.canvas, "ABC", 3);
        }
    }
    for _ in 0..10 {
        cv.tick();
    }
    let Sprite::Text(t) = cv.sprite(id) else {
        unreachable!()
    };
    assert_eq!(t.text(), "ABC");
    assert!(!t.is_revealing());

    // And back down to empty.
    {
        let s = cv.sprite_mut(id);
        if let Some(t) = s.sprite.as_text_mut() {
            t.change_text(s.canvas, "", 3);
        }
    }
    for _ in 0..10 {
        cv.tick();
    }
    let Sprite::Text(t) = cv.sprite(id) else {
        unreachable!()
    };
    assert_eq!(t.text(), "");
    assert!(!t.is_revealing());
}

#[test]
fn backend_sees_every_kind_of_mutation() {
    let mut cv = scene();
    let dot = cv.add_sprite(Dot::new(50.0, 50.0, 10.0), &[]);
    let label = cv.add_sprite(Text::new("go", 100.0, 0.0, 0.0).with_auto_size(false), &[]);
    assert_eq!(cv.canvas().item_count(), 2);

    {
        let s = cv.sprite_mut(dot);
        s.sprite.change_color(s.canvas, Color::BLACK);
        s.sprite.change_pos(s.canvas, 60.0, 60.0, 0);
    }
    {
        let s = cv.sprite_mut(label);
        if let Some(t) = s.sprite.as_text_mut() {
            t.change_text(s.canvas, "stop", 0);
            t.change_font_size(s.canvas, 12);
        }
    }

    // HeadlessCanvas lists items in allocation order.
    let items = cv.canvas().items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].fill, Color::BLACK);
    assert_eq!(items[0].bounds.left, 50.0);
    match &items[1].shape {
        ItemShape::Text { text, font, .. } => {
            assert_eq!(text, "stop");
            assert_eq!(font.size, 12);
        }
        other => panic!("expected text item, got {other:?}"),
    }
}

#[test]
fn unknown_tag_is_an_error_not_empty() {
    let cv = scene();
    match cv.get_sprites_with_tag("ghost") {
        Err(SceneError::UnknownTag(tag)) => assert_eq!(tag, "ghost"),
        other => panic!("expected UnknownTag, got {other:?}"),
    }
}

#[test]
fn capture_pause_and_tick_interplay() {
    let mut cv = scene();
    let id = cv.add_sprite(Dot::new(0.0, 0.0, 5.0), &[]);
    {
        let s = cv.sprite_mut(id);
        s.sprite.set_velocity(1.0, 0.0);
    }

    cv.start_text_input(true, true);
    for _ in 0..5 {
        cv.tick();
    }
    assert_eq!(cv.sprite(id).position(), (0.0, 0.0), "paused scene moved");

    for key in ["h", "e", "l", "l", "o", "backspace", "period"] {
        cv.update_keyboard_input(key);
    }
    cv.update_keyboard_input("escape");
    assert_eq!(cv.get_text_input(), "hell.");
    assert!(!cv.is_paused());

    cv.tick();
    assert_eq!(cv.sprite(id).position(), (1.0, 0.0));
}
