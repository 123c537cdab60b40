//! viscanvas — a frame-driven 2D sprite and tween engine.
//!
//! A [`scene::VisCanvas`] owns a backend canvas and a collection of sprites
//! ([`sprite::Dot`], [`sprite::Rect`], [`sprite::Text`]), advancing every
//! tween one step per externally driven tick. The host supplies the timer
//! and raw input events; the scene supplies tagging, pause, keyboard text
//! capture, and click dispatch to named buttons.
//!
//! Backends implement [`backend::Canvas`]; [`backend::term::TermCanvas`]
//! draws to the terminal and [`backend::headless::HeadlessCanvas`] records
//! state in memory.

pub mod backend;
pub mod scene;
pub mod scenefile;
pub mod sprite;
pub mod types;
