//! Keyboard text capture.
//!
//! Hosts forward raw key-name strings (X11/tk keysym style: `"a"`,
//! `"period"`, `"backspace"`). A fixed translation table maps named
//! punctuation to its printable character; a fixed ignore list drops
//! modifiers and arrows; everything else is appended verbatim.

/// Printable character for a named punctuation key. Lookup is exact-case.
fn named_char(key: &str) -> Option<char> {
    Some(match key {
        "grave" => '`',
        "minus" => '-',
        "equal" => '=',
        "bracketleft" => '[',
        "bracketright" => ']',
        "backslash" => '\\',
        "semicolon" => ';',
        "apostrophe" => '\'',
        "comma" => ',',
        "period" => '.',
        "slash" => '/',
        "asciitilde" => '~',
        "exclam" => '!',
        "at" => '@',
        "numbersign" => '#',
        "dollar" => '$',
        "percent" => '%',
        "asciicircum" => '^',
        "ampersand" => '&',
        "asterisk" => '*',
        "parenleft" => '(',
        "parenright" => ')',
        "underscore" => '_',
        "plus" => '+',
        "braceleft" => '{',
        "braceright" => '}',
        "bar" => '|',
        "colon" => ':',
        "quotedbl" => '"',
        "less" => '<',
        "greater" => '>',
        "question" => '?',
        "space" => ' ',
        _ => return None,
    })
}

/// Non-printable key names that never reach the buffer.
fn is_ignored(key_lower: &str) -> bool {
    matches!(
        key_lower,
        "tab"
            | "caps_lock"
            | "return"
            | "shift_l"
            | "shift_r"
            | "super_l"
            | "super_r"
            | "control_l"
            | "control_r"
            | "alt_l"
            | "alt_r"
            | "meta_l"
            | "meta_r"
            | "left"
            | "right"
            | "up"
            | "down"
    )
}

/// What the capture buffer did with a forwarded key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Captured {
    /// Buffer updated (or key ignored); capture continues.
    Consumed,
    /// An exit key arrived while exit keys are armed; the caller should
    /// end capture.
    ExitRequested,
}

/// Accumulates keystrokes while a scene is capturing text input.
#[derive(Debug, Default)]
pub(crate) struct TextCapture {
    capturing: bool,
    buffer: String,
    /// Set when starting capture paused the scene, so stopping knows
    /// whether the pause is its to lift.
    owns_pause: bool,
    end_on_exit_key: bool,
}

impl TextCapture {
    pub fn start(&mut self, owns_pause: bool, end_on_exit_key: bool) {
        self.capturing = true;
        self.owns_pause = owns_pause;
        self.end_on_exit_key = end_on_exit_key;
        self.buffer.clear();
    }

    /// Ends capture. Returns `true` if the caller should unpause (capture
    /// itself had paused the scene).
    pub fn stop(&mut self) -> bool {
        self.capturing = false;
        std::mem::take(&mut self.owns_pause)
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn feed(&mut self, key: &str) -> Captured {
        let lower = key.to_ascii_lowercase();
        if matches!(lower.as_str(), "backspace" | "delete") {
            self.buffer.pop();
        } else if self.end_on_exit_key && matches!(lower.as_str(), "escape" | "enter" | "return") {
            return Captured::ExitRequested;
        } else if !is_ignored(&lower) {
            match named_char(key) {
                Some(ch) => self.buffer.push(ch),
                None => self.buffer.push_str(key),
            }
        }
        Captured::Consumed
    }
}
