//! ANSI color helper utilities for terminal output.

use ansi_term::Colour;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";

/// Colour used for an emotion label in tables and the mood chart.
pub fn colour_for_emotion(emotion: &str) -> Colour {
    match emotion.to_lowercase().as_str() {
        "joy" => Colour::Yellow,
        "sadness" => Colour::Blue,
        "anger" => Colour::Red,
        "fear" => Colour::Purple,
        "surprise" => Colour::Cyan,
        "disgust" => Colour::Green,
        _ => Colour::White,
    }
}

pub fn paint_emotion(emotion: &str) -> String {
    colour_for_emotion(emotion).paint(emotion).to_string()
}

/// Green tick for done goals, grey dot otherwise.
pub fn completed_mark(done: bool) -> String {
    if done {
        format!("{GREEN}✔{RESET}")
    } else {
        format!("{GREY}·{RESET}")
    }
}
