//! Terminal styling for CLI output.

use std::io::IsTerminal;

use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Ok,
    Warn,
    Fail,
    Accent,
}

fn paint(tone: Tone, text: &str) -> String {
    if !std::io::stdout().is_terminal() {
        return text.to_string();
    }
    match tone {
        Tone::Ok => text.green().to_string(),
        Tone::Warn => text.yellow().to_string(),
        Tone::Fail => text.red().to_string(),
        Tone::Accent => text.cyan().to_string(),
    }
}

pub fn success(text: impl AsRef<str>) -> String {
    paint(Tone::Ok, text.as_ref())
}

pub fn warning(text: impl AsRef<str>) -> String {
    paint(Tone::Warn, text.as_ref())
}

pub fn error(text: impl AsRef<str>) -> String {
    paint(Tone::Fail, text.as_ref())
}

pub fn accent(text: impl AsRef<str>) -> String {
    paint(Tone::Accent, text.as_ref())
}
