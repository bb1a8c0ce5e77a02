//! Terminal styling helpers

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream::Stdout};
use std::fmt::Display;

/// Color shortcuts that degrade to plain text when stdout has no color support
pub trait Stylize {
    /// Highlighted value (names, URLs, commands)
    fn accent(&self) -> String;
    /// Secondary text
    fn muted(&self) -> String;
    /// Headings
    fn emphasis(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn accent(&self) -> String {
        self.if_supports_color(Stdout, |t| t.cyan()).to_string()
    }

    fn muted(&self) -> String {
        self.if_supports_color(Stdout, |t| t.dimmed()).to_string()
    }

    fn emphasis(&self) -> String {
        self.if_supports_color(Stdout, |t| t.bold()).to_string()
    }
}

/// Green check mark
pub fn check() -> String {
    "✓".if_supports_color(Stdout, |t| t.green()).to_string()
}

/// Red cross
pub fn cross() -> String {
    "✗".if_supports_color(Stdout, |t| t.red()).to_string()
}

/// Spinner style shared by all long-running steps
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Render `url` as a clickable link when the terminal supports it
pub fn hyperlink(url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}
