//! Terminal styling for assassin output
//!
//! Every colored value goes through [`Stylize`], so the palette lives in one
//! place and color detection (`NO_COLOR`, `CLICOLOR_FORCE`, TTY) is left to
//! `owo-colors`.
//!
//! | Method        | Look   | Stream | Used for                          |
//! |---------------|--------|--------|-----------------------------------|
//! | `.accent()`   | cyan   | stdout | names, counts, paths, commands    |
//! | `.success()`  | green  | stdout | confirmations from the backend    |
//! | `.error()`    | red    | stderr | failure messages                  |
//! | `.muted()`    | dim    | stdout | hints, timestamps, empty states   |
//! | `.emphasis()` | bold   | stdout | headings, target names            |

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Style};
use std::fmt::{self, Display};
use std::sync::OnceLock;

pub use owo_colors::Stream;

const ACCENT: Style = Style::new().cyan();
const SUCCESS: Style = Style::new().green();
const ERROR: Style = Style::new().red();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

/// A borrowed value paired with the style and stream it is printed on
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
    stream: Stream,
}

impl<T> Styled<T> {
    const fn on(stream: Stream, style: Style, value: T) -> Self {
        Self {
            value,
            style,
            stream,
        }
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled = self
            .value
            .if_supports_color(self.stream, |v| v.style(self.style));
        write!(f, "{styled}")
    }
}

/// Semantic colors for anything printable
pub trait Stylize: Display {
    /// Cyan, for the thing the line is about
    fn accent(&self) -> Styled<&Self> {
        Styled::on(Stream::Stdout, ACCENT, self)
    }

    /// Green, for completed actions
    fn success(&self) -> Styled<&Self> {
        Styled::on(Stream::Stdout, SUCCESS, self)
    }

    /// Red on stderr
    fn error(&self) -> Styled<&Self> {
        Styled::on(Stream::Stderr, ERROR, self)
    }

    /// Dim, for secondary text
    fn muted(&self) -> Styled<&Self> {
        Styled::on(Stream::Stdout, MUTED, self)
    }

    /// Bold
    fn emphasis(&self) -> Styled<&Self> {
        Styled::on(Stream::Stdout, EMPHASIS, self)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Done marker
pub const CHECK: &str = "✓";

/// Failure marker
pub const CROSS: &str = "✗";

/// Separator between a participant and their target
pub const ARROW: &str = "→";

/// Check-in list marker
pub const BULLET: &str = "○";

/// Camera hint marker
pub const CAMERA: &str = "📸";

/// Green check
pub const fn check() -> Styled<&'static str> {
    Styled::on(Stream::Stdout, SUCCESS, CHECK)
}

/// Red cross, for stderr
pub const fn cross() -> Styled<&'static str> {
    Styled::on(Stream::Stderr, ERROR, CROSS)
}

/// Cyan chain arrow
pub const fn arrow() -> Styled<&'static str> {
    Styled::on(Stream::Stdout, ACCENT, ARROW)
}

/// Dim list bullet
pub const fn bullet() -> Styled<&'static str> {
    Styled::on(Stream::Stdout, MUTED, BULLET)
}

/// Render `url` as an OSC 8 link where the terminal supports it
pub fn hyperlink_url(stream: Stream, url: &str) -> String {
    let target = match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    };
    if supports_hyperlinks::on(target) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}

/// Spinner shown while the backend builds a chain
pub fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("hardcoded spinner template is valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        })
        .clone()
}

/// Percent bar for the email dispatch estimate
pub fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::default_bar()
                .template("{msg} [{bar:30.cyan/dim}] {pos:>3}%")
                .expect("hardcoded bar template is valid")
                .progress_chars("█▓░")
        })
        .clone()
}
