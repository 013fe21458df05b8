//! Terminal capability detection and coloring

use owo_colors::{OwoColorize, colors::css};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Styles applied to output lines.
///
/// A disabled palette returns text unchanged, which keeps output stable when
/// it is piped or captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Colors output if `allowed` and stdout supports it.
    pub fn detect(allowed: bool) -> Self {
        Self {
            enabled: allowed && supports_color(),
        }
    }

    /// A palette that never colors.
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    /// Section headings (light blue, bold)
    pub fn heading(self, text: &str) -> String {
        if self.enabled {
            text.fg::<css::LightBlue>().bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Completed operations (green)
    pub fn success(self, text: &str) -> String {
        if self.enabled {
            text.fg::<css::Green>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Rejected operations and overdue markers (amber)
    pub fn warning(self, text: &str) -> String {
        if self.enabled {
            text.fg::<css::Orange>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Secondary text
    pub fn dim(self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Palette;

    #[test]
    fn plain_palette_leaves_text_unchanged() {
        let palette = Palette::plain();
        assert_eq!(palette.heading("--- Library ---"), "--- Library ---");
        assert_eq!(palette.success("ok"), "ok");
        assert_eq!(palette.warning("late"), "late");
        assert_eq!(palette.dim("-"), "-");
    }

    #[test]
    fn disallowed_color_is_plain() {
        assert_eq!(Palette::detect(false), Palette::plain());
    }
}
