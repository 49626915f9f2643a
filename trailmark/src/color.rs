use colored::Color;

/// Colors offered by [`Logger::colorize`](crate::Logger::colorize).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoggerColor {
    /// Red foreground.
    Red,
    /// Yellow foreground.
    Yellow,
    /// Green foreground.
    Green,
}

impl From<LoggerColor> for Color {
    fn from(value: LoggerColor) -> Self {
        match value {
            LoggerColor::Red => Color::Red,
            LoggerColor::Yellow => Color::Yellow,
            LoggerColor::Green => Color::Green,
        }
    }
}

/// Wraps the given text in the ANSI foreground escape of the given color.
///
/// Unlike [`colored::Colorize`], this ignores the process-wide `colored`
/// settings (stdout TTY detection, `CLICOLOR`): callers decide for themselves
/// whether their output carries ANSI escapes.
pub(crate) fn paint(text: &str, color: impl Into<Color>) -> String {
    format!("\u{1b}[{}m{text}\u{1b}[0m", color.into().to_fg_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn paint_ignores_global_override() {
        // Given
        colored::control::set_override(false);

        // When
        let painted = paint("x", LoggerColor::Red);

        // Then
        assert_eq!(painted, "\u{1b}[31mx\u{1b}[0m");
    }

    #[test]
    fn paint_colors_differ() {
        assert_eq!(paint("x", LoggerColor::Yellow), "\u{1b}[33mx\u{1b}[0m");
        assert_eq!(paint("x", LoggerColor::Green), "\u{1b}[32mx\u{1b}[0m");
        assert_eq!(paint("x", Color::Cyan), "\u{1b}[36mx\u{1b}[0m");
    }
}
