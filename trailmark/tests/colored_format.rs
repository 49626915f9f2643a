mod common;

#[cfg(test)]
mod tests {
    use crate::common::capture::Capture;
    use pretty_assertions::assert_eq;
    use trailmark::{LogFormat, Logger, LoggerColor, Verbosity};

    #[test]
    fn colorize_only_when_colored() {
        // Then
        for color in [LoggerColor::Red, LoggerColor::Yellow, LoggerColor::Green] {
            let painted = Logger::new(4, "", []).colorize("x", color);
            assert_ne!(painted, "x");
            assert!(painted.starts_with('\u{1b}'));

            assert_eq!(Logger::new(4, "text", []).colorize("x", color), "x");
            assert_eq!(Logger::new(4, "json", []).colorize("x", color), "x");
        }
    }

    #[test]
    fn colors_differ() {
        // Given
        let logger = Logger::new(4, "anything", []);

        // When
        let red = logger.colorize("x", LoggerColor::Red);
        let green = logger.colorize("x", LoggerColor::Green);

        // Then
        assert_ne!(red, green);
    }

    #[test]
    fn output_is_painted() {
        // Given
        colored::control::set_override(false);
        let (logger, capture) = Capture::logger(Verbosity::INFO, LogFormat::Colored);

        // When
        logger.in_scope(|| {
            tracing::warn!(user = "bob", "Careful");
        });

        // Then
        let output = capture.output();
        assert!(output.contains("\u{1b}[33mWARN \u{1b}[0m"));
        assert!(output.contains("\u{1b}[33muser\u{1b}[0m=bob"));
        assert!(output.contains("Careful"));
        assert!(output.contains("colored_format.rs:"));
    }
}
