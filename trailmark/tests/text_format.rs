mod common;

#[cfg(test)]
mod tests {
    use crate::common::capture::Capture;
    use pretty_assertions::assert_eq;
    use regex::Regex;
    use trailmark::{LogFormat, Verbosity};

    #[test]
    fn layout() {
        // Given
        let (logger, capture) = Capture::logger(Verbosity::INFO, LogFormat::Text);
        let expected_line = line!() + 4;

        // When
        logger.in_scope(|| {
            tracing::info!(user = "bob", attempt = 2, "Signed in");
        });

        // Then
        let pattern = Regex::new(&format!(
            r"^\d{{2}}-\d{{2}}-\d{{4}} \d{{2}}:\d{{2}}:\d{{2}}  INFO   text_format\.rs:{expected_line}  Signed in  attempt=2 user=bob$",
        ))
        .unwrap();
        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(pattern.is_match(&lines[0]), "unexpected line: {}", lines[0]);
    }

    #[test]
    fn no_ansi_and_no_full_path() {
        // Given
        let (logger, capture) = Capture::logger(Verbosity::TRACE, LogFormat::Text);

        // When
        logger.in_scope(|| {
            tracing::error!(reason = "disk full", "Failed to save");
            tracing::trace!("Details");
        });

        // Then
        let output = capture.output();
        assert!(!output.contains('\u{1b}'));
        assert!(output.contains("text_format.rs:"));
        assert!(!output.contains("tests/text_format.rs"));
        assert!(output.contains(r#"reason="disk full""#));
    }

    #[test]
    fn verbosity_threshold() {
        // Given
        let (logger, capture) = Capture::logger(Verbosity::WARN, LogFormat::Text);

        // When
        logger.in_scope(|| {
            tracing::debug!("hidden debug");
            tracing::info!("hidden info");
            tracing::warn!("shown warn");
            tracing::error!("shown error");
        });

        // Then
        let output = capture.output();
        assert_eq!(capture.lines().len(), 2);
        assert!(output.contains("WARN   "));
        assert!(output.contains("shown warn"));
        assert!(output.contains("shown error"));
        assert!(!output.contains("hidden"));
    }

    #[test]
    fn fatal_admits_errors_only() {
        // Given
        let (logger, capture) = Capture::logger(Verbosity::FATAL, LogFormat::Text);

        // When
        logger.in_scope(|| {
            tracing::warn!("hidden warn");
            tracing::error!("shown error");
        });

        // Then
        assert_eq!(capture.lines().len(), 1);
        assert!(capture.output().contains("shown error"));
    }

    #[test]
    fn per_target_override() {
        // Given
        let capture = Capture::default();
        let logger = trailmark::Logger::builder()
            .verbosity(Verbosity::INFO)
            .format(LogFormat::Text)
            .target("noisy", Verbosity::ERROR)
            .writer(capture.clone())
            .build();

        // When
        logger.in_scope(|| {
            tracing::info!(target: "noisy", "hidden");
            tracing::error!(target: "noisy", "shown from noisy");
            tracing::info!(target: "quiet", "shown from quiet");
        });

        // Then
        let output = capture.output();
        assert!(!output.contains("hidden"));
        assert!(output.contains("shown from noisy"));
        assert!(output.contains("shown from quiet"));
    }

    #[test]
    fn not_routed_outside_scope() {
        // Given
        let (_logger, capture) = Capture::logger(Verbosity::INFO, LogFormat::Text);

        // When
        tracing::info!("nobody listens");

        // Then
        assert_eq!(capture.output(), "");
    }
}
