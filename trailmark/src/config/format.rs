use serde::de::{Error as DeError, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt::{Display, Formatter};

/// Represents the output format of a [`Logger`](crate::Logger).
///
/// Formats are selected by name: `"text"` and `"json"` pick the respective
/// variants, and **any other** selector (including an empty one) falls back to
/// [`Colored`](LogFormat::Colored). Names match exactly: `"TEXT"` is not
/// `"text"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogFormat {
    /// Plain text for writing into files: no ANSI color.
    Text,

    /// One JSON object per record.
    Json,

    /// The [`Text`](LogFormat::Text) layout with ANSI color. Also enables
    /// [`Logger::colorize`](crate::Logger::colorize).
    Colored,
}

impl LogFormat {
    /// Selector name of the [`Text`](LogFormat::Text) format.
    pub const TEXT: &'static str = "text";

    /// Selector name of the [`Json`](LogFormat::Json) format.
    pub const JSON: &'static str = "json";

    /// Name of the [`Colored`](LogFormat::Colored) format.
    pub const COLORED: &'static str = "colored";

    /// Picks the format named by the given selector, falling back to
    /// [`Colored`](LogFormat::Colored) on anything unrecognized.
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            Self::TEXT => Self::Text,
            Self::JSON => Self::Json,
            _ => Self::Colored,
        }
    }

    /// Reports whether the given selector is something other than an empty
    /// string or a known format name, i.e., whether picking a format from it
    /// silently falls back to the default.
    pub fn is_unrecognized(selector: &str) -> bool {
        !matches!(selector, "" | Self::TEXT | Self::JSON | Self::COLORED)
    }

    /// Reports whether records in this format carry ANSI color.
    pub fn is_colored(&self) -> bool {
        matches!(self, Self::Colored)
    }

    /// Reports the name of this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => Self::TEXT,
            Self::Json => Self::JSON,
            Self::Colored => Self::COLORED,
        }
    }
}

impl Default for LogFormat {
    /// Matches the fallback for an unset selector.
    fn default() -> Self {
        Self::Colored
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for LogFormat {
    fn from(value: &str) -> Self {
        Self::from_selector(value)
    }
}

impl From<String> for LogFormat {
    fn from(value: String) -> Self {
        Self::from_selector(&value)
    }
}

const _: () = {
    impl<'de> Deserialize<'de> for LogFormat {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_str(LogFormatVisitor)
        }
    }

    struct LogFormatVisitor;

    impl<'de> Visitor<'de> for LogFormatVisitor {
        type Value = LogFormat;

        fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
            formatter.write_str("a string value")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            Ok(LogFormat::from_selector(value))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            Ok(LogFormat::default())
        }
    }
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_selector() {
        for (input, expected_output) in [
            ("text", LogFormat::Text),
            ("TEXT", LogFormat::Colored),
            (" text ", LogFormat::Colored),
            ("json", LogFormat::Json),
            ("Json", LogFormat::Colored),
            ("", LogFormat::Colored),
            ("colored", LogFormat::Colored),
            ("xml", LogFormat::Colored),
        ] {
            assert_eq!(LogFormat::from_selector(input), expected_output);
        }
    }

    #[test]
    fn is_unrecognized() {
        assert!(!LogFormat::is_unrecognized(""));
        assert!(!LogFormat::is_unrecognized("text"));
        assert!(!LogFormat::is_unrecognized("json"));
        assert!(!LogFormat::is_unrecognized("colored"));
        assert!(LogFormat::is_unrecognized("  "));
        assert!(LogFormat::is_unrecognized("JSON"));
        assert!(LogFormat::is_unrecognized("xml"));
    }

    #[test]
    fn only_fallback_is_colored() {
        assert!(!LogFormat::Text.is_colored());
        assert!(!LogFormat::Json.is_colored());
        assert!(LogFormat::Colored.is_colored());
    }

    #[test]
    fn deserialize() {
        // Given
        let input = "json";

        // When
        let actual_output = serde_yml::from_str::<LogFormat>(input).unwrap();

        // Then
        assert_eq!(actual_output, LogFormat::Json);
    }

    #[test]
    fn deserialize_unknown() {
        // Given
        let input = "yaml";

        // When
        let actual_output = serde_yml::from_str::<LogFormat>(input).unwrap();

        // Then
        assert_eq!(actual_output, LogFormat::Colored);
    }
}
