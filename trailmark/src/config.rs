use crate::{LogFormat, Verbosity};
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt::Formatter;

pub mod format;
pub mod verbosity;

/// Represents the application-level logging configuration section: everything
/// needed to build a [`Logger`](crate::Logger) through
/// [`Logger::from_config`](crate::Logger::from_config).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    verbosity: Verbosity,
    format: String,
    request_id: bool,
    targets: BTreeMap<String, Verbosity>,
}

impl LoggingConfig {
    /// Replaces the root [`Verbosity`] level of this config.
    pub fn with_verbosity(mut self, verbosity: impl Into<Verbosity>) -> Self {
        self.verbosity = verbosity.into();

        self
    }

    /// Replaces the format selector of this config.
    pub fn with_format(mut self, selector: impl Into<String>) -> Self {
        self.format = selector.into();

        self
    }

    /// Chooses whether the [`RequestIdHook`](crate::RequestIdHook) is
    /// attached.
    pub fn with_request_id(mut self, request_id: bool) -> Self {
        self.request_id = request_id;

        self
    }

    /// Merges an extra per-target [`Verbosity`] level into this config.
    pub fn with_target(
        mut self,
        target: impl Into<String>,
        verbosity: impl Into<Verbosity>,
    ) -> Self {
        self.targets.insert(target.into(), verbosity.into());

        self
    }
}

impl LoggingConfig {
    /// Reports the root [verbosity level](Verbosity) for this logging
    /// configuration.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Reports the [format](LogFormat) selected by this logging
    /// configuration.
    pub fn format(&self) -> LogFormat {
        LogFormat::from_selector(&self.format)
    }

    /// Reports the format selector exactly as configured.
    pub fn format_selector(&self) -> &str {
        &self.format
    }

    /// Reports whether this logging configuration attaches the
    /// [`RequestIdHook`](crate::RequestIdHook) at all levels.
    pub fn request_id(&self) -> bool {
        self.request_id
    }

    /// Reports the customized per-target verbosity for this logging
    /// configuration.
    pub fn targets(&self) -> &BTreeMap<String, Verbosity> {
        &self.targets
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            format: String::default(),
            request_id: Self::default_request_id(),
            targets: BTreeMap::default(),
        }
    }
}

impl LoggingConfig {
    fn default_request_id() -> bool {
        true
    }
}

impl AsRef<LoggingConfig> for LoggingConfig {
    fn as_ref(&self) -> &LoggingConfig {
        self
    }
}

const _: () = {
    impl<'de> Deserialize<'de> for LoggingConfig {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_map(LoggingConfigVisitor)
        }
    }

    struct LoggingConfigVisitor;

    impl<'de> Visitor<'de> for LoggingConfigVisitor {
        type Value = LoggingConfig;

        fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
            formatter.write_str("a map of logging configuration")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut verbosity = None;
            let mut format = None;
            let mut request_id = None;
            let mut targets = None;

            while let Some(key) = map.next_key()? {
                match key {
                    LoggingConfigField::verbosity => key.poll(&mut map, &mut verbosity)?,
                    LoggingConfigField::format => key.poll(&mut map, &mut format)?,
                    LoggingConfigField::request_id => key.poll(&mut map, &mut request_id)?,
                    LoggingConfigField::targets => key.poll(&mut map, &mut targets)?,
                    LoggingConfigField::__ignore => map.next_value()?,
                };
            }

            Ok(LoggingConfig {
                verbosity: verbosity.unwrap_or_default(),
                format: format.unwrap_or_default(),
                request_id: request_id.unwrap_or_else(LoggingConfig::default_request_id),
                targets: targets.unwrap_or_default(),
            })
        }
    }

    #[allow(non_camel_case_types)]
    enum LoggingConfigField {
        verbosity,
        format,
        request_id,
        targets,
        __ignore,
    }

    impl LoggingConfigField {
        /// Matches a user-provided key against the known keys and their
        /// aliases. Unknown keys are ignored rather than rejected.
        fn from_str(value: &str) -> Self {
            let eq = |candidate: &str| value.trim().eq_ignore_ascii_case(candidate);

            if ["verbosity", "level"].into_iter().any(eq) {
                Self::verbosity
            } else if ["format", "flavor", "log_format"].into_iter().any(eq) {
                Self::format
            } else if ["request_id", "with_request_id", "request_ids"]
                .into_iter()
                .any(eq)
            {
                Self::request_id
            } else if ["targets", "custom_targets", "target_verbosity"]
                .into_iter()
                .any(eq)
            {
                Self::targets
            } else {
                Self::__ignore
            }
        }

        fn as_str(&self) -> &'static str {
            match self {
                Self::verbosity => "verbosity",
                Self::format => "format",
                Self::request_id => "request_id",
                Self::targets => "targets",
                Self::__ignore => "__ignore",
            }
        }

        /// Polls the next value from the given `MapAccess` into the given
        /// [`Option`]. A second occurrence of the same key is an error.
        fn poll<'de, A, T>(&self, from: &mut A, into: &mut Option<T>) -> Result<IgnoredAny, A::Error>
        where
            A: MapAccess<'de>,
            T: Deserialize<'de>,
        {
            if into.is_some() {
                return Err(serde::de::Error::duplicate_field(self.as_str()));
            }
            *into = Some(from.next_value()?);
            Ok(IgnoredAny)
        }
    }

    impl<'de> Deserialize<'de> for LoggingConfigField {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_identifier(LoggingConfigFieldVisitor)
        }
    }

    struct LoggingConfigFieldVisitor;

    impl Visitor<'_> for LoggingConfigFieldVisitor {
        type Value = LoggingConfigField;

        fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
            formatter.write_str("a configuration key")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(LoggingConfigField::from_str(value))
        }
    }
};
