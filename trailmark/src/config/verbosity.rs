use serde::de::{Error as DeError, Unexpected, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt::{Display, Formatter};
use tracing_core::{Level, LevelFilter};

/// The severity threshold of a [`Logger`](crate::Logger), on the classic
/// seven-step scale:
///
/// | value | name    |
/// |-------|---------|
/// | 0     | `panic` |
/// | 1     | `fatal` |
/// | 2     | `error` |
/// | 3     | `warn`  |
/// | 4     | `info`  |
/// | 5     | `debug` |
/// | 6     | `trace` |
///
/// A verbosity level is “higher” if it is more verbose. The raw integer is
/// kept verbatim, even when it falls outside the scale: values are never
/// rejected, they are only [interpreted](Verbosity::to_level_filter) when a
/// `tracing` filter is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Verbosity(i64);

impl Verbosity {
    /// Log only what would make the process panic.
    pub const PANIC: Self = Self(0);
    /// Log only fatal conditions.
    pub const FATAL: Self = Self(1);
    /// Log at level [`ERROR`](Level::ERROR) only.
    pub const ERROR: Self = Self(2);
    /// Log at level [`WARN`](Level::WARN) and lower.
    pub const WARN: Self = Self(3);
    /// Log at level [`INFO`](Level::INFO) and lower.
    pub const INFO: Self = Self(4);
    /// Log at level [`DEBUG`](Level::DEBUG) and lower.
    pub const DEBUG: Self = Self(5);
    /// Log **everything**.
    pub const TRACE: Self = Self(6);

    /// Wraps the given raw level.
    pub const fn new(level: i64) -> Self {
        Self(level)
    }

    /// Reports the raw level, exactly as given.
    pub const fn level(&self) -> i64 {
        self.0
    }

    /// Reports whether the raw level lies on the known scale.
    pub const fn is_known(&self) -> bool {
        self.0 >= Self::PANIC.0 && self.0 <= Self::TRACE.0
    }

    /// Reports the name of this level, if it [is known](Verbosity::is_known).
    pub fn name(&self) -> Option<&'static str> {
        let name = match *self {
            Self::PANIC => "panic",
            Self::FATAL => "fatal",
            Self::ERROR => "error",
            Self::WARN => "warn",
            Self::INFO => "info",
            Self::DEBUG => "debug",
            Self::TRACE => "trace",
            _ => return None,
        };

        Some(name)
    }

    /// Translates this [`Verbosity`] to the `tracing` crate’s [`LevelFilter`].
    ///
    /// `tracing` has nothing above [`ERROR`](Level::ERROR), so `panic` and
    /// `fatal` both admit errors. Levels above `trace` admit everything, and so
    /// do negative levels: the scale is unsigned, and a negative level wraps
    /// around to the most verbose end.
    pub fn to_level_filter(&self) -> LevelFilter {
        match self.0 {
            i64::MIN..=-1 => LevelFilter::TRACE,
            0..=2 => LevelFilter::ERROR,
            3 => LevelFilter::WARN,
            4 => LevelFilter::INFO,
            5 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Parses a level name, ignoring ASCII case.
    fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();

        [
            (Self::PANIC, &["panic"][..]),
            (Self::FATAL, &["fatal"][..]),
            (Self::ERROR, &["error", "err"][..]),
            (Self::WARN, &["warn", "warning"][..]),
            (Self::INFO, &["info"][..]),
            (Self::DEBUG, &["debug"][..]),
            (Self::TRACE, &["trace"][..]),
        ]
        .into_iter()
        .find(|(_, names)| names.iter().any(|n| n.eq_ignore_ascii_case(name)))
        .map(|(level, _)| level)
    }
}

impl Default for Verbosity {
    /// Defines a reasonable default [`Verbosity`].
    fn default() -> Self {
        Self::INFO
    }
}

impl Display for Verbosity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<i64> for Verbosity {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Level> for Verbosity {
    fn from(value: Level) -> Self {
        match value {
            Level::ERROR => Self::ERROR,
            Level::WARN => Self::WARN,
            Level::INFO => Self::INFO,
            Level::DEBUG => Self::DEBUG,
            _ => Self::TRACE,
        }
    }
}

impl From<Verbosity> for LevelFilter {
    fn from(value: Verbosity) -> Self {
        value.to_level_filter()
    }
}

impl From<&Verbosity> for LevelFilter {
    fn from(value: &Verbosity) -> Self {
        value.to_level_filter()
    }
}

const _: () = {
    impl<'de> Deserialize<'de> for Verbosity {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(VerbosityVisitor)
        }
    }

    struct VerbosityVisitor;

    impl<'de> Visitor<'de> for VerbosityVisitor {
        type Value = Verbosity;

        fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
            formatter.write_str("an integer level or a level name")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            Ok(Verbosity(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            i64::try_from(value)
                .map(Verbosity)
                .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            if let Ok(level) = value.trim().parse::<i64>() {
                return Ok(Verbosity(level));
            }

            Verbosity::from_name(value)
                .ok_or_else(|| E::invalid_value(Unexpected::Str(value), &self))
        }
    }
};
