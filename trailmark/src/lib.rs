#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![cfg_attr(test, deny(warnings))]

/// Implements the [`LoggingConfig`] application configuration section.
mod config;
pub use self::config::LoggingConfig;
pub use self::config::format::LogFormat;
pub use self::config::verbosity::Verbosity;

/// Implements the [`Logger`] factory.
mod logger;
pub use self::logger::{InitError, Logger, LoggerBuilder};

/// Implements the colors offered to callers of [`Logger::colorize`].
mod color;
pub use self::color::LoggerColor;

/// Implements the [`Record`] that hooks operate on.
mod record;
pub use self::record::{FieldMap, Record};

/// Implements the [`Hook`] protocol and the built-in hooks.
mod hook;
pub use self::hook::request_id::{REQUEST_ID_KEY, RequestIdHook};
pub use self::hook::{Hook, HookError, LevelHooks, all_levels};

/// Implements the custom event formatting.
mod fmt;
pub use self::fmt::TIMESTAMP_FORMAT;

/// Re-exports the request correlation primitives for convenience.
pub use trailmark_requestid::{RequestContext, RequestId, RequestIdLayer};

/// Partly re-exports the public API of `tracing_*` for convenience.
pub use tracing_core::Level;
