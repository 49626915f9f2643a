use crate::color::{LoggerColor, paint};
use crate::fmt::{make_layer, make_targets};
use crate::{Hook, LevelHooks, LogFormat, LoggingConfig, RequestIdHook, Verbosity, all_levels};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use thiserror::Error;
use tracing::dispatcher::{self, DefaultGuard, Dispatch, SetGlobalDefaultError};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::Registry;
use trailmark_requestid::RequestIdLayer;

/// A configured logger: a `tracing` [`Dispatch`] that renders events in one
/// [`LogFormat`], filtered by one root [`Verbosity`], with a set of
/// [hooks](Hook) applied to every record.
///
/// A logger is an explicit value. Route `tracing` macros to it with
/// [`in_scope`](Logger::in_scope) or [`set_default`](Logger::set_default), or
/// install it process-wide with [`init`](Logger::init). Clones share the same
/// underlying dispatcher.
///
/// ## Examples
///
/// ```
/// use trailmark::{Hook, Logger, RequestIdHook, all_levels};
/// use std::sync::Arc;
///
/// let hook: Arc<dyn Hook> = Arc::new(RequestIdHook::new(all_levels()));
/// let logger = Logger::new(4, "json", [hook]);
///
/// logger.in_scope(|| {
///     tracing::info!(user = "bob", "Signed in");
/// });
/// ```
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    verbosity: Verbosity,
    format: LogFormat,
}

impl Logger {
    /// Creates a logger writing to standard error.
    ///
    /// The `level` is taken on the scale documented at [`Verbosity`]; the
    /// `format` selector is interpreted as described at [`LogFormat`]. Neither
    /// is validated: out-of-range levels and unknown selectors fall back to
    /// the nearest sensible behavior, and a warning about the fallback is
    /// logged through the new logger.
    pub fn new(
        level: i64,
        format: &str,
        hooks: impl IntoIterator<Item = Arc<dyn Hook>>,
    ) -> Self {
        Self::builder()
            .verbosity(level)
            .format_selector(format)
            .hooks(hooks)
            .build()
    }

    /// Creates a logger as described by the given [config](LoggingConfig),
    /// writing to standard error.
    pub fn from_config(config: impl AsRef<LoggingConfig>) -> Self {
        Self::builder().config(config).build()
    }

    /// Starts building a logger with the default settings: [`Verbosity::INFO`],
    /// [`LogFormat::Colored`], no hooks, writing to standard error.
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Logger {
    /// Reports the root [`Verbosity`] of this logger, exactly as given.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Reports the [`LogFormat`] of this logger.
    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Reports whether this logger was built in the colored branch.
    pub fn is_colored(&self) -> bool {
        self.format.is_colored()
    }

    /// Exposes the underlying `tracing` dispatcher.
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Wraps the given string in ANSI styling of the given color, but only if
    /// this logger [is colored](Logger::is_colored). Otherwise, returns the
    /// string unchanged.
    pub fn colorize(&self, s: &str, color: LoggerColor) -> String {
        if !self.is_colored() {
            return s.to_string();
        }

        paint(s, color)
    }
}

impl Logger {
    /// Runs the given closure with this logger as the default for the current
    /// thread.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    /// Makes this logger the default for the current thread until the returned
    /// guard is dropped.
    pub fn set_default(&self) -> DefaultGuard {
        dispatcher::set_default(&self.dispatch)
    }

    /// Installs this logger as the global default. Fails if a global default
    /// has already been installed.
    pub fn init(&self) -> Result<(), InitError> {
        dispatcher::set_global_default(self.dispatch.clone())?;

        Ok(())
    }
}

impl Debug for Logger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("verbosity", &self.verbosity)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

/// Represents the failure to install a [`Logger`] globally.
#[derive(Error, Debug)]
pub enum InitError {
    /// Indicates that another global default dispatcher is already installed.
    #[error("failed to install the logger as the global default: {0}")]
    AlreadyInstalled(#[from] SetGlobalDefaultError),
}

/// Builds a [`Logger`] step by step.
pub struct LoggerBuilder {
    verbosity: Verbosity,
    format: LogFormat,
    hooks: LevelHooks,
    targets: BTreeMap<String, Verbosity>,
    writer: BoxMakeWriter,
    fallbacks: Vec<Fallback>,
}

/// Misconfiguration that was silently degraded while building a logger.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Fallback {
    UnknownFormat(String),
}

impl LoggerBuilder {
    fn new() -> Self {
        Self {
            verbosity: Verbosity::default(),
            format: LogFormat::default(),
            hooks: LevelHooks::default(),
            targets: BTreeMap::new(),
            writer: BoxMakeWriter::new(std::io::stderr),
            fallbacks: Vec::new(),
        }
    }

    /// Sets the root verbosity.
    pub fn verbosity(mut self, verbosity: impl Into<Verbosity>) -> Self {
        self.verbosity = verbosity.into();

        self
    }

    /// Sets the output format.
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;

        self
    }

    /// Sets the output format from a selector string, remembering to warn
    /// about it if the selector is [not recognized](LogFormat::is_unrecognized).
    pub fn format_selector(mut self, selector: &str) -> Self {
        self.format = LogFormat::from_selector(selector);

        if LogFormat::is_unrecognized(selector) {
            self.fallbacks
                .push(Fallback::UnknownFormat(selector.to_string()));
        }

        self
    }

    /// Registers a hook.
    pub fn hook(mut self, hook: impl Hook) -> Self {
        self.hooks.add(Arc::new(hook));

        self
    }

    /// Registers several (already shared) hooks.
    pub fn hooks(mut self, hooks: impl IntoIterator<Item = Arc<dyn Hook>>) -> Self {
        for hook in hooks {
            self.hooks.add(hook);
        }

        self
    }

    /// Overrides the verbosity for events whose target starts with the given
    /// prefix (usually a crate or module path).
    pub fn target(mut self, target: impl Into<String>, verbosity: impl Into<Verbosity>) -> Self {
        self.targets.insert(target.into(), verbosity.into());

        self
    }

    /// Redirects the output (standard error by default).
    pub fn writer<W>(mut self, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.writer = BoxMakeWriter::new(writer);

        self
    }

    /// Applies everything the given [config](LoggingConfig) describes.
    pub fn config(mut self, config: impl AsRef<LoggingConfig>) -> Self {
        let config = config.as_ref();

        self = self
            .verbosity(config.verbosity())
            .format_selector(config.format_selector());

        for (target, verbosity) in config.targets() {
            self = self.target(target.as_str(), *verbosity);
        }

        if config.request_id() {
            self = self.hook(RequestIdHook::new(all_levels()));
        }

        self
    }

    /// Builds the [`Logger`]. This never fails: misconfiguration degrades to
    /// fallback behavior and is reported as a warning through the new logger.
    pub fn build(self) -> Logger {
        let targets = make_targets(self.verbosity, &self.targets);
        let layer = make_layer::<Layered<RequestIdLayer, Registry>>(
            self.format,
            Arc::new(self.hooks),
            self.writer,
            targets,
        );

        let subscriber = Registry::default()
            .with(RequestIdLayer::new())
            .with(layer);

        let logger = Logger {
            dispatch: Dispatch::new(subscriber),
            verbosity: self.verbosity,
            format: self.format,
        };

        logger.report_fallbacks(&self.fallbacks);

        logger
    }
}

impl Logger {
    /// Logs a warning about every silently degraded setting.
    fn report_fallbacks(&self, fallbacks: &[Fallback]) {
        let verbosity = self.verbosity;

        self.in_scope(|| {
            for fallback in fallbacks {
                match fallback {
                    Fallback::UnknownFormat(selector) => tracing::warn!(
                        selector = selector.as_str(),
                        fallback = %self.format,
                        "Unrecognized log format, falling back",
                    ),
                }
            }

            if !verbosity.is_known() {
                tracing::warn!(
                    verbosity = verbosity.level(),
                    effective = %verbosity.to_level_filter(),
                    "Verbosity level out of range, falling back",
                );
            }
        });
    }
}

impl Debug for LoggerBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("verbosity", &self.verbosity)
            .field("format", &self.format)
            .field("hooks", &self.hooks)
            .field("targets", &self.targets)
            .finish_non_exhaustive()
    }
}
