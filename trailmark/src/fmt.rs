use crate::{LevelHooks, LogFormat, Verbosity};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing_core::subscriber::Interest;
use tracing_core::{LevelFilter, Metadata, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::DefaultFields;
use tracing_subscriber::fmt::Layer as FmtLayer;
use tracing_subscriber::fmt::layer as make_fmt_layer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::{Context, Filter};
use tracing_subscriber::registry::LookupSpan;

/// Implements the event formatter that turns events into hooked records.
mod event;
pub(crate) use self::event::RecordFormat;

/// Renders records as (optionally colored) text lines.
mod text;

/// Renders records as JSON objects.
mod json;

/// Timestamp pattern shared by all formats: `DD-MM-YYYY HH:MM:SS`.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Creates the [formatted `Layer`](FmtLayer) that renders records in the given
/// format, running the given hooks on each of them.
pub(crate) fn make_layer<S>(
    format: LogFormat,
    hooks: Arc<LevelHooks>,
    writer: BoxMakeWriter,
    targets: Targets,
) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let base_layer: FmtLayer<S, DefaultFields, RecordFormat, BoxMakeWriter> = make_fmt_layer()
        .event_format(RecordFormat::new(format, hooks))
        .with_ansi(format.is_colored())
        .with_writer(writer);

    Box::new(base_layer.with_filter(EventTargets(targets)))
}

/// Creates the [per-target filter](Targets): the root verbosity and the custom
/// per-target overrides.
pub(crate) fn make_targets(
    verbosity: Verbosity,
    custom_targets: &BTreeMap<String, Verbosity>,
) -> Targets {
    Targets::new()
        .with_default(verbosity)
        .with_targets(custom_targets)
}

/// Applies [`Targets`] to events only. Spans of every level and target are
/// admitted, so that an event's scope (and its request context) is complete
/// regardless of verbosity.
struct EventTargets(Targets);

impl EventTargets {
    fn admits(&self, meta: &Metadata<'_>) -> bool {
        meta.is_span() || self.0.would_enable(meta.target(), meta.level())
    }
}

impl<S> Filter<S> for EventTargets {
    fn enabled(&self, meta: &Metadata<'_>, _: &Context<'_, S>) -> bool {
        self.admits(meta)
    }

    fn callsite_enabled(&self, meta: &'static Metadata<'static>) -> Interest {
        if self.admits(meta) {
            Interest::always()
        } else {
            Interest::never()
        }
    }

    fn max_level_hint(&self) -> Option<LevelFilter> {
        Some(LevelFilter::TRACE)
    }
}
