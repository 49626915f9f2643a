use crate::fmt::{TIMESTAMP_FORMAT, json, text};
use crate::{LevelHooks, LogFormat, Record};
use chrono::Local;
use std::fmt;
use std::sync::Arc;
use tracing_core::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;
use trailmark_requestid::RequestContext;

/// An [event formatter](FormatEvent) that turns every event into a [`Record`],
/// fires the registered hooks on it, and renders the result in the chosen
/// [`LogFormat`].
///
/// The record’s context is the event’s innermost span, if there is one.
pub(crate) struct RecordFormat {
    format: LogFormat,
    hooks: Arc<LevelHooks>,
}

impl RecordFormat {
    pub(crate) fn new(format: LogFormat, hooks: Arc<LevelHooks>) -> Self {
        Self { format, hooks }
    }
}

impl<S, N> FormatEvent<S, N> for RecordFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let leaf = ctx.event_scope().and_then(|mut scope| scope.next());
        let context = leaf.as_ref().map(|span| span as &dyn RequestContext);

        let mut record = Record::from_event(event, context);
        self.hooks.fire(&mut record);

        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

        match self.format {
            LogFormat::Json => json::write_record(&mut writer, &record, &timestamp),
            LogFormat::Text => text::write_record(&mut writer, &record, &timestamp, false),
            LogFormat::Colored => {
                let ansi = writer.has_ansi_escapes();
                text::write_record(&mut writer, &record, &timestamp, ansi)
            }
        }
    }
}
