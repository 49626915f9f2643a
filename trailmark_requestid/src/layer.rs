use crate::{RequestId, REQUEST_ID_FIELD};
use std::fmt::Debug;
use tracing::field::{Field, Visit};
use tracing_core::span::{Attributes, Id, Record};
use tracing_core::Subscriber;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// A [`Layer`] that watches span fields for a request identifier and stores
/// it in the span's extensions as a [`RequestId`].
///
/// The field is picked up both when the span is created and when it is
/// recorded later (e.g., `span.record("request_id", "abc")` on a span declared
/// with `request_id = tracing::field::Empty`).
#[derive(Debug, Clone, Copy)]
pub struct RequestIdLayer {
    field_name: &'static str,
}

impl RequestIdLayer {
    /// Creates a layer that watches the [default](REQUEST_ID_FIELD) field name.
    pub fn new() -> Self {
        Self {
            field_name: REQUEST_ID_FIELD,
        }
    }

    /// Creates a layer that watches the given field name instead of the
    /// default one.
    pub fn with_field_name(field_name: &'static str) -> Self {
        Self { field_name }
    }

    /// Reports the span field name watched by this layer.
    pub fn field_name(&self) -> &'static str {
        self.field_name
    }
}

impl Default for RequestIdLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for RequestIdLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut visitor = RequestIdVisitor::new(self.field_name);
        attrs.record(&mut visitor);

        store(visitor.found, id, &ctx);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let mut visitor = RequestIdVisitor::new(self.field_name);
        values.record(&mut visitor);

        store(visitor.found, id, &ctx);
    }
}

/// Puts the found identifier (if any) into the extensions of the span with
/// the given ID, replacing a previously stored one.
fn store<S>(found: Option<RequestId>, id: &Id, ctx: &Context<'_, S>)
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let Some(request_id) = found else {
        return;
    };

    if let Some(span) = ctx.span(id) {
        span.extensions_mut().replace(request_id);
    }
}

/// Visits span fields looking for the one with the watched name.
struct RequestIdVisitor {
    field_name: &'static str,
    found: Option<RequestId>,
}

impl RequestIdVisitor {
    fn new(field_name: &'static str) -> Self {
        Self {
            field_name,
            found: None,
        }
    }
}

impl Visit for RequestIdVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == self.field_name {
            self.found = Some(RequestId::new(value));
        }
    }

    /// Display values (`request_id = %id`) and numbers arrive here.
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == self.field_name {
            self.found = Some(RequestId::new(format!("{value:?}")));
        }
    }
}
