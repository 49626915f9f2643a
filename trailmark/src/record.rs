use serde_json::{Number, Value};
use std::error::Error;
use std::fmt::Debug;
use tracing::field::{Field, Visit};
use tracing_core::{Event, Level};
use trailmark_requestid::RequestContext;

/// Structured fields of a [`Record`]. Keys are unique and kept sorted.
pub type FieldMap = serde_json::Map<String, Value>;

/// Name of the `tracing` field that carries the message of an event.
const MESSAGE_FIELD: &str = "message";

/// A single log record on its way from a `tracing` event to the output.
///
/// The [`Logger`](crate::Logger) builds a record for every event that passes
/// its filter, lets the registered [hooks](crate::Hook) mutate it, and then
/// renders it. Records can also be built by hand, which is mostly useful for
/// testing hooks.
pub struct Record<'a> {
    level: Level,
    message: String,
    target: &'a str,
    file: Option<&'a str>,
    line: Option<u32>,
    fields: FieldMap,
    context: Option<&'a dyn RequestContext>,
}

impl<'a> Record<'a> {
    /// Creates a record with the given level and message, an empty target, no
    /// caller, no fields, and no context.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            target: "",
            file: None,
            line: None,
            fields: FieldMap::new(),
            context: None,
        }
    }

    /// Builds a record out of a `tracing` event. The `message` field becomes
    /// the message, every other field lands in the field map.
    pub(crate) fn from_event(event: &Event<'_>, context: Option<&'a dyn RequestContext>) -> Self {
        let metadata = event.metadata();

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        Self {
            level: *metadata.level(),
            message: visitor.message.unwrap_or_default(),
            target: metadata.target(),
            file: metadata.file(),
            line: metadata.line(),
            fields: visitor.fields,
            context,
        }
    }

    /// Sets the target of this record.
    pub fn with_target(mut self, target: &'a str) -> Self {
        self.target = target;

        self
    }

    /// Sets the caller (source file and line) of this record.
    pub fn with_caller(mut self, file: &'a str, line: u32) -> Self {
        self.file = Some(file);
        self.line = Some(line);

        self
    }

    /// Inserts a structured field into this record.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());

        self
    }

    /// Associates this record with the given request context.
    pub fn with_context(mut self, context: &'a dyn RequestContext) -> Self {
        self.context = Some(context);

        self
    }
}

impl<'a> Record<'a> {
    /// Reports the severity of this record.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Reports the message of this record.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Reports the target (usually the module path) of this record.
    pub fn target(&self) -> &'a str {
        self.target
    }

    /// Reports the source file this record was emitted from, if known.
    pub fn file(&self) -> Option<&'a str> {
        self.file
    }

    /// Reports the source line this record was emitted from, if known.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// Exposes the structured fields of this record.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Exposes the structured fields of this record for mutation.
    pub fn fields_mut(&mut self) -> &mut FieldMap {
        &mut self.fields
    }

    /// Reports the request context this record was emitted in. Records
    /// emitted outside of any span have no context.
    pub fn context(&self) -> Option<&'a dyn RequestContext> {
        self.context
    }
}

impl Debug for Record<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Record")
            .field("level", &self.level)
            .field("message", &self.message)
            .field("target", &self.target)
            .field("file", &self.file)
            .field("line", &self.line)
            .field("fields", &self.fields)
            .field("has_context", &self.context.is_some())
            .finish()
    }
}

/// Collects the fields of a `tracing` event into a [`FieldMap`], pulling the
/// message out separately.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: FieldMap,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        let value = Number::from_f64(value).map_or(Value::Null, Value::Number);
        self.insert(field, value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == MESSAGE_FIELD {
            self.message = Some(value.to_string());
        } else {
            self.insert(field, Value::String(value.to_string()));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn Error + 'static)) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        let value = format!("{value:?}");

        if field.name() == MESSAGE_FIELD {
            self.message = Some(value);
        } else {
            self.insert(field, Value::String(value));
        }
    }
}
