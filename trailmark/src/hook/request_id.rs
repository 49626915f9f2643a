use crate::{Hook, HookError, Record};
use serde_json::Value;
use tracing_core::Level;

/// Key under which the [`RequestIdHook`] stores the request identifier.
pub const REQUEST_ID_KEY: &str = "requestId";

/// A [`Hook`] that copies the request identifier from a record’s context into
/// the record’s fields, under the [`requestId`](REQUEST_ID_KEY) key.
///
/// The context of a record emitted through a [`Logger`](crate::Logger) is the
/// span scope of the event; see
/// [`trailmark_requestid`](trailmark_requestid) for ways to attach an
/// identifier to a span.
///
/// This hook never fails: a record without context, or a context without an
/// identifier, is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdHook {
    levels: Vec<Level>,
}

impl RequestIdHook {
    /// Creates a hook that runs at the given levels, kept in the given order.
    pub fn new(levels: impl IntoIterator<Item = Level>) -> Self {
        Self {
            levels: levels.into_iter().collect(),
        }
    }
}

impl Hook for RequestIdHook {
    fn levels(&self) -> &[Level] {
        &self.levels
    }

    fn fire(&self, record: &mut Record<'_>) -> Result<(), HookError> {
        let Some(context) = record.context() else {
            return Ok(());
        };

        let Some(request_id) = context.request_id() else {
            return Ok(());
        };

        record.fields_mut().insert(
            REQUEST_ID_KEY.to_string(),
            Value::String(request_id.as_str().to_string()),
        );

        Ok(())
    }
}
