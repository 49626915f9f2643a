use crate::SPAN_TARGET;
use serde::{Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use tracing::Span;
use uuid::Uuid;

/// An opaque token that identifies one logical request. Cheap to clone.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId {
    value: Arc<str>,
}

impl RequestId {
    /// Wraps the given value as a [`RequestId`]. The value is taken verbatim.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Arc::from(value.into()),
        }
    }

    /// Generates a fresh random [`RequestId`] (a hyphenated UUID v4).
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Exposes the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Creates an `INFO` span named `request` that carries this identifier in
    /// its `request_id` field.
    ///
    /// Events emitted while the span is entered (or from within a future
    /// instrumented with it) are associated with this identifier, as long as
    /// the subscriber includes a [`RequestIdLayer`](crate::RequestIdLayer).
    pub fn span(&self) -> Span {
        tracing::span!(target: SPAN_TARGET, tracing::Level::INFO, "request", request_id = %self)
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl Debug for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RequestId").field(&self.as_str()).finish()
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for RequestId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Serialize for RequestId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
