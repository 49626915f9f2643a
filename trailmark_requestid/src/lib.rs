#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![cfg_attr(test, deny(warnings))]

/// Implements the [`RequestId`] token.
mod id;
pub use self::id::RequestId;

/// Implements the lookup of a [`RequestId`] from a record's context.
mod context;
pub use self::context::RequestContext;

/// Implements the [`RequestIdLayer`] that attaches identifiers to spans.
mod layer;
pub use self::layer::RequestIdLayer;

/// Name of the span field from which a [`RequestIdLayer`] picks up the
/// request identifier by default.
pub const REQUEST_ID_FIELD: &str = "request_id";

/// Target of the spans created by [`RequestId::span`]. Filters that should
/// always let request spans through can match on this target.
pub const SPAN_TARGET: &str = "trailmark_requestid";
