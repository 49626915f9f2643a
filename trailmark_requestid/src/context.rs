use crate::RequestId;
use tracing_subscriber::registry::{LookupSpan, SpanRef};

/// Something that may know which request it belongs to.
///
/// This is the lookup consumed by logging hooks: given the context of a log
/// record, report the [`RequestId`] if there is one. Absence is not an error.
pub trait RequestContext {
    /// Reports the [`RequestId`] associated with this context, if any.
    fn request_id(&self) -> Option<RequestId>;
}

/// A span knows its request if it, or any of its ancestors, had a
/// [`RequestId`] attached by the [`RequestIdLayer`](crate::RequestIdLayer).
/// The innermost identifier wins.
impl<'a, R> RequestContext for SpanRef<'a, R>
where
    R: LookupSpan<'a>,
{
    fn request_id(&self) -> Option<RequestId> {
        self.scope().find_map(|span| {
            let extensions = span.extensions();
            extensions.get::<RequestId>().cloned()
        })
    }
}

impl RequestContext for RequestId {
    fn request_id(&self) -> Option<RequestId> {
        Some(self.clone())
    }
}

impl<T> RequestContext for Option<T>
where
    T: RequestContext,
{
    fn request_id(&self) -> Option<RequestId> {
        self.as_ref().and_then(RequestContext::request_id)
    }
}
