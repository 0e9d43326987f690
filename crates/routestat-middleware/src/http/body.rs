use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Method, StatusCode};
use axum::response::Response;
use bytes::Bytes;
use http_body::{Body as HttpBody, Frame, SizeHint};

use crate::lifecycle::RequestLifecycle;

/// Response body that reports its own completion to a [`RequestLifecycle`].
pub struct InstrumentedBody {
    inner: Body,
    lifecycle: RequestLifecycle,
    status: u16,
}

impl InstrumentedBody {
    /// Move `lifecycle` into the body of `response`.
    ///
    /// Responses whose body is never sent (HEAD, 1xx, 204, 304) or is already
    /// empty finish here, when the head is produced; this stands in for "fully
    /// written" because the server may discard such a body without polling it.
    pub fn wrap(response: Response, method: &Method, mut lifecycle: RequestLifecycle) -> Response {
        let (parts, body) = response.into_parts();
        let status = parts.status.as_u16();

        if body.is_end_stream() || !sends_body(method, parts.status) {
            lifecycle.finish(Some(status));
            return Response::from_parts(parts, body);
        }

        let body = Body::new(InstrumentedBody {
            inner: body,
            lifecycle,
            status,
        });
        Response::from_parts(parts, body)
    }
}

/// Whether a server writes the body of this response at all.
pub fn sends_body(method: &Method, status: StatusCode) -> bool {
    !(*method == Method::HEAD
        || status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::NOT_MODIFIED)
}

impl HttpBody for InstrumentedBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        let polled = Pin::new(&mut this.inner).poll_frame(cx);

        match &polled {
            Poll::Ready(None) => {
                this.lifecycle.finish(Some(this.status));
            }
            Poll::Ready(Some(Err(_))) => {
                this.lifecycle.error();
            }
            // Servers stop polling once the body reports end-of-stream.
            Poll::Ready(Some(Ok(_))) if this.inner.is_end_stream() => {
                this.lifecycle.finish(Some(this.status));
            }
            _ => {}
        }

        polled
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}
