use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use routestat_core::naming::RouteDescriptor;

use crate::http::body::InstrumentedBody;
use crate::interceptor::Interceptor;

/// Route descriptor for a request: the matched template plus the method.
pub fn route_of(req: &Request) -> Option<RouteDescriptor> {
    req.extensions()
        .get::<MatchedPath>()
        .map(|matched| RouteDescriptor::new(matched.as_str(), req.method().as_str()))
}

/// Arms a lifecycle, runs the rest of the chain unmodified, and hands the
/// lifecycle to the response body.
///
/// If this future is dropped while `next` is still running, the lifecycle is
/// dropped with it and the request counts as closed.
pub async fn track_request(
    State(interceptor): State<Interceptor>,
    req: Request,
    next: Next,
) -> Response {
    let lifecycle = interceptor.begin(route_of(&req));
    let method = req.method().clone();
    let response = next.run(req).await;
    InstrumentedBody::wrap(response, &method, lifecycle)
}
