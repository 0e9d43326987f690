//! Demo router wiring.
//!
//! A handful of routes shaped like the ones the interceptor was built for,
//! instrumented as a whole.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::interceptor::Interceptor;

/// 1x1 transparent GIF.
const PIXEL: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xff, 0xff, 0xff, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
];

pub fn build_router(interceptor: &Interceptor) -> Router {
    let routes = Router::new()
        .route("/pixel/:app/:batchId/:userId.png", get(pixel))
        .route("/resources", get(list_resources).post(create_resource))
        .route("/resources/:model", get(get_resource));
    interceptor.instrument(routes)
}

async fn pixel() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/gif")], PIXEL)
}

async fn list_resources() -> impl IntoResponse {
    "[]"
}

async fn create_resource() -> impl IntoResponse {
    StatusCode::CREATED
}

async fn get_resource(Path(model): Path<String>) -> impl IntoResponse {
    if model.is_empty() {
        return (StatusCode::NOT_FOUND, String::new());
    }
    (StatusCode::OK, model)
}
