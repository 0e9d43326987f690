//! axum host adapter.
//!
//! Maps the response lifecycle onto terminal signals: body end-of-stream is
//! `finish`, a body error is `error`, and dropping the request future or the
//! body before either is `close`.

pub mod body;
pub mod middleware;

pub use body::InstrumentedBody;
pub use middleware::track_request;
