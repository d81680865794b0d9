//! Startup-cached static asset serving.

use std::path::Path;

use axum::{
    body::Body,
    http::{HeaderValue, StatusCode, header},
    response::Response,
};
use bytes::Bytes;

/// The site stylesheet, read from disk once at startup and served from memory
/// for the process lifetime.
pub struct Stylesheet {
    contents: Bytes,
}

impl Stylesheet {
    /// Read the stylesheet at `path`. Absence is not an error; the route then
    /// answers 404 until the process restarts.
    pub async fn load(path: &Path) -> Result<Option<Self>, std::io::Error> {
        match tokio::fs::read(path).await {
            Ok(contents) => Ok(Some(Self {
                contents: Bytes::from(contents),
            })),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn response(&self) -> Response {
        let bytes = self.contents.clone();
        let len = bytes.len();
        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = StatusCode::OK;

        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/css; charset=utf-8"),
        );
        if let Ok(value) = HeaderValue::from_str(&len.to_string()) {
            headers.insert(header::CONTENT_LENGTH, value);
        }
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600"),
        );
        response
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}
