use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
};

use crate::{
    application::{error::ErrorReport, pages::PageService},
    infra::assets::Stylesheet,
};

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub pages: Arc<PageService>,
    pub stylesheet: Option<Arc<Stylesheet>>,
}

/// Three fixed routes; everything else, including other request methods on
/// known paths, falls through to the rendered 404 page.
pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/css/style.css", get(stylesheet))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn index(State(state): State<HttpState>) -> Response {
    match state.pages.home_page().await {
        Ok(html) => (StatusCode::OK, Html(html)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn stylesheet(State(state): State<HttpState>) -> Response {
    match state.stylesheet.as_ref() {
        Some(sheet) => sheet.response(),
        None => {
            let mut response = StatusCode::NOT_FOUND.into_response();
            ErrorReport::from_message(
                "infra::http::stylesheet",
                StatusCode::NOT_FOUND,
                "Stylesheet was not present at startup",
            )
            .attach(&mut response);
            response
        }
    }
}

async fn not_found(State(state): State<HttpState>) -> Response {
    match state.pages.not_found_page().await {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        // The 404 template itself failed; answer plainly rather than loop.
        Err(err) => {
            let mut response = (StatusCode::NOT_FOUND, "Not Found").into_response();
            ErrorReport::from_message(
                "infra::http::not_found",
                err.status(),
                "404 template could not be rendered",
            )
            .attach(&mut response);
            response
        }
    }
}
