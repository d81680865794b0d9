//! In-process route tests for the public router.

use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use featherlite::{
    application::pages::PageService,
    infra::{assets::Stylesheet, http},
    template::{FileTemplateSource, TemplateEngine},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn build_app(templates: &Path, stylesheet: Option<&Path>) -> Router {
    let engine = Arc::new(TemplateEngine::new(Arc::new(FileTemplateSource::new(
        templates,
    ))));
    let pages = Arc::new(PageService::new(engine));

    let stylesheet = match stylesheet {
        Some(path) => Stylesheet::load(path).await.expect("load css").map(Arc::new),
        None => None,
    };

    http::build_router(http::HttpState { pages, stylesheet })
}

fn site_fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("home.html"),
        "<h1>Home</h1><p>{{SERVER_TIME}}</p>",
    )
    .expect("write home");
    std::fs::write(dir.path().join("404.html"), "<h1>Lost</h1>").expect("write 404");
    std::fs::write(dir.path().join("style.css"), "body{margin:0}").expect("write css");
    dir
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[tokio::test]
async fn home_page_renders_with_server_time() {
    let dir = site_fixture();
    let app = build_app(dir.path(), Some(&dir.path().join("style.css"))).await;

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("text/html; charset=utf-8")
    );
    let body = body_string(response).await;
    assert!(body.contains("<h1>Home</h1>"));
    // The placeholder must be substituted, not echoed back.
    assert!(!body.contains("{{SERVER_TIME}}"));
}

#[tokio::test]
async fn stylesheet_is_served_from_startup_cache() {
    let dir = site_fixture();
    let css_path = dir.path().join("style.css");
    let app = build_app(dir.path(), Some(&css_path)).await;

    // Delete the file after startup; the cached copy must still be served.
    std::fs::remove_file(&css_path).expect("remove css");

    let response = app
        .oneshot(
            Request::get("/css/style.css")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("text/css; charset=utf-8")
    );
    assert_eq!(body_string(response).await, "body{margin:0}");
}

#[tokio::test]
async fn missing_stylesheet_answers_404() {
    let dir = site_fixture();
    let app = build_app(dir.path(), None).await;

    let response = app
        .oneshot(
            Request::get("/css/style.css")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_path_renders_the_404_template() {
    let dir = site_fixture();
    let app = build_app(dir.path(), None).await;

    let response = app
        .oneshot(Request::get("/nope").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("<h1>Lost</h1>"));
}

#[tokio::test]
async fn non_get_method_renders_the_404_template() {
    let dir = site_fixture();
    let app = build_app(dir.path(), None).await;

    let response = app
        .oneshot(Request::post("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("<h1>Lost</h1>"));
}

#[tokio::test]
async fn broken_404_template_falls_back_to_plain_text() {
    let dir = tempfile::tempdir().expect("tempdir");
    // No templates at all: the fallback handler cannot render the 404 page.
    let app = build_app(dir.path(), None).await;

    let response = app
        .oneshot(Request::get("/nope").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "Not Found");
}

#[tokio::test]
async fn missing_home_template_is_a_not_found_response() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("404.html"), "<h1>Lost</h1>").expect("write 404");
    let app = build_app(dir.path(), None).await;

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
