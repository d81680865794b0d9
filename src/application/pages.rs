use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::application::error::HttpError;
use crate::template::{TemplateEngine, TemplateError};

const SOURCE: &str = "application::pages::PageService";

const HOME_TEMPLATE: &str = "home";
const NOT_FOUND_TEMPLATE: &str = "404";

/// Variable recognized by the page templates; an ordinary mapping entry with
/// no special engine semantics.
pub const SERVER_TIME_VAR: &str = "SERVER_TIME";

static SERVER_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Renders the site's pages through the template engine.
#[derive(Clone)]
pub struct PageService {
    engine: Arc<TemplateEngine>,
}

impl PageService {
    pub fn new(engine: Arc<TemplateEngine>) -> Self {
        Self { engine }
    }

    pub async fn home_page(&self) -> Result<String, HttpError> {
        let mut variables = HashMap::new();
        variables.insert(SERVER_TIME_VAR.to_string(), server_time_utc());

        self.engine
            .render(HOME_TEMPLATE, Some(&variables))
            .await
            .map_err(|err| template_failure("home_page", err))
    }

    pub async fn not_found_page(&self) -> Result<String, HttpError> {
        self.engine
            .render(NOT_FOUND_TEMPLATE, None)
            .await
            .map_err(|err| template_failure("not_found_page", err))
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }
}

fn template_failure(operation: &'static str, err: TemplateError) -> HttpError {
    match err {
        TemplateError::NotFound { .. } => HttpError::from_error(
            SOURCE,
            StatusCode::NOT_FOUND,
            "Page not found",
            &err,
        ),
        TemplateError::UnclosedTag { .. } => HttpError::new(
            SOURCE,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Page template is malformed",
            format!("{operation} failed: {err}"),
        ),
        TemplateError::Source(_) => HttpError::new(
            SOURCE,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load page template",
            format!("{operation} failed: {err}"),
        ),
    }
}

fn server_time_utc() -> String {
    OffsetDateTime::now_utc()
        .format(SERVER_TIME_FORMAT)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_time_uses_the_documented_shape() {
        let stamp = server_time_utc();
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[13..14], ":");
    }
}
