use std::{process, sync::Arc};

use featherlite::{
    application::{error::AppError, pages::PageService},
    config,
    infra::{assets::Stylesheet, error::InfraError, http, telemetry},
    template::{FileTemplateSource, TemplateEngine, TemplateError, TemplateSource},
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(config::ServeArgs::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Check(_) => run_check(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let source = Arc::new(FileTemplateSource::new(settings.templates.directory.clone()));
    let engine = Arc::new(TemplateEngine::new(source));
    let pages = Arc::new(PageService::new(engine));

    let stylesheet = Stylesheet::load(&settings.assets.stylesheet)
        .await
        .map_err(InfraError::Io)?
        .map(Arc::new);
    match &stylesheet {
        Some(sheet) => info!(
            target = "featherlite::serve",
            path = %settings.assets.stylesheet.display(),
            bytes = sheet.len(),
            "Cached stylesheet at startup"
        ),
        None => warn!(
            target = "featherlite::serve",
            path = %settings.assets.stylesheet.display(),
            "Stylesheet missing; /css/style.css will answer 404"
        ),
    }

    let state = http::HttpState { pages, stylesheet };
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(InfraError::Io)?;

    info!(
        target = "featherlite::serve",
        addr = %settings.server.addr,
        templates = %settings.templates.directory.display(),
        "Listening"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    }
}

/// Compile every `*.html` template under the configured directory, reporting
/// each malformed one. Exits non-zero when any template fails to compile.
async fn run_check(settings: config::Settings) -> Result<(), AppError> {
    let directory = settings.templates.directory;
    let source = Arc::new(FileTemplateSource::new(directory.clone()));
    let engine = TemplateEngine::new(source.clone());

    let mut reader = tokio::fs::read_dir(&directory).await.map_err(|err| {
        AppError::unexpected(format!(
            "failed to read templates directory `{}`: {err}",
            directory.display()
        ))
    })?;

    let mut checked = 0usize;
    let mut failed = 0usize;

    while let Some(entry) = reader.next_entry().await.map_err(InfraError::Io)? {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("html") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };

        checked += 1;
        match engine.compile(name).await {
            Ok(()) => info!(
                target = "featherlite::check",
                template = name,
                "Template compiled"
            ),
            Err(TemplateError::UnclosedTag { offset }) => {
                failed += 1;
                error!(
                    target = "featherlite::check",
                    template = name,
                    path = %source.location(name),
                    offset,
                    "Unclosed variable tag"
                );
            }
            Err(err) => {
                failed += 1;
                error!(
                    target = "featherlite::check",
                    template = name,
                    error = %err,
                    "Template failed to compile"
                );
            }
        }
    }

    info!(
        target = "featherlite::check",
        checked,
        failed,
        "Template check complete"
    );

    if failed > 0 {
        return Err(AppError::validation(format!(
            "{failed} of {checked} templates failed to compile"
        )));
    }
    Ok(())
}
