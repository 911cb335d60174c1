use std::path::PathBuf;

use anyhow::Context as _;
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{MethodRouter, get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::catalog::is_valid_id;
use crate::cli::ServeArgs;
use crate::export::NOT_FOUND_PAGE;
use crate::router::Route;

#[derive(Debug, Clone)]
struct SiteState {
    site_dir: PathBuf,
}

/// Serves an exported site. Exported files are served as-is; every other
/// path is resolved like the in-app router: unknown project ids get the
/// not-found page, anything else falls back to the catalog.
pub fn router(site_dir: PathBuf) -> Router {
    let pages: MethodRouter = get(resolve_page).with_state(SiteState {
        site_dir: site_dir.clone(),
    });

    Router::new()
        .route("/healthz", get(|| async { "ok\n" }))
        .fallback_service(ServeDir::new(site_dir).fallback(pages))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let site_dir = PathBuf::from(&args.site);
    if !site_dir.join("index.html").is_file() {
        anyhow::bail!(
            "no exported site in {} (run `devshowcase export --out {}` first)",
            site_dir.display(),
            site_dir.display()
        );
    }

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {}: {err}", args.addr))?;
    tracing::info!(addr = %args.addr, site = %site_dir.display(), "listening");

    axum::serve(listener, router(site_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn resolve_page(State(state): State<SiteState>, uri: Uri) -> Response {
    let (status, path) = match Route::resolve(uri.path()) {
        Route::Home => (StatusCode::OK, state.site_dir.join("index.html")),
        Route::Project { id } => {
            let page = state.site_dir.join("project").join(&id).join("index.html");
            let exported = is_valid_id(&id)
                && tokio::fs::metadata(&page)
                    .await
                    .is_ok_and(|meta| meta.is_file());
            if exported {
                (StatusCode::OK, page)
            } else {
                tracing::debug!(id = %id, "unknown project");
                (StatusCode::NOT_FOUND, state.site_dir.join(NOT_FOUND_PAGE))
            }
        }
    };

    match tokio::fs::read_to_string(&path).await {
        Ok(body) => (status, Html(body)).into_response(),
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "read site page");
            (StatusCode::INTERNAL_SERVER_ERROR, "site page missing\n").into_response()
        }
    }
}
