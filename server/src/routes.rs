//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host only renders the portal and serves its compiled assets. All data
//! lives behind the admissions backend, the welcome API, and Firebase, which
//! the browser calls directly.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{ServerConfig, ServerError};

/// Load Leptos options from `[package.metadata.leptos]` (or the `LEPTOS_*`
/// variables cargo-leptos exports) and apply host overrides.
///
/// # Errors
///
/// Returns `Leptos` when the configuration cannot be loaded.
pub fn leptos_options(config: &ServerConfig) -> Result<LeptosOptions, ServerError> {
    let conf = get_configuration(None).map_err(|e| ServerError::Leptos(e.to_string()))?;
    let mut options = conf.leptos_options;
    options.site_addr = config.bind_addr();
    if let Some(root) = &config.site_root {
        options.site_root = root.to_string_lossy().into_owned().into();
    }
    Ok(options)
}

/// Leptos SSR routes, `/pkg` assets, and the health check.
pub fn app(options: LeptosOptions) -> Router {
    let routes = generate_route_list(portal::app::App);
    let site_root = PathBuf::from(options.site_root.as_ref());

    let leptos_router = Router::new()
        .leptos_routes(&options, routes, {
            let opts = options.clone();
            move || portal::app::shell(opts.clone())
        })
        .with_state(options);

    base_routes(&site_root)
        .merge(leptos_router)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

fn base_routes(site_root: &std::path::Path) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .nest_service("/pkg", ServeDir::new(site_root.join("pkg")))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
