use minijinja::Environment;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

use crate::core::error::AppError;

/// Global template environment
static PAGE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

const PAGES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../../templates/pages/base.html")),
    (
        "dashboard.html",
        include_str!("../../../templates/pages/dashboard.html"),
    ),
    (
        "sentiments_preview.html",
        include_str!("../../../templates/pages/sentiments_preview.html"),
    ),
    (
        "gps_preview.html",
        include_str!("../../../templates/pages/gps_preview.html"),
    ),
    ("vlogs.html", include_str!("../../../templates/pages/vlogs.html")),
];

/// Errors that can occur during page rendering
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Page template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render page: {0}")]
    RenderError(String),
}

impl From<PageError> for AppError {
    fn from(e: PageError) -> Self {
        AppError::Internal(e.to_string())
    }
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for &(name, source) in PAGES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load page template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded page template: {}", name);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    PAGE_ENV.get_or_init(init_environment)
}

/// Render a page template with a serializable context.
pub fn render_page<S: Serialize>(name: &str, ctx: S) -> Result<String, PageError> {
    let template = get_environment()
        .get_template(name)
        .map_err(|_| PageError::NotFound(name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| PageError::RenderError(e.to_string()))
}
