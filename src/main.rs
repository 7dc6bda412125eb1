mod app;
mod config;
mod domain;
mod models;
mod ui;

use anyhow::{Context, Result};
use gpui::{App, Application};
use tracing_subscriber::EnvFilter;

use crate::config::TrainerConfig;
use crate::domain::Catalog;
use crate::ui::FileAssets;

const DEFAULT_LOG_FILTER: &str = "opening_trainer=info";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    // Print the JSON Schema of the openings file for catalog authors
    if std::env::args().any(|arg| arg == "--catalog-schema") {
        let schema = Catalog::json_schema().context("failed to build catalog schema")?;
        let schema =
            serde_json::to_string_pretty(&schema).context("failed to render catalog schema")?;
        println!("{schema}");
        return Ok(());
    }

    let config = TrainerConfig::load().context("failed to load trainer configuration")?;
    tracing::info!(?config, "starting opening trainer");

    Application::new()
        .with_assets(FileAssets::new(config.assets_dir.clone()))
        .run(move |cx: &mut App| app::run(cx, config));

    Ok(())
}
