mod config;
mod engine;
mod model;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::engine::llm_client::GeminiClient;
use crate::ui::app::{AdventureApp, APP_TITLE};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "infinite_adventure=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("refusing to start")?;
    let client = Arc::new(GeminiClient::new(&config).context("failed to build HTTP client")?);

    tracing::info!(
        text_model = %config.text_model,
        image_model = %config.image_model,
        "starting {APP_TITLE}"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(AdventureApp::new(cc, &config, client)))),
    )
    .map_err(|e| anyhow::anyhow!("window closed with an error: {e}"))
}
